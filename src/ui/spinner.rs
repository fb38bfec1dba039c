//! Progress indicator for store fetches

use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

use crate::store::FetchStatus;

const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Animated indicator on stderr, drawn while a store reports `loading`.
///
/// Stops when the store finishes or when dropped. Nothing is drawn when
/// stderr is not a terminal, so piped output stays clean.
pub struct Spinner {
    handle: Option<tokio::task::JoinHandle<()>>,
    /// Set while a frame is on screen
    drawn: Arc<AtomicBool>,
}

impl Spinner {
    pub fn follow(message: impl Into<String>, status: watch::Receiver<FetchStatus>) -> Self {
        if !io::stderr().is_terminal() {
            return Self {
                handle: None,
                drawn: Arc::new(AtomicBool::new(false)),
            };
        }

        Self::spawn(message.into(), status)
    }

    fn spawn(message: String, status: watch::Receiver<FetchStatus>) -> Self {
        let drawn = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(Self::run(message, status, drawn.clone()));
        Self {
            handle: Some(handle),
            drawn,
        }
    }

    async fn run(message: String, mut status: watch::Receiver<FetchStatus>, drawn: Arc<AtomicBool>) {
        // Wait for the fetch to start; a cache hit never flips `loading`
        while !status.borrow_and_update().loading {
            if status.changed().await.is_err() {
                return;
            }
        }

        let mut frame = 0;
        loop {
            let spinner_char = SPINNER_CHARS[frame % SPINNER_CHARS.len()];
            eprint!("\r{} {}", spinner_char, message);
            let _ = io::stderr().flush();
            drawn.store(true, Ordering::SeqCst);
            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(SPINNER_INTERVAL) => {},
                changed = status.changed() => {
                    if changed.is_err() || !status.borrow_and_update().loading {
                        break;
                    }
                }
            }
        }

        if drawn.swap(false, Ordering::SeqCst) {
            clear_line();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if self.drawn.swap(false, Ordering::SeqCst) {
            clear_line();
        }
    }
}

fn clear_line() {
    eprint!("\r\x1b[K");
    let _ = io::stderr().flush();
}
