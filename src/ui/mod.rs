pub mod format;
pub mod spinner;

pub use format::{format_date, format_datetime, format_time};
pub use spinner::Spinner;
