use anyhow::Result;
use clap::Args;
use colored::*;

use crate::cli::AppContext;
use crate::router::{self, Navigation};

#[derive(Args)]
pub struct RouteCommands {
    /// Dashboard path, e.g. "/profile"
    pub path: String,
}

pub fn route_command(args: RouteCommands, ctx: &AppContext) -> Result<()> {
    let logged_in = ctx.tokens.is_logged_in();
    let route = router::resolve(&args.path);

    let label = match route {
        Some(route) => format!("{} ({:?})", route.path, route.access),
        None => format!("{} (unguarded)", args.path),
    };

    match router::guard(&args.path, logged_in) {
        Navigation::Proceed => println!("{} {}", "→".bright_green(), label),
        Navigation::Redirect(target) => {
            println!("{} {} redirects to {}", "↪".bright_yellow(), label, target.cyan())
        }
    }

    Ok(())
}
