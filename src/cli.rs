//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to window and dataset services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_names, format_plan, format_resolve, format_scan, format_validation,
};
pub use route::{command_name, RunContext};
