mod alerts;
mod components;

pub use alerts::{print_config_error, print_timeout_notice};
pub use components::{
    method_list, payment_rows, print_cases, print_chains, print_outcome, print_protocols,
    request_rows,
};
use owo_colors::OwoColorize;

pub const fn app_name() -> &'static str {
    "w3n-harness"
}

pub fn build_banner() -> String {
    let indent = "  ";
    let version = env!("CARGO_PKG_VERSION");

    let name = "W3N HARNESS".bright_cyan().bold().to_string();
    let sep = "•".dimmed().to_string();
    let desc = "Multi-chain name resolution test bench".white().to_string();
    let ver = format!("v{version}").bright_yellow().to_string();
    let line = format!("{indent}{}", "━".repeat(60).dimmed());

    format!(
        "\n{line}\n\
         {indent}{name} {sep} {desc} {sep} {ver}\n\
         {line}"
    )
}

pub fn print_version() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "{} {} {}\n",
        app_name().bright_cyan(),
        format!("v{version}").bright_yellow(),
        std::env::consts::ARCH.dimmed(),
    );
}
