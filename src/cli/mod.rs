// CLI module
// Command-line interface, argument parsing and the configuration file

mod args;
mod config;

pub use args::{CliArgs, StrategyType};
pub use config::TargetConfig;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing `--config`, or `--help`),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
