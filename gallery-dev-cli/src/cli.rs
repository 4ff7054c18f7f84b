//! CLI argument definitions

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use gallery_dev_core::Operation;

#[derive(Parser, Debug)]
#[command(name = "gallery-dev")]
#[command(about = "Utilities for working on Simple File Gallery", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[arg(
        value_name = "COMMAND",
        value_parser = PossibleValuesParser::new(Operation::NAMES)
            .try_map(|name| name.parse::<Operation>())
    )]
    pub command: Operation,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail when a delegated command exits unsuccessfully
    #[arg(long)]
    pub strict: bool,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse the process arguments, exiting on error
    ///
    /// An unknown command also gets the usage line, which clap leaves out for
    /// invalid values.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            if err.kind() != ErrorKind::InvalidValue {
                err.exit();
            }
            eprint!("{}", with_usage(&err));
            std::process::exit(err.exit_code());
        })
    }
}

/// Error text followed by the usage line
fn with_usage(err: &clap::Error) -> String {
    format!("{err}\n{}\n", Cli::command().render_usage())
}
