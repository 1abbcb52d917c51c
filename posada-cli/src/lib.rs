//! Library exports for posada-cli.
//!
//! The binary is a thin wrapper around [`run`]; keeping the commands in a
//! library lets tests drive the clap definition directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;

use cli::Command;
use error::CliError;
use utils::GlobalOptions;

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let logger = posada::init_logger(cli.verbose, cli.quiet);
    logger.install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        logger,
    };

    match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Hotel(cmd) => cmd.execute(&global),
        Command::Room(cmd) => cmd.execute(&global),
        Command::Available(cmd) => cmd.execute(&global),
        Command::Book(cmd) => cmd.execute(&global),
        Command::Confirm(cmd) => cmd.execute(&global),
        Command::BulkConfirm(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::BulkCancel(cmd) => cmd.execute(&global),
        Command::Reject(cmd) => cmd.execute(&global),
        Command::Reassign(cmd) => cmd.execute(&global),
        Command::Alternatives(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::Notes(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Guests(cmd) => cmd.execute(&global),
        Command::Dashboard(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    }
}
