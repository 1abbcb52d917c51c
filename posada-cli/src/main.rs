//! Main entry point for the posada CLI.

use clap::Parser;
use posada_cli::Cli;

/// Exit code for a command line clap could not parse.
const EXIT_INVALID_ARGUMENTS: i32 = 4;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout.
            let code = if e.use_stderr() { EXIT_INVALID_ARGUMENTS } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match posada_cli::run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
