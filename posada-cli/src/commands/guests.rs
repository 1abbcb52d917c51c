//! Guests command implementation.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, resolve_format, FormatArg, GlobalOptions,
    Listing,
};
use clap::Parser;
use posada::Database;

const HEADERS: [&str; 5] = ["id", "name", "email", "phone", "created_at"];

/// List guests by name.
#[derive(Parser)]
pub struct GuestsCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl GuestsCommand {
    /// Execute the guests command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let guests = Database::list_guests(db.connection())?;
        Listing::new(&HEADERS, &guests, |g| {
            vec![
                g.id.to_string(),
                g.name.clone(),
                g.email.clone(),
                g.phone.clone(),
                format_timestamp(g.created_at),
            ]
        })
        .print(resolve_format(self.format, &config))
    }
}
