//! Dashboard command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_date, print_json, resolve_format, today, FormatArg,
    GlobalOptions, Listing,
};
use clap::Parser;
use posada::config::OutputFormat;
use posada::DashboardSummary;

const PENDING_HEADERS: [&str; 3] = ["hotel", "name", "pending"];

/// Front-desk overview for a day.
#[derive(Parser)]
pub struct DashboardCommand {
    /// Day to report on (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl DashboardCommand {
    /// Execute the dashboard command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let day = match &self.date {
            Some(date) => parse_date(date)?,
            None => today(),
        };
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let summary = DashboardSummary::gather(db.connection(), day)?;

        match resolve_format(self.format, &config) {
            OutputFormat::Json => print_json(&summary),
            OutputFormat::Csv => Listing::new(&PENDING_HEADERS, &summary.hotels_with_pending, |h| {
                vec![h.id.to_string(), h.name.clone(), h.pending.to_string()]
            })
            .print(OutputFormat::Csv),
            OutputFormat::Table => {
                println!("Dashboard for {}", summary.today);
                println!("  Pending:            {}", summary.pending);
                println!("  Confirmed today:    {}", summary.confirmed_today);
                println!("  Confirmed this week: {}", summary.confirmed_upcoming);
                println!("  Free rooms today:   {}", summary.free_rooms_today);
                println!(
                    "  Catalog:            {} hotel(s), {} room(s), {} guest(s)",
                    summary.hotels, summary.rooms, summary.guests
                );
                if !summary.hotels_with_pending.is_empty() {
                    println!();
                    Listing::new(&PENDING_HEADERS, &summary.hotels_with_pending, |h| {
                        vec![h.id.to_string(), h.name.clone(), h.pending.to_string()]
                    })
                    .print(OutputFormat::Table)?;
                }
                Ok(())
            }
        }
    }
}
