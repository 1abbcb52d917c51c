//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `hotel`, `room`: Maintain the catalog
//! - `available`: Free rooms on a date
//! - `book`: Create a reservation
//! - `confirm`, `bulk-confirm`: Promote pending reservations
//! - `cancel`, `bulk-cancel`, `reject`: End reservations
//! - `reassign`, `alternatives`: Move a reservation between rooms
//! - `show`, `notes`, `list`: Inspect and annotate reservations
//! - `guests`: The guest directory
//! - `dashboard`: Front-desk overview
//! - `completions`: Shell completion scripts

pub mod available;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod confirm;
pub mod dashboard;
pub mod guests;
pub mod hotel;
pub mod init;
pub mod list;
pub mod reassign;
pub mod room;
pub mod show;

pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cancel::{BulkCancelCommand, CancelCommand, RejectCommand};
pub use completions::CompletionsCommand;
pub use confirm::{BulkConfirmCommand, ConfirmCommand};
pub use dashboard::DashboardCommand;
pub use guests::GuestsCommand;
pub use hotel::HotelCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reassign::{AlternativesCommand, ReassignCommand};
pub use room::RoomCommand;
pub use show::{NotesCommand, ShowCommand};
