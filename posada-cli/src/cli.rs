//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AlternativesCommand, AvailableCommand, BookCommand, BulkCancelCommand, BulkConfirmCommand,
    CancelCommand, CompletionsCommand, ConfirmCommand, DashboardCommand, GuestsCommand,
    HotelCommand, InitCommand, ListCommand, NotesCommand, ReassignCommand, RejectCommand,
    RoomCommand, ShowCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front-desk tool for hotel room availability and reservations.
#[derive(Parser)]
#[command(name = "posada")]
#[command(version, about = "Manage hotel rooms and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "POSADA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "POSADA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Fail instead of creating a missing database
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and database
    Init(InitCommand),

    /// Manage hotels
    #[command(subcommand)]
    Hotel(HotelCommand),

    /// Manage rooms
    #[command(subcommand)]
    Room(RoomCommand),

    /// List rooms free on a date
    Available(AvailableCommand),

    /// Book a room
    Book(BookCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Confirm several pending reservations
    BulkConfirm(BulkConfirmCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Cancel several reservations
    BulkCancel(BulkCancelCommand),

    /// Reject a pending reservation
    Reject(RejectCommand),

    /// Move a reservation to another room
    Reassign(ReassignCommand),

    /// List rooms a reservation could move to
    Alternatives(AlternativesCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Replace the admin notes of a reservation
    Notes(NotesCommand),

    /// List reservations
    List(ListCommand),

    /// List guests
    Guests(GuestsCommand),

    /// Front-desk overview
    Dashboard(DashboardCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
