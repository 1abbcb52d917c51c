//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns a temporary directory that serves as both the
//! working directory and the parent of the data directory, so no config
//! file from the surrounding checkout leaks into a test.

use assert_cmd::Command;
use chrono::{Days, Local, NaiveDate};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
    /// Path to the posada data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("posada-data");
        Self { temp_dir, data_dir }
    }

    /// A command with only the binary and the working directory set.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("posada").expect("Failed to find posada binary");
        cmd.current_dir(self.temp_dir.path());
        for var in [
            "POSADA_DATA_DIR",
            "POSADA_BUSY_TIMEOUT",
            "POSADA_BOOKING_WINDOW_DAYS",
            "POSADA_AUTO_GENERATE_ROOMS",
            "POSADA_MAXIMUM_LOCK_WAIT_SECONDS",
            "POSADA_DISABLE_AUTOINIT",
            "POSADA_OUTPUT_FORMAT",
            "POSADA_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the working directory.
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Run a command that must succeed and return its stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run posada");
        assert!(
            output.status.success(),
            "posada {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Add a hotel without generated rooms and return its id.
    pub fn add_hotel(&self, name: &str) -> i64 {
        let stdout = self.run_ok(&[
            "hotel",
            "add",
            "--name",
            name,
            "--address",
            "Calle 1",
            "--no-generate",
        ]);
        // "Created hotel <id> (<name>): ..."
        stdout
            .split_whitespace()
            .nth(2)
            .and_then(|id| id.parse().ok())
            .unwrap_or_else(|| panic!("unexpected hotel add output: {stdout}"))
    }

    /// Add a room and return its id.
    pub fn add_room(&self, hotel: i64, number: &str, capacity: u32) -> i64 {
        let stdout = self.run_ok(&[
            "room",
            "add",
            "--hotel",
            &hotel.to_string(),
            "--number",
            number,
            "--capacity",
            &capacity.to_string(),
        ]);
        // "Added room <number> (id <id>) to hotel ..."
        stdout
            .split("(id ")
            .nth(1)
            .and_then(|rest| rest.split(')').next())
            .and_then(|id| id.parse().ok())
            .unwrap_or_else(|| panic!("unexpected room add output: {stdout}"))
    }

    /// Book as the given guest email; `extra` is appended verbatim.
    pub fn book(&self, hotel: i64, date: &str, party: u32, email: &str, extra: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.args([
            "book",
            "--hotel",
            &hotel.to_string(),
            "--date",
            date,
            "--party-size",
            &party.to_string(),
            "--name",
            "Test Guest",
            "--email",
            email,
            "--phone",
            "555-0100",
        ])
        .args(extra);
        cmd
    }

    /// Book and return the new reservation id.
    pub fn book_ok(&self, hotel: i64, date: &str, party: u32, email: &str, extra: &[&str]) -> i64 {
        let output = self
            .book(hotel, date, party, email, extra)
            .output()
            .expect("Failed to run book");
        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        reservation_id(&stdout)
    }
}

/// The reservation id printed first by `book`.
pub fn reservation_id(stdout: &str) -> i64 {
    stdout
        .split_whitespace()
        .next()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("unexpected book output: {stdout}"))
}

/// A date `days` from today, inside the default booking window.
#[allow(dead_code)]
pub fn days_from_today(days: u64) -> String {
    let date: NaiveDate = Local::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date in range");
    date.format("%Y-%m-%d").to_string()
}
