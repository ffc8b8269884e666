//! Console and file logging for one harness run
//!
//! A `RunLogger` is constructed once per run and handed by reference to the
//! parts that log. Every console line is mirrored into the log file with the
//! color formatting stripped and an RFC 3339 timestamp prepended. The file
//! is recreated at startup; if it cannot be opened the run continues with
//! console output only.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use colored::{ColoredString, Colorize};
use tracing::error;

pub struct RunLogger {
    file: Option<Mutex<File>>,
}

impl RunLogger {
    /// Opens `path` fresh, truncating the previous run's log.
    pub fn create(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    error!("cannot create log directory {}: {err}", parent.display());
                }
            }
        }

        let file = match OpenOptions::new().write(true).create(true).truncate(true).open(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(err) => {
                eprintln!(
                    "{}",
                    format!("cannot open log file {}: {err}", path.display()).red()
                );
                None
            }
        };

        Self { file }
    }

    pub fn console_only() -> Self {
        Self { file: None }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn info(&self, message: &str) {
        let line = format!("ℹ️  {message}");
        self.emit(line.blue(), &line);
    }

    pub fn success(&self, message: &str) {
        let line = format!("✅ {message}");
        self.emit(line.green(), &line);
    }

    pub fn error(&self, message: &str) {
        let line = format!("❌ {message}");
        self.emit(line.red(), &line);
    }

    pub fn warn(&self, message: &str) {
        let line = format!("⚠️  {message}");
        self.emit(line.yellow(), &line);
    }

    pub fn plain(&self, message: &str) {
        self.emit(message.normal(), message);
    }

    pub fn header(&self, message: &str) {
        let bar = "=".repeat(60);
        self.emit(bar.bold(), &bar);
        self.emit(message.bold(), message);
        self.emit(bar.bold(), &bar);
    }

    pub fn subheader(&self, message: &str) {
        let line = format!("--- {message} ---");
        self.emit(line.cyan(), &line);
    }

    fn emit(&self, rendered: ColoredString, plain: &str) {
        println!("{rendered}");

        if let Some(file) = &self.file {
            let stamped = format!("[{}] {plain}\n", Utc::now().to_rfc3339());
            if let Ok(mut file) = file.lock() {
                if let Err(err) = file.write_all(stamped.as_bytes()) {
                    eprintln!("{}", format!("log file write failed: {err}").red());
                }
            }
        }
    }
}
