//! offense_log.rs - Append-only record of censored submissions.
//!
//! One [`OffenseRecord`] is produced per submission whose content changed.
//! [`FileOffenseLog`] writes each record as a single line to `offenses.log`,
//! holding an exclusive file lock for the duration of the write so that
//! concurrent writers never interleave inside a line.
//!
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, Local};
use fs2::FileExt;
use log::debug;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::ChatFilterError;
use crate::submission::{Actor, Context};

/// Name of the log file inside the data directory.
pub const OFFENSE_LOG_FILE: &str = "offenses.log";

/// Stand-in for the name and id when no actor is known.
pub const UNKNOWN_ACTOR: &str = "Unknown";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single offense, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffenseRecord {
    pub timestamp: DateTime<Local>,
    pub actor_name: String,
    pub actor_id: String,
    pub context: Context,
    pub original_text: String,
}

impl OffenseRecord {
    /// Builds a record stamped with the current local time.
    pub fn new(actor: Option<&Actor>, context: Context, original_text: impl Into<String>) -> Self {
        Self::at(Local::now(), actor, context, original_text)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        actor: Option<&Actor>,
        context: Context,
        original_text: impl Into<String>,
    ) -> Self {
        let (actor_name, actor_id) = match actor {
            Some(actor) => (actor.name.clone(), actor.id.to_string()),
            None => (UNKNOWN_ACTOR.to_string(), UNKNOWN_ACTOR.to_string()),
        };
        Self {
            timestamp,
            actor_name,
            actor_id,
            context,
            original_text: original_text.into(),
        }
    }

    /// `[yyyy-MM-dd HH:mm:ss] Player: name (id) | Context: CTX | Message: text` plus newline.
    ///
    /// Line breaks inside the text are written as `\n` and `\r` so every record stays on one line.
    pub fn to_log_line(&self) -> String {
        format!(
            "[{}] Player: {} ({}) | Context: {} | Message: {}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.actor_name,
            self.actor_id,
            self.context,
            escape_line_breaks(&self.original_text)
        )
    }
}

fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Destination for offense records.
pub trait OffenseSink: Send + Sync {
    /// Persists one record. Each call must be written as one unit.
    fn append(&self, record: &OffenseRecord) -> Result<(), ChatFilterError>;
}

/// Appends records to `<data dir>/offenses.log`.
#[derive(Debug, Clone)]
pub struct FileOffenseLog {
    path: PathBuf,
}

impl FileOffenseLog {
    /// Uses `offenses.log` inside `data_dir`, creating the directory if needed.
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Result<Self, ChatFilterError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(OFFENSE_LOG_FILE),
        })
    }

    /// Writes to exactly this file. The parent directory must exist.
    pub fn at_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OffenseSink for FileOffenseLog {
    fn append(&self, record: &OffenseRecord) -> Result<(), ChatFilterError> {
        let line = record.to_log_line();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ChatFilterError::OffenseLog(format!("{}: {}", self.path.display(), e)))?;

        FileExt::lock_exclusive(&file)
            .map_err(|e| ChatFilterError::OffenseLog(format!("lock {}: {}", self.path.display(), e)))?;
        let written = file.write_all(line.as_bytes()).and_then(|_| file.flush());
        let unlocked = FileExt::unlock(&file);

        written.map_err(|e| ChatFilterError::OffenseLog(e.to_string()))?;
        unlocked.map_err(|e| ChatFilterError::OffenseLog(format!("unlock {}: {}", self.path.display(), e)))?;

        debug!(
            target: "chatfilter_core::offense_log",
            "Recorded {} offense for {}.",
            record.context,
            record.actor_name
        );
        Ok(())
    }
}
