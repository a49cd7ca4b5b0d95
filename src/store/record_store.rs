use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use signup_audit_api::UserRecord;
use tempfile::NamedTempFile;

use super::error::StoreError;
use super::table::Table;

/// Header row written when a table file is created.
pub const CSV_HEADER: &str = "id,email,fullName,username,password,birthday\n";

/// Append-only flat-file storage for the `users` and `audit` tables.
///
/// Each table lives in its own CSV file. Every call names the table it
/// targets; the store holds no notion of a "current" file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    users_path: PathBuf,
    audit_path: PathBuf,
}

impl RecordStore {
    pub fn new(users_path: impl Into<PathBuf>, audit_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
            audit_path: audit_path.into(),
        }
    }

    /// Store with `users.csv` and `audit.csv` inside `dir`.
    #[cfg(test)]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("users.csv"), dir.join("audit.csv"))
    }

    pub fn path(&self, table: Table) -> &Path {
        match table {
            Table::Users => &self.users_path,
            Table::Audit => &self.audit_path,
        }
    }

    /// Creates the table file with its header row if it does not exist yet.
    /// Returns `true` when the file was created by this call.
    ///
    /// The header goes into a temporary file that is then linked into place
    /// without overwriting, so the table never exists without its header.
    pub fn initialize(&self, table: Table) -> Result<bool, StoreError> {
        let path = self.path(table);
        if path.exists() {
            return Ok(false);
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(CSV_HEADER.as_bytes())?;

        match staged.persist_noclobber(path) {
            Ok(_) => {
                tracing::info!(%table, path = %path.display(), "initialized table with header");
                Ok(true)
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.error.into()),
        }
    }

    /// Appends one record as a single row.
    ///
    /// The row is fully encoded before the file is touched and written with
    /// one append-mode write, so readers see either the whole row or none of it.
    pub fn append(&self, table: Table, record: &UserRecord) -> Result<(), StoreError> {
        self.initialize(table)?;
        let row = encode_row(record)?;

        let mut file = OpenOptions::new().append(true).open(self.path(table))?;
        file.write_all(&row)?;

        tracing::debug!(%table, id = %record.id, "row appended");
        Ok(())
    }

    /// Loads every record of a table in append order.
    pub fn load_all(&self, table: Table) -> Result<Vec<UserRecord>, StoreError> {
        let content = match fs::read(self.path(table)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let records = decode_rows(&content);
        tracing::debug!(%table, count = records.len(), "table loaded");
        Ok(records)
    }
}

/// Encodes a record as one CSV row: every field quoted, quotes doubled.
fn encode_row(record: &UserRecord) -> Result<Vec<u8>, StoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer
        .into_inner()
        .map_err(|e| StoreError::Encode(e.to_string()))
}

/// Parses table content, skipping the header.
///
/// Anything after the last newline is an unfinished row and is ignored.
/// Rows that fail to decode or lack an `id` or `email` are dropped.
fn decode_rows(content: &[u8]) -> Vec<UserRecord> {
    let complete = match content.iter().rposition(|&b| b == b'\n') {
        Some(end) => &content[..=end],
        None => return Vec::new(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(complete);

    reader
        .deserialize::<UserRecord>()
        .filter_map(|row| match row {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable row");
                None
            }
        })
        .filter(|record| !record.id.is_empty() && !record.email.is_empty())
        .collect()
}
