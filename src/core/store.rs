use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    core::indices::{self, VecIndex},
    error::{StoreError, StoreResult},
    postcard::{PostcardDraft, PostcardEntry},
    types::{FieldName, Position},
};

/// Serializable copy of a store's records; indices are rebuilt on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Backing file path at export time.
    pub file_path: Option<PathBuf>,
    /// Records in position order.
    pub entries: Vec<PostcardEntry>,
}

/// Ordered postcard records plus date, sender and receiver indices.
///
/// Every entry's position appears in exactly one bucket of each index. The
/// only mutations are wholesale replacement (full load) and appending (append
/// load or [`PostcardStore::insert`]).
#[derive(Debug, Default)]
pub struct PostcardStore {
    file_path: Option<PathBuf>,
    entries: Vec<PostcardEntry>,
    by_date: VecIndex<NaiveDate>,
    by_sender: VecIndex<String>,
    by_receiver: VecIndex<String>,
    next_position: Position,
}

impl PostcardStore {
    /// Empty store with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store bound to `path`; nothing is read until a load.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Restores records from `snapshot` and rebuilds every index.
    ///
    /// Entries go through the same field checks as [`PostcardStore::insert`].
    pub fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        let mut store = Self {
            file_path: snapshot.file_path,
            ..Self::default()
        };

        for (expected, entry) in snapshot.entries.into_iter().enumerate() {
            if entry.position != expected {
                return Err(StoreError::InvalidSnapshot {
                    expected,
                    found: entry.position,
                });
            }
            let draft = entry.to_draft();
            validate_draft(&draft)?;
            store.register(draft);
        }

        Ok(store)
    }

    /// Copies the records out; indices are not part of a snapshot.
    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            file_path: self.file_path.clone(),
            entries: self.entries.clone(),
        }
    }

    /// Currently configured backing file.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Rebinds the store to `path` without touching its records.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    /// Adds a record in memory, returning its position.
    ///
    /// Names must be non-empty and free of `;` and line breaks, and the year
    /// must fit four digits, so that the record survives a write and reload.
    pub fn insert(&mut self, draft: PostcardDraft) -> StoreResult<Position> {
        validate_draft(&draft)?;
        Ok(self.register(draft))
    }

    /// Parses `line` and stamps it with the position the next record would
    /// receive. The store itself is left unchanged.
    pub fn parse_line(&self, line: &str) -> StoreResult<PostcardEntry> {
        codec::parse_line(line, self.next_position)
    }

    /// Number of records held.
    pub fn count_entries(&self) -> usize {
        self.entries.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records in position order.
    pub fn entries(&self) -> &[PostcardEntry] {
        &self.entries
    }

    /// Record at `position`, if any.
    pub fn get(&self, position: Position) -> Option<&PostcardEntry> {
        self.entries.get(position)
    }

    /// Positions sent on `date`, in insertion order.
    pub fn date_positions(&self, date: &NaiveDate) -> Option<&[Position]> {
        indices::positions(&self.by_date, date)
    }

    /// Positions sent by `sender`, in insertion order.
    pub fn sender_positions(&self, sender: &str) -> Option<&[Position]> {
        indices::positions(&self.by_sender, sender)
    }

    /// Positions addressed to `receiver`, in insertion order.
    pub fn receiver_positions(&self, receiver: &str) -> Option<&[Position]> {
        indices::positions(&self.by_receiver, receiver)
    }

    /// Records dated strictly between `begin` and `end`.
    ///
    /// Both bounds are exclusive. This scans the sequence rather than the
    /// date index, so results stay in position order.
    pub fn by_date_range(&self, begin: NaiveDate, end: NaiveDate) -> Vec<&PostcardEntry> {
        self.entries
            .iter()
            .filter(|e| e.date > begin && e.date < end)
            .collect()
    }

    /// Formatted lines of [`PostcardStore::by_date_range`].
    pub fn query_by_date_range(&self, begin: NaiveDate, end: NaiveDate) -> Vec<String> {
        format_all(self.by_date_range(begin, end))
    }

    /// Records dated exactly `date`.
    pub fn by_date(&self, date: &NaiveDate) -> Vec<&PostcardEntry> {
        self.resolve(self.date_positions(date))
    }

    /// Formatted lines of [`PostcardStore::by_date`].
    pub fn query_by_date(&self, date: &NaiveDate) -> Vec<String> {
        format_all(self.by_date(date))
    }

    /// Records whose sender equals `sender` exactly.
    pub fn by_sender(&self, sender: &str) -> Vec<&PostcardEntry> {
        self.resolve(self.sender_positions(sender))
    }

    /// Formatted lines of [`PostcardStore::by_sender`].
    pub fn query_by_sender(&self, sender: &str) -> Vec<String> {
        format_all(self.by_sender(sender))
    }

    /// Records whose receiver equals `receiver` exactly.
    pub fn by_receiver(&self, receiver: &str) -> Vec<&PostcardEntry> {
        self.resolve(self.receiver_positions(receiver))
    }

    /// Formatted lines of [`PostcardStore::by_receiver`].
    pub fn query_by_receiver(&self, receiver: &str) -> Vec<String> {
        format_all(self.by_receiver(receiver))
    }

    /// Picks the path a load should read, adopting `path` when given.
    pub(crate) fn resolve_path(&mut self, path: Option<&Path>) -> StoreResult<PathBuf> {
        if let Some(path) = path {
            self.file_path = Some(path.to_path_buf());
        }
        self.file_path.clone().ok_or(StoreError::NoFileConfigured)
    }

    /// Drops every record and index and restarts positions at zero.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.by_date.clear();
        self.by_sender.clear();
        self.by_receiver.clear();
        self.next_position = 0;
    }

    /// Appends an already validated record and indexes it.
    pub(crate) fn register(&mut self, draft: PostcardDraft) -> Position {
        let position = self.take_next_position();
        let entry = draft.into_entry(position);
        self.insert_indices(&entry);
        self.entries.push(entry);
        position
    }

    fn insert_indices(&mut self, entry: &PostcardEntry) {
        indices::push_position(&mut self.by_date, entry.date, entry.position);
        indices::push_position(&mut self.by_sender, entry.sender.clone(), entry.position);
        indices::push_position(&mut self.by_receiver, entry.receiver.clone(), entry.position);
    }

    fn resolve(&self, positions: Option<&[Position]>) -> Vec<&PostcardEntry> {
        positions
            .into_iter()
            .flatten()
            .filter_map(|p| self.entries.get(*p))
            .collect()
    }

    fn take_next_position(&mut self) -> Position {
        let position = self.next_position;
        self.next_position += 1;
        position
    }
}

fn format_all(entries: Vec<&PostcardEntry>) -> Vec<String> {
    entries.into_iter().map(codec::format).collect()
}

/// Rejects records the line format cannot carry through a write and reload.
fn validate_draft(draft: &PostcardDraft) -> StoreResult<()> {
    validate_name("sender", &draft.sender)?;
    validate_name("receiver", &draft.receiver)?;
    if !(0..=9999).contains(&draft.date.year()) {
        return Err(StoreError::InvalidField {
            field: "date",
            value: draft.date.to_string(),
        });
    }
    Ok(())
}

fn validate_name(field: FieldName, value: &str) -> StoreResult<()> {
    if value.is_empty() || value.contains([';', '\n', '\r']) {
        return Err(StoreError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
