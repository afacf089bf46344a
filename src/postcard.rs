//! Postcard domain record and draft types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Fully materialized postcard owned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostcardEntry {
    /// Insertion index within the owning store.
    pub position: Position,
    /// Sender name.
    pub sender: String,
    /// Receiver name.
    pub receiver: String,
    /// Calendar date the postcard was sent.
    pub date: NaiveDate,
}

/// Insert payload used to create a new [`PostcardEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostcardDraft {
    /// Sender name.
    pub sender: String,
    /// Receiver name.
    pub receiver: String,
    /// Calendar date the postcard was sent.
    pub date: NaiveDate,
}

impl PostcardDraft {
    /// Builds a draft from borrowed names.
    pub fn new(date: NaiveDate, sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            date,
        }
    }

    /// Attaches `position`, producing the stored record.
    pub fn into_entry(self, position: Position) -> PostcardEntry {
        PostcardEntry {
            position,
            sender: self.sender,
            receiver: self.receiver,
            date: self.date,
        }
    }
}

impl PostcardEntry {
    /// Returns the record without its position.
    pub fn to_draft(&self) -> PostcardDraft {
        PostcardDraft {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            date: self.date,
        }
    }
}
