//! Flat-file postcard log with date, sender and receiver indices.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::PostcardStore`]:
//! ```
//! use chrono::NaiveDate;
//! use postcardlist::{core::store::PostcardStore, postcard::PostcardDraft};
//!
//! let mut store = PostcardStore::new();
//! let date = NaiveDate::from_ymd_opt(2009, 12, 24).expect("date");
//! let pos = store.insert(PostcardDraft::new(date, "Daisy", "Donald")).expect("insert");
//! assert_eq!(pos, 0);
//! assert_eq!(
//!     store.query_by_sender("Daisy"),
//!     vec!["date:2009-12-24; from:Daisy; to:Donald;\n".to_string()]
//! );
//! ```
//!
//! Loading and persisting a file:
//! ```no_run
//! use std::path::Path;
//! use postcardlist::core::store::PostcardStore;
//!
//! let mut store = PostcardStore::new();
//! store.load_full(Some(Path::new("postcards.txt"))).expect("load");
//! store.load_append(None).expect("append same file again");
//! store.write_full("postcards-copy.txt").expect("write");
//! ```
#![deny(missing_docs)]

/// Line parser and formatter.
pub mod codec;
/// Core in-memory store and index helpers.
pub mod core;
/// Error type shared by every operation.
pub mod error;
/// Flat-file load and write operations.
pub mod persist;
/// Postcard domain records and drafts.
pub mod postcard;
/// Shared primitive types.
pub mod types;
