//! In-memory postcard store and index helpers.

/// Helper index aliases.
pub mod indices;
/// Postcard store, indices and queries.
pub mod store;
