//! Shared primitive types.

/// Zero-based insertion index of a postcard within its store.
pub type Position = usize;

/// Field name used when reporting invalid draft values.
pub type FieldName = &'static str;
