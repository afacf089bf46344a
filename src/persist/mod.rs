//! Flat-file persistence modes.

/// Loading and writing the backing file.
pub mod file;

/// How a load treats records already in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Drop existing records and restart positions at zero.
    Replace,
    /// Keep existing records and continue numbering after them.
    Append,
}

/// How a write treats existing file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the target first.
    Overwrite,
    /// Add after whatever the target already holds.
    Append,
}
