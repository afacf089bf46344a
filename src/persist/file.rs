//! Flat-file loading and writing for [`PostcardStore`].

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{
    codec,
    core::store::PostcardStore,
    error::{StoreError, StoreResult},
    postcard::PostcardDraft,
};

use super::{LoadMode, WriteMode};

impl PostcardStore {
    /// Replaces every record with the contents of the backing file.
    ///
    /// `Some(path)` rebinds the store to `path` first; `None` reads the path
    /// already configured. The whole file is parsed before anything is
    /// replaced, so a malformed line leaves the store untouched.
    pub fn load_full(&mut self, path: Option<&Path>) -> StoreResult<usize> {
        self.load(path, LoadMode::Replace)
    }

    /// Appends every record of the backing file after the existing ones.
    ///
    /// Records are not deduplicated: loading the same file twice holds each
    /// line twice.
    pub fn load_append(&mut self, path: Option<&Path>) -> StoreResult<usize> {
        self.load(path, LoadMode::Append)
    }

    /// Writes every record to `path`, replacing its content.
    pub fn write_full(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.write(path.as_ref(), WriteMode::Overwrite)
    }

    /// Appends every record to `path`, creating it when missing.
    ///
    /// The whole sequence is written each call, including records already
    /// persisted by an earlier write.
    pub fn write_append(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.write(path.as_ref(), WriteMode::Append)
    }

    fn load(&mut self, path: Option<&Path>, mode: LoadMode) -> StoreResult<usize> {
        let path = self.resolve_path(path)?;
        let drafts = read_drafts(&path).inspect_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "postcard load aborted");
        })?;

        if mode == LoadMode::Replace {
            self.clear();
        }
        let loaded = drafts.len();
        for draft in drafts {
            self.register(draft);
        }

        tracing::debug!(
            path = %path.display(),
            ?mode,
            loaded,
            total = self.count_entries(),
            "loaded postcards"
        );
        Ok(loaded)
    }

    fn write(&self, path: &Path, mode: WriteMode) -> StoreResult<()> {
        let file = match mode {
            WriteMode::Overwrite => File::create(path),
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(|e| StoreError::io(path, e))?;

        let mut out = BufWriter::new(file);
        for entry in self.entries() {
            out.write_all(codec::format(entry).as_bytes())
                .map_err(|e| StoreError::io(path, e))?;
        }
        out.flush().map_err(|e| StoreError::io(path, e))?;

        tracing::debug!(
            path = %path.display(),
            ?mode,
            written = self.count_entries(),
            "wrote postcards"
        );
        Ok(())
    }
}

fn read_drafts(path: &Path) -> StoreResult<Vec<PostcardDraft>> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut drafts = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| StoreError::io(path, e))?;
        let draft = codec::parse_draft(&line).map_err(|e| e.at_line(idx + 1))?;
        drafts.push(draft);
    }
    Ok(drafts)
}
