use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::record::SaveRecord;
use crate::storage;

/// An open save file. The record is written back to its path exactly once:
/// by [`SaveSession::close`], or by `Drop` when the session goes out of scope
/// without being closed.
#[derive(Debug)]
pub struct SaveSession {
    path: PathBuf,
    record: SaveRecord,
    flushed: bool,
}

impl SaveSession {
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let record = SaveRecord::load(&path)?;
        Ok(Self {
            path,
            record,
            flushed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut SaveRecord {
        &mut self.record
    }

    pub fn close(mut self) -> CoreResult<()> {
        self.flush()
    }

    fn flush(&mut self) -> CoreResult<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;
        storage::write_file(&self.path, self.record.as_bytes())?;
        log::debug!(
            "wrote {} bytes to {}",
            self.record.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl Drop for SaveSession {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("changes to {} were not saved: {e}", self.path.display());
        }
    }
}
