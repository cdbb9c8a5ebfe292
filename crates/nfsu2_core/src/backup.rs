use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::storage;

pub const BACKUP_EXTENSION: &str = ".bak";

/// `SAVE` becomes `SAVE.bak`; an existing extension is kept.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// Copies `src` to `dst` byte for byte and returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> CoreResult<u64> {
    let bytes = storage::read_file(src)?;
    storage::write_file(dst, &bytes)?;
    log::debug!(
        "backed up {} to {} ({} bytes)",
        src.display(),
        dst.display(),
        bytes.len()
    );
    Ok(bytes.len() as u64)
}
