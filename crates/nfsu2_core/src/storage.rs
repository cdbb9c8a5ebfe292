//! Whole-file reads and writes. A transfer that moves fewer bytes than the
//! file holds is an error, never a partial result.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CoreError, CoreErrorCode, CoreResult};

pub fn read_file(path: &Path) -> CoreResult<Vec<u8>> {
    let mut file = File::open(path)
        .map_err(|e| CoreError::io(format!("{} cannot be opened for reading", path.display()), e))?;
    let expected = file
        .metadata()
        .map_err(|e| CoreError::io(format!("{} cannot be inspected", path.display()), e))?
        .len();

    let mut bytes = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    file.read_to_end(&mut bytes)
        .map_err(|e| CoreError::io(format!("{} cannot be read", path.display()), e))?;

    if bytes.len() as u64 != expected {
        return Err(CoreError::new(
            CoreErrorCode::Io,
            format!(
                "short read from {}: got {} bytes, expected {expected}",
                path.display(),
                bytes.len()
            ),
        ));
    }
    Ok(bytes)
}

pub fn write_file(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let mut file = File::create(path)
        .map_err(|e| CoreError::io(format!("{} cannot be opened for writing", path.display()), e))?;
    file.write_all(bytes)
        .map_err(|e| CoreError::io(format!("short write to {}", path.display()), e))?;
    file.flush()
        .map_err(|e| CoreError::io(format!("{} cannot be flushed", path.display()), e))
}
