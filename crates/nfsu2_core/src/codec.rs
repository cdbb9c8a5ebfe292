//! Bounds-checked little-endian field access over a borrowed byte slice.

use std::ops::Range;

use crate::error::{CoreError, CoreResult};
use crate::layout::ByteRange;

fn checked(len: usize, offset: usize, width: usize, field: &str) -> CoreResult<Range<usize>> {
    let end = offset.checked_add(width).ok_or_else(|| {
        CoreError::corrupt(format!("{field} offset {offset:#x} overflows"))
    })?;
    if end > len {
        return Err(CoreError::corrupt(format!(
            "file too short for {field}: len={len:#x}, need at least {end:#x}"
        )));
    }
    Ok(offset..end)
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize, field: &str) -> CoreResult<[u8; N]> {
    let range = checked(bytes.len(), offset, N, field)?;
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[range]);
    Ok(buf)
}

pub fn read_u16_le(bytes: &[u8], offset: usize, field: &str) -> CoreResult<u16> {
    read_array::<2>(bytes, offset, field).map(u16::from_le_bytes)
}

pub fn read_i32_le(bytes: &[u8], offset: usize, field: &str) -> CoreResult<i32> {
    read_array::<4>(bytes, offset, field).map(i32::from_le_bytes)
}

pub fn write_i32_le(bytes: &mut [u8], offset: usize, value: i32, field: &str) -> CoreResult<()> {
    let range = checked(bytes.len(), offset, 4, field)?;
    bytes[range].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

pub fn slice<'a>(bytes: &'a [u8], range: ByteRange, field: &str) -> CoreResult<&'a [u8]> {
    let checked = checked(bytes.len(), range.start, range.len(), field)?;
    Ok(&bytes[checked])
}

pub fn fill(bytes: &mut [u8], range: ByteRange, value: u8, field: &str) -> CoreResult<()> {
    let checked = checked(bytes.len(), range.start, range.len(), field)?;
    bytes[checked].fill(value);
    Ok(())
}

/// Returns the text before the first NUL at or after `offset`, decoded as
/// Latin-1, together with the number of text bytes consumed.
pub fn read_nul_terminated(bytes: &[u8], offset: usize, field: &str) -> CoreResult<(String, usize)> {
    let tail = bytes.get(offset..).ok_or_else(|| {
        CoreError::corrupt(format!(
            "{field} offset {offset:#x} beyond end of file ({:#x} bytes)",
            bytes.len()
        ))
    })?;
    let len = tail.iter().position(|&b| b == 0).ok_or_else(|| {
        CoreError::corrupt(format!("{field} at {offset:#x} is not NUL-terminated"))
    })?;
    let text = tail[..len].iter().map(|&b| char::from(b)).collect();
    Ok((text, len))
}
