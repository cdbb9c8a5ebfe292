use std::fmt;

use crate::error::{CoreError, CoreResult};

pub const MAGIC: &[u8; 4] = b"20CM";
pub const MAGIC_OFFSET: usize = 0x0;
pub const SIZE_FIELD_OFFSET: usize = 0x4;
pub const SIZE_FIELD_WIDTH: usize = 2;

pub const CAR_SLOTS_OFFSET: usize = 0x5AEC;
pub const CAR_SLOT_SIZE: usize = 0x7F2;
pub const CAR_SLOT_COUNT: usize = 5;
pub const SLOT_MARKER_WIDTH: usize = 2;

/// Individual parts, not packages.
pub const PERFORMANCE_OFFSET_IN_SLOT: usize = 0x94;
pub const PERFORMANCE_PART_COUNT: usize = 0x44;

pub const MONEY_OFFSET: usize = 0xA16A;
pub const MONEY_WIDTH: usize = 4;

pub const PROFILE_NAME_OFFSET: usize = 0xD225;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn at(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn fits_within(&self, file_len: usize) -> bool {
        self.start <= self.end && self.end <= file_len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Magic,
    SizeField,
    SlotMarker(u8),
    Performance(u8),
    Money,
    ProfileName,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Magic => f.write_str("magic"),
            Self::SizeField => f.write_str("size"),
            Self::SlotMarker(slot) => write!(f, "slot{slot}_marker"),
            Self::Performance(slot) => write!(f, "slot{slot}_performance"),
            Self::Money => f.write_str("money"),
            Self::ProfileName => f.write_str("profile_name"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub id: FieldId,
    pub range: ByteRange,
}

#[derive(Debug, Clone)]
pub struct FileLayout {
    pub file_len: usize,
    pub fields: Vec<FieldLayout>,
}

impl FileLayout {
    /// Fields sorted by start offset. Overlapping or out-of-file ranges are
    /// reported as corrupt data.
    pub fn validate(&self) -> CoreResult<()> {
        let mut sorted = self.fields.clone();
        sorted.sort_by_key(|field| field.range.start);

        let mut previous: Option<&FieldLayout> = None;
        for field in &sorted {
            if !field.range.fits_within(self.file_len) {
                return Err(CoreError::corrupt(format!(
                    "field {} at {:#x}..{:#x} lies outside file of {:#x} bytes",
                    field.id, field.range.start, field.range.end, self.file_len
                )));
            }
            if let Some(prev) = previous
                && prev.range.end > field.range.start
            {
                return Err(CoreError::corrupt(format!(
                    "field {} overlaps field {} at {:#x}",
                    field.id, prev.id, field.range.start
                )));
            }
            previous = Some(field);
        }

        Ok(())
    }
}

pub fn slot_range(slot: usize) -> Option<ByteRange> {
    if slot >= CAR_SLOT_COUNT {
        return None;
    }
    Some(ByteRange::at(
        CAR_SLOTS_OFFSET + slot * CAR_SLOT_SIZE,
        CAR_SLOT_SIZE,
    ))
}

pub fn slot_marker_range(slot: usize) -> Option<ByteRange> {
    slot_range(slot).map(|range| ByteRange::at(range.start, SLOT_MARKER_WIDTH))
}

pub fn performance_range(slot: usize) -> Option<ByteRange> {
    slot_range(slot).map(|range| {
        ByteRange::at(
            range.start + PERFORMANCE_OFFSET_IN_SLOT,
            PERFORMANCE_PART_COUNT,
        )
    })
}

/// Every region of the format whose length is known without reading the file.
pub fn fixed_fields() -> Vec<FieldLayout> {
    let mut fields = vec![
        FieldLayout {
            id: FieldId::Magic,
            range: ByteRange::at(MAGIC_OFFSET, MAGIC.len()),
        },
        FieldLayout {
            id: FieldId::SizeField,
            range: ByteRange::at(SIZE_FIELD_OFFSET, SIZE_FIELD_WIDTH),
        },
    ];

    for slot in 0..CAR_SLOT_COUNT {
        let id = slot as u8;
        if let Some(range) = slot_marker_range(slot) {
            fields.push(FieldLayout {
                id: FieldId::SlotMarker(id),
                range,
            });
        }
        if let Some(range) = performance_range(slot) {
            fields.push(FieldLayout {
                id: FieldId::Performance(id),
                range,
            });
        }
    }

    fields.push(FieldLayout {
        id: FieldId::Money,
        range: ByteRange::at(MONEY_OFFSET, MONEY_WIDTH),
    });
    fields
}
