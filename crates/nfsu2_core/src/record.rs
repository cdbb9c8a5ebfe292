use std::path::Path;

use crate::codec;
use crate::error::{CoreError, CoreResult};
use crate::layout::{
    self, ByteRange, CAR_SLOT_COUNT, FieldId, FieldLayout, FileLayout, MAGIC, MAGIC_OFFSET,
    MONEY_OFFSET, PROFILE_NAME_OFFSET, SIZE_FIELD_OFFSET,
};
use crate::performance::{PerformanceMode, PerformanceState};
use crate::storage;
use crate::types::{CarSlotEntry, Snapshot};

/// A validated save file held fully in memory.
///
/// Construction checks the `"20CM"` magic and the embedded size field; every
/// later field access is bounds-checked against the buffer length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    raw: Vec<u8>,
}

impl SaveRecord {
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = storage::read_file(path)?;
        let record = Self::from_bytes(bytes).map_err(|e| {
            CoreError::new(e.code, format!("{}: {}", path.display(), e.message))
        })?;
        log::debug!("loaded {} ({} bytes)", path.display(), record.len());
        Ok(record)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> CoreResult<Self> {
        let raw = bytes.into();
        validate_header(&raw)?;
        Ok(Self { raw })
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }

    pub fn profile_username(&self) -> CoreResult<String> {
        codec::read_nul_terminated(&self.raw, PROFILE_NAME_OFFSET, "profile name")
            .map(|(name, _)| name)
    }

    pub fn money(&self) -> CoreResult<i32> {
        codec::read_i32_le(&self.raw, MONEY_OFFSET, "money")
    }

    pub fn set_money(&mut self, money: i32) -> CoreResult<()> {
        codec::write_i32_le(&mut self.raw, MONEY_OFFSET, money, "money")?;
        log::debug!("money set to {money}");
        Ok(())
    }

    pub fn is_slot_used(&self, slot: usize) -> CoreResult<bool> {
        let range = layout::slot_marker_range(slot).ok_or_else(|| {
            CoreError::corrupt(format!(
                "car slot {slot} out of range, expected 0..{CAR_SLOT_COUNT}"
            ))
        })?;
        let marker = codec::slice(&self.raw, range, "car slot marker")?;
        Ok(marker.iter().any(|&b| b != 0))
    }

    pub fn used_slot_indices(&self) -> CoreResult<Vec<usize>> {
        let mut used = Vec::with_capacity(CAR_SLOT_COUNT);
        for slot in 0..CAR_SLOT_COUNT {
            if self.is_slot_used(slot)? {
                used.push(slot);
            }
        }
        Ok(used)
    }

    pub fn car_slots_used(&self) -> CoreResult<usize> {
        self.used_slot_indices().map(|used| used.len())
    }

    pub fn performance_block(&self, slot: usize) -> CoreResult<&[u8]> {
        let range = layout::performance_range(slot).ok_or_else(|| {
            CoreError::corrupt(format!(
                "car slot {slot} out of range, expected 0..{CAR_SLOT_COUNT}"
            ))
        })?;
        codec::slice(&self.raw, range, "performance block")
    }

    pub fn performance_state(&self, slot: usize) -> CoreResult<PerformanceState> {
        self.performance_block(slot).map(PerformanceState::classify)
    }

    /// Overwrites every part byte of the slot's performance block. Slots
    /// outside `0..5` are ignored.
    pub fn change_car_performance(
        &mut self,
        slot: usize,
        mode: PerformanceMode,
    ) -> CoreResult<()> {
        let Some(range) = layout::performance_range(slot) else {
            log::debug!("ignoring performance change for car slot {slot}");
            return Ok(());
        };
        codec::fill(&mut self.raw, range, mode.raw(), "performance block")?;
        log::debug!("car slot {slot} performance set to {mode}");
        Ok(())
    }

    pub fn snapshot(&self) -> CoreResult<Snapshot> {
        let mut slots = Vec::with_capacity(CAR_SLOT_COUNT);
        for index in 0..CAR_SLOT_COUNT {
            let used = self.is_slot_used(index)?;
            let performance = if used {
                Some(self.performance_state(index)?)
            } else {
                None
            };
            slots.push(CarSlotEntry {
                index,
                used,
                performance,
            });
        }

        Ok(Snapshot {
            profile_name: self.profile_username()?,
            money: self.money()?,
            car_slots_used: slots.iter().filter(|slot| slot.used).count(),
            file_size: self.len(),
            slots,
        })
    }

    /// The profile name range includes its terminator. A missing terminator
    /// extends the range one byte past the end of the file.
    pub fn layout(&self) -> FileLayout {
        let mut fields = layout::fixed_fields();
        let name = codec::read_nul_terminated(&self.raw, PROFILE_NAME_OFFSET, "profile name");
        let name_range = match name {
            Ok((_, len)) => ByteRange::at(PROFILE_NAME_OFFSET, len + 1),
            Err(_) => ByteRange {
                start: PROFILE_NAME_OFFSET,
                end: self.len().max(PROFILE_NAME_OFFSET) + 1,
            },
        };
        fields.push(FieldLayout {
            id: FieldId::ProfileName,
            range: name_range,
        });

        FileLayout {
            file_len: self.len(),
            fields,
        }
    }
}

fn validate_header(raw: &[u8]) -> CoreResult<()> {
    let magic_ok = raw.get(MAGIC_OFFSET..MAGIC_OFFSET + MAGIC.len()) == Some(&MAGIC[..]);
    if !magic_ok {
        return Err(CoreError::format("not a valid save file: missing \"20CM\" magic"));
    }

    let expected = (raw.len() & 0xFFFF) as u16;
    let stored = codec::read_u16_le(raw, SIZE_FIELD_OFFSET, "size field")
        .map_err(|_| CoreError::format("not a valid save file: header truncated"))?;
    if stored != expected {
        return Err(CoreError::format(format!(
            "not a valid save file: size field {stored:#06x} does not match file length {:#x}",
            raw.len()
        )));
    }

    Ok(())
}
