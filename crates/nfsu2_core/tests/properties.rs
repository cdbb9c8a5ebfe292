use nfsu2_core::layout::{
    CAR_SLOT_COUNT, CAR_SLOT_SIZE, CAR_SLOTS_OFFSET, PERFORMANCE_OFFSET_IN_SLOT,
    PERFORMANCE_PART_COUNT,
};
use nfsu2_core::{PerformanceMode, SaveRecord};
use proptest::prelude::*;

const FIXTURE_LEN: usize = 0xE000;

fn save_with_markers(mask: u8, marker: [u8; 2]) -> Vec<u8> {
    let mut bytes = vec![0u8; FIXTURE_LEN];
    bytes[..4].copy_from_slice(b"20CM");
    bytes[4..6].copy_from_slice(&(FIXTURE_LEN as u16).to_le_bytes());
    for slot in 0..CAR_SLOT_COUNT {
        if mask & (1 << slot) != 0 {
            let base = CAR_SLOTS_OFFSET + slot * CAR_SLOT_SIZE;
            bytes[base..base + 2].copy_from_slice(&marker);
        }
    }
    bytes
}

fn nonzero_marker() -> impl Strategy<Value = [u8; 2]> {
    any::<[u8; 2]>().prop_filter("marker must be nonzero", |m| m != &[0, 0])
}

fn mode() -> impl Strategy<Value = PerformanceMode> {
    prop_oneof![Just(PerformanceMode::Nill), Just(PerformanceMode::Max)]
}

proptest! {
    #[test]
    fn money_roundtrips_through_buffer(value in any::<i32>()) {
        let mut record = SaveRecord::from_bytes(save_with_markers(0, [0, 0])).unwrap();
        record.set_money(value).unwrap();
        prop_assert_eq!(record.money().unwrap(), value);
    }

    #[test]
    fn slot_count_matches_marker_mask(mask in 0u8..32, marker in nonzero_marker()) {
        let record = SaveRecord::from_bytes(save_with_markers(mask, marker)).unwrap();
        prop_assert_eq!(record.car_slots_used().unwrap(), mask.count_ones() as usize);
    }

    #[test]
    fn performance_change_is_confined_to_one_block(
        slot in 0usize..8,
        mode in mode(),
        fill in any::<u8>(),
    ) {
        let mut bytes = save_with_markers(0b11111, [1, 0]);
        for s in 0..CAR_SLOT_COUNT {
            let start = CAR_SLOTS_OFFSET + s * CAR_SLOT_SIZE + PERFORMANCE_OFFSET_IN_SLOT;
            bytes[start..start + PERFORMANCE_PART_COUNT].fill(fill);
        }
        let original = bytes.clone();

        let mut record = SaveRecord::from_bytes(bytes).unwrap();
        record.change_car_performance(slot, mode).unwrap();
        let after = record.as_bytes();

        if slot >= CAR_SLOT_COUNT {
            prop_assert_eq!(after, original.as_slice());
        } else {
            let start = CAR_SLOTS_OFFSET + slot * CAR_SLOT_SIZE + PERFORMANCE_OFFSET_IN_SLOT;
            let end = start + PERFORMANCE_PART_COUNT;
            prop_assert!(after[start..end].iter().all(|&b| b == mode.raw()));
            prop_assert_eq!(&after[..start], &original[..start]);
            prop_assert_eq!(&after[end..], &original[end..]);
        }
    }
}
