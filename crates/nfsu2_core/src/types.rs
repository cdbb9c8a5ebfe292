use serde::Serialize;

use crate::performance::PerformanceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarSlotEntry {
    pub index: usize,
    pub used: bool,
    pub performance: Option<PerformanceState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub profile_name: String,
    pub money: i32,
    pub car_slots_used: usize,
    pub file_size: usize,
    pub slots: Vec<CarSlotEntry>,
}
