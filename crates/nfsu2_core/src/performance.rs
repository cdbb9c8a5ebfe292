use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceMode {
    Nill,
    Max,
}

impl PerformanceMode {
    pub const NILL_RAW: u8 = 0x00;
    pub const MAX_RAW: u8 = 0x01;

    pub fn raw(&self) -> u8 {
        match *self {
            Self::Nill => Self::NILL_RAW,
            Self::Max => Self::MAX_RAW,
        }
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            Self::NILL_RAW => Some(Self::Nill),
            Self::MAX_RAW => Some(Self::Max),
            _ => None,
        }
    }

    /// Interactive menu choice: `0` nills, `1` maxes, anything else leaves
    /// the car alone.
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            0 => Some(Self::Nill),
            1 => Some(Self::Max),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Nill => "Nill",
            Self::Max => "Max",
        }
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceState {
    Nilled,
    Maxed,
    Mixed,
}

impl PerformanceState {
    pub fn classify(block: &[u8]) -> Self {
        let Some((&first, rest)) = block.split_first() else {
            return Self::Mixed;
        };
        if rest.iter().any(|&b| b != first) {
            return Self::Mixed;
        }
        match PerformanceMode::from_raw(first) {
            Some(PerformanceMode::Nill) => Self::Nilled,
            Some(PerformanceMode::Max) => Self::Maxed,
            None => Self::Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Nilled => "Nilled",
            Self::Maxed => "Maxed",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for PerformanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
