pub mod backup;
pub mod codec;
pub mod error;
pub mod layout;
pub mod performance;
pub mod record;
pub mod session;
pub mod storage;
pub mod types;

pub use error::{CoreError, CoreErrorCode, CoreResult};
pub use performance::{PerformanceMode, PerformanceState};
pub use record::SaveRecord;
pub use session::SaveSession;
pub use types::{CarSlotEntry, Snapshot};
