pub mod precision;
pub mod sync;
pub mod timer;

pub use precision::PrecisionSleep;
pub use sync::{SyncSignal, WorkerState};
pub use timer::PeriodicTimer;
