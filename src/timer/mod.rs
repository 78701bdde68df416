//! Session timer: the state machine, its controller, and the durable
//! crash-recovery record.

pub mod controller;
pub mod snapshot;
pub mod state;

pub use controller::TimerController;
pub use snapshot::{SessionRecord, SnapshotStore, SyncStatus};
pub use state::{TimerPhase, TimerSnapshot, TimerState};
