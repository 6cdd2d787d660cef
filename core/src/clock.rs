//! Timestamp source for snapshot identifiers.

use crate::types::SnapshotId;
use chrono::{Local, NaiveDateTime};

pub const SNAPSHOT_ID_FORMAT: &str = "seat_%Y%m%d_%H%M%S";

pub trait SnapshotClock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl SnapshotClock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant. Used in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl SnapshotClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Second-granularity identifier; two saves in the same second collide.
pub fn snapshot_id(at: NaiveDateTime) -> SnapshotId {
    at.format(SNAPSHOT_ID_FORMAT).to_string()
}
