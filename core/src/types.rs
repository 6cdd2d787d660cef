//! Shared primitive types.

/// A roster number. Signed so that degenerate inputs (negative
/// last numbers, negative absences) can be carried without panicking.
pub type SeatNumber = i64;

/// Snapshot identifier, e.g. `seat_20240301_091500`.
pub type SnapshotId = String;
