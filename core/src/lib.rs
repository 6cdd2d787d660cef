//! seatdraw-core: randomized seat assignment and layout snapshots.
//!
//! Two responsibilities, nothing more:
//!   - `assign` binds a shuffled roster to seat positions.
//!   - `snapshot` persists and lists saved layouts as JSON files.
//!
//! Everything else here supports those two: the injectable RNG,
//! the injectable clock, request coercion and configuration.

pub mod assign;
pub mod clock;
pub mod config;
pub mod error;
pub mod request;
pub mod rng;
pub mod roster;
pub mod snapshot;
pub mod types;
