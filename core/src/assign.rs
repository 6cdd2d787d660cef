//! The assignment engine.
//!
//! Shuffles the eligible pool and binds it to seat positions by index:
//! position i gets the i-th shuffled number. Positions past the end of
//! the pool get no number; pool numbers past the last position are
//! dropped without being reported to the caller.

use crate::{roster::RosterSpec, rng::SeatRng, types::SeatNumber};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A seat slot on the layout canvas. The engine never interprets it;
/// coordinates are kept as JSON numbers so they echo back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: Number,
    pub y: Number,
}

impl Position {
    pub fn new(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// One entry of an assignment, index-aligned with the input positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatAssignment {
    pub number: Option<SeatNumber>,
    pub seat:   Position,
}

/// Counts describing how a draw played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentSummary {
    pub assigned:       usize,
    pub empty_seats:    usize,
    pub unused_numbers: usize,
}

impl AssignmentSummary {
    pub fn of(pool_size: usize, assignment: &[SeatAssignment]) -> Self {
        let assigned = assignment.iter().filter(|a| a.number.is_some()).count();
        Self {
            assigned,
            empty_seats: assignment.len() - assigned,
            unused_numbers: pool_size - assigned,
        }
    }
}

/// Draw a random assignment of the roster onto `positions`.
///
/// The result always has exactly `positions.len()` entries and never
/// repeats a number.
pub fn assign(roster: &RosterSpec, positions: &[Position], rng: &mut SeatRng) -> Vec<SeatAssignment> {
    let mut pool = roster.eligible_pool();
    rng.shuffle(&mut pool);

    let assignment: Vec<SeatAssignment> = positions
        .iter()
        .enumerate()
        .map(|(i, seat)| SeatAssignment {
            number: pool.get(i).copied(),
            seat:   seat.clone(),
        })
        .collect();

    let summary = AssignmentSummary::of(pool.len(), &assignment);
    debug!(
        "assign[{}]: {} seated, {} empty seats, {} unused numbers",
        rng.name, summary.assigned, summary.empty_seats, summary.unused_numbers
    );
    assignment
}
