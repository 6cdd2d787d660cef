//! Best-effort coercion of `POST /assign` bodies.
//!
//! RULE: Be permissive where the layout page is sloppy and strict only
//! where a value cannot be interpreted at all. A missing field falls
//! back to its empty value; absences that can never match a roster
//! number are dropped.
//!
//! The eligible pool is built in memory, so `last_number` is capped at
//! MAX_LAST_NUMBER.

use crate::{
    assign::{Position, SeatAssignment},
    error::{SeatError, SeatResult},
    roster::RosterSpec,
    types::SeatNumber,
};
use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

/// Largest accepted `last_number`. Far above any real class or exam hall.
pub const MAX_LAST_NUMBER: SeatNumber = 10_000;

/// A coerced assignment request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignRequest {
    pub roster:    RosterSpec,
    pub positions: Vec<Position>,
}

impl AssignRequest {
    pub fn from_json(body: &Value) -> SeatResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| invalid("request body must be a JSON object"))?;

        let last_number = coerce_last_number(obj.get("last_number"))?;
        let excluded = coerce_absences(obj)?;
        let positions = coerce_seats(obj)?;

        Ok(Self {
            roster: RosterSpec::new(last_number, excluded),
            positions,
        })
    }
}

/// Body of a successful `POST /assign`.
#[derive(Debug, Clone, Serialize)]
pub struct AssignResponse {
    pub status:   &'static str,
    pub assigned: Vec<SeatAssignment>,
}

impl AssignResponse {
    pub fn success(assigned: Vec<SeatAssignment>) -> Self {
        Self { status: "success", assigned }
    }
}

fn invalid(msg: impl Into<String>) -> SeatError {
    SeatError::InvalidRequest(msg.into())
}

/// Integer, float (truncated) or integer string. Missing or null is 0.
fn coerce_last_number(value: Option<&Value>) -> SeatResult<SeatNumber> {
    let last_number = match value {
        None | Some(Value::Null) => 0,
        Some(v) => as_seat_number(v)
            .ok_or_else(|| invalid(format!("last_number must be an integer, got {v}")))?,
    };
    if last_number > MAX_LAST_NUMBER {
        return Err(invalid(format!(
            "last_number {last_number} exceeds the maximum of {MAX_LAST_NUMBER}"
        )));
    }
    Ok(last_number)
}

fn as_seat_number(value: &Value) -> Option<SeatNumber> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as SeatNumber)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_absences(obj: &Map<String, Value>) -> SeatResult<Vec<SeatNumber>> {
    let entries = match obj.get("absences") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(invalid(format!("absences must be an array, got {other}"))),
    };

    let excluded: Vec<SeatNumber> = entries.iter().filter_map(absence_number).collect();
    if excluded.len() != entries.len() {
        warn!(
            "Dropped {} absence entries that are not integers",
            entries.len() - excluded.len()
        );
    }
    Ok(excluded)
}

/// Only integral values can ever match a roster number.
fn absence_number(value: &Value) -> Option<SeatNumber> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as SeatNumber)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_seats(obj: &Map<String, Value>) -> SeatResult<Vec<Position>> {
    let entries = match obj.get("seats") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(invalid(format!("seats must be an array, got {other}"))),
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, seat)| match (&seat["x"], &seat["y"]) {
            (Value::Number(x), Value::Number(y)) => Ok(Position::new(x.clone(), y.clone())),
            _ => Err(invalid(format!("seat {i} needs numeric x and y"))),
        })
        .collect()
}
