//! HTML pages rendered with askama.
//!
//! The vote page turns saved snapshot documents into small scaled
//! previews. Snapshots are caller-defined JSON, so preview building
//! reads them leniently: anything that does not look like a seat is
//! skipped rather than failing the page.

use askama::Template;
use serde_json::Value;

/// Side length of a preview box, in pixels.
pub const PREVIEW_SIZE: f64 = 200.0;
/// Diameter of a seat marker inside a preview.
pub const PREVIEW_SEAT: f64 = 20.0;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "vote.html")]
pub struct VotePage {
    pub layouts: Vec<LayoutPreview>,
}

impl VotePage {
    pub fn from_documents(documents: &[Value]) -> Self {
        Self {
            layouts: documents
                .iter()
                .enumerate()
                .map(|(i, doc)| LayoutPreview::from_document(i + 1, doc))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPreview {
    pub ordinal: usize,
    pub seats:   Vec<PreviewSeat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSeat {
    pub left:  f64,
    pub top:   f64,
    pub label: String,
}

impl LayoutPreview {
    pub fn from_document(ordinal: usize, doc: &Value) -> Self {
        let raw: Vec<(f64, f64, String)> = doc["seats"]
            .as_array()
            .map(|seats| {
                seats
                    .iter()
                    .filter_map(|s| Some((s["x"].as_f64()?, s["y"].as_f64()?, seat_label(&s["number"]))))
                    .collect()
            })
            .unwrap_or_default();

        // One factor for both axes keeps the classroom's proportions.
        let extent = raw
            .iter()
            .map(|(x, y, _)| x.max(*y))
            .fold(0.0_f64, f64::max);
        let scale = if extent > 0.0 {
            (PREVIEW_SIZE - PREVIEW_SEAT) / extent
        } else {
            1.0
        };

        Self {
            ordinal,
            seats: raw
                .into_iter()
                .map(|(x, y, label)| PreviewSeat {
                    left: (x * scale).max(0.0).round(),
                    top:  (y * scale).max(0.0).round(),
                    label,
                })
                .collect(),
        }
    }
}

fn seat_label(number: &Value) -> String {
    match number {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}
