//! Serializable layout report.
//!
//! The report mirrors a [`ColumnLayout`] with event ids in place of segment
//! references, so it can be written out as TOML:
//!
//! ```toml
//! date = "2024-05-01"
//!
//! [[placements]]
//! event = "A"
//! placed = true
//! top = 360
//! bottom = 400
//! thickness = 0.5
//! level_coord = 0.0
//! stack_depth = 0
//!
//! [[hidden_groups]]
//! top = 360
//! bottom = 400
//! count = 1
//! events = ["C"]
//! ```

use std::io;

use chrono::NaiveDate;
use serde::Serialize;

use timegrid::{
    ColumnLayout, TimeGridError,
    layout::Placement,
    segment::{ResourceId, Segment},
};

/// Layout of one column, keyed by event id.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    date: NaiveDate,
    placements: Vec<PlacementReport>,
    hidden_groups: Vec<HiddenGroupReport>,
}

#[derive(Debug, Serialize)]
struct PlacementReport {
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<ResourceId>,
    placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thickness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level_coord: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack_depth: Option<usize>,
}

impl From<&Placement<'_>> for PlacementReport {
    fn from(placement: &Placement<'_>) -> Self {
        let def = placement.segment().def();
        let rect = placement.rect();

        Self {
            event: def.id().to_string(),
            title: def.title().map(str::to_string),
            resource: def.resource_id().cloned(),
            placed: rect.is_some(),
            top: rect.map(|rect| rect.start()),
            bottom: rect.map(|rect| rect.end()),
            thickness: rect.map(|rect| rect.thickness()),
            level_coord: rect.map(|rect| rect.level_coord()),
            stack_depth: rect.map(|rect| rect.stack_depth()),
        }
    }
}

#[derive(Debug, Serialize)]
struct HiddenGroupReport {
    top: i32,
    bottom: i32,
    /// Number of hidden segments, as shown on a "+N more" link.
    count: usize,
    events: Vec<String>,
}

impl LayoutReport {
    /// Build a report for the layout of `segments` in the column on `date`.
    ///
    /// `segments` must be the slice the layout was computed from; hidden
    /// group indices are resolved against it.
    pub fn new(date: NaiveDate, segments: &[Segment], layout: &ColumnLayout<'_>) -> Self {
        let placements = layout.placements.iter().map(PlacementReport::from).collect();

        let hidden_groups = layout
            .hidden_groups
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| HiddenGroupReport {
                top: group.span().start(),
                bottom: group.span().end(),
                count: group.len(),
                events: group
                    .indices()
                    .iter()
                    .filter_map(|&index| segments.get(index))
                    .map(|segment| segment.def().id().to_string())
                    .collect(),
            })
            .collect();

        Self {
            date,
            placements,
            hidden_groups,
        }
    }

    /// Number of placements that received a rectangle.
    pub fn placed_count(&self) -> usize {
        self.placements.iter().filter(|p| p.placed).count()
    }

    /// Render the report as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::Io`] if the report cannot be serialized.
    pub fn to_toml(&self) -> Result<String, TimeGridError> {
        toml::to_string(self).map_err(|err| io::Error::other(err).into())
    }
}
