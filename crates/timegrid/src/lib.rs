//! Timegrid - overlap-aware layout of calendar events in time-grid columns.
//!
//! Given the segments rendered inside one day column, Timegrid computes a
//! placement rectangle for each: a vertical pixel span, a horizontal lane,
//! and a width fraction. The pipeline has three stages:
//!
//! 1. [`layout::compute_spans`] maps start and end instants to pixel spans.
//! 2. [`layout::compute_placements`] packs spanned segments into lanes
//!    through a [`layout::SegmentPacker`], collapsing excess overlap into
//!    hidden groups.
//! 3. [`layout::apply_resource_partition`] optionally gives every resource
//!    an equal share of the column.
//!
//! [`ColumnLayoutBuilder`] runs all three with a [`config::LayoutConfig`].

pub mod config;
pub mod coords;
pub mod layout;

mod error;

pub use timegrid_core::{geometry, segment};

pub use error::TimeGridError;

use chrono::NaiveDate;
use log::{debug, info};

use config::LayoutConfig;
use coords::CoordinateLookup;
use layout::{
    HiddenGroup, LanePacker, Placement, ResourceLanes, SegmentPacker, apply_resource_partition,
    compute_placements, compute_spans,
};
use segment::Segment;

/// The layout of one column.
#[derive(Debug, Clone)]
pub struct ColumnLayout<'a> {
    /// One placement per segment; placed segments first.
    pub placements: Vec<Placement<'a>>,
    /// Groups of segments hidden by the stack limit.
    pub hidden_groups: Vec<HiddenGroup>,
    /// Lanes assigned per resource, when resource columns are enabled.
    pub resource_lanes: Option<ResourceLanes>,
}

impl<'a> ColumnLayout<'a> {
    /// Returns the placements that received a rectangle.
    pub fn placed(&self) -> impl Iterator<Item = &Placement<'a>> {
        self.placements
            .iter()
            .filter(|placement| placement.is_placed())
    }

    /// Returns the placement of the first segment of the event with `event_id`.
    pub fn placement_of(&self, event_id: &str) -> Option<&Placement<'a>> {
        self.placements
            .iter()
            .find(|placement| placement.segment().def().id() == event_id)
    }
}

/// Builder for laying out time-grid columns.
///
/// Holds the layout options and the packing engine, and can be reused for
/// any number of columns.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use chrono::NaiveDate;
/// use timegrid::{
///     ColumnLayoutBuilder,
///     config::{GridConfig, LayoutConfig},
///     segment::{EventDef, Segment},
/// };
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let segments = vec![
///     Segment::new(
///         Rc::new(EventDef::new("a")),
///         date.and_hms_opt(9, 0, 0).unwrap(),
///         date.and_hms_opt(10, 0, 0).unwrap(),
///     ),
///     Segment::new(
///         Rc::new(EventDef::new("b")),
///         date.and_hms_opt(9, 30, 0).unwrap(),
///         date.and_hms_opt(10, 30, 0).unwrap(),
///     ),
/// ];
///
/// let coords = GridConfig::default().slat_coords().unwrap();
/// let builder = ColumnLayoutBuilder::new(LayoutConfig::default());
/// let layout = builder.layout(&segments, date, Some(&coords));
///
/// assert_eq!(layout.placed().count(), 2);
/// ```
pub struct ColumnLayoutBuilder {
    config: LayoutConfig,
    packer: Box<dyn SegmentPacker>,
}

impl Default for ColumnLayoutBuilder {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl ColumnLayoutBuilder {
    /// Create a new builder using the default [`LanePacker`].
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            packer: Box::new(LanePacker::new()),
        }
    }

    /// Replace the packing engine (builder style).
    pub fn with_packer(mut self, packer: Box<dyn SegmentPacker>) -> Self {
        self.packer = packer;
        self
    }

    /// Returns the layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the segments of the column for `column_date`.
    ///
    /// Without a `lookup` no segment has a span, so every placement comes
    /// back without a rectangle.
    ///
    /// # Arguments
    ///
    /// * `segments` - Segments rendered in the column
    /// * `column_date` - Date displayed by the column
    /// * `lookup` - Instant to pixel conversion, if the column is measured
    pub fn layout<'a>(
        &self,
        segments: &'a [Segment],
        column_date: NaiveDate,
        lookup: Option<&dyn CoordinateLookup>,
    ) -> ColumnLayout<'a> {
        info!(
            column_date:% = column_date,
            segments = segments.len();
            "Laying out column"
        );

        let spans = compute_spans(
            segments,
            column_date,
            lookup,
            Some(self.config.event_min_height()),
        );

        let result = compute_placements(
            segments,
            &spans,
            self.config.placement_options(),
            self.packer.as_ref(),
        );
        let mut placements = result.placements;

        let resource_lanes = self
            .config
            .resource_columns()
            .then(|| apply_resource_partition(&mut placements));

        debug!(
            placements = placements.len(),
            hidden_groups = result.hidden_groups.len(),
            resources = resource_lanes.as_ref().map_or(0, |lanes| lanes.len());
            "Column layout complete"
        );

        ColumnLayout {
            placements,
            hidden_groups: result.hidden_groups,
            resource_lanes,
        }
    }
}
