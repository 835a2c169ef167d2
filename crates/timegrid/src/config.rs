//! Configuration types for Timegrid layout.
//!
//! This module provides configuration structures that control how segments
//! are measured and packed. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and grid settings.
//! - [`LayoutConfig`] - Options for span computation, packing, and resource columns.
//! - [`GridConfig`] - Slot range and slat geometry used to build [`SlatCoords`].
//!
//! # Example
//!
//! ```
//! # use timegrid::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.grid().slat_coords().is_ok());
//! assert!(!config.layout().resource_columns());
//! ```

use chrono::TimeDelta;
use serde::Deserialize;

use crate::{TimeGridError, coords::SlatCoords, layout::PlacementOptions};

/// Top-level configuration combining layout and grid settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and grid configurations.
    pub fn new(layout: LayoutConfig, grid: GridConfig) -> Self {
        Self { layout, grid }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }
}

/// Options for laying out the segments of one column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum rendered height of a segment, in pixels.
    event_min_height: f32,

    /// Keep lane order consistent with start order instead of filling gaps.
    event_order_strict: bool,

    /// Maximum number of segments stacked at one point.
    event_max_stack: Option<usize>,

    /// Give every resource an equal share of the column.
    resource_columns: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            event_min_height: 0.0,
            event_order_strict: false,
            event_max_stack: None,
            resource_columns: false,
        }
    }
}

impl LayoutConfig {
    /// Returns the minimum segment height
    pub fn event_min_height(&self) -> f32 {
        self.event_min_height
    }

    /// Returns true if packing keeps strict start order
    pub fn event_order_strict(&self) -> bool {
        self.event_order_strict
    }

    /// Returns the stack limit, if any
    pub fn event_max_stack(&self) -> Option<usize> {
        self.event_max_stack
    }

    /// Returns true if the column is divided by resource
    pub fn resource_columns(&self) -> bool {
        self.resource_columns
    }

    /// Set the minimum segment height (builder style).
    pub fn with_event_min_height(mut self, height: f32) -> Self {
        self.event_min_height = height;
        self
    }

    /// Set strict ordering (builder style).
    pub fn with_event_order_strict(mut self, strict: bool) -> Self {
        self.event_order_strict = strict;
        self
    }

    /// Set the stack limit (builder style).
    pub fn with_event_max_stack(mut self, max_stack: Option<usize>) -> Self {
        self.event_max_stack = max_stack;
        self
    }

    /// Enable or disable resource columns (builder style).
    pub fn with_resource_columns(mut self, enabled: bool) -> Self {
        self.resource_columns = enabled;
        self
    }

    /// Returns the packer options described by this configuration.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions::default()
            .with_strict_order(self.event_order_strict)
            .with_max_stack(self.event_max_stack)
    }
}

/// Time range and slat geometry of a column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Start of the visible range, in minutes after midnight.
    slot_min_minutes: u32,

    /// End of the visible range, in minutes after midnight. May exceed a day.
    slot_max_minutes: u32,

    /// Time covered by one slat, in minutes.
    slot_duration_minutes: u32,

    /// Height of one slat, in pixels.
    slat_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            slot_min_minutes: 0,
            slot_max_minutes: 24 * 60,
            slot_duration_minutes: 30,
            slat_height: 20.0,
        }
    }
}

impl GridConfig {
    /// Creates a new [`GridConfig`].
    ///
    /// # Arguments
    ///
    /// * `slot_min_minutes` - Start of the visible range after midnight
    /// * `slot_max_minutes` - End of the visible range after midnight
    /// * `slot_duration_minutes` - Time covered by one slat
    /// * `slat_height` - Height of one slat in pixels
    pub fn new(
        slot_min_minutes: u32,
        slot_max_minutes: u32,
        slot_duration_minutes: u32,
        slat_height: f32,
    ) -> Self {
        Self {
            slot_min_minutes,
            slot_max_minutes,
            slot_duration_minutes,
            slat_height,
        }
    }

    /// Build uniform slat coordinates for this grid.
    ///
    /// The last slat is kept even if the range does not divide evenly.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::Config`] if the slot duration is zero, the
    /// range is empty, or the slat height is not a positive number.
    pub fn slat_coords(&self) -> Result<SlatCoords, TimeGridError> {
        if self.slot_duration_minutes == 0 {
            return Err(TimeGridError::Config(
                "slot_duration_minutes must be greater than zero".to_string(),
            ));
        }
        if self.slot_min_minutes >= self.slot_max_minutes {
            return Err(TimeGridError::Config(format!(
                "slot_min_minutes ({}) must be less than slot_max_minutes ({})",
                self.slot_min_minutes, self.slot_max_minutes
            )));
        }
        if !(self.slat_height.is_finite() && self.slat_height > 0.0) {
            return Err(TimeGridError::Config(format!(
                "slat_height must be a positive number, got {}",
                self.slat_height
            )));
        }

        let range = self.slot_max_minutes - self.slot_min_minutes;
        let slat_count = range.div_ceil(self.slot_duration_minutes) as usize;

        Ok(SlatCoords::uniform(
            TimeDelta::minutes(i64::from(self.slot_min_minutes)),
            TimeDelta::minutes(i64::from(self.slot_duration_minutes)),
            slat_count,
            self.slat_height,
        ))
    }
}
