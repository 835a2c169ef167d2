//! Geometric primitives for time-grid layout.
//!
//! This module provides the two shapes the layout engine reasons about:
//!
//! - [`VerticalSpan`] - An integer pixel extent along the time axis of a column
//! - [`SegRect`] - A placement rectangle: a span plus its horizontal lane
//!
//! # Coordinate System
//!
//! ```text
//!   0.0 ──── level coord ────► 1.0
//!    │
//!    │  time (pixels)
//!    ▼
//! ```
//!
//! - **Vertical**: Integer pixels, increasing downward with time.
//! - **Horizontal**: Fractions of the column width, `0.0` at the left edge
//!   and `1.0` at the right edge.

/// A vertical pixel extent inside a time column.
///
/// The end is never above the start: [`VerticalSpan::new`] clamps `end` up to
/// `start`, so a span always has a non-negative height.
///
/// # Examples
///
/// ```
/// use timegrid_core::geometry::VerticalSpan;
///
/// let span = VerticalSpan::new(40, 10);
/// assert_eq!(span.start(), 40);
/// assert_eq!(span.end(), 40);
/// assert!(span.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VerticalSpan {
    start: i32,
    end: i32,
}

impl VerticalSpan {
    /// Creates a new span, clamping `end` so that it is not above `start`.
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Creates a span from fractional offsets, rounding each to the nearest pixel.
    ///
    /// Rounding happens before the ordering is enforced, so two offsets that
    /// differ by less than half a pixel always produce the same integer edge.
    pub fn from_offsets(start: f32, end: f32) -> Self {
        Self::new(start.round() as i32, end.round() as i32)
    }

    /// Returns the top edge in pixels
    pub fn start(self) -> i32 {
        self.start
    }

    /// Returns the bottom edge in pixels
    pub fn end(self) -> i32 {
        self.end
    }

    /// Returns the height of the span in pixels
    pub fn height(self) -> i32 {
        self.end - self.start
    }

    /// Returns true if the span has zero height
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Checks whether two spans share at least one pixel row.
    ///
    /// Spans that only touch (one ends exactly where the other starts) do
    /// not intersect.
    pub fn intersects(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the smallest span covering both spans.
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A placement rectangle for one segment.
///
/// The vertical extent is a [`VerticalSpan`]; the horizontal extent is
/// described by `level_coord` (left edge) and `thickness` (width), both as
/// fractions of the column width. `stack_depth` is the draw-order ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegRect {
    span: VerticalSpan,
    thickness: f32,
    level_coord: f32,
    stack_depth: usize,
}

impl SegRect {
    /// Creates a new rectangle.
    ///
    /// # Arguments
    ///
    /// * `span` - Vertical pixel extent
    /// * `thickness` - Width as a fraction of the column
    /// * `level_coord` - Left edge as a fraction of the column
    /// * `stack_depth` - Draw-order ordinal
    pub fn new(span: VerticalSpan, thickness: f32, level_coord: f32, stack_depth: usize) -> Self {
        Self {
            span,
            thickness,
            level_coord,
            stack_depth,
        }
    }

    /// Returns the vertical span
    pub fn span(&self) -> VerticalSpan {
        self.span
    }

    /// Returns the top edge in pixels
    pub fn start(&self) -> i32 {
        self.span.start()
    }

    /// Returns the bottom edge in pixels
    pub fn end(&self) -> i32 {
        self.span.end()
    }

    /// Returns the width fraction
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Returns the left edge fraction
    pub fn level_coord(&self) -> f32 {
        self.level_coord
    }

    /// Returns the draw-order ordinal
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    /// Sets the width fraction
    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    /// Sets the left edge fraction
    pub fn set_level_coord(&mut self, level_coord: f32) {
        self.level_coord = level_coord;
    }

    /// Sets the draw-order ordinal
    pub fn set_stack_depth(&mut self, stack_depth: usize) {
        self.stack_depth = stack_depth;
    }

    /// Returns the right edge fraction (`level_coord + thickness`)
    pub fn level_end(&self) -> f32 {
        self.level_coord + self.thickness
    }
}
