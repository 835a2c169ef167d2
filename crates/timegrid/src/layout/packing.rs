//! Overlap packing contract.
//!
//! The placement orchestrator hands every segment that has a vertical span
//! to a [`SegmentPacker`], which resolves overlaps into horizontal lanes.
//! Packers are injected, so callers can swap in their own algorithm;
//! [`LanePacker`] is the default.
//!
//! # Contract
//!
//! - Every returned [`PackedRect`] carries the `index` of the
//!   [`PlacementInput`] it was built from.
//! - Overlapping inputs are spread over the minimum number of lanes the
//!   algorithm can find.
//! - When `max_stack` is set, inputs that would stack deeper are left out of
//!   the rectangles and reported in a [`HiddenGroup`] instead.
//! - `strict_order` keeps later-starting inputs from moving into lanes below
//!   earlier colliding ones.
//! - The same input yields the same output on every call.

mod lanes;

pub use lanes::LanePacker;

use timegrid_core::geometry::{SegRect, VerticalSpan};

/// One segment handed to a packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    /// Position of the segment in the caller's segment list.
    pub index: usize,
    /// Relative lane weight; `1.0` for a full lane.
    pub thickness: f32,
    pub span: VerticalSpan,
}

/// A rectangle produced by a packer for the input at `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedRect {
    pub index: usize,
    pub rect: SegRect,
}

/// Inputs suppressed because too many segments overlap at one point.
///
/// A renderer typically draws a single "+N more" indicator across `span`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenGroup {
    span: VerticalSpan,
    indices: Vec<usize>,
}

impl HiddenGroup {
    /// Creates a group covering `span` with the given input indices.
    pub fn new(span: VerticalSpan, indices: Vec<usize>) -> Self {
        Self { span, indices }
    }

    /// Returns the span covered by all hidden inputs
    pub fn span(&self) -> VerticalSpan {
        self.span
    }

    /// Returns the indices of the hidden inputs
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of hidden inputs
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the group holds no inputs
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Result of a packing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutput {
    pub rects: Vec<PackedRect>,
    pub hidden_groups: Vec<HiddenGroup>,
}

/// Trait defining the interface for overlap packing engines
pub trait SegmentPacker {
    /// Assign lanes to `inputs`.
    ///
    /// - `strict_order`: keep lane order consistent with input order
    ///   instead of filling gaps.
    /// - `max_stack`: maximum number of inputs stacked at one point;
    ///   `None` is unbounded.
    fn pack(
        &self,
        inputs: &[PlacementInput],
        strict_order: bool,
        max_stack: Option<usize>,
    ) -> PackOutput;
}
