//! Placement orchestration.
//!
//! Splits segments into those with a vertical span and those without,
//! delegates the former to a [`SegmentPacker`], and reassembles one
//! [`Placement`] per segment.

use log::{debug, warn};

use timegrid_core::{
    geometry::{SegRect, VerticalSpan},
    segment::Segment,
};

use super::packing::{HiddenGroup, PlacementInput, SegmentPacker};

/// A list of vertical spans indexed like the segment list.
///
/// The list may be shorter than the segment list or contain holes; a missing
/// entry means the segment has no span.
pub trait SpanSource {
    /// Returns the span of the segment at `index`, if it has one.
    fn span_at(&self, index: usize) -> Option<VerticalSpan>;
}

impl SpanSource for [VerticalSpan] {
    fn span_at(&self, index: usize) -> Option<VerticalSpan> {
        self.get(index).copied()
    }
}

impl SpanSource for [Option<VerticalSpan>] {
    fn span_at(&self, index: usize) -> Option<VerticalSpan> {
        self.get(index).copied().flatten()
    }
}

impl<T> SpanSource for Vec<T>
where
    [T]: SpanSource,
{
    fn span_at(&self, index: usize) -> Option<VerticalSpan> {
        self.as_slice().span_at(index)
    }
}

/// Options forwarded to the packer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Keep lane order consistent with start order instead of filling gaps.
    pub strict_order: bool,
    /// Maximum number of segments stacked at one point; `None` is unbounded.
    pub max_stack: Option<usize>,
}

impl PlacementOptions {
    /// Set strict ordering (builder style).
    pub fn with_strict_order(mut self, strict_order: bool) -> Self {
        self.strict_order = strict_order;
        self
    }

    /// Set the stack limit (builder style).
    pub fn with_max_stack(mut self, max_stack: Option<usize>) -> Self {
        self.max_stack = max_stack;
        self
    }
}

/// A segment together with its rectangle, if it could be placed.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    segment: &'a Segment,
    rect: Option<SegRect>,
}

impl<'a> Placement<'a> {
    /// Create a new placement
    pub fn new(segment: &'a Segment, rect: Option<SegRect>) -> Self {
        Self { segment, rect }
    }

    /// Returns the placed segment
    pub fn segment(&self) -> &'a Segment {
        self.segment
    }

    /// Returns the rectangle, or `None` if the segment is not drawn
    pub fn rect(&self) -> Option<&SegRect> {
        self.rect.as_ref()
    }

    /// Returns a mutable reference to the rectangle
    pub fn rect_mut(&mut self) -> Option<&mut SegRect> {
        self.rect.as_mut()
    }

    /// Returns true if the segment received a rectangle
    pub fn is_placed(&self) -> bool {
        self.rect.is_some()
    }
}

/// Result of [`compute_placements`].
#[derive(Debug, Clone)]
pub struct PlacementResult<'a> {
    /// One placement per input segment; placed segments first.
    pub placements: Vec<Placement<'a>>,
    /// Hidden groups exactly as returned by the packer. Indices refer to
    /// positions in the input segment list.
    pub hidden_groups: Vec<HiddenGroup>,
}

/// Compute a placement for every segment.
///
/// Segments with a span are packed with full thickness; each keeps its index
/// in `segments` so that packed rectangles can be matched back. The returned
/// list holds the placed segments first, in packer order, followed by every
/// segment without a rectangle in original relative order. A segment lacks a
/// rectangle when it had no span, or when the packer did not return it (for
/// example because it was hidden by the stack limit).
///
/// Packer output referring to unknown or already placed indices is ignored.
///
/// # Arguments
///
/// * `segments` - Segments of one column
/// * `spans` - Spans from [`compute_spans`](super::compute_spans), possibly partial
/// * `options` - Ordering and stacking options for the packer
/// * `packer` - Overlap packing engine
pub fn compute_placements<'a, S>(
    segments: &'a [Segment],
    spans: &S,
    options: PlacementOptions,
    packer: &dyn SegmentPacker,
) -> PlacementResult<'a>
where
    S: SpanSource + ?Sized,
{
    let inputs: Vec<PlacementInput> = (0..segments.len())
        .filter_map(|index| {
            spans.span_at(index).map(|span| PlacementInput {
                index,
                thickness: 1.0,
                span,
            })
        })
        .collect();

    let output = packer.pack(&inputs, options.strict_order, options.max_stack);

    let mut placed = vec![false; segments.len()];
    let mut placements = Vec::with_capacity(segments.len());

    for packed in output.rects {
        match (segments.get(packed.index), placed.get_mut(packed.index)) {
            (Some(segment), Some(seen)) if !*seen => {
                *seen = true;
                placements.push(Placement::new(segment, Some(packed.rect)));
            }
            (Some(_), Some(_)) => {
                warn!(index = packed.index; "Packer returned a segment twice, ignoring duplicate");
            }
            _ => {
                warn!(
                    index = packed.index,
                    segments = segments.len();
                    "Packer returned an unknown segment index, ignoring"
                );
            }
        }
    }

    let placed_count = placements.len();
    placements.extend(
        segments
            .iter()
            .zip(&placed)
            .filter(|&(_, &seen)| !seen)
            .map(|(segment, _)| Placement::new(segment, None)),
    );

    debug!(
        segments = segments.len(),
        with_span = inputs.len(),
        placed = placed_count,
        hidden_groups = output.hidden_groups.len();
        "Computed segment placements"
    );

    PlacementResult {
        placements,
        hidden_groups: output.hidden_groups,
    }
}
