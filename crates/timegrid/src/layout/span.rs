//! Vertical span computation.
//!
//! Converts each segment's start and end instants into an integer pixel span
//! for one column, using a [`CoordinateLookup`].

use chrono::NaiveDate;
use log::{debug, trace};

use timegrid_core::{geometry::VerticalSpan, segment::Segment};

use crate::coords::CoordinateLookup;

/// Compute the vertical span of every segment inside the column for `column_date`.
///
/// Returns one span per segment, in input order. When no `lookup` is
/// available yet (the column has not been measured), returns an empty list;
/// callers then treat every segment as having no span.
///
/// The end offset is raised to at least `start + min_height`, so zero-length
/// and very short segments remain visible. Both offsets are rounded to whole
/// pixels before the span is built, so sub-pixel jitter in the lookup cannot
/// change whether two spans overlap.
///
/// # Arguments
///
/// * `segments` - Segments to measure
/// * `column_date` - Date displayed by the column
/// * `lookup` - Instant to pixel offset conversion, if the column is measured
/// * `min_height` - Minimum span height in pixels (default 0, negatives ignored)
pub fn compute_spans(
    segments: &[Segment],
    column_date: NaiveDate,
    lookup: Option<&dyn CoordinateLookup>,
    min_height: Option<f32>,
) -> Vec<VerticalSpan> {
    let Some(lookup) = lookup else {
        debug!(segments = segments.len(); "No coordinate lookup, skipping span computation");
        return Vec::new();
    };

    let min_height = min_height
        .filter(|height| height.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    let spans: Vec<_> = segments
        .iter()
        .map(|segment| {
            let start = lookup.date_top(segment.start(), column_date);
            let end = (start + min_height).max(lookup.date_top(segment.end(), column_date));
            let span = VerticalSpan::from_offsets(start, end);

            trace!(
                event_id = segment.def().id(),
                start = span.start(),
                end = span.end();
                "Computed segment span"
            );

            span
        })
        .collect();

    debug!(segments = spans.len(), min_height; "Computed segment spans");

    spans
}
