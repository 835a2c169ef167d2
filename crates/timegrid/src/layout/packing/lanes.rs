//! Level-hierarchy lane packing.
//!
//! Inputs are inserted one at a time into a stack of levels. A level is a
//! horizontal coordinate; an input lands on the lowest coordinate above every
//! colliding input it would otherwise overlap. After insertion, groups of
//! transitively overlapping inputs are normalized so that each group spans
//! the full column width.

use std::cmp::Reverse;

use log::{debug, trace};

use timegrid_core::geometry::{SegRect, VerticalSpan};

use super::{HiddenGroup, PackOutput, PackedRect, PlacementInput, SegmentPacker};

/// Default [`SegmentPacker`] based on a level hierarchy.
///
/// - Non-strict mode fills the first free level, ordering inputs by start
///   and placing longer inputs first.
/// - Strict mode orders inputs by start and index only, and always places an
///   input above the highest colliding one.
/// - An input's stack count is one more than that of the colliding inputs
///   it rests on; inputs reaching `max_stack` are hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanePacker;

impl LanePacker {
    /// Create a new lane packer
    pub fn new() -> Self {
        Self
    }
}

impl SegmentPacker for LanePacker {
    fn pack(
        &self,
        inputs: &[PlacementInput],
        strict_order: bool,
        max_stack: Option<usize>,
    ) -> PackOutput {
        let mut ordered = inputs.to_vec();
        if strict_order {
            ordered.sort_by_key(|input| (input.span.start(), input.index));
        } else {
            ordered.sort_by_key(|input| {
                (input.span.start(), Reverse(input.span.end()), input.index)
            });
        }

        let mut hierarchy = Hierarchy::new(strict_order, max_stack);
        for input in ordered {
            hierarchy.insert(input);
        }

        let output = hierarchy.into_output();

        debug!(
            inputs = inputs.len(),
            rects = output.rects.len(),
            hidden_groups = output.hidden_groups.len(),
            strict_order;
            "Packed segments into lanes"
        );

        output
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    input: PlacementInput,
    thickness: f32,
    stack_count: usize,
}

#[derive(Debug)]
struct Level {
    coord: f32,
    entries: Vec<Entry>,
}

/// Where an input would be inserted.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    coord: f32,
    stack_count: usize,
}

/// A placed entry together with its level, ready for normalization.
#[derive(Debug, Clone, Copy)]
struct Placed {
    entry: Entry,
    coord: f32,
    depth: usize,
}

#[derive(Debug)]
struct Hierarchy {
    strict_order: bool,
    max_stack: Option<usize>,
    levels: Vec<Level>,
    hidden: Vec<PlacementInput>,
}

impl Hierarchy {
    fn new(strict_order: bool, max_stack: Option<usize>) -> Self {
        Self {
            strict_order,
            max_stack,
            levels: Vec::new(),
            hidden: Vec::new(),
        }
    }

    fn insert(&mut self, input: PlacementInput) {
        let thickness = lane_weight(input.thickness);
        let insertion = self.find_insertion(input.span, thickness);

        if self
            .max_stack
            .is_some_and(|max_stack| insertion.stack_count >= max_stack)
        {
            trace!(
                index = input.index,
                stack_count = insertion.stack_count;
                "Hiding input over the stack limit"
            );
            self.hidden.push(input);
            return;
        }

        let entry = Entry {
            input,
            thickness,
            stack_count: insertion.stack_count,
        };

        match self
            .levels
            .iter()
            .position(|level| level.coord >= insertion.coord)
        {
            Some(pos) if self.levels[pos].coord == insertion.coord => {
                self.levels[pos].entries.push(entry);
            }
            Some(pos) => self.levels.insert(
                pos,
                Level {
                    coord: insertion.coord,
                    entries: vec![entry],
                },
            ),
            None => self.levels.push(Level {
                coord: insertion.coord,
                entries: vec![entry],
            }),
        }
    }

    fn find_insertion(&self, span: VerticalSpan, thickness: f32) -> Insertion {
        let mut coord = 0.0_f32;
        let mut stack_count = 0;

        for level in &self.levels {
            // A gap wide enough for the input has been found below this level.
            if !self.strict_order && level.coord >= coord + thickness {
                break;
            }

            for entry in level
                .entries
                .iter()
                .filter(|entry| entry.input.span.intersects(span))
            {
                let bottom = level.coord + entry.thickness;
                if bottom > coord {
                    coord = bottom;
                    stack_count = entry.stack_count + 1;
                } else if bottom == coord {
                    stack_count = stack_count.max(entry.stack_count + 1);
                }
            }
        }

        Insertion { coord, stack_count }
    }

    fn into_output(self) -> PackOutput {
        let mut placed: Vec<Placed> = self
            .levels
            .iter()
            .enumerate()
            .flat_map(|(depth, level)| {
                level.entries.iter().map(move |&entry| Placed {
                    entry,
                    coord: level.coord,
                    depth,
                })
            })
            .collect();

        placed.sort_by(|a, b| {
            a.entry
                .input
                .span
                .start()
                .cmp(&b.entry.input.span.start())
                .then(a.coord.total_cmp(&b.coord))
                .then(a.entry.input.index.cmp(&b.entry.input.index))
        });

        let rects = clusters(&placed)
            .into_iter()
            .flat_map(normalize_cluster)
            .collect();

        PackOutput {
            rects,
            hidden_groups: group_hidden(self.hidden),
        }
    }
}

/// Non-positive or non-finite weights fall back to a full lane.
fn lane_weight(thickness: f32) -> f32 {
    if thickness.is_finite() && thickness > 0.0 {
        thickness
    } else {
        1.0
    }
}

/// Split entries sorted by span start into runs of transitively overlapping spans.
fn clusters(placed: &[Placed]) -> Vec<&[Placed]> {
    let mut clusters = Vec::new();
    let mut cluster_start = 0;
    let mut cluster_end = i32::MIN;

    for (idx, item) in placed.iter().enumerate() {
        let span = item.entry.input.span;
        if idx > cluster_start && span.start() >= cluster_end {
            clusters.push(&placed[cluster_start..idx]);
            cluster_start = idx;
            cluster_end = span.end();
        } else {
            cluster_end = cluster_end.max(span.end());
        }
    }

    if cluster_start < placed.len() {
        clusters.push(&placed[cluster_start..]);
    }

    clusters
}

/// Scale a cluster's level coordinates so that it spans the full width.
fn normalize_cluster(cluster: &[Placed]) -> impl Iterator<Item = PackedRect> + '_ {
    let extent = cluster
        .iter()
        .map(|item| item.coord + item.entry.thickness)
        .fold(0.0_f32, f32::max);

    cluster.iter().map(move |item| PackedRect {
        index: item.entry.input.index,
        rect: SegRect::new(
            item.entry.input.span,
            item.entry.thickness / extent,
            item.coord / extent,
            item.depth,
        ),
    })
}

/// Merge hidden inputs into groups of transitively overlapping spans.
fn group_hidden(mut hidden: Vec<PlacementInput>) -> Vec<HiddenGroup> {
    hidden.sort_by_key(|input| (input.span.start(), input.index));

    let mut groups: Vec<(VerticalSpan, Vec<usize>)> = Vec::new();
    for input in hidden {
        match groups.last_mut() {
            Some((span, indices)) if span.intersects(input.span) => {
                *span = span.merge(input.span);
                indices.push(input.index);
            }
            _ => groups.push((input.span, vec![input.index])),
        }
    }

    groups
        .into_iter()
        .map(|(span, mut indices)| {
            indices.sort_unstable();
            HiddenGroup::new(span, indices)
        })
        .collect()
}
