//! Integration tests for the ColumnLayoutBuilder API
//!
//! These tests run the full span → placement → resource pipeline through the
//! public API.

use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use float_cmp::assert_approx_eq;

use timegrid::{
    ColumnLayoutBuilder,
    config::{GridConfig, LayoutConfig},
    coords::CoordinateLookup,
    geometry::{SegRect, VerticalSpan},
    layout::{PackOutput, PlacementInput, SegmentPacker},
    segment::{EventDef, ResourceId, Segment},
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid test date")
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    date()
        .and_hms_opt(hour, minute, 0)
        .expect("valid test instant")
}

fn event(id: &str, resource: i64, start: NaiveDateTime, end: NaiveDateTime) -> Segment {
    Segment::new(Rc::new(EventDef::new(id).with_resource(resource)), start, end)
}

fn rect<'l>(layout: &'l timegrid::ColumnLayout<'_>, id: &str) -> &'l SegRect {
    layout
        .placement_of(id)
        .and_then(|placement| placement.rect())
        .expect("event should be placed")
}

#[test]
fn test_resource_columns_scenario() {
    let segments = vec![
        event("A", 1, at(9, 0), at(10, 0)),
        event("B", 1, at(9, 30), at(10, 30)),
        event("C", 2, at(9, 0), at(9, 30)),
    ];
    let coords = GridConfig::default().slat_coords().expect("valid grid");
    let builder = ColumnLayoutBuilder::new(LayoutConfig::default().with_resource_columns(true));

    let layout = builder.layout(&segments, date(), Some(&coords));

    for id in ["A", "B"] {
        let rect = rect(&layout, id);
        assert_approx_eq!(f32, rect.level_coord(), 0.0);
        assert_approx_eq!(f32, rect.thickness(), 0.5);
        assert_eq!(rect.stack_depth(), 0);
    }
    let rect_c = rect(&layout, "C");
    assert_approx_eq!(f32, rect_c.level_coord(), 0.5);
    assert_approx_eq!(f32, rect_c.thickness(), 0.5);
    assert_eq!(rect_c.stack_depth(), 1);

    let lanes = layout.resource_lanes.as_ref().expect("resource lanes");
    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[&Some(ResourceId::from(2))].stack_depth(), 1);

    // Vertical spans come from the slat coordinates: 20px per half hour.
    assert_eq!(rect(&layout, "A").span(), VerticalSpan::new(360, 400));
    assert_eq!(rect_c.span(), VerticalSpan::new(360, 380));
}

#[test]
fn test_zero_duration_with_min_height() {
    let segments = vec![event("point", 1, at(9, 0), at(9, 0))];
    let coords = GridConfig::default().slat_coords().expect("valid grid");
    let builder = ColumnLayoutBuilder::new(LayoutConfig::default().with_event_min_height(15.0));

    let layout = builder.layout(&segments, date(), Some(&coords));

    let offset = coords.date_top(at(9, 0), date()).round() as i32;
    assert_eq!(
        rect(&layout, "point").span(),
        VerticalSpan::new(offset, offset + 15)
    );
}

#[test]
fn test_overlap_without_resource_columns() {
    let segments = vec![
        event("A", 1, at(9, 0), at(10, 0)),
        event("B", 1, at(9, 30), at(10, 30)),
        event("C", 2, at(11, 0), at(12, 0)),
    ];
    let coords = GridConfig::default().slat_coords().expect("valid grid");

    let layout = ColumnLayoutBuilder::default().layout(&segments, date(), Some(&coords));

    assert!(layout.resource_lanes.is_none());
    assert_approx_eq!(f32, rect(&layout, "A").thickness(), 0.5);
    assert_approx_eq!(f32, rect(&layout, "B").level_coord(), 0.5);
    assert_approx_eq!(f32, rect(&layout, "C").thickness(), 1.0);
}

#[test]
fn test_max_stack_produces_hidden_group() {
    let segments = vec![
        event("A", 1, at(9, 0), at(10, 0)),
        event("B", 1, at(9, 0), at(10, 0)),
        event("C", 1, at(9, 0), at(10, 0)),
    ];
    let coords = GridConfig::default().slat_coords().expect("valid grid");
    let builder = ColumnLayoutBuilder::new(LayoutConfig::default().with_event_max_stack(Some(2)));

    let layout = builder.layout(&segments, date(), Some(&coords));

    assert_eq!(layout.placements.len(), 3);
    assert_eq!(layout.placed().count(), 2);
    assert_eq!(layout.hidden_groups.len(), 1);
    assert_eq!(layout.hidden_groups[0].indices(), &[2]);
    assert!(
        layout
            .placement_of("C")
            .is_some_and(|placement| !placement.is_placed())
    );
}

#[test]
fn test_resource_columns_keep_hidden_segments_last() {
    let segments = vec![
        event("A", 2, at(9, 0), at(10, 0)),
        event("B", 1, at(9, 0), at(10, 0)),
    ];
    let coords = GridConfig::default().slat_coords().expect("valid grid");
    let config = LayoutConfig::default()
        .with_resource_columns(true)
        .with_event_max_stack(Some(1));

    let layout = ColumnLayoutBuilder::new(config).layout(&segments, date(), Some(&coords));

    let order: Vec<(&str, bool)> = layout
        .placements
        .iter()
        .map(|placement| (placement.segment().def().id(), placement.is_placed()))
        .collect();
    assert_eq!(order, vec![("A", true), ("B", false)]);

    // Only the placed resource takes part, so it spans the full column.
    let rect_a = rect(&layout, "A");
    assert_approx_eq!(f32, rect_a.thickness(), 1.0);
    assert_approx_eq!(f32, rect_a.level_coord(), 0.0);
}

#[test]
fn test_without_lookup_nothing_is_placed() {
    let segments = vec![event("A", 1, at(9, 0), at(10, 0))];
    let builder = ColumnLayoutBuilder::new(LayoutConfig::default().with_resource_columns(true));

    let layout = builder.layout(&segments, date(), None);

    assert_eq!(layout.placements.len(), 1);
    assert_eq!(layout.placed().count(), 0);
    assert!(layout.resource_lanes.as_ref().is_some_and(|lanes| lanes.is_empty()));
}

/// Packer placing every input in its own full-width lane at depth = index.
struct IndexPacker;

impl SegmentPacker for IndexPacker {
    fn pack(
        &self,
        inputs: &[PlacementInput],
        _strict_order: bool,
        _max_stack: Option<usize>,
    ) -> PackOutput {
        PackOutput {
            rects: inputs
                .iter()
                .map(|input| timegrid::layout::PackedRect {
                    index: input.index,
                    rect: SegRect::new(input.span, 1.0, 0.0, input.index),
                })
                .collect(),
            hidden_groups: Vec::new(),
        }
    }
}

#[test]
fn test_custom_packer() {
    let segments = vec![
        event("A", 1, at(9, 0), at(10, 0)),
        event("B", 1, at(9, 30), at(10, 30)),
    ];
    let lookup = |instant: NaiveDateTime, column: NaiveDate| {
        (instant - column.and_hms_opt(0, 0, 0).expect("midnight")).num_minutes() as f32
    };
    let builder = ColumnLayoutBuilder::default().with_packer(Box::new(IndexPacker));

    let layout = builder.layout(&segments, date(), Some(&lookup));

    assert_eq!(rect(&layout, "B").stack_depth(), 1);
    assert_approx_eq!(f32, rect(&layout, "B").thickness(), 1.0);
    assert_eq!(rect(&layout, "A").span(), VerticalSpan::new(540, 600));
}

#[test]
fn test_builder_reusability() {
    let coords = GridConfig::default().slat_coords().expect("valid grid");
    let builder = ColumnLayoutBuilder::default();

    let monday = vec![event("A", 1, at(9, 0), at(10, 0))];
    let tuesday_date = date().succ_opt().expect("valid date");
    let tuesday = vec![event(
        "B",
        1,
        tuesday_date.and_hms_opt(12, 0, 0).expect("valid instant"),
        tuesday_date.and_hms_opt(13, 0, 0).expect("valid instant"),
    )];

    let first = builder.layout(&monday, date(), Some(&coords));
    let second = builder.layout(&tuesday, tuesday_date, Some(&coords));

    assert_eq!(rect(&first, "A").span(), VerticalSpan::new(360, 400));
    assert_eq!(rect(&second, "B").span(), VerticalSpan::new(480, 520));
}
