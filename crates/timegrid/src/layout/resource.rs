//! Resource columns.
//!
//! Rewrites placements so that the column is divided into equal shares, one
//! per distinct resource. Every placement of a resource takes that
//! resource's share, regardless of how the packer laid it out.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use timegrid_core::segment::ResourceId;

use super::placement::Placement;

/// Horizontal share assigned to one resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceLane {
    level_coord: f32,
    thickness: f32,
    stack_depth: usize,
}

impl ResourceLane {
    /// Returns the left edge of the share
    pub fn level_coord(self) -> f32 {
        self.level_coord
    }

    /// Returns the width of the share
    pub fn thickness(self) -> f32 {
        self.thickness
    }

    /// Returns the draw-order ordinal of the resource
    pub fn stack_depth(self) -> usize {
        self.stack_depth
    }
}

/// Lanes keyed by resource. Segments without a resource share the `None` key.
pub type ResourceLanes = BTreeMap<Option<ResourceId>, ResourceLane>;

/// Divide the column into one equal share per resource.
///
/// Only placements with a rectangle take part. The placed entries are sorted
/// by resource (stable, so each resource keeps its relative order) and stay
/// ahead of every rect-less entry, which keeps its original order. Then every
/// rectangle receives its resource's `level_coord`, `stack_depth`, and the
/// common thickness `1 / resource_count`. Resources are numbered in
/// ascending id order, so the assignment depends only on the set of
/// resources present and not on input order.
///
/// Events of one resource are not re-packed among themselves; overlapping
/// events of the same resource share the same lane.
///
/// With no placed segments there is nothing to divide: the placements are
/// left untouched and the returned map is empty.
///
/// # Returns
///
/// The lane assigned to each resource.
pub fn apply_resource_partition(placements: &mut [Placement<'_>]) -> ResourceLanes {
    let resource_count = placements
        .iter()
        .filter(|placement| placement.is_placed())
        .map(|placement| placement.segment().resource_id())
        .collect::<BTreeSet<_>>()
        .len();

    if resource_count == 0 {
        debug!(placements = placements.len(); "No placed segments, skipping resource partition");
        return ResourceLanes::new();
    }

    let step_size = 1.0 / resource_count as f32;

    // Rect-less placements stay at the tail in their original order.
    placements.sort_by(|a, b| {
        (!a.is_placed(), a.segment().resource_id())
            .cmp(&(!b.is_placed(), b.segment().resource_id()))
    });

    let mut lanes = ResourceLanes::new();

    for placement in placements.iter_mut() {
        let resource_id = placement.segment().resource_id();
        let Some(rect) = placement.rect_mut() else {
            continue;
        };

        let lane = match lanes.get(&resource_id.cloned()) {
            Some(lane) => *lane,
            None => {
                let ordinal = lanes.len();
                let lane = ResourceLane {
                    level_coord: ordinal as f32 * step_size,
                    thickness: step_size,
                    stack_depth: ordinal,
                };
                trace!(
                    resource_id:? = resource_id,
                    level_coord = lane.level_coord,
                    stack_depth = lane.stack_depth;
                    "Assigned resource lane"
                );
                lanes.insert(resource_id.cloned(), lane);
                lane
            }
        };

        rect.set_thickness(lane.thickness);
        rect.set_level_coord(lane.level_coord);
        rect.set_stack_depth(lane.stack_depth);
    }

    debug!(resources = lanes.len(), step_size; "Partitioned column by resource");

    lanes
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{NaiveDate, NaiveDateTime};
    use float_cmp::assert_approx_eq;

    use timegrid_core::{
        geometry::{SegRect, VerticalSpan},
        segment::{EventDef, Segment},
    };

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid test instant")
    }

    fn segment(id: &str, resource: Option<ResourceId>) -> Segment {
        let def = EventDef::new(id);
        let def = match resource {
            Some(resource) => def.with_resource(resource),
            None => def,
        };
        Segment::new(Rc::new(def), at(9, 0), at(10, 0))
    }

    fn placed(segment: &Segment, level_coord: f32) -> Placement<'_> {
        Placement::new(
            segment,
            Some(SegRect::new(VerticalSpan::new(0, 60), 0.5, level_coord, 3)),
        )
    }

    fn rect<'p>(placements: &'p [Placement<'_>], id: &str) -> &'p SegRect {
        placements
            .iter()
            .find(|placement| placement.segment().def().id() == id)
            .and_then(Placement::rect)
            .expect("placement with a rect")
    }

    #[test]
    fn test_two_resources_split_column() {
        let a = segment("A", Some(ResourceId::from(1)));
        let b = segment("B", Some(ResourceId::from(1)));
        let c = segment("C", Some(ResourceId::from(2)));
        let mut placements = vec![placed(&c, 0.0), placed(&a, 0.0), placed(&b, 0.5)];

        let lanes = apply_resource_partition(&mut placements);

        assert_eq!(lanes.len(), 2);
        for id in ["A", "B"] {
            let rect = rect(&placements, id);
            assert_approx_eq!(f32, rect.level_coord(), 0.0);
            assert_approx_eq!(f32, rect.thickness(), 0.5);
            assert_eq!(rect.stack_depth(), 0);
        }
        let rect_c = rect(&placements, "C");
        assert_approx_eq!(f32, rect_c.level_coord(), 0.5);
        assert_approx_eq!(f32, rect_c.thickness(), 0.5);
        assert_eq!(rect_c.stack_depth(), 1);
    }

    #[test]
    fn test_sorted_by_resource_and_stable_within() {
        let first = segment("first", Some(ResourceId::from(5)));
        let other = segment("other", Some(ResourceId::from(1)));
        let second = segment("second", Some(ResourceId::from(5)));
        let mut placements = vec![placed(&first, 0.0), placed(&other, 0.0), placed(&second, 0.0)];

        apply_resource_partition(&mut placements);

        let order: Vec<_> = placements
            .iter()
            .map(|placement| placement.segment().def().id())
            .collect();
        assert_eq!(order, vec!["other", "first", "second"]);
    }

    #[test]
    fn test_empty_input_is_untouched() {
        let mut placements: Vec<Placement<'_>> = Vec::new();
        let lanes = apply_resource_partition(&mut placements);
        assert!(lanes.is_empty());
        assert!(placements.is_empty());
    }

    #[test]
    fn test_unplaced_segments_do_not_count() {
        let a = segment("A", Some(ResourceId::from(1)));
        let b = segment("B", Some(ResourceId::from(2)));
        let mut placements = vec![placed(&a, 0.5), Placement::new(&b, None)];

        let lanes = apply_resource_partition(&mut placements);

        assert_eq!(lanes.len(), 1);
        let rect_a = rect(&placements, "A");
        assert_approx_eq!(f32, rect_a.thickness(), 1.0);
        assert_approx_eq!(f32, rect_a.level_coord(), 0.0);
        assert!(
            placements
                .iter()
                .any(|placement| placement.segment().def().id() == "B" && !placement.is_placed())
        );
    }

    #[test]
    fn test_unplaced_segments_stay_after_placed() {
        let low = segment("low", Some(ResourceId::from(0)));
        let a = segment("A", Some(ResourceId::from(2)));
        let none = segment("none", None);
        let b = segment("B", Some(ResourceId::from(1)));
        let mut placements = vec![
            placed(&a, 0.0),
            Placement::new(&low, None),
            placed(&b, 0.0),
            Placement::new(&none, None),
        ];

        apply_resource_partition(&mut placements);

        let order: Vec<(&str, bool)> = placements
            .iter()
            .map(|placement| (placement.segment().def().id(), placement.is_placed()))
            .collect();
        assert_eq!(
            order,
            vec![("B", true), ("A", true), ("low", false), ("none", false)]
        );
    }

    #[test]
    fn test_only_unplaced_segments_is_noop() {
        let a = segment("A", Some(ResourceId::from(1)));
        let mut placements = vec![Placement::new(&a, None)];

        let lanes = apply_resource_partition(&mut placements);

        assert!(lanes.is_empty());
        assert!(!placements[0].is_placed());
    }

    #[test]
    fn test_missing_resource_gets_first_share() {
        let none = segment("none", None);
        let named = segment("named", Some(ResourceId::from("room")));
        let numbered = segment("numbered", Some(ResourceId::from(3)));
        let mut placements = vec![placed(&named, 0.0), placed(&numbered, 0.0), placed(&none, 0.0)];

        let lanes = apply_resource_partition(&mut placements);

        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[&None].stack_depth(), 0);
        assert_eq!(lanes[&Some(ResourceId::from(3))].stack_depth(), 1);
        assert_eq!(lanes[&Some(ResourceId::from("room"))].stack_depth(), 2);
        assert_approx_eq!(f32, rect(&placements, "named").level_coord(), 2.0 / 3.0);
    }
}
