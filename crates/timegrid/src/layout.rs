pub mod packing;
pub mod placement;
pub mod resource;
pub mod span;

pub use packing::{HiddenGroup, LanePacker, PackOutput, PackedRect, PlacementInput, SegmentPacker};
pub use placement::{
    Placement, PlacementOptions, PlacementResult, SpanSource, compute_placements,
};
pub use resource::{ResourceLane, ResourceLanes, apply_resource_partition};
pub use span::compute_spans;
