//! Timegrid Core Types and Definitions
//!
//! This crate provides the foundational types shared by the time-grid layout
//! engine. It includes:
//!
//! - **Geometry**: Pixel spans and placement rectangles ([`geometry`] module)
//! - **Segments**: Event definitions, resource identifiers, and the segments
//!   rendered inside a column ([`segment`] module)

pub mod geometry;
pub mod segment;
