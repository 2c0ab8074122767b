//! Core types for the wireframe animation.
//!
//! The geometry kernel (interpolation, chained Bezier evaluation, clamping and
//! sampling regions) plus the small UI enums shared by the config and the stage.

mod geometry;
mod ui;

pub use geometry::{
    BoundingBox, Coordinate, bounding_box_around, chained_bezier, clamp, distance, lerp,
    quadratic_bezier, random_in_range,
};
pub use ui::{Theme, UnknownVariant, Visibility};
