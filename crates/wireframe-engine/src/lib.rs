//! Point motion and proximity rendering for the wireframe animation.
//!
//! A [`WireFrame`] owns an append-only arena of [`Point`]s. Each frame it
//! connects points that are near each other and advances every point along its
//! chained Bezier travel segment. Drawing goes through the [`Surface`] trait;
//! the stage records into a [`DisplayList`] and rasterizes it with
//! [`WireFrameCanvas`].

mod point;
mod surface;
mod widget;
mod wireframe;

pub use point::{DEFAULT_PROGRESS_LIMIT, MotionPolicy, Point};
pub use surface::{DisplayList, DrawCommand, Surface};
pub use widget::{WireFrameCanvas, braille_resolution};
pub use wireframe::{DEFAULT_MAX_CONNECTIONS, FrameStats, WireFrame};
