//! The point collection and its per-frame proximity render cycle.

use rand::{SeedableRng, rngs::StdRng};
use ratatui::style::Color;

use crate::point::{MotionPolicy, Point};
use crate::surface::Surface;

/// Most lines drawn from a single point per frame.
pub const DEFAULT_MAX_CONNECTIONS: usize = 6;

/// Counts gathered while drawing one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Points advanced and rendered.
    pub points: usize,
    /// Proximity lines drawn.
    pub lines: usize,
}

/// An append-only collection of points connected by proximity lines.
#[derive(Debug)]
pub struct WireFrame {
    /// Points in insertion order. Never reordered or pruned.
    points: Vec<Point>,
    /// Stroke colour for proximity lines and base colour for new points.
    color: Color,
    /// Points closer than this are connected.
    proximity_radius: f64,
    /// Cap on lines per point per frame.
    max_connections: usize,
    /// Motion policy handed to points created by [`WireFrame::add_points`].
    policy: MotionPolicy,
    rng: StdRng,
}

impl WireFrame {
    /// Create an empty wireframe seeded from OS entropy.
    pub fn new(color: Color, proximity_radius: f64) -> Self {
        Self {
            points: Vec::new(),
            color,
            proximity_radius,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            policy: MotionPolicy::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a specific random generator.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Set the motion policy for points created by [`WireFrame::add_points`].
    pub fn with_policy(mut self, policy: MotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the per-point line cap.
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn proximity_radius(&self) -> f64 {
        self.proximity_radius
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point. It is drawn from the next frame on.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Append `count` points at random locations on `surface`.
    pub fn add_points<S: Surface + ?Sized>(&mut self, count: usize, surface: &S) {
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        self.points.reserve(count);
        for _ in 0..count {
            let point = Point::random(&mut self.rng, width, height, self.color).with_policy(self.policy);
            self.points.push(point);
        }
        tracing::debug!(added = count, total = self.points.len(), "points added");
    }

    /// Set the debug overlay on every point, or flip each when `state` is `None`.
    pub fn toggle_debug_visuals(&mut self, state: Option<bool>) {
        for point in &mut self.points {
            point.toggle_debug_visuals(state);
        }
    }

    /// Indices of points close to the point at `index`.
    ///
    /// Collects the first `max_connections` qualifying points in collection
    /// order, not the nearest ones.
    pub fn close_points(&self, index: usize) -> Vec<usize> {
        let Some(point) = self.points.get(index) else {
            return Vec::new();
        };
        let location = point.current_location();

        self.points
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .filter(|(_, candidate)| location.distance_to(candidate.current_location()) < self.proximity_radius)
            .map(|(other, _)| other)
            .take(self.max_connections)
            .collect()
    }

    /// Draw one frame: clear, connect close points, then advance and render each point.
    ///
    /// Points are processed in collection order, so a point's lines use the
    /// already-advanced positions of the points before it.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        surface.clear();

        let mut stats = FrameStats::default();
        for index in 0..self.points.len() {
            let from = self.points[index].current_location();
            let close = self.close_points(index);

            surface.set_stroke_color(self.color);
            surface.set_line_width(1.0);
            for other in close {
                surface.stroke_line(from, self.points[other].current_location());
                stats.lines += 1;
            }

            self.advance_and_render(index, surface);
            stats.points += 1;
        }

        stats
    }

    /// Advance the point at `index` one frame and render it.
    pub fn advance_and_render<S: Surface + ?Sized>(&mut self, index: usize, surface: &mut S) {
        if let Some(point) = self.points.get_mut(index) {
            point.draw(surface, &mut self.rng);
        }
    }
}
