//! A single wandering point and its travel cycle.

use rand::Rng;
use ratatui::style::Color;
use wireframe_core::{Coordinate, bounding_box_around, chained_bezier, random_in_range};

use crate::surface::Surface;

/// Frames needed to traverse one travel segment.
pub const DEFAULT_PROGRESS_LIMIT: u32 = 60;

/// Tunable constants for point motion and rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPolicy {
    /// Frames spent on each travel segment.
    pub progress_limit: u32,
    /// Smallest apothem of the next target's sampling box.
    pub travel_distance_min: i64,
    /// Largest apothem of the next target's sampling box.
    pub travel_distance_max: i64,
    /// Fewest control points per segment.
    pub control_points_min: i64,
    /// Most control points per segment.
    pub control_points_max: i64,
    /// Radius of the plain dot.
    pub dot_radius: f64,
    /// Radius of the current-location dot in debug mode.
    pub debug_dot_radius: f64,
    /// Radius of control polygon and endpoint markers.
    pub marker_radius: f64,
    /// Stroke width of debug lines.
    pub debug_line_width: f64,
    /// Colour of endpoint markers, sampled path and debug dot.
    pub debug_color: Color,
    /// Colour of the control polygon.
    pub debug_path_color: Color,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            progress_limit: DEFAULT_PROGRESS_LIMIT,
            travel_distance_min: 100,
            travel_distance_max: 500,
            control_points_min: 1,
            control_points_max: 5,
            dot_radius: 5.0,
            debug_dot_radius: 10.0,
            marker_radius: 5.0,
            debug_line_width: 4.0,
            debug_color: Color::Rgb(0x00, 0xaa, 0xff),
            debug_path_color: Color::Rgb(0xff, 0xff, 0xff),
        }
    }
}

/// An animated particle travelling along chained Bezier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    initial_location: Coordinate,
    current_location: Coordinate,
    target_location: Coordinate,
    control_locations: Vec<Coordinate>,
    progress: u32,
    color: Color,
    debug_enabled: bool,
    policy: MotionPolicy,
}

impl Point {
    /// Create a resting point at `location`.
    ///
    /// The first segment goes from `location` to itself, so a new point holds
    /// still for one full segment before it starts wandering.
    pub fn new(location: Coordinate, color: Color) -> Self {
        Self {
            initial_location: location,
            current_location: location,
            target_location: location,
            control_locations: Vec::new(),
            progress: 0,
            color,
            debug_enabled: false,
            policy: MotionPolicy::default(),
        }
    }

    /// Create a point at a uniformly random location on a `width` x `height` surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, color: Color) -> Self {
        let location = Coordinate::new(
            rng.r#gen::<f64>() * width.max(0.0),
            rng.r#gen::<f64>() * height.max(0.0),
        );
        Self::new(location, color)
    }

    /// Replace the motion policy.
    pub fn with_policy(mut self, policy: MotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable the debug overlay.
    pub fn with_debug_visuals(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Set the debug overlay, or flip it when `state` is `None`.
    pub fn toggle_debug_visuals(&mut self, state: Option<bool>) {
        self.debug_enabled = state.unwrap_or(!self.debug_enabled);
    }

    pub fn initial_location(&self) -> Coordinate {
        self.initial_location
    }

    pub fn current_location(&self) -> Coordinate {
        self.current_location
    }

    pub fn target_location(&self) -> Coordinate {
        self.target_location
    }

    pub fn control_locations(&self) -> &[Coordinate] {
        &self.control_locations
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn progress_limit(&self) -> u32 {
        self.progress_limit_or_one()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    fn progress_limit_or_one(&self) -> u32 {
        self.policy.progress_limit.max(1)
    }

    /// Position on the current segment at parameter `t`.
    pub fn location_at(&self, t: f64) -> Coordinate {
        chained_bezier(
            self.initial_location,
            &self.control_locations,
            self.target_location,
            t,
        )
    }

    /// The current segment sampled at `progress_limit + 1` evenly spaced parameters.
    pub fn path_samples(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let limit = self.progress_limit_or_one();
        (0..=limit).map(move |step| self.location_at(step as f64 / limit as f64))
    }

    /// Advance one frame, then render onto `surface`.
    pub fn draw<S, R>(&mut self, surface: &mut S, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.advance(surface.width() as f64, surface.height() as f64, rng);
        self.render(surface);
    }

    /// Advance the travel cycle by exactly one frame.
    ///
    /// When `progress` reaches the limit the point has arrived at its target and
    /// a new segment starting from there is generated in the same step.
    pub fn advance<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        let limit = self.progress_limit_or_one();
        if self.progress >= limit {
            self.retarget(width, height, rng);
        }

        self.progress += 1;
        self.current_location = self.location_at(self.progress as f64 / limit as f64);

        if self.progress >= limit {
            self.retarget(width, height, rng);
        }
    }

    /// Start a new segment from the current location.
    fn retarget<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.initial_location = self.current_location;
        self.progress = 0;

        let travel_distance = random_in_range(
            rng,
            self.policy.travel_distance_min,
            self.policy.travel_distance_max,
        );
        let travel_box = bounding_box_around(self.current_location, width, height, travel_distance as f64);

        self.target_location = travel_box.sample(rng, width, height);

        let control_count = random_in_range(
            rng,
            self.policy.control_points_min,
            self.policy.control_points_max,
        )
        .max(0) as usize;
        self.control_locations = (0..control_count)
            .map(|_| travel_box.sample(rng, width, height))
            .collect();

        tracing::trace!(
            next = ?self.target_location,
            controls = control_count,
            "point retargeted"
        );
    }

    /// Issue the draw calls for the current state.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.debug_enabled {
            surface.set_fill_color(self.color);
            surface.fill_circle(self.current_location, self.policy.dot_radius);
            return;
        }

        let policy = &self.policy;

        // control polygon
        surface.set_stroke_color(policy.debug_path_color);
        surface.set_fill_color(policy.debug_path_color);
        surface.set_line_width(policy.debug_line_width);
        let mut previous = self.initial_location;
        for &location in self.control_locations.iter().chain([&self.target_location]) {
            surface.stroke_line(previous, location);
            surface.fill_circle(location, policy.marker_radius);
            previous = location;
        }

        surface.set_fill_color(policy.debug_color);
        surface.fill_circle(self.initial_location, policy.marker_radius);
        surface.fill_circle(self.target_location, policy.marker_radius);

        surface.set_stroke_color(policy.debug_color);
        let mut last = self.initial_location;
        for sample in self.path_samples() {
            surface.stroke_line(last, sample);
            last = sample;
        }

        surface.fill_circle(self.current_location, policy.debug_dot_radius);
        surface.set_line_width(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DisplayList;
    use rand::{SeedableRng, rngs::StdRng};

    const ORANGE: Color = Color::Rgb(0xff, 0x55, 0x00);

    #[test]
    fn test_new_point_rests() {
        let point = Point::new(Coordinate::new(10.0, 10.0), ORANGE);
        assert_eq!(point.progress(), 0);
        assert_eq!(point.progress_limit(), DEFAULT_PROGRESS_LIMIT);
        assert_eq!(point.current_location(), point.target_location());
        assert!(point.control_locations().is_empty());
        assert!(!point.debug_enabled());
    }

    #[test]
    fn test_first_segment_holds_still() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut point = Point::new(Coordinate::new(10.0, 10.0), ORANGE);
        for frame in 1..DEFAULT_PROGRESS_LIMIT {
            point.advance(800.0, 600.0, &mut rng);
            assert_eq!(point.progress(), frame);
            assert_eq!(point.current_location(), Coordinate::new(10.0, 10.0));
        }
    }

    #[test]
    fn test_retargets_after_progress_limit_frames() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut surface = DisplayList::new(800, 600);
        let mut point = Point::new(Coordinate::new(10.0, 10.0), ORANGE);
        let original_target = point.target_location();

        for _ in 0..DEFAULT_PROGRESS_LIMIT {
            point.draw(&mut surface, &mut rng);
        }

        assert_eq!(point.progress(), 0);
        assert_ne!(point.target_location(), original_target);
        assert!((1..=5).contains(&point.control_locations().len()));
        assert_eq!(point.initial_location(), Coordinate::new(10.0, 10.0));
    }

    #[test]
    fn test_segment_ends_on_curve_end() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut point = Point::new(Coordinate::new(400.0, 300.0), ORANGE);
        // finish the resting segment
        for _ in 0..DEFAULT_PROGRESS_LIMIT {
            point.advance(800.0, 600.0, &mut rng);
        }

        let initial = point.initial_location();
        let controls = point.control_locations().to_vec();
        let target = point.target_location();

        for frame in 1..=DEFAULT_PROGRESS_LIMIT {
            point.advance(800.0, 600.0, &mut rng);
            if frame < DEFAULT_PROGRESS_LIMIT {
                let t = frame as f64 / DEFAULT_PROGRESS_LIMIT as f64;
                assert_eq!(point.current_location(), chained_bezier(initial, &controls, target, t));
            }
        }

        let end = chained_bezier(initial, &controls, target, 1.0);
        assert_eq!(point.current_location(), end);
        assert_eq!(point.initial_location(), end);
        assert_eq!(point.progress(), 0);
    }

    #[test]
    fn test_progress_never_reaches_limit_between_frames() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut point = Point::new(Coordinate::new(50.0, 50.0), ORANGE);
        for _ in 0..1000 {
            point.advance(300.0, 200.0, &mut rng);
            assert!(point.progress() < point.progress_limit());
        }
    }

    #[test]
    fn test_targets_stay_on_surface() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut point = Point::new(Coordinate::new(0.0, 0.0), ORANGE);
        for _ in 0..2000 {
            point.advance(320.0, 180.0, &mut rng);
            let t = point.target_location();
            assert!((0.0..=320.0).contains(&t.x) && (0.0..=180.0).contains(&t.y));
            for c in point.control_locations() {
                assert!((0.0..=320.0).contains(&c.x) && (0.0..=180.0).contains(&c.y));
            }
        }
    }

    #[test]
    fn test_target_within_travel_box() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut point = Point::new(Coordinate::new(1000.0, 1000.0), ORANGE);
        for _ in 0..DEFAULT_PROGRESS_LIMIT * 20 {
            let before = point.progress();
            point.advance(2000.0, 2000.0, &mut rng);
            if before + 1 == DEFAULT_PROGRESS_LIMIT {
                let from = point.initial_location();
                let to = point.target_location();
                assert!((to.x - from.x).abs() <= 500.0);
                assert!((to.y - from.y).abs() <= 500.0);
            }
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy = MotionPolicy {
            progress_limit: 4,
            control_points_min: 2,
            control_points_max: 2,
            ..MotionPolicy::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut point = Point::new(Coordinate::new(5.0, 5.0), ORANGE).with_policy(policy);
        for _ in 0..4 {
            point.advance(100.0, 100.0, &mut rng);
        }
        assert_eq!(point.progress(), 0);
        assert_eq!(point.control_locations().len(), 2);
        assert_eq!(point.path_samples().count(), 5);
    }

    #[test]
    fn test_plain_render() {
        let mut surface = DisplayList::new(100, 100);
        let point = Point::new(Coordinate::new(20.0, 30.0), ORANGE);
        point.render(&mut surface);

        assert_eq!(
            surface.commands(),
            &[crate::surface::DrawCommand::FillCircle {
                center: Coordinate::new(20.0, 30.0),
                radius: 5.0,
                color: ORANGE,
            }]
        );
    }

    #[test]
    fn test_debug_render() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut point = Point::new(Coordinate::new(200.0, 200.0), ORANGE).with_debug_visuals();
        for _ in 0..DEFAULT_PROGRESS_LIMIT + 10 {
            point.advance(400.0, 400.0, &mut rng);
        }

        let mut surface = DisplayList::new(400, 400);
        point.render(&mut surface);

        let controls = point.control_locations().len();
        let policy = MotionPolicy::default();

        let polygon = surface
            .lines()
            .filter(|&(_, _, color, _)| color == policy.debug_path_color)
            .count();
        assert_eq!(polygon, controls + 1);

        let path = surface
            .lines()
            .filter(|&(_, _, color, _)| color == policy.debug_color)
            .count();
        assert_eq!(path, DEFAULT_PROGRESS_LIMIT as usize + 1);
        assert!(surface.lines().all(|(_, _, _, width)| width == 4.0));

        let circles: Vec<_> = surface.circles().collect();
        // polygon markers, initial and target markers, enlarged current dot
        assert_eq!(circles.len(), controls + 1 + 2 + 1);
        assert_eq!(
            circles.last(),
            Some(&(point.current_location(), 10.0, policy.debug_color))
        );
        assert!(circles.iter().all(|&(_, _, color)| color != ORANGE));
    }

    #[test]
    fn test_toggle_debug_visuals() {
        let mut point = Point::new(Coordinate::default(), ORANGE);
        point.toggle_debug_visuals(None);
        assert!(point.debug_enabled());
        point.toggle_debug_visuals(Some(true));
        assert!(point.debug_enabled());
        point.toggle_debug_visuals(None);
        assert!(!point.debug_enabled());
    }

    #[test]
    fn test_random_point_on_surface() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let point = Point::random(&mut rng, 64.0, 32.0, ORANGE);
            let at = point.current_location();
            assert!((0.0..=64.0).contains(&at.x) && (0.0..=32.0).contains(&at.y));
        }
    }
}
