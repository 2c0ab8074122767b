//! Pure geometry helpers used by the point motion engine.
//!
//! Everything here is stateless. Random helpers borrow the caller's generator so
//! callers decide whether randomness is seeded.

use rand::Rng;

/// A location in canvas pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Construct a new [`Coordinate`].
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(self, other: Coordinate) -> f64 {
        distance(self, other)
    }

    /// Clamp both axes into a `width` x `height` surface.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: clamp(self.x, 0.0, width),
            y: clamp(self.y, 0.0, height),
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned sampling region clamped to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Top-left corner.
    pub min: Coordinate,
    /// Bottom-right corner.
    pub max: Coordinate,
    /// Realized width, shrinks near the surface edges.
    pub width: f64,
    /// Realized height, shrinks near the surface edges.
    pub height: f64,
}

impl BoundingBox {
    /// Sample a coordinate uniformly inside the box, clamped to the surface.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, surface_width: f64, surface_height: f64) -> Coordinate {
        Coordinate {
            x: clamp(
                rng.r#gen::<f64>() * self.width + self.min.x,
                0.0,
                surface_width,
            ),
            y: clamp(
                rng.r#gen::<f64>() * self.height + self.min.y,
                0.0,
                surface_height,
            ),
        }
    }

    /// Whether `point` lies inside the box (edges included).
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Restrict `value` to `[min, max]`.
///
/// Mirrors `min(max(value, min), max)`, so an inverted range resolves to `max`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Uniformly sample an integer in `[min, max]` inclusive.
///
/// An inverted range collapses to `min`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Linear interpolation between two coordinates, `t` is unbounded.
pub fn lerp(a: Coordinate, b: Coordinate, t: f64) -> Coordinate {
    Coordinate {
        x: a.x + t * (b.x - a.x),
        y: a.y + t * (b.y - a.y),
    }
}

/// Evaluate a single quadratic Bezier segment at `t`.
pub fn quadratic_bezier(start: Coordinate, control: Coordinate, end: Coordinate, t: f64) -> Coordinate {
    let first = lerp(start, control, t);
    let second = lerp(control, end, t);
    lerp(first, second, t)
}

/// Evaluate the chained Bezier path used for point travel.
///
/// This is a left fold of [`quadratic_bezier`] over `controls`, where each step's
/// result becomes the next step's start against the same fixed `end`. It is not
/// a composite Bezier curve and its intermediate positions do not match a true
/// multi-point Bezier through the same controls; it yields a smoothed,
/// snake-like path. With no controls it is a straight [`lerp`] from `start` to `end`.
pub fn chained_bezier(start: Coordinate, controls: &[Coordinate], end: Coordinate, t: f64) -> Coordinate {
    if controls.is_empty() {
        return lerp(start, end, t);
    }
    controls
        .iter()
        .fold(start, |current, &control| quadratic_bezier(current, control, end, t))
}

/// Box of half-width `apothem` centred on `center`, clamped to the surface.
pub fn bounding_box_around(
    center: Coordinate,
    surface_width: f64,
    surface_height: f64,
    apothem: f64,
) -> BoundingBox {
    let min = Coordinate {
        x: clamp(center.x - apothem, 0.0, surface_width),
        y: clamp(center.y - apothem, 0.0, surface_height),
    };
    let max = Coordinate {
        x: clamp(center.x + apothem, 0.0, surface_width),
        y: clamp(center.y + apothem, 0.0, surface_height),
    };

    BoundingBox {
        min,
        max,
        width: (max.x - min.x).max(0.0),
        height: (max.y - min.y).max(0.0),
    }
}

/// Euclidean distance between two coordinates.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const EPSILON: f64 = 1e-9;

    fn approx(a: Coordinate, b: Coordinate) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Coordinate::new(3.0, -7.5);
        let b = Coordinate::new(120.0, 48.25);
        assert_eq!(lerp(a, b, 0.0), a);
        assert!(approx(lerp(a, b, 1.0), b));
        assert!(approx(lerp(a, b, 0.5), Coordinate::new(61.5, 20.375)));
    }

    #[test]
    fn test_lerp_extrapolates() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(10.0, 10.0);
        assert!(approx(lerp(a, b, 2.0), Coordinate::new(20.0, 20.0)));
        assert!(approx(lerp(a, b, -1.0), Coordinate::new(-10.0, -10.0)));
    }

    #[test]
    fn test_quadratic_bezier() {
        let start = Coordinate::new(0.0, 0.0);
        let control = Coordinate::new(50.0, 100.0);
        let end = Coordinate::new(100.0, 0.0);
        assert!(approx(quadratic_bezier(start, control, end, 0.0), start));
        assert!(approx(quadratic_bezier(start, control, end, 1.0), end));
        assert!(approx(
            quadratic_bezier(start, control, end, 0.5),
            Coordinate::new(50.0, 50.0)
        ));
    }

    #[test]
    fn test_chained_bezier_without_controls_is_lerp() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(-40.0, 90.0);
        for step in 0..=20 {
            let t = step as f64 / 20.0;
            assert_eq!(chained_bezier(a, &[], b, t), lerp(a, b, t));
        }
    }

    #[test]
    fn test_chained_bezier_follows_fold() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(100.0, 0.0);
        let controls = [Coordinate::new(0.0, 100.0), Coordinate::new(100.0, 100.0)];

        let t = 0.25;
        let first = quadratic_bezier(a, controls[0], b, t);
        let expected = quadratic_bezier(first, controls[1], b, t);
        assert!(approx(chained_bezier(a, &controls, b, t), expected));
    }

    #[test]
    fn test_chained_bezier_is_not_a_single_quadratic() {
        let a = Coordinate::new(5.0, 5.0);
        let b = Coordinate::new(80.0, 40.0);
        let controls = [Coordinate::new(60.0, 0.0), Coordinate::new(0.0, 60.0)];

        assert!(approx(chained_bezier(a, &controls, b, 0.0), a));

        let chained = chained_bezier(a, &controls, b, 0.5);
        assert!(approx(chained, Coordinate::new(32.8125, 42.8125)));
        let single = quadratic_bezier(a, controls[0], b, 0.5);
        assert!(!approx(chained, single));
    }

    #[test]
    fn test_chained_bezier_ends_at_end() {
        let a = Coordinate::new(5.0, 5.0);
        let b = Coordinate::new(80.0, 40.0);
        let controls = [
            Coordinate::new(60.0, 0.0),
            Coordinate::new(0.0, 60.0),
            Coordinate::new(33.0, 12.0),
        ];
        assert!(approx(chained_bezier(a, &controls, b, 1.0), b));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let lo: f64 = rng.gen_range(-500.0..500.0);
            let hi = lo + rng.gen_range(0.0..500.0);
            let v: f64 = rng.gen_range(-2000.0..2000.0);
            let c = clamp(v, lo, hi);
            assert!(c >= lo && c <= hi);
            if (lo..=hi).contains(&v) {
                assert_eq!(c, v);
            }
        }
    }

    #[test]
    fn test_random_in_range_inclusive() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let v = random_in_range(&mut rng, 1, 5);
            assert!((1..=5).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(random_in_range(&mut rng, 4, 4), 4);
        assert_eq!(random_in_range(&mut rng, 9, 2), 9);
    }

    #[test]
    fn test_bounding_box_interior() {
        let bbox = bounding_box_around(Coordinate::new(500.0, 400.0), 1000.0, 800.0, 100.0);
        assert_eq!(bbox.min, Coordinate::new(400.0, 300.0));
        assert_eq!(bbox.max, Coordinate::new(600.0, 500.0));
        assert_eq!(bbox.width, 200.0);
        assert_eq!(bbox.height, 200.0);
    }

    #[test]
    fn test_bounding_box_shrinks_at_edges() {
        let bbox = bounding_box_around(Coordinate::new(10.0, 790.0), 1000.0, 800.0, 100.0);
        assert_eq!(bbox.min, Coordinate::new(0.0, 690.0));
        assert_eq!(bbox.max, Coordinate::new(110.0, 800.0));
        assert_eq!(bbox.width, 110.0);
        assert_eq!(bbox.height, 110.0);
    }

    #[test]
    fn test_bounding_box_outside_surface() {
        // A centre left behind by a shrinking surface collapses onto the edge.
        let bbox = bounding_box_around(Coordinate::new(900.0, 900.0), 200.0, 100.0, 50.0);
        assert_eq!(bbox.min, Coordinate::new(200.0, 100.0));
        assert_eq!(bbox.width, 0.0);
        assert_eq!(bbox.height, 0.0);
    }

    #[test]
    fn test_bounding_box_invariants() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let w: f64 = rng.gen_range(1.0..2000.0);
            let h: f64 = rng.gen_range(1.0..2000.0);
            let center = Coordinate::new(rng.gen_range(-500.0..2500.0), rng.gen_range(-500.0..2500.0));
            let apothem = rng.gen_range(0.0..600.0);
            let bbox = bounding_box_around(center, w, h, apothem);

            assert!(bbox.width >= 0.0 && bbox.height >= 0.0);
            for corner in [bbox.min, bbox.max] {
                assert!((0.0..=w).contains(&corner.x));
                assert!((0.0..=h).contains(&corner.y));
            }

            let sample = bbox.sample(&mut rng, w, h);
            assert!((0.0..=w).contains(&sample.x));
            assert!((0.0..=h).contains(&sample.y));
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0)), 5.0);
        assert_eq!(Coordinate::new(1.0, 1.0).distance_to(Coordinate::new(1.0, 1.0)), 0.0);
    }
}
