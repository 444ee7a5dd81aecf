//! Heading math for motion commands.

use super::Point;
use rand::Rng;

/// Trig results are rounded to this many parts so that cardinal headings
/// produce exact whole-number steps.
const TRIG_PRECISION: f64 = 1e10;

#[inline]
fn rounded(value: f64) -> f64 {
    (value * TRIG_PRECISION).round() / TRIG_PRECISION
}

/// Offset produced by moving `steps` along `direction` degrees.
pub fn step_delta(steps: f64, direction: f64) -> (f64, f64) {
    let radians = direction.to_radians();
    (steps * rounded(radians.sin()), steps * rounded(radians.cos()))
}

/// Direction (in degrees) that points from `from` towards `to`.
///
/// Pointing at your own position yields 90 (facing right).
pub fn direction_towards(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    90.0 - dy.atan2(dx).to_degrees()
}

/// Wrap a direction into the half-open range `(-180, 180]`.
pub fn normalize_direction(direction: f64) -> f64 {
    if !direction.is_finite() {
        return direction;
    }
    let wrapped = (direction + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// A whole-number direction in `[-180, 180]`.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(-180..=180))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_delta_cardinals() {
        assert_eq!(step_delta(10.0, 90.0), (10.0, 0.0));
        assert_eq!(step_delta(10.0, 0.0), (0.0, 10.0));
        assert_eq!(step_delta(10.0, 180.0), (0.0, -10.0));
        assert_eq!(step_delta(10.0, -90.0), (-10.0, 0.0));
    }

    #[test]
    fn test_step_delta_diagonal() {
        let (dx, dy) = step_delta(2.0_f64.sqrt(), 45.0);
        assert!((dx - 1.0).abs() < 1e-9);
        assert!((dy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_direction_towards() {
        let origin = Point::ORIGIN;
        assert_eq!(direction_towards(origin, Point::new(10.0, 0.0)), 90.0);
        assert_eq!(direction_towards(origin, Point::new(0.0, 10.0)), 0.0);
        assert_eq!(direction_towards(origin, Point::new(-10.0, 0.0)), -90.0);
        assert_eq!(direction_towards(origin, Point::new(0.0, -10.0)), 180.0);
        assert_eq!(direction_towards(origin, origin), 90.0);
    }

    #[test]
    fn test_normalize_direction() {
        assert_eq!(normalize_direction(90.0), 90.0);
        assert_eq!(normalize_direction(180.0), 180.0);
        assert_eq!(normalize_direction(-180.0), 180.0);
        assert_eq!(normalize_direction(270.0), -90.0);
        assert_eq!(normalize_direction(-450.0), -90.0);
        assert_eq!(normalize_direction(720.0), 0.0);
    }

    #[test]
    fn test_random_direction_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let dir = random_direction(&mut rng);
            assert!((-180.0..=180.0).contains(&dir));
        }
    }
}
