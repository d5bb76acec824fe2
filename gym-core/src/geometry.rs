use serde::{Deserialize, Serialize};

/// World-plane coordinates. The host guarantees finiteness; the core adds
/// no further invariants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance. Total; 0 for coincident points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero_apart() {
        let p = Point::new(42.5, -17.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn matches_pythagorean_triple() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
    }

    #[test]
    fn handles_negative_coordinates() {
        let a = Point::new(-1.0, -1.0);
        let b = Point::new(-4.0, -5.0);
        assert_eq!(distance(a, b), 5.0);
    }
}
