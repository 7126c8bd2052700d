use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of `points`, or `None` when the slice is empty.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon has no points")]
    Empty,
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
    #[error("vertex {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// A simple polygon, implicitly closed from the last vertex back to the first.
///
/// Simplicity is a caller precondition; construction only guarantees at least
/// three finite vertices with no two consecutive ones coincident.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::Empty);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }

        let mut ring: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        if ring.len() < 3 {
            return Err(GeometryError::TooFewVertices(ring.len()));
        }
        Ok(Self { points: ring })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        // Never empty after construction.
        Bounds::of(&self.points).unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        })
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        edges(&self.points)
    }

    /// Even-odd point-in-polygon test. Points exactly on the boundary may
    /// land on either side.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Absolute enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        let twice: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice.abs() / 2.0
    }
}

pub(crate) fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn bounds_center_and_size() {
        let b = Bounds::of(&[Point::new(-10.0, 4.0), Point::new(30.0, 20.0)]).unwrap();
        assert_eq!(b.center(), Point::new(10.0, 12.0));
        assert_eq!(b.width(), 40.0);
        assert_eq!(b.height(), 16.0);
    }

    #[test]
    fn polygon_drops_consecutive_duplicates_and_closing_point() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn polygon_rejects_degenerate_input() {
        assert_eq!(Polygon::new(vec![]), Err(GeometryError::Empty));
        assert_eq!(
            Polygon::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
            Err(GeometryError::TooFewVertices(2))
        );
        assert_eq!(
            Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(f64::NAN, 0.0),
                Point::new(1.0, 1.0),
            ]),
            Err(GeometryError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn contains_uses_even_odd_rule() {
        let poly = square();
        assert!(poly.contains(Point::new(50.0, 50.0)));
        assert!(!poly.contains(Point::new(150.0, 50.0)));
        assert!(!poly.contains(Point::new(50.0, -1.0)));
    }

    #[test]
    fn area_is_orientation_independent() {
        let mut reversed = square().points().to_vec();
        reversed.reverse();
        let reversed = Polygon::new(reversed).unwrap();
        assert_eq!(square().area(), 10_000.0);
        assert_eq!(reversed.area(), 10_000.0);
    }
}
