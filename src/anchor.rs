// Label anchor placement for freehand polygons.
// Pure geometry: no session state, no SVG.
//
// The bounding-box center is the starting candidate. A vertical and a
// horizontal scan line through it are intersected with the polygon edges;
// crossings paired by parity give the interior spans along each line. The
// anchor is moved to the middle of the widest span on whichever axis has the
// wider one.

use crate::geometry::{Bounds, Point, Polygon, edges};
use crate::log::debug;
use serde::Serialize;

/// Which scan moved the anchor away from the bounding-box center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorAxis {
    /// Y taken from the widest span on the vertical line `x = cx`.
    Vertical,
    /// X taken from the widest span on the horizontal line `y = cy`.
    Horizontal,
    /// Neither scan produced an even crossing count; bounding-box center kept.
    Center,
}

/// Interior interval along a scan line, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorPlacement {
    pub point: Point,
    pub axis: AnchorAxis,
    /// Bounding-box center the scans went through.
    pub center: Point,
    /// The span the anchor was centered in; `None` for `AnchorAxis::Center`.
    pub span: Option<Span>,
}

/// Label anchor for a polygon given as its ordered vertices.
///
/// Returns `None` only when `points` is empty.
pub fn compute_label_anchor(points: &[Point]) -> Option<Point> {
    place_label(points).map(|placement| placement.point)
}

/// Same as [`compute_label_anchor`], also reporting the axis and span used.
pub fn place_label(points: &[Point]) -> Option<AnchorPlacement> {
    let center = Bounds::of(points)?.center();
    Some(place_around(points, center))
}

/// Placement for an already validated polygon, which always has a bounding box.
pub fn place_polygon_label(polygon: &Polygon) -> AnchorPlacement {
    place_around(polygon.points(), polygon.bounds().center())
}

fn place_around(points: &[Point], center: Point) -> AnchorPlacement {
    let vertical = widest_span(vertical_crossings(points, center.x));
    let horizontal = widest_span(horizontal_crossings(points, center.y));

    let vertical_len = vertical.map_or(f64::NEG_INFINITY, |s| s.len());
    let horizontal_len = horizontal.map_or(f64::NEG_INFINITY, |s| s.len());

    let placement = if horizontal_len > vertical_len {
        // Strictly greater implies the horizontal span exists.
        let x = horizontal.map_or(center.x, |s| s.midpoint());
        AnchorPlacement {
            point: Point::new(x, center.y),
            axis: AnchorAxis::Horizontal,
            center,
            span: horizontal,
        }
    } else if let Some(span) = vertical {
        AnchorPlacement {
            point: Point::new(center.x, span.midpoint()),
            axis: AnchorAxis::Vertical,
            center,
            span: Some(span),
        }
    } else {
        AnchorPlacement {
            point: center,
            axis: AnchorAxis::Center,
            center,
            span: None,
        }
    };

    debug!(
        axis = ?placement.axis,
        x = placement.point.x,
        y = placement.point.y,
        vertices = points.len(),
        "placed label anchor"
    );
    placement
}

/// Width of the interior span on the horizontal line through `point` that
/// contains it, or `None` when `point` falls outside every span.
pub fn interior_width_at(points: &[Point], point: Point) -> Option<f64> {
    let crossings = horizontal_crossings(points, point.y);
    if crossings.len() % 2 != 0 {
        return None;
    }
    crossings
        .chunks_exact(2)
        .find(|pair| pair[0] <= point.x && point.x <= pair[1])
        .map(|pair| pair[1] - pair[0])
}

/// Y values where edges cross the vertical line `x = x0`, sorted ascending.
/// Edges parallel to the line are skipped.
fn vertical_crossings(points: &[Point], x0: f64) -> Vec<f64> {
    let mut hits: Vec<f64> = edges(points)
        .filter(|(a, b)| (a.x - x0) * (b.x - x0) <= 0.0 && a.x != b.x)
        .map(|(a, b)| {
            let t = (x0 - a.x) / (b.x - a.x);
            a.y + t * (b.y - a.y)
        })
        .collect();
    hits.sort_by(f64::total_cmp);
    hits
}

/// X values where edges cross the horizontal line `y = y0`, sorted ascending.
fn horizontal_crossings(points: &[Point], y0: f64) -> Vec<f64> {
    let mut hits: Vec<f64> = edges(points)
        .filter(|(a, b)| (a.y - y0) * (b.y - y0) <= 0.0 && a.y != b.y)
        .map(|(a, b)| {
            let t = (y0 - a.y) / (b.y - a.y);
            a.x + t * (b.x - a.x)
        })
        .collect();
    hits.sort_by(f64::total_cmp);
    hits
}

/// Pairs sorted crossings `(c0, c1), (c2, c3), ...` and returns the longest
/// pair. An odd or sub-two count yields `None`. Ties keep the earlier span.
fn widest_span(crossings: Vec<f64>) -> Option<Span> {
    if crossings.len() < 2 || crossings.len() % 2 != 0 {
        return None;
    }
    let mut best: Option<Span> = None;
    for pair in crossings.chunks_exact(2) {
        let span = Span {
            start: pair[0],
            end: pair[1],
        };
        if best.is_none_or(|b| span.len() > b.len()) {
            best = Some(span);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn empty_polygon_has_no_anchor() {
        assert_eq!(compute_label_anchor(&[]), None);
        assert!(place_label(&[]).is_none());
    }

    #[test]
    fn square_anchor_is_center() {
        let square = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        assert_eq!(compute_label_anchor(&square), Some(Point::new(50.0, 50.0)));
    }

    #[test]
    fn l_shape_anchor_moves_inside() {
        let l_shape = pts(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 40.0),
            (40.0, 40.0),
            (40.0, 100.0),
            (0.0, 100.0),
        ]);
        let poly = Polygon::new(l_shape.clone()).unwrap();
        let center = poly.bounds().center();
        assert!(!poly.contains(center));

        let anchor = compute_label_anchor(&l_shape).unwrap();
        assert_ne!(anchor, center);
        assert!(poly.contains(anchor), "anchor {anchor:?} outside L shape");
        assert_eq!(anchor, Point::new(50.0, 20.0));
    }

    #[test]
    fn polygon_placement_matches_point_list() {
        let l_shape = pts(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 40.0),
            (40.0, 40.0),
            (40.0, 100.0),
            (0.0, 100.0),
        ]);
        let poly = Polygon::new(l_shape.clone()).unwrap();
        let placement = place_polygon_label(&poly);
        assert_eq!(Some(placement), place_label(&l_shape));
        assert_eq!(placement.axis, AnchorAxis::Vertical);
        assert_eq!(placement.center, Point::new(50.0, 50.0));
        assert_eq!(placement.span, Some(Span { start: 0.0, end: 40.0 }));
    }

    #[test]
    fn convex_shapes_get_interior_anchors() {
        let shapes = [
            pts(&[(10.0, 10.0), (110.0, 10.0), (60.0, 90.0)]),
            pts(&[(0.0, 0.0), (300.0, 20.0), (280.0, 60.0), (10.0, 50.0)]),
            (0..12)
                .map(|i| {
                    let a = (i as f64 + 0.5) * std::f64::consts::TAU / 12.0;
                    Point::new(200.0 + 80.0 * a.cos(), 150.0 + 30.0 * a.sin())
                })
                .collect(),
        ];
        for shape in shapes {
            let poly = Polygon::new(shape.clone()).unwrap();
            let anchor = compute_label_anchor(&shape).unwrap();
            assert!(poly.contains(anchor), "{anchor:?} not inside {shape:?}");
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let shape = pts(&[
            (0.0, 0.0),
            (120.0, 0.0),
            (120.0, 30.0),
            (30.0, 30.0),
            (30.0, 90.0),
            (0.0, 90.0),
        ]);
        assert_eq!(place_label(&shape), place_label(&shape));
    }

    #[test]
    fn wide_horizontal_span_adjusts_x() {
        // Bounding box 0..200 x 0..100, center (100, 50). A notch cut from the
        // top at x in 80..120 down to y = 40 leaves the vertical line through
        // the center with a 60-high span, while y = 50 runs the full 200 width.
        let shape = pts(&[
            (0.0, 0.0),
            (80.0, 0.0),
            (80.0, 40.0),
            (120.0, 40.0),
            (120.0, 0.0),
            (200.0, 0.0),
            (200.0, 100.0),
            (0.0, 100.0),
        ]);
        let placement = place_label(&shape).unwrap();
        assert_eq!(placement.axis, AnchorAxis::Horizontal);
        assert_eq!(placement.point.y, 50.0);
        assert_eq!(placement.span.unwrap().len(), 200.0);
    }

    #[test]
    fn tall_vertical_span_adjusts_y() {
        // Same shape transposed: the notch now comes from the left.
        let shape = pts(&[
            (0.0, 0.0),
            (0.0, 80.0),
            (40.0, 80.0),
            (40.0, 120.0),
            (0.0, 120.0),
            (0.0, 200.0),
            (100.0, 200.0),
            (100.0, 0.0),
        ]);
        let placement = place_label(&shape).unwrap();
        assert_eq!(placement.axis, AnchorAxis::Vertical);
        assert_eq!(placement.point.x, 50.0);
        assert_eq!(placement.span.unwrap().len(), 200.0);
    }

    #[test]
    fn widest_of_several_spans_wins() {
        // Notch from the top between x = 30 and x = 60. The horizontal line
        // through the center crosses both arms; the right one is wider.
        let shape = pts(&[
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 70.0),
            (60.0, 70.0),
            (60.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ]);
        let poly = Polygon::new(shape.clone()).unwrap();
        let placement = place_label(&shape).unwrap();
        assert!(poly.contains(placement.point));
        assert_eq!(placement.axis, AnchorAxis::Horizontal);
        assert_eq!(placement.span, Some(Span { start: 60.0, end: 100.0 }));
        assert_eq!(placement.point, Point::new(80.0, 50.0));
    }

    #[test]
    fn odd_crossing_counts_keep_center() {
        // One vertex sits on each scan line, so each scan sees three crossings.
        let shape = pts(&[(50.0, 0.0), (100.0, 30.0), (60.0, 100.0), (0.0, 50.0)]);
        let placement = place_label(&shape).unwrap();
        assert_eq!(placement.center, Point::new(50.0, 50.0));
        assert_eq!(placement.axis, AnchorAxis::Center);
        assert_eq!(placement.point, placement.center);
        assert!(placement.span.is_none());
    }

    #[test]
    fn widest_span_requires_even_count() {
        assert_eq!(widest_span(vec![]), None);
        assert_eq!(widest_span(vec![1.0]), None);
        assert_eq!(widest_span(vec![1.0, 2.0, 3.0]), None);
        assert_eq!(
            widest_span(vec![0.0, 1.0, 5.0, 9.0]),
            Some(Span { start: 5.0, end: 9.0 })
        );
        assert_eq!(
            widest_span(vec![0.0, 4.0, 5.0, 9.0]),
            Some(Span { start: 0.0, end: 4.0 })
        );
    }

    #[test]
    fn interior_width_through_anchor() {
        let l_shape = pts(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 40.0),
            (40.0, 40.0),
            (40.0, 100.0),
            (0.0, 100.0),
        ]);
        assert_eq!(interior_width_at(&l_shape, Point::new(50.0, 20.0)), Some(100.0));
        assert_eq!(interior_width_at(&l_shape, Point::new(20.0, 70.0)), Some(40.0));
        assert_eq!(interior_width_at(&l_shape, Point::new(70.0, 70.0)), None);
    }

    #[test]
    fn nan_coordinates_do_not_panic() {
        let shape = pts(&[(0.0, 0.0), (f64::NAN, 10.0), (10.0, 10.0)]);
        assert!(place_label(&shape).is_some());
    }
}
