//! Wiring assistant guidelines and nearest-point queries.

use kurbo::{Line, Point, Vec2};

/// Candidates at or beyond this squared distance are ignored.
pub const GUIDELINE_THRESHOLD_SQ: f64 = 200.0;

/// Fixed set of guideline segments.
#[derive(Debug, Clone, Default)]
pub struct Guidelines {
    segments: Vec<Line>,
}

impl Guidelines {
    pub fn new(segments: Vec<Line>) -> Self {
        Self { segments }
    }

    /// The three guidelines of the demo scene.
    pub fn demo() -> Self {
        Self::new(vec![
            Line::new((50.0, 50.0), (590.0, 50.0)),
            Line::new((50.0, 75.0), (590.0, 75.0)),
            Line::new((50.0, 100.0), (50.0, 420.0)),
        ])
    }

    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Closest point on any guideline within the snap threshold.
    pub fn closest_point(&self, point: Point) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for segment in &self.segments {
            let candidate = project_onto_line(*segment, point);
            let dist_sq = (candidate - point).hypot2();
            if dist_sq >= GUIDELINE_THRESHOLD_SQ {
                continue;
            }
            if closest.is_some_and(|(_, best)| dist_sq >= best) {
                continue;
            }
            // Projections past the endpoints land on the extended line.
            if !segment_box_contains(*segment, candidate) {
                continue;
            }
            closest = Some((candidate, dist_sq));
        }
        closest.map(|(p, _)| p)
    }
}

/// Orthogonal projection of `point` onto the infinite line through `line`.
fn project_onto_line(line: Line, point: Point) -> Point {
    let dir = line.p1 - line.p0;
    let len = dir.hypot();
    if len < f64::EPSILON {
        return line.p0;
    }
    let d: Vec2 = dir / len;
    line.p0 + d * d.dot(point - line.p0)
}

/// Inclusive axis-aligned bounding box test against the segment's endpoints.
fn segment_box_contains(line: Line, p: Point) -> bool {
    const EPS: f64 = 1e-9;
    let (min_x, max_x) = (line.p0.x.min(line.p1.x), line.p0.x.max(line.p1.x));
    let (min_y, max_y) = (line.p0.y.min(line.p1.y), line.p0.y.max(line.p1.y));
    p.x >= min_x - EPS && p.x <= max_x + EPS && p.y >= min_y - EPS && p.y <= max_y + EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn test_snap_to_horizontal_guideline() {
        let guides = Guidelines::demo();
        let p = guides.closest_point(Point::new(300.0, 45.0)).unwrap();
        assert!(approx(p, Point::new(300.0, 50.0)));
    }

    #[test]
    fn test_snap_to_vertical_guideline() {
        let guides = Guidelines::demo();
        let p = guides.closest_point(Point::new(58.0, 200.0)).unwrap();
        assert!(approx(p, Point::new(50.0, 200.0)));
    }

    #[test]
    fn test_nearest_of_two_candidates() {
        let guides = Guidelines::demo();
        // 10 below the first line, 15 above the second.
        let p = guides.closest_point(Point::new(200.0, 60.0)).unwrap();
        assert!(approx(p, Point::new(200.0, 50.0)));
        let p = guides.closest_point(Point::new(200.0, 66.0)).unwrap();
        assert!(approx(p, Point::new(200.0, 75.0)));
    }

    #[test]
    fn test_beyond_threshold_is_none() {
        let guides = Guidelines::demo();
        assert!(guides.closest_point(Point::new(300.0, 300.0)).is_none());
        // sqrt(200) ~= 14.14
        assert!(guides.closest_point(Point::new(300.0, 35.0)).is_none());
        assert!(guides.closest_point(Point::new(300.0, 36.0)).is_some());
    }

    #[test]
    fn test_projection_past_endpoint_is_rejected() {
        let guides = Guidelines::demo();
        // Close to the extension of the first line, left of x = 50.
        assert!(guides.closest_point(Point::new(40.0, 52.0)).is_none());
        // Below the end of the vertical guideline.
        assert!(guides.closest_point(Point::new(52.0, 430.0)).is_none());
    }

    #[test]
    fn test_endpoint_is_inclusive() {
        let guides = Guidelines::demo();
        let p = guides.closest_point(Point::new(590.0, 55.0)).unwrap();
        assert!(approx(p, Point::new(590.0, 50.0)));
    }

    #[test]
    fn test_diagonal_segment_bounding_box_check() {
        // On the infinite line, the bounding box test is equivalent to clamping
        // to the segment: projections beyond either endpoint fall outside.
        let guides = Guidelines::new(vec![Line::new((0.0, 0.0), (100.0, 100.0))]);
        let p = guides.closest_point(Point::new(50.0, 60.0)).unwrap();
        assert!(approx(p, Point::new(55.0, 55.0)));
        assert!(guides.closest_point(Point::new(105.0, 108.0)).is_none());
        assert!(guides.closest_point(Point::new(-3.0, -1.0)).is_none());
    }

    #[test]
    fn test_zero_length_segment_projects_to_start() {
        let guides = Guidelines::new(vec![Line::new((10.0, 10.0), (10.0, 10.0))]);
        let p = guides.closest_point(Point::new(12.0, 11.0)).unwrap();
        assert!(approx(p, Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_empty_guidelines() {
        let guides = Guidelines::default();
        assert!(guides.is_empty());
        assert!(guides.closest_point(Point::new(0.0, 0.0)).is_none());
    }
}
