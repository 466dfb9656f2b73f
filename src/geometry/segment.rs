use geo::{Closest, ClosestPoint, Line, Point};

use super::ScreenPoint;

/// Minimum distance from `p` to the closed segment `a-b`.
///
/// A zero-length segment degenerates to the distance between `p` and `a`.
pub fn point_to_segment_distance(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
    let line = Line::new((a.x, a.y), (b.x, b.y));
    let target = Point::new(p.x, p.y);

    let closest = match line.closest_point(&target) {
        Closest::Intersection(c) | Closest::SinglePoint(c) => c,
        Closest::Indeterminate => Point::new(a.x, a.y),
    };

    (p.x - closest.x()).hypot(p.y - closest.y())
}
