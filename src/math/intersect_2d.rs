use super::{Point2, TOLERANCE};

/// Sign of the turn `a -> b -> c` (z component of the cross product).
fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper-crossing test for two segments.
///
/// Returns `true` only when the segments cross strictly in their
/// interiors. Any collinear or endpoint contact (an orientation within
/// tolerance of zero) counts as touching, not crossing.
#[must_use]
pub fn segments_cross_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if o1.abs() < TOLERANCE || o2.abs() < TOLERANCE || o3.abs() < TOLERANCE || o4.abs() < TOLERANCE
    {
        return false;
    }

    (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0)
}

/// Parameter interval where the line through `a0`-`a1` runs inside a
/// circle.
///
/// Substitutes the parametric line into the circle equation and solves
/// the quadratic. Returns `(t_enter, t_exit)` with `t_enter < t_exit` in
/// the segment's parameter space (values may fall outside `[0, 1]`), or
/// `None` when the line misses the circle, merely grazes it, or the
/// segment is degenerate.
#[must_use]
pub fn segment_circle_chord_2d(
    a0: &Point2,
    a1: &Point2,
    center: &Point2,
    radius: f64,
) -> Option<(f64, f64)> {
    let dx = a1.x - a0.x;
    let dy = a1.y - a0.y;
    let seg_len_sq = dx * dx + dy * dy;
    if seg_len_sq < TOLERANCE * TOLERANCE {
        return None;
    }

    let fx = a0.x - center.x;
    let fy = a0.y - center.y;
    let a = seg_len_sq;
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    // Grazing (double root) is not a chord.
    if discriminant <= TOLERANCE {
        return None;
    }
    let disc_sqrt = discriminant.sqrt();

    let t_enter = (-b - disc_sqrt) / (2.0 * a);
    let t_exit = (-b + disc_sqrt) / (2.0 * a);
    Some((t_enter, t_exit))
}

/// Intersection points of two circle boundaries.
///
/// Returns 0, 1 (external/internal tangency) or 2 points. Concentric,
/// too-far-apart and nested configurations all return no points.
#[must_use]
pub fn circle_circle_intersect_2d(
    c1: &Point2,
    r1: f64,
    c2: &Point2,
    r2: f64,
) -> Vec<Point2> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let dist_sq = dx * dx + dy * dy;
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        // Concentric circles have no discrete intersection points.
        return results;
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return results;
    }

    // Distance from c1 along the center line to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -TOLERANCE {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    let mx = c1.x + a * dx / dist;
    let my = c1.y + a * dy / dist;

    // Perpendicular to the center line.
    let px = -dy / dist;
    let py = dx / dist;

    if h < TOLERANCE {
        results.push(Point2::new(mx, my));
    } else {
        results.push(Point2::new(mx + h * px, my + h * py));
        results.push(Point2::new(mx - h * px, my - h * py));
    }
    results
}
