//! Segment intersection primitives
//!
//! Everything here is exact orientation arithmetic on `f64`: signed areas of
//! ordered triples decide which side of a line a point lies on, and a
//! betweenness check on the segment's bounding box resolves collinear cases.

use glam::DVec2;

/// Twice the signed area of triangle (a, b, c).
///
/// Positive when c lies to the left of a→b (counter-clockwise in y-up space),
/// negative to the right, zero when the three points are collinear.
#[inline]
pub fn area2(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Whether `p`, already known to be collinear with a–b, lies on segment a–b
/// (endpoints included).
#[inline]
fn between(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Does segment p1–p2 cross or touch segment p3–p4?
///
/// Non-collinear configurations use strict side opposition: p3 and p4 on
/// opposite sides of line p1–p2 and p1 and p2 on opposite sides of line p3–p4.
/// As soon as any triple is collinear the answer comes from betweenness of the
/// collinear endpoints instead, which also covers overlapping collinear
/// segments and zero-length segments. The predicate is symmetric in its two
/// segments.
pub fn intersects(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> bool {
    let a1 = area2(p1, p2, p3);
    let a2 = area2(p1, p2, p4);
    let a3 = area2(p3, p4, p1);
    let a4 = area2(p3, p4, p2);

    if a1 == 0.0 || a2 == 0.0 || a3 == 0.0 || a4 == 0.0 {
        return (a1 == 0.0 && between(p1, p2, p3))
            || (a2 == 0.0 && between(p1, p2, p4))
            || (a3 == 0.0 && between(p3, p4, p1))
            || (a4 == 0.0 && between(p3, p4, p2));
    }

    ((a1 > 0.0) ^ (a2 > 0.0)) && ((a3 > 0.0) ^ (a4 > 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn test_crossing_segments() {
        assert!(intersects(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)));
    }

    #[test]
    fn test_parallel_segments_miss() {
        assert!(!intersects(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.0)));
    }

    #[test]
    fn test_short_of_crossing() {
        // Second segment stops before reaching the first
        assert!(!intersects(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 1.0), p(5.0, 0.5)));
    }

    #[test]
    fn test_collinear_overlap() {
        assert!(intersects(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(15.0, 0.0)));
        // Containment, either way round
        assert!(intersects(p(0.0, 0.0), p(10.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
        assert!(intersects(p(2.0, 0.0), p(3.0, 0.0), p(0.0, 0.0), p(10.0, 0.0)));
    }

    #[test]
    fn test_collinear_disjoint() {
        assert!(!intersects(p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0), p(30.0, 0.0)));
    }

    #[test]
    fn test_vertical_collinear_uses_y_extent() {
        assert!(intersects(p(3.0, 0.0), p(3.0, 10.0), p(3.0, 9.0), p(3.0, 20.0)));
        assert!(!intersects(p(3.0, 0.0), p(3.0, 10.0), p(3.0, 11.0), p(3.0, 20.0)));
    }

    #[test]
    fn test_touching_endpoint() {
        assert!(intersects(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)));
        // T-junction: endpoint lands mid-segment
        assert!(intersects(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(5.0, 5.0)));
    }

    #[test]
    fn test_zero_length_segment() {
        assert!(intersects(p(5.0, 0.0), p(5.0, 0.0), p(0.0, 0.0), p(10.0, 0.0)));
        assert!(!intersects(p(1.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!intersects(p(1.0, 0.0), p(1.0, 0.0), p(3.0, 0.0), p(3.0, 0.0)));
    }

    fn coord() -> impl Strategy<Value = f64> {
        // Small integer grid so collinear and touching cases actually occur
        (-8i32..=8).prop_map(f64::from)
    }

    fn point() -> impl Strategy<Value = DVec2> {
        (coord(), coord()).prop_map(|(x, y)| DVec2::new(x, y))
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in point(), b in point(), c in point(), d in point()) {
            prop_assert_eq!(intersects(a, b, c, d), intersects(c, d, a, b));
        }

        #[test]
        fn endpoint_order_does_not_matter(a in point(), b in point(), c in point(), d in point()) {
            let expected = intersects(a, b, c, d);
            prop_assert_eq!(intersects(b, a, c, d), expected);
            prop_assert_eq!(intersects(a, b, d, c), expected);
        }

        #[test]
        fn shared_endpoint_always_intersects(a in point(), b in point(), c in point()) {
            prop_assert!(intersects(a, b, b, c));
        }
    }
}
