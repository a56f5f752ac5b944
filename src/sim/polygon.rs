//! Integer-vertex polygons and the crossing-number point-in-polygon test

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::collision::intersects;

/// Nudge applied to vertices lying exactly on the test ray
const RAY_EPSILON: f64 = 1e-7;

/// Closed polygon with integer vertices.
///
/// Insertion order is edge order; the last vertex connects back to the first.
/// Point queries need at least three vertices forming a simple loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<IVec2>,
}

impl Polygon {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a vertex
    pub fn add_point(&mut self, x: i32, y: i32) {
        self.points.push(IVec2::new(x, y));
    }

    #[inline]
    pub fn points(&self) -> &[IVec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace every vertex, keeping the allocation
    pub(crate) fn refill(&mut self, points: impl IntoIterator<Item = IVec2>) {
        self.points.clear();
        self.points.extend(points);
    }

    /// Crossing-number point-in-polygon test.
    ///
    /// Casts a ray from (x, y) towards +x past the polygon's extent and counts
    /// edge crossings; odd means inside. Points exactly on an edge get a
    /// consistent, but unspecified, answer.
    pub fn inside(&self, x: i32, y: i32) -> bool {
        debug_assert!(
            self.points.len() >= 3,
            "point-in-polygon needs at least 3 vertices, got {}",
            self.points.len()
        );
        self.crossings(x, y) & 1 != 0
    }

    fn crossings(&self, x: i32, y: i32) -> u32 {
        let origin = IVec2::new(x, y);
        // Vertices relative to the test point, with on-ray vertices nudged
        // just below it so a ray through a vertex is counted exactly once.
        let relative = |p: IVec2| {
            let d = (p - origin).as_dvec2();
            if d.y == 0.0 {
                DVec2::new(d.x, d.y - RAY_EPSILON)
            } else {
                d
            }
        };

        let reach = self
            .points
            .iter()
            .map(|p| (p.x - x) as f64)
            .fold(0.0, f64::max)
            + 1.0;
        let ray_start = DVec2::new(RAY_EPSILON, 0.0);
        let ray_end = DVec2::new(reach, 0.0);

        let n = self.points.len();
        let mut crossings = 0;
        for i in 0..n {
            let a = relative(self.points[i]);
            let b = relative(self.points[(i + 1) % n]);
            if a.y * b.y < 0.0 && intersects(a, b, ray_start, ray_end) {
                crossings += 1;
            }
        }
        crossings
    }

    /// True if any vertex of either polygon lies inside the other.
    ///
    /// Vertex containment only; two shapes crossing without either holding a
    /// vertex of the other are reported as apart.
    pub fn overlaps(&self, other: &Polygon) -> bool {
        other.points.iter().any(|p| self.inside(p.x, p.y))
            || self.points.iter().any(|p| other.inside(p.x, p.y))
    }
}

impl FromIterator<(i32, i32)> for Polygon {
    fn from_iter<T: IntoIterator<Item = (i32, i32)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().map(|(x, y)| IVec2::new(x, y)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Polygon {
        [(0, 0), (10, 0), (10, 10), (0, 10)].into_iter().collect()
    }

    #[test]
    fn test_add_point_preserves_order() {
        let mut poly = Polygon::new();
        assert!(poly.is_empty());
        poly.add_point(3, 4);
        poly.add_point(-1, 2);
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.points(), &[IVec2::new(3, 4), IVec2::new(-1, 2)]);
    }

    #[test]
    fn test_square_inside_outside() {
        let sq = square();
        assert!(sq.inside(5, 5));
        assert!(!sq.inside(15, 5));
        assert!(!sq.inside(-1, 5));
        assert!(!sq.inside(5, 11));
        assert!(!sq.inside(5, -3));
    }

    #[test]
    fn test_on_edge_is_stable() {
        let sq = square();
        let first = sq.inside(0, 5);
        for _ in 0..10 {
            assert_eq!(sq.inside(0, 5), first);
        }
    }

    #[test]
    fn test_ray_through_vertex() {
        // Ray from (0, 5) heads straight at the diamond's right-hand vertex
        // and enters through its left-hand vertex.
        let diamond: Polygon = [(5, 0), (10, 5), (5, 10), (0, 5)].into_iter().collect();
        assert!(diamond.inside(5, 5));
        assert!(!diamond.inside(-5, 5));
        assert!(!diamond.inside(12, 5));
    }

    #[test]
    fn test_concave_notch() {
        // U shape: the notch between the arms is outside
        let u: Polygon = [
            (0, 0),
            (30, 0),
            (30, 30),
            (20, 30),
            (20, 10),
            (10, 10),
            (10, 30),
            (0, 30),
        ]
        .into_iter()
        .collect();
        assert!(u.inside(5, 20));
        assert!(u.inside(25, 20));
        assert!(!u.inside(15, 20));
        assert!(u.inside(15, 5));
    }

    #[test]
    fn test_overlaps_by_vertex() {
        let a = square();
        let b: Polygon = [(8, 8), (20, 8), (20, 20), (8, 20)].into_iter().collect();
        let c: Polygon = [(30, 30), (40, 30), (40, 40)].into_iter().collect();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_containment() {
        let outer: Polygon = [(-50, -50), (50, -50), (50, 50), (-50, 50)].into_iter().collect();
        let inner: Polygon = [(-1, -1), (1, -1), (1, 1), (-1, 1)].into_iter().collect();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_crossed_rectangles_without_shared_vertices() {
        // Plus sign: neither bar holds a vertex of the other
        let horizontal: Polygon = [(-10, -1), (10, -1), (10, 1), (-10, 1)].into_iter().collect();
        let vertical: Polygon = [(-1, -10), (1, -10), (1, 10), (-1, 10)].into_iter().collect();
        assert!(!horizontal.overlaps(&vertical));
    }

    proptest! {
        #[test]
        fn rectangle_matches_bounds(
            x0 in -50i32..50, y0 in -50i32..50,
            w in 1i32..40, h in 1i32..40,
            px in -100i32..100, py in -100i32..100,
        ) {
            let rect: Polygon = [(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)]
                .into_iter()
                .collect();
            let strictly_inside = px > x0 && px < x0 + w && py > y0 && py < y0 + h;
            let strictly_outside = px < x0 || px > x0 + w || py < y0 || py > y0 + h;
            if strictly_inside {
                prop_assert!(rect.inside(px, py));
            }
            if strictly_outside {
                prop_assert!(!rect.inside(px, py));
            }
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -20i32..20, ay in -20i32..20,
            bx in -20i32..20, by in -20i32..20,
            r in 2i32..12,
        ) {
            let tri = |cx: i32, cy: i32| -> Polygon {
                [(cx, cy - r), (cx + r, cy + r), (cx - r, cy + r)].into_iter().collect()
            };
            let a = tri(ax, ay);
            let b = tri(bx, by);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
