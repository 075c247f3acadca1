//! Ring-level primitives: ray casting, shoelace area, centroid.
//!
//! Rings are treated as cyclic whether or not the closing position is repeated.

use geo_types::Coord;

/// Areas below this are treated as zero.
pub const AREA_EPSILON: f64 = 1e-20;

/// Ray-casting point-in-ring test.
///
/// Points lying exactly on an edge or vertex have no special handling and may land
/// on either side depending on the edge direction. Rings with fewer than three
/// positions contain nothing.
pub fn point_in_ring(lon: f64, lat: f64, ring: &[Coord<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        if (yi > lat) != (yj > lat) && yj != yi {
            let x_cross = (xj - xi) * (lat - yi) / (yj - yi) + xi;
            if lon < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Signed shoelace area in square degrees. Positive for counter-clockwise rings.
pub fn area_of_ring(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }

    0.5 * sum
}

/// Area-weighted centroid of a ring.
///
/// Falls back to the first position when the ring's area is degenerate, and
/// returns `None` only for an empty ring.
pub fn centroid_of_ring(ring: &[Coord<f64>]) -> Option<Coord<f64>> {
    let first = *ring.first()?;

    let area = area_of_ring(ring);
    if area.abs() < AREA_EPSILON {
        return Some(first);
    }

    let n = ring.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    let factor = 6.0 * area;
    Some(Coord {
        x: cx / factor,
        y: cy / factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    fn unit_square() -> Vec<Coord<f64>> {
        ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_point_in_square() {
        let sq = unit_square();
        assert!(point_in_ring(0.5, 0.5, &sq));
        assert!(!point_in_ring(1.5, 0.5, &sq));
        assert!(!point_in_ring(0.5, -0.1, &sq));
    }

    #[test]
    fn test_point_in_concave_ring() {
        // U shape opening upwards
        let u = ring(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        assert!(point_in_ring(0.5, 2.0, &u));
        assert!(point_in_ring(2.5, 2.0, &u));
        assert!(!point_in_ring(1.5, 2.0, &u));
        assert!(point_in_ring(1.5, 0.5, &u));
    }

    #[test]
    fn test_closed_and_open_rings_agree() {
        let open = unit_square();
        let mut closed = open.clone();
        closed.push(open[0]);
        assert!(point_in_ring(0.25, 0.75, &closed));
        assert_eq!(area_of_ring(&open), area_of_ring(&closed));
        assert_eq!(centroid_of_ring(&open), centroid_of_ring(&closed));
    }

    #[test]
    fn test_edge_points_have_no_special_handling() {
        // Either answer is acceptable on the boundary; only check this does not panic
        // and that a left-edge and right-edge point are not both classified inside.
        let sq = unit_square();
        let left = point_in_ring(0.0, 0.5, &sq);
        let right = point_in_ring(1.0, 0.5, &sq);
        assert!(!(left && right));
    }

    #[test]
    fn test_degenerate_rings() {
        let two = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!point_in_ring(0.5, 0.5, &two));
        assert_eq!(area_of_ring(&two), 0.0);
        assert_eq!(centroid_of_ring(&two), Some(Coord { x: 0.0, y: 0.0 }));
        assert_eq!(centroid_of_ring(&[]), None);

        // Horizontal edges only: no division by zero
        let flat = ring(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        assert!(!point_in_ring(0.5, 1.0, &flat));
        assert_eq!(centroid_of_ring(&flat), Some(Coord { x: 0.0, y: 1.0 }));
    }

    #[test]
    fn test_area_sign_follows_winding() {
        let ccw = unit_square();
        assert!((area_of_ring(&ccw) - 1.0).abs() < 1e-12);
        let mut cw = ccw.clone();
        cw.reverse();
        assert!((area_of_ring(&cw) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_of_rectangle() {
        let rect = ring(&[(2.0, 1.0), (6.0, 1.0), (6.0, 3.0), (2.0, 3.0)]);
        let c = centroid_of_ring(&rect).unwrap();
        assert!((c.x - 4.0).abs() < 1e-12);
        assert!((c.y - 2.0).abs() < 1e-12);

        let mut cw = rect.clone();
        cw.reverse();
        let c = centroid_of_ring(&cw).unwrap();
        assert!((c.x - 4.0).abs() < 1e-12);
        assert!((c.y - 2.0).abs() < 1e-12);
    }

    fn regular_polygon(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Coord<f64>> {
        (0..sides)
            .map(|k| {
                let theta = 2.0 * std::f64::consts::PI * k as f64 / sides as f64;
                Coord {
                    x: cx + radius * theta.cos(),
                    y: cy + radius * theta.sin(),
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_reversal_negates_area(
            pts in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 3..20)
        ) {
            let r = ring(&pts);
            let mut rev = r.clone();
            rev.reverse();
            let a = area_of_ring(&r);
            let b = area_of_ring(&rev);
            prop_assert!((a + b).abs() < 1e-6);
        }

        #[test]
        fn prop_regular_polygon_centroid_is_center(
            cx in -170.0f64..170.0,
            cy in -80.0f64..80.0,
            radius in 0.5f64..5.0,
            sides in 3usize..24,
        ) {
            let poly = regular_polygon(cx, cy, radius, sides);
            let c = centroid_of_ring(&poly).unwrap();
            prop_assert!((c.x - cx).abs() < 1e-6);
            prop_assert!((c.y - cy).abs() < 1e-6);
            prop_assert!(point_in_ring(cx, cy, &poly));
        }

        #[test]
        fn prop_convex_inside_and_outside(
            cx in -100.0f64..100.0,
            cy in -60.0f64..60.0,
            radius in 0.1f64..10.0,
            sides in 3usize..16,
            frac in 0.0f64..0.45,
            angle in 0.0f64..std::f64::consts::TAU,
        ) {
            let poly = regular_polygon(cx, cy, radius, sides);
            // The inscribed circle of a regular n-gon has radius r*cos(pi/n) >= r/2.
            let inner = radius * frac;
            prop_assert!(point_in_ring(cx + inner * angle.cos(), cy + inner * angle.sin(), &poly));
            let outer = radius * 1.5;
            prop_assert!(!point_in_ring(cx + outer * angle.cos(), cy + outer * angle.sin(), &poly));
        }
    }
}
