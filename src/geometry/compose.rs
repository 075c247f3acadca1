//! Geometry-level operations built from the ring primitives.
//!
//! `Feature` is unwrapped, `Polygon` uses its exterior ring, `MultiPolygon` combines
//! its polygons' exterior rings. Holes are ignored throughout, so a point inside an
//! enclave still counts as inside the surrounding place.

use geo_types::Coord;

use super::ring::{area_of_ring, centroid_of_ring, point_in_ring, AREA_EPSILON};
use crate::models::{Geometry, Ring};

pub fn point_in_geometry(lon: f64, lat: f64, geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Feature { geometry, .. } => point_in_geometry(lon, lat, geometry),
        Geometry::Polygon(rings) => rings
            .first()
            .map(|exterior| point_in_ring(lon, lat, exterior))
            .unwrap_or(false),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .filter_map(|rings| rings.first())
            .any(|exterior| point_in_ring(lon, lat, exterior)),
        Geometry::Unsupported(_) => false,
    }
}

/// Unsigned area in square degrees.
pub fn area_of_geometry(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Feature { geometry, .. } => area_of_geometry(geometry),
        Geometry::Polygon(rings) => rings
            .first()
            .map(|exterior| area_of_ring(exterior).abs())
            .unwrap_or(0.0),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .filter_map(|rings| rings.first())
            .map(|exterior| area_of_ring(exterior).abs())
            .sum(),
        Geometry::Unsupported(_) => 0.0,
    }
}

/// Centroid as a `Coord` (`x` = lon, `y` = lat). `None` means no usable geometry.
pub fn centroid_of_geometry(geometry: &Geometry) -> Option<Coord<f64>> {
    match geometry {
        Geometry::Feature { geometry, .. } => centroid_of_geometry(geometry),
        Geometry::Polygon(rings) => rings.first().and_then(|exterior| polygon_centroid(exterior)),
        Geometry::MultiPolygon(polys) => {
            let mut total = 0.0;
            let (mut x, mut y) = (0.0, 0.0);

            for exterior in polys.iter().filter_map(|rings| rings.first()) {
                let Some(c) = polygon_centroid(exterior) else {
                    continue;
                };
                let weight = area_of_ring(exterior).abs();
                x += c.x * weight;
                y += c.y * weight;
                total += weight;
            }

            if total < AREA_EPSILON {
                return None;
            }
            Some(Coord {
                x: x / total,
                y: y / total,
            })
        }
        Geometry::Unsupported(_) => None,
    }
}

fn polygon_centroid(exterior: &Ring) -> Option<Coord<f64>> {
    if exterior.len() < 3 {
        return None;
    }
    centroid_of_ring(exterior)
}

impl Geometry {
    /// See [`point_in_geometry`].
    pub fn contains_lon_lat(&self, lon: f64, lat: f64) -> bool {
        point_in_geometry(lon, lat, self)
    }

    /// See [`area_of_geometry`].
    pub fn area(&self) -> f64 {
        area_of_geometry(self)
    }

    /// See [`centroid_of_geometry`].
    pub fn centroid(&self) -> Option<Coord<f64>> {
        centroid_of_geometry(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn two_squares() -> Geometry {
        Geometry::from_geojson(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
                [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]]]
            ]
        }))
    }

    #[test]
    fn test_multipolygon_containment() {
        let g = two_squares();
        assert!(point_in_geometry(2.5, 2.5, &g));
        assert!(point_in_geometry(0.5, 0.5, &g));
        assert!(!point_in_geometry(1.5, 1.5, &g));
    }

    #[test]
    fn test_multipolygon_area_and_centroid() {
        let g = two_squares();
        assert!((area_of_geometry(&g) - 2.0).abs() < 1e-12);
        let c = centroid_of_geometry(&g).unwrap();
        assert!((c.x - 1.5).abs() < 1e-12);
        assert!((c.y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_multipolygon_centroid_is_area_weighted() {
        let g = Geometry::from_geojson(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]],
                [[[10.0, 0.0], [11.0, 0.0], [11.0, 1.0], [10.0, 1.0]]]
            ]
        }));
        // (1,1) weighted 4, (10.5,0.5) weighted 1
        let c = g.centroid().unwrap();
        assert!((c.x - (4.0 + 10.5) / 5.0).abs() < 1e-12);
        assert!((c.y - (4.0 + 0.5) / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_holes_are_ignored() {
        let g = Geometry::from_geojson(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
                [[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]]
            ]
        }));
        assert!(g.contains_lon_lat(2.0, 2.0));
        assert!((g.area() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_feature_dispatch() {
        let g = Geometry::from_geojson(&json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
            }
        }));
        assert!(g.contains_lon_lat(0.5, 0.5));
        assert!((g.area() - 1.0).abs() < 1e-12);
        assert!(g.centroid().is_some());
    }

    #[test]
    fn test_unusable_geometry_degrades() {
        let unsupported = Geometry::from_geojson(&json!({
            "type": "Point",
            "coordinates": [0.0, 0.0]
        }));
        assert!(!unsupported.contains_lon_lat(0.0, 0.0));
        assert_eq!(unsupported.area(), 0.0);
        assert_eq!(unsupported.centroid(), None);

        let short = Geometry::from_geojson(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]
        }));
        assert_eq!(short.area(), 0.0);
        assert_eq!(short.centroid(), None);

        let empty_multi = Geometry::from_geojson(&json!({
            "type": "MultiPolygon",
            "coordinates": []
        }));
        assert_eq!(empty_multi.centroid(), None);

        let collinear_multi = Geometry::from_geojson(&json!({
            "type": "MultiPolygon",
            "coordinates": [[[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]]]
        }));
        assert_eq!(collinear_multi.centroid(), None);
    }

    /// Closed regular polygon as GeoJSON positions, centred on `(lon, lat)`.
    fn regular_ring(lon: f64, lat: f64, radius: f64, sides: usize) -> Vec<[f64; 2]> {
        let mut positions: Vec<[f64; 2]> = (0..sides)
            .map(|k| {
                let theta = std::f64::consts::TAU * k as f64 / sides as f64;
                [lon + radius * theta.cos(), lat + radius * theta.sin()]
            })
            .collect();
        positions.push(positions[0]);
        positions
    }

    proptest! {
        #[test]
        fn prop_regular_polygon_centroid_is_center(
            lon in -170.0f64..170.0,
            lat in -80.0f64..80.0,
            radius in 0.5f64..5.0,
            sides in 3usize..24,
        ) {
            let ring = regular_ring(lon, lat, radius, sides);
            let polygon = Geometry::from_geojson(&json!({
                "type": "Polygon",
                "coordinates": [ring.clone()]
            }));
            let feature = Geometry::from_geojson(&json!({
                "type": "Feature",
                "properties": null,
                "geometry": {"type": "MultiPolygon", "coordinates": [[ring]]}
            }));

            for geometry in [&polygon, &feature] {
                let c = centroid_of_geometry(geometry).unwrap();
                prop_assert!((c.x - lon).abs() < 1e-6);
                prop_assert!((c.y - lat).abs() < 1e-6);
                prop_assert!(point_in_geometry(lon, lat, geometry));
            }
        }
    }
}
