//! Spatial index for fast place lookups.

use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{PlaceRecord, POINT_PLACE_RADIUS_KM};
use crate::specificity::IterSupplier;

/// Kilometres per degree of latitude, rounded down so query envelopes err on the
/// large side.
const KM_PER_DEGREE: f64 = 111.0;

/// Wrapper for R-tree indexing of places
#[derive(Clone)]
pub struct IndexedPlace {
    pub place: Arc<PlaceRecord>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedPlace {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedPlace {
    /// Squared degree-space distance to the envelope; zero inside it.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        Envelope::distance_2(&self.envelope, point)
    }
}

impl IndexedPlace {
    /// Places with neither a usable boundary nor a coordinate cannot be indexed.
    pub fn new(place: PlaceRecord) -> Option<Self> {
        let [min_x, min_y, max_x, max_y] = place.bounding_box()?;
        Some(Self {
            place: Arc::new(place),
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// Spatial index over places using an R-tree keyed on `[lon, lat]`
pub struct PlaceIndex {
    tree: RTree<IndexedPlace>,
}

impl PlaceIndex {
    /// Build spatial index from places
    pub fn build(places: Vec<PlaceRecord>) -> Self {
        info!("Building spatial index for {} places...", places.len());

        let total = places.len();
        let indexed: Vec<IndexedPlace> = places.into_iter().filter_map(IndexedPlace::new).collect();
        if indexed.len() < total {
            debug!(
                "Skipped {} places without a boundary or coordinate",
                total - indexed.len()
            );
        }

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// Find all places containing a point
    pub fn lookup(&self, lat: f64, lon: f64) -> Vec<Arc<PlaceRecord>> {
        let mut found: Vec<Arc<PlaceRecord>> = Vec::new();

        // R-tree gives envelope candidates, then filter with exact containment
        for envelope in query_envelopes(lat, lon) {
            for ip in self.tree.locate_in_envelope_intersecting(&envelope) {
                if found.iter().any(|p| Arc::ptr_eq(p, &ip.place)) {
                    continue;
                }
                if ip.place.contains_point(lat, lon) {
                    found.push(Arc::clone(&ip.place));
                }
            }
        }

        found
    }

    /// Candidate stream ordered by increasing envelope distance from a point.
    pub fn candidates_near(
        &self,
        lat: f64,
        lon: f64,
    ) -> IterSupplier<impl Iterator<Item = PlaceRecord> + '_> {
        IterSupplier::new(
            self.tree
                .nearest_neighbor_iter(&[lon, lat])
                .map(|ip| PlaceRecord::clone(&ip.place)),
        )
    }

    /// Get total number of indexed places
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterate over all indexed places
    pub fn places(&self) -> impl Iterator<Item = &Arc<PlaceRecord>> {
        self.tree.iter().map(|ip| &ip.place)
    }
}

/// Query boxes around a point, widened by the point-place radius so coordinate-only
/// places are candidates. A box reaching past ±180° longitude is split, with the
/// overhang wrapped to the other side of the antimeridian.
fn query_envelopes(lat: f64, lon: f64) -> Vec<AABB<[f64; 2]>> {
    let d_lat = POINT_PLACE_RADIUS_KM / KM_PER_DEGREE;
    let d_lon = (d_lat / lat.to_radians().cos().abs().max(1e-6)).min(180.0);
    let (south, north) = (lat - d_lat, lat + d_lat);
    let (west, east) = (lon - d_lon, lon + d_lon);

    let mut envelopes = vec![AABB::from_corners(
        [west.max(-180.0), south],
        [east.min(180.0), north],
    )];
    if west < -180.0 {
        envelopes.push(AABB::from_corners([west + 360.0, south], [180.0, north]));
    }
    if east > 180.0 {
        envelopes.push(AABB::from_corners([-180.0, south], [east - 360.0, north]));
    }
    envelopes
}
