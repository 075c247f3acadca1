//! Locator service: which places enclose a point, and which are nearby.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use super::PlaceIndex;
use crate::config::EngineConfig;
use crate::models::{AdminLevel, HierarchyEntry, PlaceRecord};
use crate::specificity::{find_nearby_places, NearbyPlace};

/// Point-in-place lookup service
pub struct PlaceLocator {
    index: PlaceIndex,
    config: EngineConfig,
}

impl PlaceLocator {
    /// Create a new locator from a spatial index
    pub fn new(index: PlaceIndex, config: EngineConfig) -> Self {
        Self { index, config }
    }

    /// Places containing the point, broadest first.
    ///
    /// Ordered by specificity order; places for which that is unknown come last.
    pub fn containing_places(&self, lat: f64, lon: f64) -> Vec<Arc<PlaceRecord>> {
        let tables = &self.config.heuristics;
        let mut keyed: Vec<(Option<f64>, Arc<PlaceRecord>)> = self
            .index
            .lookup(lat, lon)
            .into_iter()
            .map(|p| (p.specificity_order(tables), p))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        debug!(
            "Place lookup at ({}, {}): {} containing places",
            lat,
            lon,
            keyed.len()
        );

        keyed.into_iter().map(|(_, p)| p).collect()
    }

    /// Build the admin hierarchy for a point, broadest first
    pub fn hierarchy(&self, lat: f64, lon: f64) -> Vec<HierarchyEntry> {
        let tables = &self.config.heuristics;
        self.containing_places(lat, lon)
            .iter()
            .map(|p| HierarchyEntry {
                name: p.name.clone(),
                place_type: p.admin.place_type.clone(),
                admin_level: p.admin_level(tables),
            })
            .collect()
    }

    /// The tightest containing place at exactly `level`, e.g. the enclosing city.
    ///
    /// Among several matches the one with the smallest boundary wins; point places
    /// count as smallest.
    pub fn nearest_enclosing(
        &self,
        lat: f64,
        lon: f64,
        level: AdminLevel,
    ) -> Option<Arc<PlaceRecord>> {
        let tables = &self.config.heuristics;
        self.index
            .lookup(lat, lon)
            .into_iter()
            .filter(|p| p.admin_level(tables) == Some(level))
            .min_by(|a, b| {
                let area_a = a.boundary_area().unwrap_or(0.0);
                let area_b = b.boundary_area().unwrap_or(0.0);
                area_a.total_cmp(&area_b)
            })
    }

    pub fn nearest_enclosing_city(&self, lat: f64, lon: f64) -> Option<Arc<PlaceRecord>> {
        self.nearest_enclosing(lat, lon, AdminLevel::LOCALITY)
    }

    /// Nearby places of comparable specificity, drawn from the index nearest-first.
    pub fn nearby(
        &self,
        place: &PlaceRecord,
        radius_km: Option<f64>,
        limit: usize,
    ) -> Vec<NearbyPlace> {
        let Some(center) = place.reference_point() else {
            return Vec::new();
        };
        let mut supplier = self.index.candidates_near(center.latitude, center.longitude);
        find_nearby_places(place, &mut supplier, radius_km, limit, &self.config)
    }

    /// Get the spatial index (for stats/debugging)
    pub fn index(&self) -> &PlaceIndex {
        &self.index
    }
}
