//! Place record: the minimal projection of a place the engine works on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::admin::{deserialize_lenient, AdminLevel, HierarchyEntry};
use super::{Boundary, Coordinate, Geometry};
use crate::error::{GeoError, Result};
use crate::geometry::{
    self, boundary_specificity_order, classify_relationship, haversine_distance,
    polygons_represent_same_place, Relationship,
};
use crate::specificity::{infer_admin_level, HeuristicTables};

/// Places without a boundary are treated as a disk of this radius around their
/// coordinate.
pub const POINT_PLACE_RADIUS_KM: f64 = 0.05;

/// Declared administrative metadata, as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminMetadata {
    /// Free-form place type, e.g. `"city"`, `"administrative"`, `"museum"`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,

    /// Declared admin level, when the source provided one
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_level: Option<AdminLevel>,

    /// Enclosing places, broadest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hierarchy: Vec<HierarchyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Caller-assigned identity
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,

    /// Boundary as GeoJSON `Feature`, `Polygon` or `MultiPolygon`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,

    #[serde(default)]
    pub admin: AdminMetadata,
}

impl PlaceRecord {
    /// Create a new place with no position or metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate: None,
            boundary: None,
            admin: AdminMetadata::default(),
        }
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_boundary(mut self, boundary: impl Into<Boundary>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.admin.place_type = Some(place_type.into());
        self
    }

    pub fn with_admin_level(mut self, level: AdminLevel) -> Self {
        self.admin.admin_level = Some(level);
        self
    }

    /// Validating coordinate setter.
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        self.coordinate = Some(Coordinate::new(latitude, longitude)?);
        Ok(())
    }

    /// Coordinate setter for `"lat,lon"` strings.
    pub fn set_coordinates_str(&mut self, text: &str) -> Result<()> {
        self.coordinate = Some(text.parse()?);
        Ok(())
    }

    /// Boundary setter. Unlike decoding, this rejects geometry the engine cannot use.
    pub fn set_boundary(&mut self, geojson: Value) -> Result<()> {
        let boundary = Boundary::from_geojson(geojson);
        let geometry = boundary.geometry();
        if geometry.kind().is_none() {
            return Err(GeoError::InvalidInput(
                "boundary must be a GeoJSON Feature, Polygon or MultiPolygon".to_string(),
            ));
        }
        if !geometry.has_usable_ring() {
            return Err(GeoError::InvalidInput(
                "boundary has no ring with at least three positions".to_string(),
            ));
        }
        self.boundary = Some(boundary);
        Ok(())
    }

    /// True when the boundary has at least one usable exterior ring.
    pub fn has_boundary(&self) -> bool {
        self.usable_boundary().is_some()
    }

    fn usable_boundary(&self) -> Option<&Geometry> {
        self.boundary
            .as_ref()
            .map(Boundary::geometry)
            .filter(|g| g.has_usable_ring())
    }

    /// Boundary passed back out exactly as it was supplied.
    pub fn boundary_geojson(&self) -> Option<Value> {
        self.boundary.as_ref().map(|b| b.source().clone())
    }

    /// Boundary area in square degrees.
    pub fn boundary_area(&self) -> Option<f64> {
        self.usable_boundary().map(Geometry::area)
    }

    pub fn boundary_centroid(&self) -> Option<Coordinate> {
        self.usable_boundary()
            .and_then(Geometry::centroid)
            .map(Coordinate::from_coord)
    }

    /// The coordinate if set, otherwise the boundary centroid.
    pub fn reference_point(&self) -> Option<Coordinate> {
        self.coordinate.or_else(|| self.boundary_centroid())
    }

    /// Declared level, then a hierarchy entry naming this place, then inference.
    pub fn admin_level(&self, tables: &HeuristicTables) -> Option<AdminLevel> {
        if let Some(level) = self.admin.admin_level {
            return Some(level);
        }

        let own_name = self.name.trim().to_lowercase();
        let from_hierarchy = self
            .admin
            .hierarchy
            .iter()
            .filter(|entry| entry.name.trim().to_lowercase() == own_name)
            .find_map(|entry| entry.admin_level);
        if from_hierarchy.is_some() {
            return from_hierarchy;
        }

        infer_admin_level(self.admin.place_type.as_deref(), Some(&self.name), tables)
    }

    /// Whether a point lies in this place.
    ///
    /// Uses the boundary when there is one; a place with only a coordinate contains
    /// points within [`POINT_PLACE_RADIUS_KM`] of it.
    pub fn contains_point(&self, latitude: f64, longitude: f64) -> bool {
        if let Some(boundary) = self.usable_boundary() {
            return boundary.contains_lon_lat(longitude, latitude);
        }
        match self.coordinate {
            Some(c) => {
                haversine_distance(c.latitude, c.longitude, latitude, longitude)
                    <= POINT_PLACE_RADIUS_KM
            }
            None => false,
        }
    }

    /// Kilometres from a point to this place's boundary, `0.0` when inside.
    pub fn distance_to_boundary(&self, latitude: f64, longitude: f64) -> Option<f64> {
        self.usable_boundary()
            .and_then(|b| geometry::distance_to_boundary(latitude, longitude, b))
    }

    /// How this place's boundary relates to `other`'s.
    pub fn boundary_relationship_with(&self, other: &PlaceRecord) -> Relationship {
        match (self.usable_boundary(), other.usable_boundary()) {
            (Some(a), Some(b)) => classify_relationship(a, b),
            _ => Relationship::Disjoint,
        }
    }

    pub fn represents_same_place_as(
        &self,
        other: &PlaceRecord,
        min_ratio: f64,
        max_ratio: f64,
    ) -> bool {
        match (self.usable_boundary(), other.usable_boundary()) {
            (Some(a), Some(b)) => polygons_represent_same_place(a, b, min_ratio, max_ratio),
            _ => false,
        }
    }

    /// See [`boundary_specificity_order`].
    pub fn specificity_order(&self, tables: &HeuristicTables) -> Option<f64> {
        boundary_specificity_order(self.admin_level(tables), self.usable_boundary())
    }

    /// Great-circle kilometres between the two places' reference points.
    pub fn distance_to(&self, other: &PlaceRecord) -> Option<f64> {
        let a = self.reference_point()?;
        let b = other.reference_point()?;
        Some(haversine_distance(
            a.latitude,
            a.longitude,
            b.latitude,
            b.longitude,
        ))
    }

    /// `[min_lon, min_lat, max_lon, max_lat]` of the boundary, or a zero-size box
    /// at the coordinate.
    pub fn bounding_box(&self) -> Option<[f64; 4]> {
        if let Some(bbox) = self.usable_boundary().and_then(Geometry::bounding_box) {
            return Some(bbox);
        }
        self.coordinate
            .map(|c| [c.longitude, c.latitude, c.longitude, c.latitude])
    }
}
