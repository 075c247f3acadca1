//! Heuristic classification of how two boundaries relate.
//!
//! No polygon intersection is computed. The classifier only compares areas and
//! checks whether each centroid falls inside the other boundary, so oddly shaped
//! or strongly concave boundaries can be misclassified.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::compose::{area_of_geometry, centroid_of_geometry, point_in_geometry};
use super::ring::AREA_EPSILON;
use crate::models::{AdminLevel, Geometry};

/// Area ratio bounds within which two mutually-containing boundaries count as the
/// same place.
pub const SAME_PLACE_MIN_RATIO: f64 = 0.25;
pub const SAME_PLACE_MAX_RATIO: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Same,
    Contains,
    ContainedBy,
    Overlap,
    Disjoint,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Same => "same",
            Relationship::Contains => "contains",
            Relationship::ContainedBy => "contained_by",
            Relationship::Overlap => "overlap",
            Relationship::Disjoint => "disjoint",
        }
    }

    /// The relationship seen from the other side.
    pub fn inverse(&self) -> Self {
        match self {
            Relationship::Contains => Relationship::ContainedBy,
            Relationship::ContainedBy => Relationship::Contains,
            other => *other,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area and centroid of a boundary, if it has a real (non-degenerate) one.
struct Footprint {
    area: f64,
    centroid_lon: f64,
    centroid_lat: f64,
}

impl Footprint {
    fn of(geometry: &Geometry) -> Option<Self> {
        let area = area_of_geometry(geometry);
        if area < AREA_EPSILON {
            return None;
        }
        let centroid = centroid_of_geometry(geometry)?;
        Some(Self {
            area,
            centroid_lon: centroid.x,
            centroid_lat: centroid.y,
        })
    }
}

/// Classify `a` relative to `b`. Missing data on either side yields `Disjoint`.
pub fn classify_relationship(a: &Geometry, b: &Geometry) -> Relationship {
    let (Some(fa), Some(fb)) = (Footprint::of(a), Footprint::of(b)) else {
        return Relationship::Disjoint;
    };

    let a_in_b = point_in_geometry(fa.centroid_lon, fa.centroid_lat, b);
    let b_in_a = point_in_geometry(fb.centroid_lon, fb.centroid_lat, a);
    let ratio = fa.area / fb.area;
    let similar_size = (SAME_PLACE_MIN_RATIO..=SAME_PLACE_MAX_RATIO).contains(&ratio);

    let relationship = if similar_size && a_in_b && b_in_a {
        Relationship::Same
    } else if b_in_a && fb.area < fa.area {
        Relationship::Contains
    } else if a_in_b && fa.area < fb.area {
        Relationship::ContainedBy
    } else if a_in_b || b_in_a {
        Relationship::Overlap
    } else {
        Relationship::Disjoint
    };

    debug!(
        "relationship: area ratio {:.4}, a_in_b={}, b_in_a={} -> {}",
        ratio, a_in_b, b_in_a, relationship
    );

    relationship
}

/// Whether two boundaries plausibly describe the same real place: each centroid
/// lies inside the other boundary and the area ratio is within
/// `[min_ratio, max_ratio]` (inclusive).
pub fn polygons_represent_same_place(
    a: &Geometry,
    b: &Geometry,
    min_ratio: f64,
    max_ratio: f64,
) -> bool {
    let (Some(fa), Some(fb)) = (Footprint::of(a), Footprint::of(b)) else {
        return false;
    };

    let ratio = fa.area / fb.area;
    if ratio < min_ratio || ratio > max_ratio {
        return false;
    }

    point_in_geometry(fa.centroid_lon, fa.centroid_lat, b)
        && point_in_geometry(fb.centroid_lon, fb.centroid_lat, a)
}

/// Sort key where a smaller value means a broader place.
///
/// A known admin level is used directly. Without one, `1 / area` stands in, so
/// smaller boundaries sort as more specific. The two scales are not equivalent;
/// mixing places with and without admin levels only gives an approximate order.
pub fn boundary_specificity_order(
    admin_level: Option<AdminLevel>,
    geometry: Option<&Geometry>,
) -> Option<f64> {
    if let Some(level) = admin_level {
        return Some(f64::from(level.to_osm_level()));
    }

    let area = area_of_geometry(geometry?);
    if area < AREA_EPSILON {
        return None;
    }
    Some(1.0 / area)
}
