//! GeoJSON boundary geometry.
//!
//! Boundaries arrive as already-decoded JSON. Decoding never fails: anything that is
//! not a `Feature`, `Polygon` or `MultiPolygon` becomes [`Geometry::Unsupported`],
//! and a ring containing a malformed position decodes as an empty ring. Every
//! geometric operation then treats those as "no data".

use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Closed loop of `[longitude, latitude]` positions (`x` = lon, `y` = lat).
pub type Ring = Vec<Coord<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Geometry {
    /// Exterior ring followed by holes. Only the exterior ring is ever consulted.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    Feature {
        geometry: Box<Geometry>,
        properties: Option<Value>,
    },
    /// Anything else, kept verbatim so it can be passed back out.
    Unsupported(Value),
}

impl Geometry {
    /// Decode a GeoJSON value without validating it.
    pub fn from_geojson(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str);

        match kind {
            Some("Feature") => Geometry::Feature {
                geometry: Box::new(
                    value
                        .get("geometry")
                        .map(Geometry::from_geojson)
                        .unwrap_or(Geometry::Unsupported(Value::Null)),
                ),
                properties: value.get("properties").filter(|p| !p.is_null()).cloned(),
            },
            Some("Polygon") => Geometry::Polygon(
                value
                    .get("coordinates")
                    .map(parse_rings)
                    .unwrap_or_default(),
            ),
            Some("MultiPolygon") => Geometry::MultiPolygon(
                value
                    .get("coordinates")
                    .and_then(Value::as_array)
                    .map(|polys| polys.iter().map(parse_rings).collect())
                    .unwrap_or_default(),
            ),
            _ => Geometry::Unsupported(value.clone()),
        }
    }

    /// Encode back into GeoJSON.
    pub fn to_geojson(&self) -> Value {
        match self {
            Geometry::Polygon(rings) => json!({
                "type": "Polygon",
                "coordinates": rings_to_json(rings),
            }),
            Geometry::MultiPolygon(polys) => json!({
                "type": "MultiPolygon",
                "coordinates": polys.iter().map(|p| rings_to_json(p)).collect::<Vec<_>>(),
            }),
            Geometry::Feature {
                geometry,
                properties,
            } => {
                let mut feature = Map::new();
                feature.insert("type".to_string(), Value::from("Feature"));
                feature.insert(
                    "properties".to_string(),
                    properties.clone().unwrap_or(Value::Null),
                );
                feature.insert("geometry".to_string(), geometry.to_geojson());
                Value::Object(feature)
            }
            Geometry::Unsupported(raw) => raw.clone(),
        }
    }

    /// The GeoJSON type this geometry resolves to once features are unwrapped.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Geometry::Polygon(_) => Some("Polygon"),
            Geometry::MultiPolygon(_) => Some("MultiPolygon"),
            Geometry::Feature { geometry, .. } => geometry.kind(),
            Geometry::Unsupported(_) => None,
        }
    }

    /// Exterior rings of every constituent polygon, features unwrapped.
    pub fn exterior_rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon(rings) => rings.first().into_iter().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().filter_map(|p| p.first()).collect(),
            Geometry::Feature { geometry, .. } => geometry.exterior_rings(),
            Geometry::Unsupported(_) => Vec::new(),
        }
    }

    /// True when at least one exterior ring has three or more positions.
    pub fn has_usable_ring(&self) -> bool {
        self.exterior_rings().iter().any(|r| r.len() >= 3)
    }

    /// Exterior-only `geo` view of this geometry. Holes are dropped.
    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(
            self.exterior_rings()
                .into_iter()
                .filter(|r| r.len() >= 3)
                .map(|r| Polygon::new(LineString::new(r.clone()), vec![]))
                .collect(),
        )
    }

    /// `[min_lon, min_lat, max_lon, max_lat]` over all exterior rings.
    pub fn bounding_box(&self) -> Option<[f64; 4]> {
        self.to_multi_polygon()
            .bounding_rect()
            .map(|rect| [rect.min().x, rect.min().y, rect.max().x, rect.max().y])
    }
}

/// A decoded boundary kept together with the GeoJSON it was decoded from.
///
/// Geometry operations read the decoded rings; serialization hands back the source
/// value untouched, including members and position values the decoder ignores
/// (`id`, `bbox`, altitudes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Boundary {
    geometry: Geometry,
    source: Value,
}

impl Boundary {
    pub fn from_geojson(source: Value) -> Self {
        Self {
            geometry: Geometry::from_geojson(&source),
            source,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The GeoJSON exactly as supplied.
    pub fn source(&self) -> &Value {
        &self.source
    }
}

impl From<Value> for Boundary {
    fn from(source: Value) -> Self {
        Boundary::from_geojson(source)
    }
}

impl From<Geometry> for Boundary {
    fn from(geometry: Geometry) -> Self {
        Self {
            source: geometry.to_geojson(),
            geometry,
        }
    }
}

impl From<Boundary> for Value {
    fn from(boundary: Boundary) -> Self {
        boundary.source
    }
}

impl From<Value> for Geometry {
    fn from(value: Value) -> Self {
        Geometry::from_geojson(&value)
    }
}

impl From<Geometry> for Value {
    fn from(geometry: Geometry) -> Self {
        geometry.to_geojson()
    }
}

/// Parse an array of rings. Non-array input yields no rings.
fn parse_rings(value: &Value) -> Vec<Ring> {
    value
        .as_array()
        .map(|rings| rings.iter().map(parse_ring).collect())
        .unwrap_or_default()
}

/// Parse one ring. A single malformed position invalidates the whole ring.
fn parse_ring(value: &Value) -> Ring {
    let Some(positions) = value.as_array() else {
        return Vec::new();
    };

    let mut ring = Vec::with_capacity(positions.len());
    for position in positions {
        let pair = position.as_array().and_then(|p| {
            let x = p.first()?.as_f64()?;
            let y = p.get(1)?.as_f64()?;
            Some(Coord { x, y })
        });
        match pair {
            Some(coord) => ring.push(coord),
            None => return Vec::new(),
        }
    }
    ring
}

fn rings_to_json(rings: &[Ring]) -> Vec<Vec<[f64; 2]>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|c| [c.x, c.y]).collect())
        .collect()
}
