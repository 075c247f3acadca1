//! Administrative specificity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// OSM `admin_level` number. Lower is broader.
/// See: https://wiki.openstreetmap.org/wiki/Tag:boundary%3Dadministrative
///
/// The engine extends the OSM scale past 10 for sub-locality features, up to 16 for
/// individual buildings and landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminLevel(pub u8);

impl AdminLevel {
    /// Country (admin_level=2)
    pub const COUNTRY: AdminLevel = AdminLevel(2);
    /// Region / state / province (admin_level=4)
    pub const REGION: AdminLevel = AdminLevel(4);
    /// County / district (admin_level=6)
    pub const COUNTY: AdminLevel = AdminLevel(6);
    /// Locality / city / town (admin_level=8)
    pub const LOCALITY: AdminLevel = AdminLevel(8);
    /// Village / suburb (admin_level=10)
    pub const SUBURB: AdminLevel = AdminLevel(10);
    /// Neighbourhood / quarter (admin_level=12)
    pub const NEIGHBOURHOOD: AdminLevel = AdminLevel(12);
    /// Building / landmark (admin_level=16)
    pub const BUILDING: AdminLevel = AdminLevel(16);

    /// Convert an OSM admin_level number, rejecting values outside 1..=16
    pub fn from_osm_level(level: u8) -> Option<Self> {
        match level {
            1..=16 => Some(AdminLevel(level)),
            _ => None,
        }
    }

    /// Get the OSM admin_level number
    pub fn to_osm_level(&self) -> u8 {
        self.0
    }

    /// Lenient parse of a declared level, e.g. `8`, `"8"` or `" 8 "`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .and_then(Self::from_osm_level),
            serde_json::Value::String(s) => s.trim().parse().ok().and_then(Self::from_osm_level),
            _ => None,
        }
    }

    /// True when `self` is broader than `other` (a smaller OSM number).
    pub fn is_broader_than(&self, other: AdminLevel) -> bool {
        self.0 < other.0
    }

    /// Human-readable name of the band this level falls in
    pub fn label(&self) -> &'static str {
        match self.0 {
            0..=2 => "country",
            3..=4 => "region",
            5..=6 => "county",
            7..=8 => "locality",
            9..=10 => "suburb",
            11..=12 => "neighbourhood",
            13..=15 => "site",
            _ => "building",
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// One step of a place's administrative hierarchy, e.g.
/// `{name: "Camden", type: "borough", admin_level: 10}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_level: Option<AdminLevel>,
}

/// Serde helper for declared levels that may be numbers, numeric strings or junk.
/// Junk becomes `None` rather than failing the whole record.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<AdminLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(AdminLevel::from_json(&value))
}
