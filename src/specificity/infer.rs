//! Admin-level inference from a place's declared type and name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::AdminLevel;

/// Lookup tables driving [`infer_admin_level`].
///
/// All names and keywords are matched case-insensitively. Every field falls back to
/// the built-in table when omitted from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicTables {
    /// Administrative names treated as countries (level 2)
    pub countries: Vec<String>,

    /// Administrative names treated as cities (level 8)
    pub major_cities: Vec<String>,

    /// Administrative names treated as counties/regions (level 6)
    pub regions: Vec<String>,

    /// Level for administrative places matching none of the lists above
    pub default_administrative_level: AdminLevel,

    /// Place type (e.g. `"city"`, `"suburb"`) to level
    pub type_levels: HashMap<String, AdminLevel>,

    /// Name fragments that mark a building-level landmark
    pub landmark_keywords: Vec<String>,
}

const COUNTRIES: &[&str] = &[
    "united kingdom",
    "england",
    "scotland",
    "wales",
    "northern ireland",
    "ireland",
    "france",
    "germany",
    "spain",
    "portugal",
    "italy",
    "netherlands",
    "belgium",
    "switzerland",
    "austria",
    "poland",
    "sweden",
    "norway",
    "denmark",
    "finland",
    "greece",
    "russia",
    "united states",
    "united states of america",
    "usa",
    "canada",
    "mexico",
    "brazil",
    "argentina",
    "china",
    "japan",
    "india",
    "australia",
    "new zealand",
    "south africa",
    "egypt",
];

const MAJOR_CITIES: &[&str] = &[
    "london",
    "paris",
    "berlin",
    "madrid",
    "rome",
    "vienna",
    "amsterdam",
    "brussels",
    "dublin",
    "edinburgh",
    "manchester",
    "birmingham",
    "liverpool",
    "glasgow",
    "oxford",
    "cambridge",
    "new york",
    "los angeles",
    "chicago",
    "washington",
    "boston",
    "san francisco",
    "toronto",
    "sydney",
    "melbourne",
    "tokyo",
    "beijing",
    "moscow",
    "cairo",
];

const REGIONS: &[&str] = &[
    "greater london",
    "kent",
    "surrey",
    "sussex",
    "essex",
    "yorkshire",
    "lancashire",
    "devon",
    "cornwall",
    "oxfordshire",
    "cambridgeshire",
    "middlesex",
    "hampshire",
    "norfolk",
    "suffolk",
    "california",
    "texas",
    "new york state",
    "bavaria",
    "île-de-france",
];

const TYPE_LEVELS: &[(&str, u8)] = &[
    ("country", 2),
    ("state", 4),
    ("region", 4),
    ("province", 4),
    ("county", 6),
    ("district", 6),
    ("city", 8),
    ("town", 8),
    ("municipality", 8),
    ("village", 10),
    ("suburb", 10),
    ("borough", 10),
    ("hamlet", 10),
    ("neighbourhood", 12),
    ("neighborhood", 12),
    ("quarter", 12),
    ("building", 16),
    ("house", 16),
    ("museum", 16),
    ("landmark", 16),
    ("monument", 16),
    ("attraction", 16),
    ("yes", 16),
];

const LANDMARK_KEYWORDS: &[&str] = &[
    "palace",
    "castle",
    "cathedral",
    "church",
    "abbey",
    "tower",
    "bridge",
    "museum",
    "gallery",
    "theatre",
    "stadium",
    "station",
    "monument",
    "memorial",
    "house",
    "hall",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for HeuristicTables {
    fn default() -> Self {
        Self {
            countries: owned(COUNTRIES),
            major_cities: owned(MAJOR_CITIES),
            regions: owned(REGIONS),
            default_administrative_level: AdminLevel::COUNTY,
            type_levels: TYPE_LEVELS
                .iter()
                .map(|(t, level)| (t.to_string(), AdminLevel(*level)))
                .collect(),
            landmark_keywords: owned(LANDMARK_KEYWORDS),
        }
    }
}

fn list_contains(list: &[String], needle: &str) -> bool {
    list.iter().any(|entry| entry.to_lowercase() == needle)
}

/// Infer an admin level for a place with no declared one.
///
/// Evaluated in this order, first hit wins:
/// 1. `place_type == "administrative"`: country list (2), major city list (8),
///    region list (6), else the configured default.
/// 2. The type table.
/// 3. Landmark keywords anywhere in the name (16).
///
/// Returns `None` when nothing matches.
pub fn infer_admin_level(
    place_type: Option<&str>,
    place_name: Option<&str>,
    tables: &HeuristicTables,
) -> Option<AdminLevel> {
    let place_type = place_type.map(|t| t.trim().to_lowercase());
    let name = place_name.map(|n| n.trim().to_lowercase()).unwrap_or_default();

    if place_type.as_deref() == Some("administrative") {
        let level = if list_contains(&tables.countries, &name) {
            AdminLevel::COUNTRY
        } else if list_contains(&tables.major_cities, &name) {
            AdminLevel::LOCALITY
        } else if list_contains(&tables.regions, &name) {
            AdminLevel::COUNTY
        } else {
            tables.default_administrative_level
        };
        return Some(level);
    }

    if let Some(level) = place_type
        .as_deref()
        .and_then(|t| tables.type_levels.get(t))
    {
        return Some(*level);
    }

    if !name.is_empty()
        && tables
            .landmark_keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    {
        return Some(AdminLevel::BUILDING);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(place_type: Option<&str>, name: Option<&str>) -> Option<AdminLevel> {
        infer_admin_level(place_type, name, &HeuristicTables::default())
    }

    #[test]
    fn test_administrative_lists() {
        assert_eq!(infer(Some("administrative"), Some("France")), Some(AdminLevel::COUNTRY));
        assert_eq!(infer(Some("administrative"), Some("LONDON")), Some(AdminLevel::LOCALITY));
        assert_eq!(infer(Some("administrative"), Some("Kent")), Some(AdminLevel::COUNTY));
        assert_eq!(
            infer(Some("administrative"), Some("Nowhere Parish")),
            Some(AdminLevel::COUNTY)
        );
        assert_eq!(infer(Some("administrative"), None), Some(AdminLevel::COUNTY));
    }

    #[test]
    fn test_type_table() {
        assert_eq!(infer(Some("city"), Some("Anytown")), Some(AdminLevel::LOCALITY));
        assert_eq!(infer(Some("Suburb"), None), Some(AdminLevel::SUBURB));
        assert_eq!(infer(Some("quarter"), None), Some(AdminLevel::NEIGHBOURHOOD));
        assert_eq!(infer(Some("yes"), None), Some(AdminLevel::BUILDING));
        assert_eq!(infer(Some("state"), None), Some(AdminLevel::REGION));
    }

    #[test]
    fn test_type_match_precedes_keyword_scan() {
        // "Tower Hamlets" contains a landmark keyword but is declared a borough
        assert_eq!(
            infer(Some("borough"), Some("Tower Hamlets")),
            Some(AdminLevel::SUBURB)
        );
        // Administrative branch also wins over the keyword scan
        assert_eq!(
            infer(Some("administrative"), Some("Castle Point")),
            Some(AdminLevel::COUNTY)
        );
    }

    #[test]
    fn test_keyword_scan() {
        assert_eq!(infer(None, Some("Buckingham Palace")), Some(AdminLevel::BUILDING));
        assert_eq!(infer(Some("unknown"), Some("St Paul's Cathedral")), Some(AdminLevel::BUILDING));
        assert_eq!(infer(None, Some("Hyde Park")), None);
        assert_eq!(infer(None, None), None);
    }

    #[test]
    fn test_custom_tables() {
        let mut tables = HeuristicTables::default();
        tables.major_cities.push("Lyon".to_string());
        tables.type_levels.insert("arrondissement".to_string(), AdminLevel(9));
        tables.landmark_keywords = vec!["basilique".to_string()];

        assert_eq!(
            infer_admin_level(Some("administrative"), Some("lyon"), &tables),
            Some(AdminLevel::LOCALITY)
        );
        assert_eq!(
            infer_admin_level(Some("arrondissement"), None, &tables),
            Some(AdminLevel(9))
        );
        assert_eq!(
            infer_admin_level(None, Some("Basilique de Fourvière"), &tables),
            Some(AdminLevel::BUILDING)
        );
        assert_eq!(infer_admin_level(None, Some("Old Bridge"), &tables), None);
    }
}
