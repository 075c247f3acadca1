//! Admin level to candidate-search radius.

use serde::{Deserialize, Serialize};

use crate::models::AdminLevel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusEntry {
    pub level: AdminLevel,
    pub km: f64,
}

/// Search radius per admin level. Broad places look for neighbours far away,
/// specific places only nearby.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusTable {
    /// Radius for places whose level is unknown
    pub default_km: f64,
    pub levels: Vec<RadiusEntry>,
}

impl Default for RadiusTable {
    fn default() -> Self {
        let levels = [
            (2, 200.0),
            (4, 100.0),
            (6, 50.0),
            (8, 25.0),
            (10, 10.0),
            (12, 5.0),
            (16, 2.0),
        ]
        .into_iter()
        .map(|(level, km)| RadiusEntry {
            level: AdminLevel(level),
            km,
        })
        .collect();

        Self {
            default_km: 50.0,
            levels,
        }
    }
}

impl RadiusTable {
    /// Radius for a level.
    ///
    /// Levels between table entries take the entry of the nearest broader level
    /// (level 9 uses level 8's radius); levels broader than every entry take the
    /// broadest entry.
    pub fn radius_for(&self, level: Option<AdminLevel>) -> f64 {
        let Some(level) = level else {
            return self.default_km;
        };

        let broader = self
            .levels
            .iter()
            .filter(|e| e.level <= level)
            .max_by_key(|e| e.level);
        let broadest = self.levels.iter().min_by_key(|e| e.level);

        broader
            .or(broadest)
            .map(|e| e.km)
            .unwrap_or(self.default_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radii() {
        let table = RadiusTable::default();
        assert_eq!(table.radius_for(Some(AdminLevel::COUNTRY)), 200.0);
        assert_eq!(table.radius_for(Some(AdminLevel::LOCALITY)), 25.0);
        assert_eq!(table.radius_for(Some(AdminLevel::BUILDING)), 2.0);
        assert_eq!(table.radius_for(None), 50.0);
    }

    #[test]
    fn test_gaps_use_broader_entry() {
        let table = RadiusTable::default();
        assert_eq!(table.radius_for(Some(AdminLevel(9))), 25.0);
        assert_eq!(table.radius_for(Some(AdminLevel(14))), 5.0);
        assert_eq!(table.radius_for(Some(AdminLevel(1))), 200.0);
    }

    #[test]
    fn test_empty_table_uses_default() {
        let table = RadiusTable {
            default_km: 12.5,
            levels: vec![],
        };
        assert_eq!(table.radius_for(Some(AdminLevel::LOCALITY)), 12.5);
    }
}
