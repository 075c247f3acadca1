//! Engine configuration: heuristic tables, radius table and search limits.
//!
//! Every section is optional in the TOML file; omitted sections and fields keep
//! their built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::specificity::{HeuristicTables, RadiusTable, SearchLimits};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub heuristics: HeuristicTables,
    pub radius: RadiusTable,
    pub search: SearchLimits,
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminLevel;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.search.chunk_size, 50);
        assert_eq!(config.search.max_candidates, 200);
        assert_eq!(config.radius.radius_for(None), 50.0);
        assert!(config.heuristics.countries.iter().any(|c| c == "france"));
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [search]
            max_candidates = 500

            [heuristics]
            major_cities = ["lyon"]
            default_administrative_level = 7

            [heuristics.type_levels]
            arrondissement = 9

            [radius]
            default_km = 30.0
            levels = [{ level = 2, km = 500.0 }, { level = 8, km = 15.0 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.search.max_candidates, 500);
        assert_eq!(config.search.chunk_size, 50);
        assert_eq!(config.heuristics.major_cities, vec!["lyon".to_string()]);
        assert_eq!(
            config.heuristics.default_administrative_level,
            AdminLevel(7)
        );
        assert_eq!(
            config.heuristics.type_levels.get("arrondissement"),
            Some(&AdminLevel(9))
        );
        // Lists not mentioned keep their defaults
        assert!(!config.heuristics.countries.is_empty());
        assert_eq!(config.radius.radius_for(Some(AdminLevel(10))), 15.0);
        assert_eq!(config.radius.radius_for(None), 30.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\nchunk_size = 10").unwrap();
        let config = EngineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.search.chunk_size, 10);

        assert!(EngineConfig::load_from_file("/nonexistent/spanbound.toml").is_err());
        assert!(EngineConfig::from_toml_str("[search]\nchunk_size = \"many\"").is_err());
    }
}
