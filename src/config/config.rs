use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::query::SortKey;
use crate::validation::ValidationRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub validation: ValidationRules,
    pub table: TableBehaviorConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableBehaviorConfig {
    /// Rows per page when no explicit page size has been chosen
    pub default_page_size: usize,

    /// Page sizes offered in the rows-per-page selector
    pub page_size_options: Vec<usize>,

    /// Columns a header click is allowed to sort by
    pub sortable_columns: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the demo users endpoint
    pub base_url: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            validation: ValidationRules::default(),
            table: TableBehaviorConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for TableBehaviorConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            page_size_options: vec![5, 10, 15, 20],
            sortable_columns: vec![SortKey::Id, SortKey::Name, SortKey::Email],
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
        }
    }
}

impl TableConfig {
    /// Load config from the default location, creating it with
    /// defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: TableConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("user-table").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_behavior() {
        let config = TableConfig::default();
        assert_eq!(config.table.default_page_size, 5);
        assert_eq!(config.validation.min_age, 18);
        assert!(config.table.sortable_columns.contains(&SortKey::Name));
        assert!(!config.table.sortable_columns.contains(&SortKey::Role));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TableConfig::default();
        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed: TableConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: TableConfig = toml::from_str(
            r#"
            [validation]
            min_age = 21
            "#,
        )
        .unwrap();

        assert_eq!(parsed.validation.min_age, 21);
        assert_eq!(parsed.validation.name_min_len, 2);
        assert_eq!(parsed.table.default_page_size, 5);
    }
}
