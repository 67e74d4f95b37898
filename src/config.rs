use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the doctor data lives and how the chart is laid out.
/// Every field has a default, so a partial `dashboard.json` is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Spreadsheet holding the doctor records.
    pub data_path: PathBuf,
    /// Sheet with the main record set.
    pub sheet: String,
    /// Chart height in points, fixed for layout stability.
    pub chart_height: f32,
    /// Vertical axis of the rating chart.
    pub rating_axis: [f64; 2],
    /// Initial window size.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dr_details.xlsx"),
            sheet: "Details".to_string(),
            chart_height: 600.0,
            rating_axis: [0.0, 5.0],
            window_size: [1000.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("dr_details.xlsx"));
        assert_eq!(config.rating_axis, [0.0, 5.0]);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "data/Details.csv", "chart_height": 450 }"#).unwrap();

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/Details.csv"));
        assert_eq!(config.chart_height, 450.0);
        assert_eq!(config.sheet, "Details");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let err = DashboardConfig::load_or_default(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
