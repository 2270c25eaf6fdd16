//! Experiment configuration.
//!
//! Every file name and tuning constant the tools use lives here and is passed
//! explicitly to the commands. A JSON file may override any subset of fields;
//! anything omitted keeps the study's default.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampler::DEFAULT_SEED;

/// One detector's results file and where its chart goes in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorPanel {
    pub path: PathBuf,
    pub name: String,
    pub row: usize,
    pub col: usize,
    /// Optional accent colour as `#rrggbb`.
    #[serde(default)]
    pub colour: Option<String>,
}

impl DetectorPanel {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            row,
            col,
            colour: None,
        }
    }

    /// Parse `colour` into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_colour(self.colour.as_deref()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub database: PathBuf,
    pub prompts_file: PathBuf,
    pub tests_text_file: PathBuf,
    pub tests_csv_file: PathBuf,
    pub num_tests: usize,
    pub seed: u64,
    pub hist_bins: usize,
    pub curve_resolution: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub detectors: Vec<DetectorPanel>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("abstract_db.sqlite"),
            prompts_file: PathBuf::from("prompts.txt"),
            tests_text_file: PathBuf::from("test_abstracts.txt"),
            tests_csv_file: PathBuf::from("test_abstracts.csv"),
            num_tests: 25,
            seed: DEFAULT_SEED,
            hist_bins: 5,
            curve_resolution: 1000,
            grid_rows: 2,
            grid_cols: 2,
            detectors: default_detectors(),
        }
    }
}

fn default_detectors() -> Vec<DetectorPanel> {
    let panel = |path: &str, name: &str, row, col, colour: &str| DetectorPanel {
        colour: Some(colour.to_string()),
        ..DetectorPanel::new(path, name, row, col)
    };
    vec![
        panel("data/GPTZero_tests.csv", "GPTZero", 0, 0, "#3c1ba0"),
        panel("data/Writefull_tests.csv", "Writefull", 1, 1, "#f66824"),
        panel("data/Isgen_tests.csv", "Isgen", 1, 0, "#1ee565"),
        panel("data/Scispace_tests.csv", "Scispace", 0, 1, "#00bfb0"),
    ]
}

impl ExperimentConfig {
    /// Load a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_tests == 0 {
            return Err(Error::Config("num_tests must be at least 1".into()));
        }
        if self.hist_bins == 0 {
            return Err(Error::Config("hist_bins must be at least 1".into()));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(Error::Config("grid must have at least one cell".into()));
        }
        let mut taken = HashSet::new();
        for d in &self.detectors {
            if d.row >= self.grid_rows || d.col >= self.grid_cols {
                return Err(Error::Config(format!(
                    "detector {} at ({}, {}) is outside the {}x{} grid",
                    d.name, d.row, d.col, self.grid_rows, self.grid_cols
                )));
            }
            if !taken.insert((d.row, d.col)) {
                return Err(Error::Config(format!(
                    "detector {} shares grid cell ({}, {}) with another detector",
                    d.name, d.row, d.col
                )));
            }
            if d.colour.is_some() && d.rgb().is_none() {
                return Err(Error::Config(format!(
                    "detector {} has invalid colour {:?}",
                    d.name,
                    d.colour.as_deref().unwrap_or_default()
                )));
            }
        }
        Ok(())
    }
}

fn parse_hex_colour(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_study_constants() {
        let c = ExperimentConfig::default();
        assert_eq!(c.database, PathBuf::from("abstract_db.sqlite"));
        assert_eq!(c.num_tests, 25);
        assert_eq!(c.seed, 1);
        assert_eq!(c.hist_bins, 5);
        assert_eq!(c.curve_resolution, 1000);
        assert_eq!(c.detectors.len(), 4);
        assert_eq!(c.detectors[0].name, "GPTZero");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let c: ExperimentConfig =
            serde_json::from_str(r#"{"num_tests": 10, "seed": 99}"#).unwrap();
        assert_eq!(c.num_tests, 10);
        assert_eq!(c.seed, 99);
        assert_eq!(c.hist_bins, 5);
        assert_eq!(c.detectors.len(), 4);
    }

    #[test]
    fn test_custom_detectors_json() {
        let json = r#"{
            "grid_rows": 1, "grid_cols": 1,
            "detectors": [{"path": "gptzero.csv", "name": "GPTZero (n=10)", "row": 0, "col": 0}]
        }"#;
        let c: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.detectors[0].colour, None);
    }

    #[test]
    fn test_validate_rejects_panel_outside_grid() {
        let mut c = ExperimentConfig::default();
        c.detectors.push(DetectorPanel::new("x.csv", "Extra", 2, 0));
        assert!(matches!(c.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_shared_grid_cell() {
        let mut c = ExperimentConfig::default();
        c.detectors.push(DetectorPanel::new("x.csv", "Extra", 0, 0));
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("Extra"));

        c.detectors.pop();
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let c = ExperimentConfig {
            hist_bins: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
        let c = ExperimentConfig {
            num_tests: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_colour_parsing() {
        let mut d = DetectorPanel::new("a.csv", "A", 0, 0);
        assert_eq!(d.rgb(), None);
        d.colour = Some("#3c1ba0".into());
        assert_eq!(d.rgb(), Some((0x3c, 0x1b, 0xa0)));
        d.colour = Some("3c1ba0".into());
        assert_eq!(d.rgb(), None);
        d.colour = Some("#zzzzzz".into());
        assert_eq!(d.rgb(), None);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("detectlab.json");
        std::fs::write(&path, r#"{"curve_resolution": 11}"#).unwrap();
        let c = ExperimentConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(c.curve_resolution, 11);

        std::fs::write(&path, r#"{"hist_bins": 0}"#).unwrap();
        assert!(ExperimentConfig::load(&path).is_err());
        assert!(ExperimentConfig::load_or_default(None).is_ok());
    }
}
