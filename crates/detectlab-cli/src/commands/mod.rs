pub mod hist;
pub mod prompts;
pub mod rates;
pub mod roc;
pub mod testset;

use std::fs::File;
use std::io::{BufWriter, IsTerminal};
use std::path::Path;

use detectlab_core::{DetectorPanel, ExperimentConfig, LabeledScore, load_results};
use serde::Serialize;

use crate::tui::app::{App, Panel, PanelContent};

/// Flags shared by the chart commands.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions<'a> {
    /// Write the numeric series as JSON to this path.
    pub output_path: Option<&'a str>,
    /// Never open the interactive viewer.
    pub no_tui: bool,
}

/// A detector panel with its parsed results, or the reason they could not be read.
pub struct LoadedDetector {
    pub panel: DetectorPanel,
    pub scores: Result<Vec<LabeledScore>, String>,
}

/// Read every configured detector's results file. A missing or malformed file
/// is reported on stderr and kept as an error so the remaining panels still draw.
pub fn load_detectors(config: &ExperimentConfig) -> Vec<LoadedDetector> {
    config
        .detectors
        .iter()
        .map(|panel| {
            let scores = load_results(&panel.path).map_err(|e| {
                eprintln!("  ✗ {}: {} ({e})", panel.name, panel.path.display());
                e.to_string()
            });
            LoadedDetector {
                panel: panel.clone(),
                scores,
            }
        })
        .collect()
}

/// Fail when not a single detector produced usable results.
pub fn require_any(detectors: &[LoadedDetector]) -> detectlab_core::Result<()> {
    if detectors.iter().any(|d| d.scores.is_ok()) {
        Ok(())
    } else {
        Err(detectlab_core::Error::Config(
            "no detector results could be loaded".into(),
        ))
    }
}

/// Create a buffered output file, creating parent directories as needed.
pub fn create_output(path: &Path) -> detectlab_core::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Write a serializable report as pretty JSON.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> detectlab_core::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let path = Path::new(path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    println!("\n📄 Series saved to: {}", path.display());
    Ok(())
}

/// Open the chart viewer unless disabled or stdout is not a terminal.
pub fn show(opts: ChartOptions<'_>, mut app: App) -> detectlab_core::Result<()> {
    if opts.no_tui || !std::io::stdout().is_terminal() {
        log::debug!("chart viewer skipped");
        return Ok(());
    }
    app.run()?;
    Ok(())
}

/// Panel placeholder for a detector whose results were unusable.
pub fn empty_panel(panel: &DetectorPanel, accent: ratatui::style::Color, message: String) -> Panel {
    Panel {
        title: panel.name.clone(),
        row: panel.row,
        col: panel.col,
        accent,
        content: PanelContent::Empty(message),
    }
}

/// Format an optional rate, showing undefined values as a dash.
pub fn fmt_rate(rate: Option<f64>) -> String {
    rate.map(|r| format!("{r:.3}"))
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // fmt_rate tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_fmt_rate_defined() {
        assert_eq!(fmt_rate(Some(0.5)), "0.500");
        assert_eq!(fmt_rate(Some(0.0)), "0.000");
    }

    #[test]
    fn test_fmt_rate_undefined() {
        assert_eq!(fmt_rate(None), "—");
    }

    // -----------------------------------------------------------------------
    // load_detectors tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_load_detectors_keeps_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.csv");
        std::fs::write(&good, "doi,pub_date,text,is_rewritten,score\na,b,c,1,0.8\n").unwrap();

        let config = ExperimentConfig {
            detectors: vec![
                DetectorPanel::new(&good, "Good", 0, 0),
                DetectorPanel::new(tmp.path().join("missing.csv"), "Missing", 0, 1),
            ],
            ..Default::default()
        };
        let loaded = load_detectors(&config);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].scores.as_ref().unwrap().len(), 1);
        assert!(loaded[1].scores.is_err());
        assert!(require_any(&loaded).is_ok());
        assert!(require_any(&loaded[1..]).is_err());
    }

    // -----------------------------------------------------------------------
    // output helpers
    // -----------------------------------------------------------------------

    #[test]
    fn test_create_output_makes_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/out.txt");
        drop(create_output(&path).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_write_json_pretty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("series.json");
        write_json(path.to_str().unwrap(), &vec![1, 2]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<Vec<i32>>(&text).unwrap(), vec![1, 2]);
    }
}
