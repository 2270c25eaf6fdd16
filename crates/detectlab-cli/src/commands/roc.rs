use std::path::Path;

use detectlab_core::{DetectorPanel, ExperimentConfig, Result, RocCurve, roc_curve};
use ratatui::style::Color;
use serde::Serialize;

use super::{ChartOptions, load_detectors, require_any, show, write_json};
use crate::tui::app::{App, Panel, PanelContent, Series};
use crate::tui::ui::accent_for;

/// Line colours for detectors without a configured colour.
const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];

#[derive(Serialize)]
struct RocReport<'a> {
    detector: &'a str,
    #[serde(flatten)]
    curve: &'a RocCurve,
}

pub fn run(config: &ExperimentConfig, results: &[String], opts: ChartOptions<'_>) -> Result<()> {
    let config = with_result_files(config, results);
    let detectors = load_detectors(&config);
    require_any(&detectors)?;

    let curves: Vec<Option<RocCurve>> = detectors
        .iter()
        .map(|d| d.scores.as_ref().ok().map(|s| roc_curve(s)))
        .collect();

    println!("ROC");
    println!("{}", "-".repeat(50));
    println!("  {:<25} {:>8} {:>8}", "Detector", "AUC", "Points");
    for (d, curve) in detectors.iter().zip(&curves) {
        match curve {
            Some(c) => println!(
                "  {:<25} {:>8} {:>8}",
                d.panel.name,
                super::fmt_rate(c.auc),
                c.points.len()
            ),
            None => println!("  {:<25} {:>8}", d.panel.name, "no data"),
        }
    }

    if let Some(path) = opts.output_path {
        let report: Vec<RocReport<'_>> = detectors
            .iter()
            .zip(&curves)
            .filter_map(|(d, c)| {
                c.as_ref().map(|curve| RocReport {
                    detector: &d.panel.name,
                    curve,
                })
            })
            .collect();
        write_json(path, &report)?;
    }

    let mut series = vec![Series {
        name: "chance".to_string(),
        colour: Color::DarkGray,
        points: vec![(0.0, 0.0), (1.0, 1.0)],
    }];
    for (i, (d, curve)) in detectors.iter().zip(&curves).enumerate() {
        let Some(curve) = curve else { continue };
        if curve.points.is_empty() {
            continue;
        }
        series.push(Series {
            name: legend(&d.panel.name, curve.auc),
            colour: accent_for(&d.panel, PALETTE[i % PALETTE.len()]),
            points: curve.points.iter().map(|p| (p.fpr, p.tpr)).collect(),
        });
    }

    let panel = Panel {
        title: "ROC".to_string(),
        row: 0,
        col: 0,
        accent: Color::Cyan,
        content: PanelContent::Lines {
            series,
            x_title: "False Positive Rate",
            y_title: "True Positive Rate",
        },
    };
    show(opts, App::new("ROC curves", 1, 1, vec![panel]))
}

/// Replace the configured detectors with explicit result files, if any.
fn with_result_files(config: &ExperimentConfig, results: &[String]) -> ExperimentConfig {
    let mut config = config.clone();
    if !results.is_empty() {
        config.detectors = results
            .iter()
            .map(|r| {
                let name = Path::new(r)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| r.clone());
                DetectorPanel::new(r, name, 0, 0)
            })
            .collect();
    }
    config
}

fn legend(name: &str, auc: Option<f64>) -> String {
    match auc {
        Some(a) => format!("{name} (AUC = {a:.2})"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_files_replace_detectors() {
        let base = ExperimentConfig::default();
        let c = with_result_files(&base, &["data/GPTZero_tests.csv".to_string()]);
        assert_eq!(c.detectors.len(), 1);
        assert_eq!(c.detectors[0].name, "GPTZero_tests");

        let c = with_result_files(&base, &[]);
        assert_eq!(c.detectors.len(), base.detectors.len());
    }

    #[test]
    fn test_legend_includes_auc() {
        assert_eq!(legend("Isgen", Some(0.875)), "Isgen (AUC = 0.88)");
        assert_eq!(legend("Isgen", None), "Isgen");
    }

    #[test]
    fn test_run_writes_points_json() {
        let tmp = tempfile::tempdir().unwrap();
        let results = tmp.path().join("Scispace_tests.csv");
        std::fs::write(
            &results,
            "doi,pub_date,text,is_rewritten,detection_score\n\
             a,d,t,0,0.2\nb,d,t,0,0.4\nc,d,t,1,0.6\ne,d,t,1,0.8\n",
        )
        .unwrap();
        let json = tmp.path().join("roc.json");
        let opts = ChartOptions {
            output_path: json.to_str(),
            no_tui: true,
        };
        run(
            &ExperimentConfig::default(),
            &[results.to_string_lossy().into_owned()],
            opts,
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(value[0]["detector"], "Scispace_tests");
        assert_eq!(value[0]["auc"], 1.0);
        assert_eq!(value[0]["points"].as_array().unwrap().len(), 5);
    }
}
