use detectlab_core::{ClassHistogram, ExperimentConfig, Result, class_histogram};
use ratatui::style::Color;
use serde::Serialize;

use super::{ChartOptions, LoadedDetector, empty_panel, load_detectors, require_any, show, write_json};
use crate::tui::app::{App, Panel, PanelContent};
use crate::tui::ui::accent_for;

#[derive(Serialize)]
struct HistReport<'a> {
    detector: &'a str,
    histogram: &'a ClassHistogram,
}

pub fn run(config: &ExperimentConfig, bins: Option<usize>, opts: ChartOptions<'_>) -> Result<()> {
    let bins = bins.unwrap_or(config.hist_bins);
    let detectors = load_detectors(config);
    require_any(&detectors)?;

    let histograms = histograms(&detectors, bins)?;

    println!("Score histograms ({bins} bins)");
    println!("{}", "-".repeat(60));
    println!(
        "  {:<20} {:>10} {:>10}  {}",
        "Detector", "Original", "Rewritten", "Peak bin (orig / rewr)"
    );
    for (d, hist) in detectors.iter().zip(&histograms) {
        match hist {
            Some(h) => println!(
                "  {:<20} {:>10} {:>10}  {} / {}",
                d.panel.name,
                h.original.iter().sum::<u64>(),
                h.rewritten.iter().sum::<u64>(),
                peak_label(h, &h.original),
                peak_label(h, &h.rewritten),
            ),
            None => println!("  {:<20} {:>10}", d.panel.name, "no data"),
        }
    }

    if let Some(path) = opts.output_path {
        let report: Vec<HistReport<'_>> = detectors
            .iter()
            .zip(&histograms)
            .filter_map(|(d, h)| {
                h.as_ref().map(|histogram| HistReport {
                    detector: &d.panel.name,
                    histogram,
                })
            })
            .collect();
        write_json(path, &report)?;
    }

    let panels = detectors
        .iter()
        .zip(histograms)
        .map(|(d, hist)| {
            let accent = accent_for(&d.panel, Color::Cyan);
            match (hist, &d.scores) {
                (Some(h), _) => Panel {
                    title: d.panel.name.clone(),
                    row: d.panel.row,
                    col: d.panel.col,
                    accent,
                    content: PanelContent::Histogram(h),
                },
                (None, Err(msg)) => empty_panel(&d.panel, accent, msg.clone()),
                (None, Ok(_)) => empty_panel(&d.panel, accent, "no scores".into()),
            }
        })
        .collect();
    show(
        opts,
        App::new("Detection score histograms", config.grid_rows, config.grid_cols, panels),
    )
}

/// One histogram per detector; `None` where the results could not be read.
fn histograms(detectors: &[LoadedDetector], bins: usize) -> Result<Vec<Option<ClassHistogram>>> {
    detectors
        .iter()
        .map(|d| match &d.scores {
            Ok(scores) => class_histogram(scores, bins).map(Some),
            Err(_) => Ok(None),
        })
        .collect()
}

/// Range label of the fullest bin in `counts`, or `-` when all are empty.
fn peak_label(hist: &ClassHistogram, counts: &[u64]) -> String {
    let Some((i, &max)) = counts.iter().enumerate().max_by_key(|&(_, c)| c) else {
        return "-".to_string();
    };
    if max == 0 {
        return "-".to_string();
    }
    format!("{:.2}-{:.2}", hist.edges[i], hist.edges[i + 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use detectlab_core::{DetectorPanel, LabeledScore};

    fn loaded(scores: Result<Vec<LabeledScore>>) -> LoadedDetector {
        LoadedDetector {
            panel: DetectorPanel::new("x.csv", "X", 0, 0),
            scores: scores.map_err(|e| e.to_string()),
        }
    }

    #[test]
    fn test_histograms_skip_unreadable() {
        let ok = loaded(Ok(vec![
            LabeledScore::new(0, 0.1).unwrap(),
            LabeledScore::new(1, 0.9).unwrap(),
        ]));
        let bad = loaded(Err(detectlab_core::Error::Config("gone".into())));
        let hs = histograms(&[ok, bad], 5).unwrap();
        assert_eq!(hs.len(), 2);
        assert_eq!(hs[0].as_ref().unwrap().bins(), 5);
        assert!(hs[1].is_none());
    }

    #[test]
    fn test_peak_label() {
        let scores = vec![
            LabeledScore::new(0, 0.1).unwrap(),
            LabeledScore::new(0, 0.15).unwrap(),
            LabeledScore::new(0, 0.9).unwrap(),
        ];
        let h = class_histogram(&scores, 5).unwrap();
        assert_eq!(peak_label(&h, &h.original), "0.00-0.20");
        assert_eq!(peak_label(&h, &h.rewritten), "-");
    }

    #[test]
    fn test_run_without_any_results_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ExperimentConfig {
            detectors: vec![DetectorPanel::new(tmp.path().join("none.csv"), "None", 0, 0)],
            ..Default::default()
        };
        let opts = ChartOptions {
            output_path: None,
            no_tui: true,
        };
        assert!(run(&config, None, opts).is_err());
    }

    #[test]
    fn test_run_writes_json() {
        let tmp = tempfile::tempdir().unwrap();
        let results = tmp.path().join("r.csv");
        std::fs::write(&results, "h,h,h,h,h\na,b,c,0,0.1\na,b,c,1,0.95\n").unwrap();
        let config = ExperimentConfig {
            detectors: vec![DetectorPanel::new(&results, "R", 0, 0)],
            ..Default::default()
        };
        let json = tmp.path().join("hist.json");
        let opts = ChartOptions {
            output_path: json.to_str(),
            no_tui: true,
        };
        run(&config, Some(2), opts).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(value[0]["detector"], "R");
        assert_eq!(value[0]["histogram"]["original"][0], 1);
        assert_eq!(value[0]["histogram"]["rewritten"][1], 1);
    }
}
