use detectlab_core::{
    ExperimentConfig, RateCurve, RateKind, Result, confusion_at, false_positive_rate, rate_curve,
    true_positive_rate,
};
use ratatui::style::Color;
use serde::Serialize;

use super::{ChartOptions, empty_panel, fmt_rate, load_detectors, require_any, show, write_json};
use crate::tui::app::{App, Panel, PanelContent, Series};
use crate::tui::ui::{FPR_COLOUR, TPR_COLOUR, accent_for};

/// Threshold reported in the summary table.
const SUMMARY_THRESHOLD: f64 = 0.5;

#[derive(Serialize)]
struct RatesReport<'a> {
    detector: &'a str,
    tpr: &'a RateCurve,
    fpr: &'a RateCurve,
}

struct DetectorCurves {
    tpr: RateCurve,
    fpr: RateCurve,
}

pub fn run(
    config: &ExperimentConfig,
    resolution: Option<usize>,
    opts: ChartOptions<'_>,
) -> Result<()> {
    let resolution = resolution.unwrap_or(config.curve_resolution);
    let detectors = load_detectors(config);
    require_any(&detectors)?;

    let curves: Vec<Option<DetectorCurves>> = detectors
        .iter()
        .map(|d| {
            d.scores.as_ref().ok().map(|s| DetectorCurves {
                tpr: rate_curve(s, RateKind::Tpr, resolution),
                fpr: rate_curve(s, RateKind::Fpr, resolution),
            })
        })
        .collect();

    println!("True/False positive rate ({resolution} thresholds)");
    println!("{}", "-".repeat(60));
    println!(
        "  {:<20} {:>10} {:>10} {:>14}",
        "Detector", "TPR@0.5", "FPR@0.5", "Undefined pts"
    );
    for (d, c) in detectors.iter().zip(&curves) {
        match (&d.scores, c) {
            (Ok(scores), Some(c)) => {
                let counts = confusion_at(scores, SUMMARY_THRESHOLD);
                println!(
                    "  {:<20} {:>10} {:>10} {:>14}",
                    d.panel.name,
                    fmt_rate(true_positive_rate(&counts)),
                    fmt_rate(false_positive_rate(&counts)),
                    c.tpr.holes() + c.fpr.holes(),
                );
            }
            _ => println!("  {:<20} {:>10}", d.panel.name, "no data"),
        }
    }

    if let Some(path) = opts.output_path {
        let report: Vec<RatesReport<'_>> = detectors
            .iter()
            .zip(&curves)
            .filter_map(|(d, c)| {
                c.as_ref().map(|c| RatesReport {
                    detector: &d.panel.name,
                    tpr: &c.tpr,
                    fpr: &c.fpr,
                })
            })
            .collect();
        write_json(path, &report)?;
    }

    let panels: Vec<Panel> = detectors
        .iter()
        .zip(curves)
        .map(|(d, c)| {
            let accent = accent_for(&d.panel, Color::Cyan);
            match (c, &d.scores) {
                (Some(c), _) => Panel {
                    title: d.panel.name.clone(),
                    row: d.panel.row,
                    col: d.panel.col,
                    accent,
                    content: PanelContent::Lines {
                        series: vec![series(&c.tpr, TPR_COLOUR), series(&c.fpr, FPR_COLOUR)],
                        x_title: "Threshold",
                        y_title: "Rate",
                    },
                },
                (None, Err(msg)) => empty_panel(&d.panel, accent, msg.clone()),
                (None, Ok(_)) => empty_panel(&d.panel, accent, "no scores".into()),
            }
        })
        .collect();
    show(
        opts,
        App::new(
            "True/False Positive Rate",
            config.grid_rows,
            config.grid_cols,
            panels,
        ),
    )
}

/// Chart series for a rate curve. Undefined thresholds are dropped.
fn series(curve: &RateCurve, colour: Color) -> Series {
    let name = match curve.kind {
        RateKind::Tpr => "TPR",
        RateKind::Fpr => "FPR",
    };
    Series {
        name: name.to_string(),
        colour,
        points: curve.defined_points(),
    }
}
