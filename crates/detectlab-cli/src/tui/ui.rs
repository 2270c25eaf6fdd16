//! Chart viewer rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  detectlab  True/False Positive Rate          │
//! ├──────────────────────┬───────────────────────┤
//! │  GPTZero             │  Scispace             │
//! │  ⠉⠑⠢⣀ TPR            │  ⠉⠉⠑⠒⠤⣀ TPR            │
//! │      ⠈⠑⠤⣀ FPR        │       ⠑⠢⣀ FPR          │
//! ├──────────────────────┼───────────────────────┤
//! │  Isgen               │  Writefull            │
//! │  ...                 │  ...                  │
//! ├──────────────────────┴───────────────────────┤
//! │  tab: focus panel   esc: back   q: quit       │
//! └──────────────────────────────────────────────┘

use super::app::{App, Panel, PanelContent};
use detectlab_core::{ClassHistogram, DetectorPanel};
use ratatui::{prelude::*, widgets::*};

pub const ORIGINAL_COLOUR: Color = Color::Rgb(0xb0, 0xb0, 0xc8);
pub const REWRITTEN_COLOUR: Color = Color::Rgb(0x1d, 0x75, 0xcd);
pub const TPR_COLOUR: Color = Color::Rgb(0x1d, 0x75, 0xfd);
pub const FPR_COLOUR: Color = Color::Rgb(0xff, 0x22, 0x22);

/// Panel accent from the configured colour, or `fallback`.
pub fn accent_for(detector: &DetectorPanel, fallback: Color) -> Color {
    detector
        .rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // charts
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    match app.focused() {
        Some(panel) => draw_panel(f, rows[1], panel),
        None => draw_grid(f, rows[1], app),
    }
    draw_keys(f, rows[2]);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" detectlab ", Style::default().bold().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(app.title(), Style::default().bold().fg(Color::Yellow)),
            Span::styled(
                format!("  {} panel(s) ", app.panels().len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    f.render_widget(block, area);
}

fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let (n_rows, n_cols) = app.grid();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, n_rows as u32); n_rows])
        .split(area);

    for (r, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, n_cols as u32); n_cols])
            .split(*row_area);
        for (c, cell) in cells.iter().enumerate() {
            match app.panels().iter().find(|p| p.row == r && p.col == c) {
                Some(panel) => draw_panel(f, *cell, panel),
                None => f.render_widget(Block::default().borders(Borders::ALL), *cell),
            }
        }
    }
}

fn draw_panel(f: &mut Frame, area: Rect, panel: &Panel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(panel.accent))
        .title(Span::styled(
            format!(" {} ", panel.title),
            Style::default().bold().fg(panel.accent),
        ));

    match &panel.content {
        PanelContent::Lines {
            series,
            x_title,
            y_title,
        } => {
            let datasets: Vec<Dataset> = series
                .iter()
                .map(|s| {
                    Dataset::default()
                        .name(s.name.clone())
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(s.colour))
                        .data(&s.points)
                })
                .collect();
            let chart = Chart::new(datasets)
                .block(block)
                .x_axis(unit_axis(x_title))
                .y_axis(unit_axis(y_title));
            f.render_widget(chart, area);
        }
        PanelContent::Histogram(hist) => draw_histogram(f, area, block, hist),
        PanelContent::Empty(message) => {
            let p = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(p, area);
        }
    }
}

fn unit_axis(title: &'static str) -> Axis<'static> {
    Axis::default()
        .title(title)
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, 1.0])
        .labels(vec![Line::from("0.0"), Line::from("0.5"), Line::from("1.0")])
}

fn draw_histogram(f: &mut Frame, area: Rect, block: Block, hist: &ClassHistogram) {
    let block = block.title_bottom(Line::from(vec![
        Span::styled(" ■ original ", Style::default().fg(ORIGINAL_COLOUR)),
        Span::styled("■ rewritten ", Style::default().fg(REWRITTEN_COLOUR)),
    ]));

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width(area.width, hist.bins()))
        .bar_gap(0)
        .group_gap(1)
        .max(hist.max_count().max(1));

    for bin in 0..hist.bins() {
        let label = format!("{:.1}-{:.1}", hist.edges[bin], hist.edges[bin + 1]);
        let bars = [
            Bar::default()
                .value(hist.original[bin])
                .style(Style::default().fg(ORIGINAL_COLOUR)),
            Bar::default()
                .value(hist.rewritten[bin])
                .style(Style::default().fg(REWRITTEN_COLOUR)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }

    f.render_widget(chart, area);
}

/// Widest bar that still fits two bars per bin plus gaps inside `width`.
fn bar_width(width: u16, bins: usize) -> u16 {
    let bins = bins.max(1);
    let usable = (width as usize).saturating_sub(bins.saturating_add(2));
    (usable / bins.saturating_mul(2)).clamp(1, 9) as u16
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(" tab/→: focus next   shift-tab/←: focus prev   esc: back   q: quit")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
