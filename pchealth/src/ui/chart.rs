//! Line chart for any trend chart element.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::render::{ElementId, Screen};
use crate::ui::theme::MUTED;

pub fn draw_trend(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    id: ElementId,
    title: &str,
    colors: &[Color],
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let Some(frame) = screen.slot(id).and_then(|s| s.chart.as_ref()) else {
        f.render_widget(
            Paragraph::new(Span::styled("waiting for data...", Style::default().fg(MUTED)))
                .block(block),
            area,
        );
        return;
    };

    let points: Vec<Vec<(f64, f64)>> = frame
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, if v.is_finite() { v } else { 0.0 }))
                .collect()
        })
        .collect();
    let datasets: Vec<Dataset<'_>> = frame
        .series
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (s, data))| {
            Dataset::default()
                .name(s.name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.get(i).copied().unwrap_or(Color::White)))
                .data(data)
        })
        .collect();

    let n = frame.labels.len();
    let x_max = n.saturating_sub(1).max(1) as f64;
    let x_labels: Vec<String> = match n {
        0 => vec![],
        1 => vec![frame.labels[0].clone()],
        _ => vec![
            frame.labels[0].clone(),
            frame.labels[n / 2].clone(),
            frame.labels[n - 1].clone(),
        ],
    };
    let y_max = frame.y_max.unwrap_or_else(|| {
        let peak = points
            .iter()
            .flatten()
            .map(|&(_, y)| y)
            .fold(0.0_f64, f64::max);
        (peak * 1.1).max(1.0)
    });

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format!("{y_max:.0}")]),
        );
    f.render_widget(chart, area);
}
