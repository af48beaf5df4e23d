//! Usage cards: gauge plus used/free/total lines (memory and disk).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::render::{ElementId, Screen};
use crate::ui::theme::{severity_color, TRACK};
use crate::ui::util::inner;

pub fn draw_memory_card(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let lines = [ElementId::MemoryUsed, ElementId::MemoryFree, ElementId::MemoryTotal]
        .map(|id| Line::from(screen.text(id).to_string()));
    draw_usage(
        f,
        area,
        screen,
        "Memory",
        ElementId::MemoryGauge,
        ElementId::MemoryUsage,
        lines.to_vec(),
    );
}

pub fn draw_disk_card(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let lines = [ElementId::DiskUsed, ElementId::DiskFree, ElementId::DiskTotal]
        .map(|id| Line::from(screen.text(id).to_string()));
    draw_usage(
        f,
        area,
        screen,
        "Disk",
        ElementId::DiskGauge,
        ElementId::DiskUsage,
        lines.to_vec(),
    );
}

/// Gauge on the first line, `lines` under it; the title carries the usage text.
pub fn draw_usage(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    title: &str,
    gauge: ElementId,
    usage: ElementId,
    lines: Vec<Line<'static>>,
) {
    let headline = match screen.text(usage) {
        "" => title.to_string(),
        pct => format!("{title} ({pct})"),
    };
    f.render_widget(Block::default().borders(Borders::ALL).title(headline), area);
    let body = inner(area);
    if body.height == 0 {
        return;
    }
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    draw_gauge(f, parts[0], screen, gauge);
    f.render_widget(Paragraph::new(lines), parts[1]);
}

pub fn draw_gauge(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen, id: ElementId) {
    let Some(frame) = screen.slot(id).and_then(|s| s.gauge.as_ref()) else {
        return;
    };
    // Display only: the widget itself accepts any value.
    let ratio = if frame.filled.is_finite() {
        (frame.filled / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let g = Gauge::default()
        .gauge_style(Style::default().fg(severity_color(frame.fill)).bg(TRACK))
        .ratio(ratio)
        .label(format!("{:.1}%", frame.filled));
    f.render_widget(g, area);
}
