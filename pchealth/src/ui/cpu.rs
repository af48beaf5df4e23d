//! CPU card and per-core bars.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Row, Table},
};

use crate::render::{ElementId, Screen};
use crate::ui::mem::draw_usage;
use crate::ui::theme::tone_style;
use crate::ui::util::bar_text;

pub fn draw_cpu_card(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let lines = vec![
        Line::from(format!("Cores: {}", screen.text(ElementId::CpuCoreCount))),
        Line::from(format!("Frequency: {}", screen.text(ElementId::CpuFrequency))),
    ];
    draw_usage(f, area, screen, "CPU", ElementId::CpuGauge, ElementId::CpuUsage, lines);
}

pub fn draw_per_core_bars(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let bar_w = area.width.saturating_sub(20).max(4) as usize;
    let rows = screen.rows(ElementId::CpuCores).iter().map(|cells| {
        let name = cells.first().map(|c| c.text.clone()).unwrap_or_default();
        let (bar, label, style) = match cells.get(1).and_then(|c| c.bar.as_ref()) {
            Some(b) => (bar_text(b.percent, bar_w), b.label.clone(), tone_style(Some(b.tone))),
            None => (String::new(), String::new(), Style::default()),
        };
        Row::new(vec![
            ratatui::widgets::Cell::from(name),
            ratatui::widgets::Cell::from(bar).style(style),
            ratatui::widgets::Cell::from(label).style(style),
        ])
    });
    let title = format!(
        "Per-core ({} cores @ {})",
        screen.text(ElementId::CpuCoreCount),
        screen.text(ElementId::CpuFrequency)
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(4),
            Constraint::Length(7),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}
