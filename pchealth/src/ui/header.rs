//! Top header: connection state, uptime and tab bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};

use crate::render::{ElementId, Screen};
use crate::ui::theme::{HEADER, MUTED};

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    status: &str,
    tabs: &[&str],
    selected: usize,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(40)])
        .split(area);

    let uptime = match screen.text(ElementId::Uptime) {
        "" => "--:--:--".to_string(),
        u => u.to_string(),
    };
    let left = Line::from(vec![
        Span::styled("pchealth", Style::default().fg(HEADER).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | {status} | uptime {uptime} ")),
        Span::styled("(q quit, 1-3 tabs, c clean, F2-F8 panels)", Style::default().fg(MUTED)),
    ]);
    f.render_widget(Paragraph::new(left), cols[0]);

    let t = Tabs::new(tabs.to_vec())
        .select(selected)
        .highlight_style(Style::default().fg(HEADER).add_modifier(Modifier::BOLD));
    f.render_widget(t, cols[1]);
}
