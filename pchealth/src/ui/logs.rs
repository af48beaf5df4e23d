//! System log table, newest first.

use ratatui::layout::{Constraint, Rect};

use crate::render::{ElementId, Screen};
use crate::ui::table::draw_rows;

const COLS: [Constraint; 4] = [
    Constraint::Length(20), // Time
    Constraint::Length(10), // Source
    Constraint::Length(12), // Level
    Constraint::Min(20),    // Message
];

pub fn draw_logs(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen, scroll: usize) {
    draw_rows(
        f,
        area,
        "System Logs".into(),
        &["Time", "Source", "Level", "Message"],
        &COLS,
        screen.rows(ElementId::LogTable),
        scroll,
    );
}
