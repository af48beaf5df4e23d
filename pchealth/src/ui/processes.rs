//! Process table; CPU or memory cells above 50% are highlighted by the dispatcher.

use ratatui::layout::{Constraint, Rect};

use crate::render::{ElementId, Screen};
use crate::ui::table::draw_rows;

// Keep the header widths here so drawing and paging match.
const COLS: [Constraint; 6] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(28), // Name
    Constraint::Length(14),     // User
    Constraint::Length(8),      // CPU %
    Constraint::Length(8),      // Mem %
    Constraint::Min(19),        // Started
];

pub fn draw_processes(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen, scroll: usize) {
    let rows = screen.rows(ElementId::ProcessTable);
    draw_rows(
        f,
        area,
        format!("Top Processes ({})", rows.len()),
        &["PID", "Name", "User", "CPU %", "Mem %", "Started"],
        &COLS,
        rows,
        scroll,
    );
}
