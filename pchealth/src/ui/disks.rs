//! Volume table.

use ratatui::layout::{Constraint, Rect};

use crate::render::{ElementId, Screen};
use crate::ui::table::draw_rows;

const COLS: [Constraint; 6] = [
    Constraint::Percentage(22), // Device
    Constraint::Length(8),      // FS
    Constraint::Length(11),     // Total
    Constraint::Length(11),     // Used
    Constraint::Length(11),     // Free
    Constraint::Min(18),        // Usage
];

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    draw_rows(
        f,
        area,
        "Volumes".into(),
        &["Device", "FS", "Total", "Used", "Free", "Usage"],
        &COLS,
        screen.rows(ElementId::DiskTable),
        0,
    );
}
