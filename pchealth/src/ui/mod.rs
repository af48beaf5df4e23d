//! UI module root: drawing functions for individual panels. Everything reads from `Screen`.

pub mod cache;
pub mod chart;
pub mod cpu;
pub mod disks;
pub mod header;
pub mod logs;
pub mod mem;
pub mod net;
pub mod processes;
pub mod table;
pub mod theme;
pub mod toast;
pub mod util;

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::render::Panel;

/// Function key that toggles each panel, in `Panel::ALL` order starting at F2.
pub fn panel_key(panel: Panel) -> u8 {
    Panel::ALL.iter().position(|p| *p == panel).unwrap_or(0) as u8 + 2
}

pub fn draw_hidden(f: &mut ratatui::Frame<'_>, area: Rect, panel: Panel) {
    let p = Paragraph::new(format!("{panel:?} hidden (F{} to show)", panel_key(panel)))
        .style(Style::default().fg(theme::MUTED))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}
