//! Generic table drawing for row elements, with keyboard scrolling.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table},
};

use crate::render::{Cell, TableRow};
use crate::ui::theme::{header_style, tone_style};
use crate::ui::util::bar_text;

const BAR_CELLS: usize = 10;

fn to_cell(c: &Cell) -> ratatui::widgets::Cell<'static> {
    match &c.bar {
        Some(b) => ratatui::widgets::Cell::from(format!(
            "{} {}",
            bar_text(b.percent, BAR_CELLS),
            b.label
        ))
        .style(tone_style(Some(b.tone))),
        None => ratatui::widgets::Cell::from(c.text.clone()).style(tone_style(c.tone)),
    }
}

pub fn draw_rows(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: String,
    header: &[&'static str],
    widths: &[Constraint],
    rows: &[TableRow],
    scroll: usize,
) {
    let viewport = area.height.saturating_sub(3) as usize; // borders (2) + header (1)
    let offset = scroll.min(rows.len().saturating_sub(viewport));
    let body = rows
        .iter()
        .skip(offset)
        .take(viewport)
        .map(|r| Row::new(r.iter().map(to_cell).collect::<Vec<_>>()));
    let table = Table::new(body, widths.to_vec())
        .header(Row::new(header.to_vec()).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

/// Up/Down/PageUp/PageDown/Home/End scrolling; clamped when drawn.
pub fn scroll_handle_key(offset: &mut usize, key: KeyEvent, page: usize) {
    match key.code {
        KeyCode::Up => *offset = offset.saturating_sub(1),
        KeyCode::Down => *offset = offset.saturating_add(1),
        KeyCode::PageUp => *offset = offset.saturating_sub(page.max(1)),
        KeyCode::PageDown => *offset = offset.saturating_add(page.max(1)),
        KeyCode::Home => *offset = 0,
        KeyCode::End => *offset = usize::MAX / 2,
        _ => {}
    }
}
