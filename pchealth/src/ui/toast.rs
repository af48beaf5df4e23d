//! Notification popup in the bottom-right corner.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::render::{ElementId, Screen};
use crate::ui::theme::tone_color;

pub fn draw_toast(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    if !screen.is_visible(ElementId::Toast) {
        return;
    }
    let w = area.width.min(48);
    let h = area.height.min(5);
    let rect = Rect {
        x: area.x + area.width - w,
        y: area.y + area.height - h,
        width: w,
        height: h,
    };
    let color = screen
        .slot(ElementId::Toast)
        .and_then(|s| s.tone)
        .map(tone_color)
        .unwrap_or(Color::Reset);
    let p = Paragraph::new(Line::from(screen.text(ElementId::ToastMessage).to_string()))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(screen.text(ElementId::ToastTitle).to_string())
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
