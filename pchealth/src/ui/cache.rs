//! Cache panel: info view with locations, cleaning view, result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::render::{ElementId, Screen};
use crate::ui::table::draw_rows;
use crate::ui::theme::{tone_color, tone_style, MUTED, TRACK};
use crate::ui::util::{inner, truncate_middle};

pub fn draw_cache(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    if screen.is_visible(ElementId::CleaningView) {
        draw_cleaning(f, area);
    } else if screen.is_visible(ElementId::CleanupResultView) {
        draw_result(f, area, screen);
    } else if screen.is_visible(ElementId::CacheInfoView) {
        draw_info(f, area, screen);
    }
}

fn draw_info(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let button = screen.slot(ElementId::CleanButton);
    let button_span = Span::styled(
        button.map(|b| b.text.clone()).unwrap_or_default(),
        tone_style(button.and_then(|b| b.tone)).add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![Span::raw("Cache & Temp Files  "), button_span]));
    f.render_widget(block, parts[0]);

    let body = inner(parts[0]);
    if body.height >= 3 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
            .split(body);
        let summary = Line::from(vec![
            Span::styled("Total: ", Style::default().fg(MUTED)),
            Span::raw(screen.text(ElementId::CacheTotalSize).to_string()),
            Span::styled("   Files: ", Style::default().fg(MUTED)),
            Span::raw(screen.text(ElementId::CacheFileCount).to_string()),
            Span::styled("   Last scan: ", Style::default().fg(MUTED)),
            Span::raw(screen.text(ElementId::CacheLastScan).to_string()),
        ]);
        f.render_widget(Paragraph::new(summary), rows[0]);
        f.render_widget(
            Paragraph::new(Span::styled(
                "Share of a 10 GiB cache budget",
                Style::default().fg(MUTED),
            )),
            rows[1],
        );
        if let Some(bar) = screen.slot(ElementId::CachePressure).and_then(|s| s.bar.as_ref()) {
            let ratio = (bar.percent / 100.0).clamp(0.0, 1.0);
            let g = Gauge::default()
                .gauge_style(Style::default().fg(tone_color(bar.tone)).bg(TRACK))
                .ratio(ratio)
                .label(bar.label.clone());
            f.render_widget(g, Rect { height: 1, ..rows[2] });
        }
    }

    let width = parts[1].width.saturating_sub(30) as usize;
    let rows: Vec<_> = screen
        .rows(ElementId::CacheLocations)
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if let Some(first) = r.first_mut() {
                first.text = truncate_middle(&first.text, width);
            }
            r
        })
        .collect();
    draw_rows(
        f,
        parts[1],
        "Cache Locations".into(),
        &["Path", "Files", "Size"],
        &[Constraint::Min(10), Constraint::Length(10), Constraint::Length(12)],
        &rows,
        0,
    );
}

fn draw_cleaning(f: &mut ratatui::Frame<'_>, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from("Cleaning cache files..."),
        Line::from(Span::styled(
            "This may take a moment",
            Style::default().fg(MUTED),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Cache & Temp Files"));
    f.render_widget(p, area);
}

fn draw_result(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let mut lines: Vec<Line<'_>> = vec![Line::from(Span::styled(
        "Cleanup complete",
        tone_style(Some(crate::render::Tone::Success)).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        screen
            .text(ElementId::CleanupResultMessage)
            .lines()
            .map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[b] back to cache info",
        Style::default().fg(MUTED),
    )));
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Cache & Temp Files"));
    f.render_widget(p, area);
}
