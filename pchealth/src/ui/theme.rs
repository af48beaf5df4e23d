//! Shared UI theme constants.

use ratatui::style::{Color, Modifier, Style};

use crate::format::Severity;
use crate::render::Tone;

// Gauge track (the unfilled remainder)
pub const TRACK: Color = Color::Rgb(60, 60, 66);
pub const HEADER: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

// Upload / download lines
pub const UPLOAD: Color = Color::Rgb(75, 192, 192);
pub const DOWNLOAD: Color = Color::Rgb(54, 162, 235);
pub const CPU_LINE: Color = Color::Rgb(75, 192, 192);
pub const MEM_LINE: Color = Color::Rgb(153, 102, 255);

pub fn severity_color(s: Severity) -> Color {
    match s {
        Severity::Normal => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn tone_color(t: Tone) -> Color {
    match t {
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
        Tone::Info => Color::Cyan,
        Tone::Muted => MUTED,
    }
}

pub fn tone_style(t: Option<Tone>) -> Style {
    match t {
        Some(t) => Style::default().fg(tone_color(t)),
        None => Style::default(),
    }
}

pub fn header_style() -> Style {
    Style::default().fg(HEADER).add_modifier(Modifier::BOLD)
}
