//! Network throughput chart.

use ratatui::layout::Rect;

use crate::render::{ElementId, Screen};
use crate::ui::chart::draw_trend;
use crate::ui::theme::{DOWNLOAD, UPLOAD};

pub fn draw_net(f: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let title = format!(
        "Network (up {} | down {})",
        screen.text(ElementId::NetworkUpload),
        screen.text(ElementId::NetworkDownload)
    );
    draw_trend(f, area, screen, ElementId::NetworkChart, &title, &[UPLOAD, DOWNLOAD]);
}
