//! Small UI helpers: text bars, truncation, inner rects.

use ratatui::layout::Rect;

/// `███░░░` bar of `width` cells for a 0..100 value; out-of-range values are clamped.
pub fn bar_text(percent: f64, width: usize) -> String {
    let p = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((p / 100.0) * width as f64).round() as usize;
    let mut s = String::with_capacity(width * 3);
    s.extend(std::iter::repeat('█').take(filled));
    s.extend(std::iter::repeat('░').take(width.saturating_sub(filled)));
    s
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left: String = s.chars().take(keep / 2).collect();
    let right: String = s.chars().skip(n - (keep - keep / 2)).collect();
    format!("{left}...{right}")
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_clamps() {
        assert_eq!(bar_text(50.0, 4), "██░░");
        assert_eq!(bar_text(150.0, 3), "███");
        assert_eq!(bar_text(-5.0, 2), "░░");
        assert_eq!(bar_text(f64::NAN, 2), "░░");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_middle("C:\\Users\\Temp", 20), "C:\\Users\\Temp");
        assert_eq!(truncate_middle("/var/cache/apt/archives", 11), "/var...ives");
        assert_eq!(truncate_middle("äöüäöüäöü", 7), "äö...öü");
    }
}
