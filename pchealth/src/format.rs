//! Pure formatting helpers: byte sizes, severity classes, uptime.

use crate::types::Uptime;

/// Largest unit whose two-decimal rendering stays below 1024; GB is the top unit.
pub fn format_byte_size(b: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if b < 1024 {
        return format!("{b} B");
    }
    let mut value = b as f64 / 1024.0;
    let mut unit = 0;
    // compare the rounded value so 1048575 B is "1.00 MB", not "1024.00 KB"
    while unit + 1 < UNITS.len() && (value * 100.0).round() >= 102_400.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Ties go to the higher severity.
pub fn severity_class(value: f64, warn: f64, crit: f64) -> Severity {
    if value >= crit {
        Severity::Critical
    } else if value >= warn {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

pub fn format_uptime(u: &Uptime) -> String {
    let clock = format!("{:02}:{:02}:{:02}", u.hours, u.minutes, u.seconds);
    if u.days > 0 {
        format!("{}d {clock}", u.days)
    } else {
        clock
    }
}
