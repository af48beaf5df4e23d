//! Render target: the named-element surface the dispatcher and cleanup controller write to,
//! plus `Screen`, the in-memory implementation the terminal UI draws from.

use std::collections::HashMap;

use thiserror::Error;

use crate::format::Severity;

/// Every element the dashboard knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    CpuGauge,
    CpuUsage,
    CpuCoreCount,
    CpuFrequency,
    CpuCores,
    CpuChart,
    MemoryGauge,
    MemoryUsage,
    MemoryUsed,
    MemoryFree,
    MemoryTotal,
    MemoryChart,
    DiskGauge,
    DiskUsage,
    DiskUsed,
    DiskFree,
    DiskTotal,
    DiskTable,
    NetworkUpload,
    NetworkDownload,
    NetworkChart,
    ProcessTable,
    LogTable,
    Uptime,
    CacheTotalSize,
    CacheFileCount,
    CacheLastScan,
    CachePressure,
    CacheLocations,
    CacheInfoView,
    CleaningView,
    CleanupResultView,
    CleanupResultMessage,
    CleanButton,
    Toast,
    ToastTitle,
    ToastMessage,
}

/// Dashboard panels; hiding a panel removes its elements from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Cpu,
    Memory,
    Disk,
    Network,
    Processes,
    Logs,
    Cache,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Cpu,
        Panel::Memory,
        Panel::Disk,
        Panel::Network,
        Panel::Processes,
        Panel::Logs,
        Panel::Cache,
    ];

    pub fn parse(s: &str) -> Option<Panel> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Some(Panel::Cpu),
            "memory" | "mem" => Some(Panel::Memory),
            "disk" | "disks" => Some(Panel::Disk),
            "network" | "net" => Some(Panel::Network),
            "processes" | "procs" => Some(Panel::Processes),
            "logs" => Some(Panel::Logs),
            "cache" => Some(Panel::Cache),
            _ => None,
        }
    }

    pub fn elements(self) -> &'static [ElementId] {
        use ElementId::*;
        match self {
            Panel::Cpu => &[CpuGauge, CpuUsage, CpuCoreCount, CpuFrequency, CpuCores, CpuChart],
            Panel::Memory => &[
                MemoryGauge,
                MemoryUsage,
                MemoryUsed,
                MemoryFree,
                MemoryTotal,
                MemoryChart,
            ],
            Panel::Disk => &[DiskGauge, DiskUsage, DiskUsed, DiskFree, DiskTotal, DiskTable],
            Panel::Network => &[NetworkUpload, NetworkDownload, NetworkChart],
            Panel::Processes => &[ProcessTable],
            Panel::Logs => &[LogTable],
            Panel::Cache => &[
                CacheTotalSize,
                CacheFileCount,
                CacheLastScan,
                CachePressure,
                CacheLocations,
                CacheInfoView,
                CleaningView,
                CleanupResultView,
                CleanupResultMessage,
                CleanButton,
            ],
        }
    }
}

// Elements that belong to no panel and are always present.
const ALWAYS: [ElementId; 4] = [
    ElementId::Uptime,
    ElementId::Toast,
    ElementId::ToastTitle,
    ElementId::ToastMessage,
];

/// Display class for text, cells and bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Muted,
}

impl From<Severity> for Tone {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Normal => Tone::Success,
            Severity::Warning => Tone::Warning,
            Severity::Critical => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub percent: f64,
    pub tone: Tone,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: Option<Tone>,
    pub bar: Option<Bar>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn toned(text: impl Into<String>, tone: Option<Tone>) -> Self {
        Self {
            text: text.into(),
            tone,
            bar: None,
        }
    }

    pub fn bar(bar: Bar) -> Self {
        Self {
            text: bar.label.clone(),
            tone: Some(bar.tone),
            bar: Some(bar),
        }
    }
}

pub type TableRow = Vec<Cell>;

/// Filled arc plus remainder, as last drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeFrame {
    pub filled: f64,
    pub remainder: f64,
    pub fill: Severity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    /// Fixed y-axis ceiling; `None` scales to the data.
    pub y_max: Option<f64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("element {0:?} is no longer attached")]
    Detached(ElementId),
    #[error("drawing {0:?} failed: {1}")]
    Draw(ElementId, String),
}

/// Writes to an element that does not exist are silent no-ops.
pub trait RenderTarget {
    fn contains(&self, id: ElementId) -> bool;
    fn set_text(&mut self, id: ElementId, text: &str);
    fn set_tone(&mut self, id: ElementId, tone: Option<Tone>);
    fn set_bar(&mut self, id: ElementId, bar: Bar);
    fn replace_rows(&mut self, id: ElementId, rows: Vec<TableRow>);
    fn set_visible(&mut self, id: ElementId, visible: bool);
    fn draw_gauge(&mut self, id: ElementId, frame: &GaugeFrame) -> Result<(), RenderError>;
    fn draw_chart(&mut self, id: ElementId, frame: &ChartFrame) -> Result<(), RenderError>;
}

// Only the info view of the cache panel starts visible.
const STARTS_HIDDEN: [ElementId; 3] = [
    ElementId::CleaningView,
    ElementId::CleanupResultView,
    ElementId::Toast,
];

fn fresh_slot(id: ElementId) -> Slot {
    Slot {
        hidden: STARTS_HIDDEN.contains(&id),
        ..Slot::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Slot {
    pub text: String,
    pub tone: Option<Tone>,
    pub bar: Option<Bar>,
    pub rows: Vec<TableRow>,
    pub gauge: Option<GaugeFrame>,
    pub chart: Option<ChartFrame>,
    pub hidden: bool,
}

/// Element store behind the terminal UI.
#[derive(Debug, Clone)]
pub struct Screen {
    slots: HashMap<ElementId, Slot>,
}

impl Screen {
    /// All panels except the hidden ones.
    pub fn new(hidden: &[Panel]) -> Self {
        let mut screen = Self {
            slots: HashMap::new(),
        };
        for id in ALWAYS {
            screen.slots.insert(id, fresh_slot(id));
        }
        for panel in Panel::ALL.into_iter().filter(|p| !hidden.contains(p)) {
            screen.attach(panel);
        }
        screen
    }

    pub fn attach(&mut self, panel: Panel) {
        for id in panel.elements() {
            self.slots.entry(*id).or_insert_with(|| fresh_slot(*id));
        }
    }

    pub fn detach(&mut self, panel: Panel) {
        for id in panel.elements() {
            self.slots.remove(id);
        }
    }

    pub fn is_attached(&self, panel: Panel) -> bool {
        panel.elements().iter().all(|id| self.slots.contains_key(id))
    }

    pub fn slot(&self, id: ElementId) -> Option<&Slot> {
        self.slots.get(&id)
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.slots.get(&id).map(|s| s.text.as_str()).unwrap_or("")
    }

    pub fn rows(&self, id: ElementId) -> &[TableRow] {
        self.slots.get(&id).map(|s| s.rows.as_slice()).unwrap_or(&[])
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.slots.get(&id).map(|s| !s.hidden).unwrap_or(false)
    }
}

impl RenderTarget for Screen {
    fn contains(&self, id: ElementId) -> bool {
        self.slots.contains_key(&id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.text.clear();
            slot.text.push_str(text);
        }
    }

    fn set_tone(&mut self, id: ElementId, tone: Option<Tone>) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.tone = tone;
        }
    }

    fn set_bar(&mut self, id: ElementId, bar: Bar) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.bar = Some(bar);
        }
    }

    fn replace_rows(&mut self, id: ElementId, rows: Vec<TableRow>) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.rows = rows;
        }
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.hidden = !visible;
        }
    }

    fn draw_gauge(&mut self, id: ElementId, frame: &GaugeFrame) -> Result<(), RenderError> {
        let slot = self.slots.get_mut(&id).ok_or(RenderError::Detached(id))?;
        slot.gauge = Some(frame.clone());
        Ok(())
    }

    fn draw_chart(&mut self, id: ElementId, frame: &ChartFrame) -> Result<(), RenderError> {
        let slot = self.slots.get_mut(&id).ok_or(RenderError::Detached(id))?;
        if frame.labels.len() != frame.series.first().map_or(0, |s| s.points.len()) {
            return Err(RenderError::Draw(id, "label axis and series differ in length".into()));
        }
        slot.chart = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_panel_elements_are_absent_and_writes_are_ignored() {
        let mut s = Screen::new(&[Panel::Processes]);
        assert!(!s.contains(ElementId::ProcessTable));
        s.replace_rows(ElementId::ProcessTable, vec![vec![Cell::text("x")]]);
        assert!(s.rows(ElementId::ProcessTable).is_empty());
        assert!(s.contains(ElementId::CpuGauge));
        assert!(s.contains(ElementId::Uptime));
    }

    #[test]
    fn cache_panel_starts_on_info_view() {
        let s = Screen::new(&[]);
        assert!(s.is_visible(ElementId::CacheInfoView));
        assert!(!s.is_visible(ElementId::CleaningView));
        assert!(!s.is_visible(ElementId::CleanupResultView));
        assert!(!s.is_visible(ElementId::Toast));
    }

    #[test]
    fn drawing_into_a_detached_element_reports_it() {
        let mut s = Screen::new(&[]);
        s.detach(Panel::Network);
        let frame = ChartFrame {
            labels: vec![],
            series: vec![],
            y_max: None,
        };
        assert_eq!(
            s.draw_chart(ElementId::NetworkChart, &frame),
            Err(RenderError::Detached(ElementId::NetworkChart))
        );
        s.attach(Panel::Network);
        assert!(s.draw_chart(ElementId::NetworkChart, &frame).is_ok());
    }

    #[test]
    fn panel_names_parse_loosely() {
        assert_eq!(Panel::parse(" Net "), Some(Panel::Network));
        assert_eq!(Panel::parse("procs"), Some(Panel::Processes));
        assert_eq!(Panel::parse("gpu"), None);
    }
}
