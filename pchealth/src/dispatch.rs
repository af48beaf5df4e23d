//! Snapshot dispatcher: applies one `system_metrics` push to every widget and table.

use chrono::{DateTime, Local};

use crate::format::{format_byte_size, format_uptime, severity_class};
use crate::net_rate::NetRateTracker;
use crate::render::{Bar, Cell, ElementId, RenderTarget, TableRow, Tone};
use crate::types::{CacheInfo, Cpu, Historical, LogEntry, ProcessInfo, Snapshot, Usage, Volume};
use crate::widgets::{Gauge, TrendChart};

pub const NETWORK_WINDOW: usize = 30;
// Per-core and per-volume bars.
const BAR_WARN: f64 = 75.0;
const BAR_CRIT: f64 = 90.0;
const CACHE_WARN: f64 = 60.0;
const CACHE_CRIT: f64 = 90.0;
const CACHE_REFERENCE_BYTES: f64 = 10.0 * 1024.0 * 1024.0 * 1024.0;
const PROCESS_HOT: f64 = 50.0;

pub struct Dispatcher {
    cpu_gauge: Gauge,
    memory_gauge: Gauge,
    disk_gauge: Gauge,
    cpu_chart: TrendChart,
    memory_chart: TrendChart,
    network_chart: TrendChart,
    net: NetRateTracker,
}

impl Dispatcher {
    /// Binds widgets to whatever elements `target` has right now.
    pub fn new<T: RenderTarget + ?Sized>(target: &T) -> Self {
        Self {
            cpu_gauge: Gauge::create(target, ElementId::CpuGauge, [75.0, 90.0]),
            memory_gauge: Gauge::create(target, ElementId::MemoryGauge, [75.0, 90.0]),
            // Disk gets its own 80/95 pair instead of the shared 75/90.
            disk_gauge: Gauge::create(target, ElementId::DiskGauge, [80.0, 95.0]),
            cpu_chart: TrendChart::create(
                target,
                ElementId::CpuChart,
                &["CPU Usage (%)"],
                None,
                Some(100.0),
            ),
            memory_chart: TrendChart::create(
                target,
                ElementId::MemoryChart,
                &["Memory Usage (%)"],
                None,
                Some(100.0),
            ),
            network_chart: TrendChart::create(
                target,
                ElementId::NetworkChart,
                &["Upload (KB/s)", "Download (KB/s)"],
                Some(NETWORK_WINDOW),
                None,
            ),
            net: NetRateTracker::new(),
        }
    }

    pub fn on_snapshot<T: RenderTarget + ?Sized>(&mut self, snap: &Snapshot, target: &mut T) {
        self.on_snapshot_at(snap, target, Local::now());
    }

    /// Same as `on_snapshot` with an explicit wall clock.
    pub fn on_snapshot_at<T: RenderTarget + ?Sized>(
        &mut self,
        snap: &Snapshot,
        target: &mut T,
        now: DateTime<Local>,
    ) {
        self.update_cpu(&snap.cpu, target);
        update_usage(
            &mut self.memory_gauge,
            &snap.memory,
            target,
            [
                ElementId::MemoryUsage,
                ElementId::MemoryUsed,
                ElementId::MemoryFree,
                ElementId::MemoryTotal,
            ],
        );
        update_usage(
            &mut self.disk_gauge,
            &snap.disk,
            target,
            [
                ElementId::DiskUsage,
                ElementId::DiskUsed,
                ElementId::DiskFree,
                ElementId::DiskTotal,
            ],
        );
        update_disk_table(&snap.disk_info, target);
        self.update_network(snap, target, now);
        update_processes(&snap.processes, target);
        update_logs(&snap.logs, target);
        target.set_text(ElementId::Uptime, &format_uptime(&snap.uptime));
        if let Some(cache) = &snap.cache_info {
            update_cache(cache, target, now);
        }
        if let Some(h) = &snap.historical {
            self.update_history(h, target);
        }
    }

    fn update_cpu<T: RenderTarget + ?Sized>(&mut self, cpu: &Cpu, target: &mut T) {
        self.cpu_gauge.update(target, cpu.percent);
        target.set_text(ElementId::CpuUsage, &format!("{:.1}%", cpu.percent));
        target.set_text(ElementId::CpuCoreCount, &cpu.cores.count.to_string());
        target.set_text(ElementId::CpuFrequency, &cpu.cores.frequency);

        let rows: Vec<TableRow> = cpu
            .cores
            .per_core
            .iter()
            .enumerate()
            .map(|(i, &usage)| {
                vec![
                    Cell::text(format!("Core {i}")),
                    Cell::bar(Bar {
                        percent: usage,
                        tone: severity_class(usage, BAR_WARN, BAR_CRIT).into(),
                        label: format!("{usage:.1}%"),
                    }),
                ]
            })
            .collect();
        target.replace_rows(ElementId::CpuCores, rows);
    }

    fn update_network<T: RenderTarget + ?Sized>(
        &mut self,
        snap: &Snapshot,
        target: &mut T,
        now: DateTime<Local>,
    ) {
        let rates = self.net.sample(
            snap.network.bytes_sent,
            snap.network.bytes_recv,
            now.timestamp_millis(),
        );
        target.set_text(
            ElementId::NetworkUpload,
            &format!("{:.2} KB/s", rates.upload_kbps),
        );
        target.set_text(
            ElementId::NetworkDownload,
            &format!("{:.2} KB/s", rates.download_kbps),
        );
        self.network_chart.append(
            target,
            now.format("%H:%M:%S").to_string(),
            &[rates.upload_kbps, rates.download_kbps],
        );
    }

    fn update_history<T: RenderTarget + ?Sized>(&mut self, h: &Historical, target: &mut T) {
        let Some(labels) = &h.timestamps else { return };
        self.cpu_chart.replace(target, labels, &[h.cpu.as_slice()]);
        self.memory_chart.replace(target, labels, &[h.memory.as_slice()]);
    }
}

fn update_usage<T: RenderTarget + ?Sized>(
    gauge: &mut Gauge,
    u: &Usage,
    target: &mut T,
    [usage, used, free, total]: [ElementId; 4],
) {
    gauge.update(target, u.percent);
    target.set_text(usage, &format!("{:.1}%", u.percent));
    target.set_text(used, &format!("Used: {:.2} GB", u.used));
    target.set_text(free, &format!("Free: {:.2} GB", u.free));
    target.set_text(total, &format!("Total: {:.2} GB", u.total));
}

fn update_disk_table<T: RenderTarget + ?Sized>(volumes: &[Volume], target: &mut T) {
    let rows = volumes
        .iter()
        .map(|d| {
            vec![
                Cell::text(d.device.clone()),
                Cell::text(d.fstype.clone()),
                Cell::text(format!("{:.2} GB", d.total)),
                Cell::text(format!("{:.2} GB", d.used)),
                Cell::text(format!("{:.2} GB", d.free)),
                Cell::bar(Bar {
                    percent: d.percent,
                    tone: severity_class(d.percent, BAR_WARN, BAR_CRIT).into(),
                    label: format!("{}%", d.percent),
                }),
            ]
        })
        .collect();
    target.replace_rows(ElementId::DiskTable, rows);
}

fn update_processes<T: RenderTarget + ?Sized>(procs: &[ProcessInfo], target: &mut T) {
    if !target.contains(ElementId::ProcessTable) {
        return;
    }
    let hot = |v: f64| (v > PROCESS_HOT).then_some(Tone::Danger);
    let rows = procs
        .iter()
        .map(|p| {
            vec![
                Cell::text(p.pid.to_string()),
                Cell::text(p.name.clone()),
                Cell::text(p.username.clone().unwrap_or_default()),
                Cell::toned(format!("{}%", p.cpu_percent), hot(p.cpu_percent)),
                Cell::toned(format!("{}%", p.memory_percent), hot(p.memory_percent)),
                Cell::text(p.create_time.clone()),
            ]
        })
        .collect();
    target.replace_rows(ElementId::ProcessTable, rows);
}

pub fn level_tone(level: &str) -> Option<Tone> {
    match level.to_ascii_lowercase().as_str() {
        "error" => Some(Tone::Danger),
        "warning" => Some(Tone::Warning),
        "information" => Some(Tone::Info),
        _ => None,
    }
}

// Input is oldest first; the table shows newest first.
fn update_logs<T: RenderTarget + ?Sized>(logs: &[LogEntry], target: &mut T) {
    let rows = logs
        .iter()
        .rev()
        .map(|l| {
            vec![
                Cell::text(l.timestamp.clone()),
                Cell::text(l.source.clone()),
                Cell::toned(l.level.clone(), level_tone(&l.level)),
                Cell::text(l.message.clone()),
            ]
        })
        .collect();
    target.replace_rows(ElementId::LogTable, rows);
}

/// Share of a 10 GiB reference budget, capped at 100. Display only.
pub fn cache_pressure(total_size: u64) -> f64 {
    (total_size as f64 / CACHE_REFERENCE_BYTES * 100.0).min(100.0)
}

fn update_cache<T: RenderTarget + ?Sized>(cache: &CacheInfo, target: &mut T, now: DateTime<Local>) {
    target.set_text(ElementId::CacheTotalSize, &format_byte_size(cache.total_size));
    target.set_text(ElementId::CacheFileCount, &cache.file_count.to_string());
    target.set_text(ElementId::CacheLastScan, &now.format("%H:%M:%S").to_string());

    let pressure = cache_pressure(cache.total_size);
    target.set_bar(
        ElementId::CachePressure,
        Bar {
            percent: pressure,
            tone: severity_class(pressure, CACHE_WARN, CACHE_CRIT).into(),
            label: format!("{pressure:.1}%"),
        },
    );

    if cache.paths.is_empty() {
        target.replace_rows(
            ElementId::CacheLocations,
            vec![vec![Cell::toned("No cache locations found", Some(Tone::Muted))]],
        );
        return;
    }
    // BTreeMap order makes equal sizes fall back to path order.
    let mut locations: Vec<_> = cache.paths.iter().collect();
    locations.sort_by(|a, b| b.1.size.cmp(&a.1.size));
    let rows = locations
        .into_iter()
        .map(|(path, loc)| {
            vec![
                Cell::text(path.clone()),
                Cell::text(loc.file_count.to_string()),
                Cell::text(format_byte_size(loc.size)),
            ]
        })
        .collect();
    target.replace_rows(ElementId::CacheLocations, rows);
}
