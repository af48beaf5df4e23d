//! Trend charts: wholesale replace for server history, append-evict for live rates.

use tracing::warn;

use crate::history::Window;
use crate::render::{ChartFrame, ElementId, RenderTarget, Series};

#[derive(Debug, Clone)]
struct Bound {
    id: ElementId,
    names: &'static [&'static str],
    y_max: Option<f64>,
    window: Window,
}

/// A chart handle; dead when its element was missing at creation.
#[derive(Debug, Clone)]
pub struct TrendChart(Option<Bound>);

impl TrendChart {
    /// `cap` bounds append mode; `None` leaves the window to whatever `replace` supplies.
    pub fn create<T: RenderTarget + ?Sized>(
        target: &T,
        id: ElementId,
        names: &'static [&'static str],
        cap: Option<usize>,
        y_max: Option<f64>,
    ) -> Self {
        if !target.contains(id) {
            return TrendChart(None);
        }
        TrendChart(Some(Bound {
            id,
            names,
            y_max,
            window: Window::new(names.len(), cap),
        }))
    }

    pub fn is_live(&self) -> bool {
        self.0.is_some()
    }

    pub fn window(&self) -> Option<&Window> {
        self.0.as_ref().map(|b| &b.window)
    }

    pub fn replace<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        labels: &[String],
        values: &[&[f64]],
    ) {
        let Some(b) = self.0.as_mut() else { return };
        b.window.replace(labels, values);
        redraw(b, target);
    }

    pub fn append<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        label: String,
        values: &[f64],
    ) {
        let Some(b) = self.0.as_mut() else { return };
        b.window.push(label, values);
        redraw(b, target);
    }
}

fn redraw<T: RenderTarget + ?Sized>(b: &Bound, target: &mut T) {
    let frame = ChartFrame {
        labels: b.window.labels().map(str::to_owned).collect(),
        series: b
            .names
            .iter()
            .enumerate()
            .map(|(i, &name)| Series {
                name,
                points: b.window.series(i).collect(),
            })
            .collect(),
        y_max: b.y_max,
    };
    if let Err(e) = target.draw_chart(b.id, &frame) {
        warn!("chart redraw failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Panel, Screen};

    #[test]
    fn append_keeps_last_thirty() {
        let mut s = Screen::new(&[]);
        let mut c = TrendChart::create(
            &s,
            ElementId::NetworkChart,
            &["Upload (KB/s)", "Download (KB/s)"],
            Some(30),
            None,
        );
        for i in 0..35 {
            c.append(&mut s, format!("{i}"), &[i as f64, 0.0]);
        }
        let frame = s.slot(ElementId::NetworkChart).unwrap().chart.clone().unwrap();
        assert_eq!(frame.labels.len(), 30);
        assert_eq!(frame.labels.first().map(String::as_str), Some("5"));
        assert!(frame.series.iter().all(|s| s.points.len() == 30));
    }

    #[test]
    fn replace_swaps_whole_window() {
        let mut s = Screen::new(&[]);
        let mut c =
            TrendChart::create(&s, ElementId::CpuChart, &["CPU Usage (%)"], None, Some(100.0));
        c.append(&mut s, "stale".into(), &[1.0]);
        c.replace(&mut s, &["a".into(), "b".into()], &[&[10.0, 20.0]]);
        let frame = s.slot(ElementId::CpuChart).unwrap().chart.clone().unwrap();
        assert_eq!(frame.labels, vec!["a", "b"]);
        assert_eq!(frame.series[0].points, vec![10.0, 20.0]);
        assert_eq!(frame.y_max, Some(100.0));
    }

    #[test]
    fn redraw_on_removed_element_does_not_escape() {
        let mut s = Screen::new(&[]);
        let mut c =
            TrendChart::create(&s, ElementId::NetworkChart, &["up", "down"], Some(30), None);
        s.detach(Panel::Network);
        c.append(&mut s, "t".into(), &[1.0, 2.0]);
        assert_eq!(c.window().map(|w| w.len()), Some(1));
    }

    #[test]
    fn dead_chart_ignores_updates() {
        let mut s = Screen::new(&[Panel::Memory]);
        let mut c = TrendChart::create(&s, ElementId::MemoryChart, &["mem"], None, None);
        assert!(!c.is_live());
        c.append(&mut s, "t".into(), &[1.0]);
        assert!(c.window().is_none());
    }
}
