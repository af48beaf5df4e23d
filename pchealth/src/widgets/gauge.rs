//! Semicircular gauge bound to one percentage and a (warning, critical) pair.

use tracing::warn;

use crate::format::severity_class;
use crate::render::{ElementId, GaugeFrame, RenderTarget};

#[derive(Debug, Clone)]
struct Bound {
    id: ElementId,
    warn: f64,
    crit: f64,
    last: Option<GaugeFrame>,
}

/// A gauge handle; dead when its element was missing at creation.
#[derive(Debug, Clone)]
pub struct Gauge(Option<Bound>);

impl Gauge {
    pub fn create<T: RenderTarget + ?Sized>(
        target: &T,
        id: ElementId,
        thresholds: [f64; 2],
    ) -> Self {
        if !target.contains(id) {
            return Gauge(None);
        }
        Gauge(Some(Bound {
            id,
            warn: thresholds[0],
            crit: thresholds[1],
            last: None,
        }))
    }

    pub fn is_live(&self) -> bool {
        self.0.is_some()
    }

    pub fn last(&self) -> Option<&GaugeFrame> {
        self.0.as_ref().and_then(|b| b.last.as_ref())
    }

    pub fn update<T: RenderTarget + ?Sized>(&mut self, target: &mut T, value: f64) {
        let Some(b) = self.0.as_mut() else { return };
        let frame = GaugeFrame {
            filled: value,
            remainder: 100.0 - value,
            fill: severity_class(value, b.warn, b.crit),
        };
        if let Err(e) = target.draw_gauge(b.id, &frame) {
            warn!("gauge redraw failed: {e}");
        }
        b.last = Some(frame);
    }
}
