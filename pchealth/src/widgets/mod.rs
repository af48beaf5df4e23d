//! Persistent widget handles fed by the snapshot dispatcher.

pub mod chart;
pub mod gauge;

pub use chart::TrendChart;
pub use gauge::Gauge;
