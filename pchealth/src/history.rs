//! Bounded history buffers for trend charts.

use std::collections::VecDeque;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// A label axis plus N value series kept the same length.
#[derive(Debug, Clone)]
pub struct Window {
    labels: VecDeque<String>,
    series: Vec<VecDeque<f64>>,
    cap: Option<usize>,
}

impl Window {
    pub fn new(series: usize, cap: Option<usize>) -> Self {
        Self {
            labels: VecDeque::new(),
            series: (0..series).map(|_| VecDeque::new()).collect(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn series(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        self.series.get(i).into_iter().flatten().copied()
    }

    /// Append one entry to every series; evicts the oldest entry everywhere when full.
    /// Missing values are recorded as 0.
    pub fn push(&mut self, label: String, values: &[f64]) {
        match self.cap {
            Some(cap) if cap > 0 => {
                push_capped(&mut self.labels, label, cap);
                for (i, dq) in self.series.iter_mut().enumerate() {
                    push_capped(dq, values.get(i).copied().unwrap_or(0.0), cap);
                }
            }
            Some(_) => {}
            None => {
                self.labels.push_back(label);
                for (i, dq) in self.series.iter_mut().enumerate() {
                    dq.push_back(values.get(i).copied().unwrap_or(0.0));
                }
            }
        }
    }

    /// Replace everything. Lengths are truncated to the shortest input.
    pub fn replace(&mut self, labels: &[String], values: &[&[f64]]) {
        let n = values
            .iter()
            .map(|v| v.len())
            .chain(std::iter::once(labels.len()))
            .min()
            .unwrap_or(0);
        self.labels = labels[..n].iter().cloned().collect();
        for (i, dq) in self.series.iter_mut().enumerate() {
            *dq = values
                .get(i)
                .map(|v| v[..n].iter().copied().collect())
                .unwrap_or_else(|| std::iter::repeat(0.0).take(n).collect());
        }
    }
}
