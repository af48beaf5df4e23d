//! Turns cumulative network byte counters into KB/s rates between snapshots.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetRates {
    pub upload_kbps: f64,
    pub download_kbps: f64,
}

#[derive(Debug, Clone, Default)]
pub struct NetRateTracker {
    bytes_sent: u64,
    bytes_recv: u64,
    captured_at_ms: i64,
}

impl NetRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a known previous sample.
    pub fn with_previous(bytes_sent: u64, bytes_recv: u64, captured_at_ms: i64) -> Self {
        Self {
            bytes_sent,
            bytes_recv,
            captured_at_ms,
        }
    }

    /// The previous triple is always overwritten, so the first reading is zero.
    pub fn sample(&mut self, sent: u64, recv: u64, now_ms: i64) -> NetRates {
        let elapsed = (now_ms - self.captured_at_ms) as f64 / 1000.0;
        let rates = if self.bytes_sent > 0 && elapsed > 0.0 {
            NetRates {
                upload_kbps: sent.saturating_sub(self.bytes_sent) as f64 / elapsed / 1024.0,
                download_kbps: recv.saturating_sub(self.bytes_recv) as f64 / elapsed / 1024.0,
            }
        } else {
            NetRates::default()
        };
        self.bytes_sent = sent;
        self.bytes_recv = recv;
        self.captured_at_ms = now_ms;
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_kilobyte_over_one_second() {
        let mut t = NetRateTracker::with_previous(1000, 2000, 1000);
        let r = t.sample(2024, 2000, 2000);
        assert_eq!(r.upload_kbps, 1.0);
        assert_eq!(r.download_kbps, 0.0);
    }

    #[test]
    fn first_sample_is_zero() {
        let mut t = NetRateTracker::new();
        let r = t.sample(10_000_000, 20_000_000, 1_700_000_000_000);
        assert_eq!(r, NetRates::default());
        let r = t.sample(10_001_024, 20_000_000, 1_700_000_001_000);
        assert_eq!(r.upload_kbps, 1.0);
    }

    #[test]
    fn no_elapsed_time_is_zero() {
        let mut t = NetRateTracker::with_previous(1000, 1000, 5000);
        assert_eq!(t.sample(9000, 9000, 5000), NetRates::default());
    }

    #[test]
    fn counter_reset_does_not_go_negative() {
        let mut t = NetRateTracker::with_previous(50_000, 50_000, 0);
        let r = t.sample(10, 10, 1000);
        assert_eq!(r, NetRates::default());
    }
}
