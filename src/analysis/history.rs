//! Per-step time series of metrics snapshots.

use serde::Serialize;

use super::metrics::MetricsSnapshot;
use crate::agent::Track;

/// Ordered metrics snapshots, one per recorded step starting at step 0
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
    snapshots: Vec<MetricsSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: MetricsSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.snapshots.last()
    }

    pub fn at_step(&self, step: u64) -> Option<&MetricsSnapshot> {
        self.snapshots
            .binary_search_by_key(&step, |s| s.step)
            .ok()
            .map(|i| &self.snapshots[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricsSnapshot> {
        self.snapshots.iter()
    }

    /// Extracts one column of the time series
    pub fn series<T, F>(&self, column: F) -> Vec<T>
    where
        F: Fn(&MetricsSnapshot) -> T,
    {
        self.snapshots.iter().map(column).collect()
    }

    /// Interested counts per step for `track`
    pub fn interested_series(&self, track: Track) -> Vec<usize> {
        self.series(|s| s.interested(track))
    }

    /// Highest interested count for `track` over steps after step 0, with
    /// the first step reaching it
    pub fn peak_after_start(&self, track: Track) -> (usize, u64) {
        self.snapshots
            .iter()
            .filter(|s| s.step > 0)
            .fold((0, 0), |(peak, at), s| {
                let count = s.interested(track);
                if count > peak {
                    (count, s.step)
                } else {
                    (peak, at)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(step: u64, interested_a: usize, interested_b: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            step,
            susceptible: 0,
            interested_a,
            interested_b,
            interested_both: 0,
            bored_a: 0,
            bored_b: 0,
            bored_both: 0,
            touched: interested_a + interested_b,
            percentage_spread: 0.0,
            percentage_meme_a: 0.0,
            percentage_meme_b: 0.0,
        }
    }

    #[test]
    fn test_series_and_lookup() {
        let mut history = History::new();
        assert!(history.latest().is_none());
        for (step, (a, b)) in [(5, 5), (9, 4), (9, 2), (3, 1)].into_iter().enumerate() {
            history.push(snapshot(step as u64, a, b));
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.interested_series(Track::A), vec![5, 9, 9, 3]);
        assert_eq!(history.series(|s| s.touched), vec![10, 13, 11, 4]);
        assert_eq!(history.at_step(2).map(|s| s.interested_b), Some(2));
        assert!(history.at_step(10).is_none());
        assert_eq!(history.latest().map(|s| s.step), Some(3));
    }

    #[test]
    fn test_peak_ignores_step_zero_and_keeps_first() {
        let mut history = History::new();
        for (step, (a, b)) in [(5, 5), (9, 4), (9, 2), (3, 1)].into_iter().enumerate() {
            history.push(snapshot(step as u64, a, b));
        }
        assert_eq!(history.peak_after_start(Track::A), (9, 1));
        assert_eq!(history.peak_after_start(Track::B), (4, 1));
        assert_eq!(History::new().peak_after_start(Track::A), (0, 0));
    }
}
