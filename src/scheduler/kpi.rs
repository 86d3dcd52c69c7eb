//! Schedule quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion avg | mean(completion time) |
//! | Turnaround avg | mean(completion - arrival) |
//! | Waiting avg | mean(turnaround - burst) |
//! | Makespan | end of the last segment |
//! | Utilization | busy time / makespan |
//!
//! Averages are rounded to two decimals, half away from zero, on the exact
//! rational value rather than on a binary float.

use serde::{Deserialize, Serialize};

use crate::models::{ProcessMetrics, Ticks, Timeline};

/// Running sums of per-process metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTotals {
    /// Sum of completion times.
    pub completion: u64,
    /// Sum of turnaround times.
    pub turnaround: u64,
    /// Sum of waiting times.
    pub waiting: u64,
}

impl MetricTotals {
    /// Adds one finished process.
    pub fn add(&mut self, metrics: &ProcessMetrics) {
        self.completion += metrics.completion_time;
        self.turnaround += metrics.turnaround_time;
        self.waiting += metrics.waiting_time;
    }
}

/// Per-run averages, two-decimal rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean completion time.
    pub completion_average: f64,
    /// Mean turnaround time.
    pub turnaround_average: f64,
    /// Mean waiting time.
    pub waiting_average: f64,
}

impl Averages {
    /// Averages `totals` over `count` processes.
    ///
    /// All averages are zero when `count` is zero.
    pub fn from_totals(totals: &MetricTotals, count: usize) -> Self {
        Self {
            completion_average: round_average(totals.completion, count),
            turnaround_average: round_average(totals.turnaround, count),
            waiting_average: round_average(totals.waiting, count),
        }
    }
}

/// `total / count` rounded to two decimals, half away from zero.
///
/// Computed in integer hundredths so that e.g. 1.005 rounds to 1.01.
pub fn round_average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scaled = u128::from(total) * 100;
    let count = count as u128;
    let mut hundredths = scaled / count;
    if (scaled % count) * 2 >= count {
        hundredths += 1;
    }
    hundredths as f64 / 100.0
}

/// Timeline-level performance indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// End of the last segment.
    pub makespan: Ticks,
    /// Ticks spent executing processes.
    pub busy_time: Ticks,
    /// Ticks spent idle.
    pub idle_time: Ticks,
    /// `busy_time / makespan` (0.0 for an empty run).
    pub utilization: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: Ticks,
    /// Number of busy segments.
    pub dispatch_count: usize,
    /// Number of spans cut short by a better arrival.
    pub preemption_count: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a finished timeline and the per-process metrics.
    pub fn calculate<'a>(
        timeline: &Timeline,
        metrics: impl IntoIterator<Item = &'a ProcessMetrics>,
        preemption_count: usize,
    ) -> Self {
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let utilization = if makespan == 0 {
            0.0
        } else {
            busy_time as f64 / makespan as f64
        };

        Self {
            makespan,
            busy_time,
            idle_time: timeline.idle_time(),
            utilization,
            max_waiting_time: metrics
                .into_iter()
                .map(|m| m.waiting_time)
                .max()
                .unwrap_or(0),
            dispatch_count: timeline.dispatch_count(),
            preemption_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_average_thirds() {
        assert!((round_average(22, 3) - 7.33).abs() < 1e-10);
        assert!((round_average(20, 3) - 6.67).abs() < 1e-10);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        // 1.005 is below the midpoint as a binary float but exactly half here
        assert!((round_average(201, 200) - 1.01).abs() < 1e-10);
        assert!((round_average(1, 8) - 0.13).abs() < 1e-10);
        assert!((round_average(1, 400) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_average_empty() {
        assert_eq!(round_average(10, 0), 0.0);
        assert_eq!(Averages::from_totals(&MetricTotals::default(), 0), Averages::default());
    }

    #[test]
    fn test_averages_from_totals() {
        let mut totals = MetricTotals::default();
        for (c, t, w) in [(5, 5, 0), (8, 7, 4), (9, 7, 6)] {
            totals.add(&ProcessMetrics {
                completion_time: c,
                turnaround_time: t,
                waiting_time: w,
            });
        }
        let avg = Averages::from_totals(&totals, 3);
        assert!((avg.completion_average - 7.33).abs() < 1e-10);
        assert!((avg.turnaround_average - 6.33).abs() < 1e-10);
        assert!((avg.waiting_average - 3.33).abs() < 1e-10);
    }

    #[test]
    fn test_kpi() {
        let mut timeline = Timeline::new();
        timeline.push_busy(0, 0, 2);
        timeline.push_busy(1, 4, 8);
        let metrics = [
            ProcessMetrics {
                completion_time: 2,
                turnaround_time: 2,
                waiting_time: 0,
            },
            ProcessMetrics {
                completion_time: 8,
                turnaround_time: 5,
                waiting_time: 1,
            },
        ];

        let kpi = ScheduleKpi::calculate(&timeline, &metrics, 0);
        assert_eq!(kpi.makespan, 8);
        assert_eq!(kpi.busy_time, 6);
        assert_eq!(kpi.idle_time, 2);
        assert!((kpi.utilization - 0.75).abs() < 1e-10);
        assert_eq!(kpi.max_waiting_time, 1);
        assert_eq!(kpi.dispatch_count, 2);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Timeline::new(), std::iter::empty(), 0);
        assert_eq!(kpi.makespan, 0);
        assert!((kpi.utilization - 0.0).abs() < 1e-10);
        assert_eq!(kpi.max_waiting_time, 0);
    }
}
