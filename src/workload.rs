//! Synthetic workload generation.
//!
//! Produces random but valid [`ScheduleInput`]s for demos, benchmarks and
//! property tests, plus the pastel display colors attached to processes.
//!
//! All randomness comes from a caller-supplied RNG, so a seeded RNG gives
//! a reproducible workload.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{ScheduleInput, Ticks};

/// Lowest value of each pastel color channel.
const PASTEL_MIN: u8 = 155;

/// Parameters of a random workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of processes.
    pub count: usize,
    /// Latest possible arrival time.
    pub max_arrival: Ticks,
    /// Shortest possible burst (at least 1).
    pub min_burst: Ticks,
    /// Longest possible burst.
    pub max_burst: Ticks,
    /// Priorities are drawn from `0..levels` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_levels: Option<i64>,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            priority_levels: None,
        }
    }
}

impl WorkloadSpec {
    /// Creates a spec for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest arrival time.
    pub fn with_max_arrival(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min_burst: Ticks, max_burst: Ticks) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }

    /// Enables priorities drawn from `0..levels`.
    pub fn with_priority_levels(mut self, levels: i64) -> Self {
        self.priority_levels = Some(levels);
        self
    }
}

/// Draws a workload according to `spec`.
///
/// Degenerate ranges are clamped: bursts are at least 1 and the upper
/// bounds never fall below the lower ones.
pub fn generate_workload<R: Rng + ?Sized>(spec: &WorkloadSpec, rng: &mut R) -> ScheduleInput {
    let min_burst = spec.min_burst.max(1);
    let max_burst = spec.max_burst.max(min_burst);

    let arrival_times = (0..spec.count)
        .map(|_| rng.random_range(0..=spec.max_arrival))
        .collect();
    let burst_times = (0..spec.count)
        .map(|_| rng.random_range(min_burst..=max_burst))
        .collect();

    let mut input = ScheduleInput::new(arrival_times, burst_times);
    if let Some(levels) = spec.priority_levels {
        let levels = levels.max(1);
        input = input.with_priorities((0..spec.count).map(|_| rng.random_range(0..levels)).collect());
    }
    input
}

/// Random pastel color as `#rrggbb`, every channel in `155..255`.
pub fn pastel_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let [r, g, b]: [u8; 3] = std::array::from_fn(|_| rng.random_range(PASTEL_MIN..u8::MAX));
    format!("#{r:02x}{g:02x}{b:02x}")
}
