//! Process (job) model.
//!
//! A process is one synthetic CPU job. Its static attributes never change
//! after construction; the per-run simulation state lives in a separate
//! [`ProcessRecord`] owned by the simulation loop and addressed by index.
//!
//! # Time Representation
//! All times are whole ticks of the simulated clock, starting at t=0.

use serde::{Deserialize, Serialize};

/// Identifier of a process: its 0-based position in the input arrays.
pub type ProcessId = usize;

/// A tick of the simulated clock.
pub type Ticks = u64;

/// Static description of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Position in the input arrays.
    pub id: ProcessId,
    /// Clock value at which the process becomes eligible to run.
    pub arrival_time: Ticks,
    /// Total CPU time the process needs.
    pub burst_time: Ticks,
    /// Scheduling priority (lower = more urgent). `None` when not supplied.
    pub priority: Option<i64>,
    /// Display color (`#RRGGBB`). Cosmetic only.
    pub color: String,
}

impl Process {
    /// Creates a process without priority or color.
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
            color: String::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Metrics derived when a process finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Clock value at which the last unit of burst was consumed.
    pub completion_time: Ticks,
    /// `completion - arrival`.
    pub turnaround_time: Ticks,
    /// `turnaround - burst`.
    pub waiting_time: Ticks,
}

impl ProcessMetrics {
    /// Derives the metrics of `process` finishing at `completion_time`.
    ///
    /// Saturates at zero, which only matters for schedules that would
    /// otherwise violate `completion >= arrival + burst`.
    pub fn at_completion(process: &Process, completion_time: Ticks) -> Self {
        let turnaround_time = completion_time.saturating_sub(process.arrival_time);
        Self {
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time.saturating_sub(process.burst_time),
        }
    }
}

/// Mutable per-run state of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Index of the static [`Process`] this record tracks.
    pub id: ProcessId,
    /// Burst still to execute. Reaches exactly 0 at completion.
    pub remaining_time: Ticks,
    /// Clock value of the first dispatch.
    pub first_run: Option<Ticks>,
    /// Set once, when `remaining_time` first reaches 0.
    pub metrics: Option<ProcessMetrics>,
}

impl ProcessRecord {
    /// Fresh record for a process that has not run yet.
    pub fn new(process: &Process) -> Self {
        Self {
            id: process.id,
            remaining_time: process.burst_time,
            first_run: None,
            metrics: None,
        }
    }

    /// Whether the process has finished.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.metrics.is_some()
    }

    /// Remembers the first dispatch time. Later dispatches are ignored.
    pub fn mark_dispatched(&mut self, clock: Ticks) {
        if self.first_run.is_none() {
            self.first_run = Some(clock);
        }
    }

    /// Finalizes the metrics of a finished process.
    pub fn finish(&mut self, process: &Process, clock: Ticks) -> ProcessMetrics {
        debug_assert!(
            self.metrics.is_none(),
            "process {} finalized twice",
            self.id
        );
        let metrics = ProcessMetrics::at_completion(process, clock);
        self.remaining_time = 0;
        self.metrics = Some(metrics);
        metrics
    }

    /// First dispatch minus arrival.
    pub fn response_time(&self, process: &Process) -> Option<Ticks> {
        self.first_run
            .map(|start| start.saturating_sub(process.arrival_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(3, 2, 7).with_priority(1).with_color("#aabbcc");
        assert_eq!(p.id, 3);
        assert_eq!(p.arrival_time, 2);
        assert_eq!(p.burst_time, 7);
        assert_eq!(p.priority, Some(1));
        assert_eq!(p.color, "#aabbcc");
    }

    #[test]
    fn test_metrics_at_completion() {
        let p = Process::new(1, 1, 3);
        let m = ProcessMetrics::at_completion(&p, 8);
        assert_eq!(m.completion_time, 8);
        assert_eq!(m.turnaround_time, 7);
        assert_eq!(m.waiting_time, 4);
    }

    #[test]
    fn test_record_lifecycle() {
        let p = Process::new(0, 2, 5);
        let mut record = ProcessRecord::new(&p);
        assert_eq!(record.remaining_time, 5);
        assert!(!record.is_finished());

        record.mark_dispatched(4);
        record.mark_dispatched(6); // Ignored
        assert_eq!(record.response_time(&p), Some(2));

        record.remaining_time = 1;
        let m = record.finish(&p, 10);
        assert!(record.is_finished());
        assert_eq!(record.remaining_time, 0);
        assert_eq!(m.turnaround_time, 8);
        assert_eq!(m.waiting_time, 3);
    }
}
