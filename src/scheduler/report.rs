//! Simulation output.
//!
//! A report is plain data: the timeline, one row per process in input
//! order, the rounded averages and the timeline KPIs. It serializes as-is
//! for display layers.

use serde::{Deserialize, Serialize};

use super::kpi::{Averages, ScheduleKpi};
use super::simulation::RunOutcome;
use crate::models::{Process, ProcessId, Ticks, Timeline};
use crate::policy::SchedulingPolicy;

/// Static attributes and final metrics of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    /// Position in the input arrays.
    pub id: ProcessId,
    /// Clock value at which the process became eligible.
    pub arrival_time: Ticks,
    /// Total CPU time the process needed.
    pub burst_time: Ticks,
    /// Scheduling priority, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Display color (`#rrggbb`).
    pub color: String,
    /// Clock value at which the last burst tick ran.
    pub completion_time: Ticks,
    /// `completion - arrival`.
    pub turnaround_time: Ticks,
    /// `turnaround - burst`.
    pub waiting_time: Ticks,
    /// First dispatch minus arrival.
    pub response_time: Ticks,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy that produced the schedule.
    pub policy: SchedulingPolicy,
    /// Execution and idle segments in time order.
    pub timeline: Timeline,
    /// One row per process, in input order.
    pub processes: Vec<ProcessRow>,
    /// Two-decimal averages over all processes.
    pub averages: Averages,
    /// Timeline-level indicators.
    pub kpi: ScheduleKpi,
}

impl SimulationReport {
    pub(crate) fn new(policy: SchedulingPolicy, processes: &[Process], outcome: RunOutcome) -> Self {
        let RunOutcome {
            timeline,
            records,
            totals,
            preemptions,
        } = outcome;

        let rows: Vec<ProcessRow> = processes
            .iter()
            .zip(&records)
            .map(|(process, record)| {
                debug_assert!(record.is_finished(), "process {} never finished", process.id);
                let metrics = record.metrics.unwrap_or_default();
                ProcessRow {
                    id: process.id,
                    arrival_time: process.arrival_time,
                    burst_time: process.burst_time,
                    priority: process.priority,
                    color: process.color.clone(),
                    completion_time: metrics.completion_time,
                    turnaround_time: metrics.turnaround_time,
                    waiting_time: metrics.waiting_time,
                    response_time: record.response_time(process).unwrap_or_default(),
                }
            })
            .collect();

        let kpi = ScheduleKpi::calculate(
            &timeline,
            records.iter().filter_map(|r| r.metrics.as_ref()),
            preemptions,
        );

        Self {
            policy,
            averages: Averages::from_totals(&totals, processes.len()),
            timeline,
            processes: rows,
            kpi,
        }
    }

    /// Row of process `id`.
    pub fn process(&self, id: ProcessId) -> Option<&ProcessRow> {
        self.processes.get(id)
    }

    /// Completion times in input order.
    pub fn completion_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.completion_time).collect()
    }

    /// Turnaround times in input order.
    pub fn turnaround_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.turnaround_time).collect()
    }

    /// Waiting times in input order.
    pub fn waiting_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.waiting_time).collect()
    }
}
