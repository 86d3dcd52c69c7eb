//! Simulation loop, report and KPI evaluation.
//!
//! # Algorithm
//!
//! [`Simulator`] advances a discrete clock, admitting arrivals, letting the
//! configured [`SchedulingPolicy`](crate::policy::SchedulingPolicy) pick and
//! bound each execution span, and recording busy and idle segments.
//!
//! # KPI
//!
//! [`SimulationReport`] carries per-process metrics, two-decimal averages
//! and [`ScheduleKpi`]: makespan, utilization, idle time, dispatch and
//! preemption counts.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod report;
mod simulation;

pub use kpi::{round_average, Averages, MetricTotals, ScheduleKpi};
pub use report::{ProcessRow, SimulationReport};
pub use simulation::{simulate, Simulator};
