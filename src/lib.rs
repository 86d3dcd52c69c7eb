//! CPU scheduling simulator.
//!
//! Replays a set of synthetic processes under a classic scheduling
//! algorithm and reports the resulting Gantt timeline, per-process
//! completion, turnaround and waiting times, and their averages.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessRecord`, `ScheduleInput`,
//!   `Timeline`, `Segment`
//! - **`config`**: Algorithm selection and run parameters
//! - **`policy`**: FCFS, SJF/SRTF, (preemptive) Priority and Round-Robin
//! - **`scheduler`**: The simulation loop, report and KPIs
//! - **`validation`**: Input integrity checks (lengths, zero bursts, missing priorities)
//! - **`workload`**: Random workloads and display colors
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::{simulate, Algorithm, ScheduleInput, SimulationConfig};
//!
//! let input = ScheduleInput::new(vec![0, 1], vec![7, 4]);
//! let config = SimulationConfig::new(Algorithm::Sjf).with_preemptive(true);
//! let report = simulate(&input, &config).unwrap();
//!
//! assert_eq!(report.completion_times(), vec![11, 5]);
//! assert!((report.averages.waiting_average - 2.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Tanenbaum & Bos (2014), "Modern Operating Systems"

pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::{Algorithm, SimulationConfig};
pub use error::{PolicyError, SimulationError, SimulationResult};
pub use models::{ScheduleInput, Timeline};
pub use scheduler::{simulate, SimulationReport, Simulator};
