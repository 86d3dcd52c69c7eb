//! CPU scheduling domain models.
//!
//! Provides the data types for describing a simulation run and its
//! outcome: static processes, their per-run records, the input arrays,
//! and the Gantt timeline.
//!
//! # Ownership
//!
//! | Type | Lifetime | Mutated by |
//! |------|----------|------------|
//! | `Process` | whole run | nobody |
//! | `ProcessRecord` | one run | the simulation loop |
//! | `Timeline` | one run, then returned | the simulation loop |

mod input;
mod process;
mod timeline;

pub use input::ScheduleInput;
pub use process::{Process, ProcessId, ProcessMetrics, ProcessRecord, Ticks};
pub use timeline::{Segment, SegmentOwner, Timeline, IDLE_PROCESS_ID};
