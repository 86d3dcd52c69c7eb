//! Scheduling policies.
//!
//! A policy answers two questions for the simulation loop:
//! - In which order should the ready queue be served?
//! - How long may the selected process run before control returns?
//!
//! Competition between resident processes is settled by the queue order;
//! competition with processes that have not arrived yet is settled by a
//! look-ahead inside [`SchedulingPolicy::advance`].
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::models::Process;
//! use cpu_sched_sim::policy::SchedulingPolicy;
//!
//! let policy = SchedulingPolicy::RoundRobin { quantum: 2 };
//! let current = Process::new(0, 0, 5);
//! let step = policy.advance(&current, 5, 0, &[]).unwrap();
//! assert_eq!(step.time_advanced, 2);
//! assert!(!step.finished);
//! ```

pub mod rules;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::models::{Process, ProcessId, ProcessRecord, Ticks};
use rules::{first_preemption, LowestPriorityValue, QueueRule, ShortestRemaining};

/// Rank returned by a queue rule. Lower = dispatched first.
pub type Rank = i64;

/// Outcome of one execution span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Ticks the clock moves forward.
    pub time_advanced: Ticks,
    /// Remaining burst after the span.
    pub remaining_time: Ticks,
    /// Whether the span consumed the whole remaining burst.
    pub finished: bool,
    /// Whether the span was cut short by a better arrival.
    ///
    /// Quantum expiry is not preemption in this sense.
    pub preempted: bool,
}

impl Step {
    fn run_to_completion(remaining: Ticks) -> Self {
        Self {
            time_advanced: remaining,
            remaining_time: 0,
            finished: true,
            preempted: false,
        }
    }

    fn cut(remaining: Ticks, span: Ticks, preempted: bool) -> Self {
        let remaining_time = remaining - span;
        Self {
            time_advanced: span,
            remaining_time,
            finished: remaining_time == 0,
            preempted,
        }
    }
}

/// The scheduling algorithm of a run, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Arrival order, run to completion.
    Fcfs,
    /// Shortest (remaining) burst first.
    ShortestJobFirst { preemptive: bool },
    /// Lowest priority value first.
    Priority { preemptive: bool },
    /// Arrival order, at most `quantum` ticks per turn.
    RoundRobin { quantum: u32 },
}

impl SchedulingPolicy {
    /// Policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::ShortestJobFirst { preemptive: false } => "SJF",
            Self::ShortestJobFirst { preemptive: true } => "SRTF",
            Self::Priority { preemptive: false } => "Priority",
            Self::Priority { preemptive: true } => "Preemptive Priority",
            Self::RoundRobin { .. } => "Round Robin",
        }
    }

    /// Whether a process may lose the CPU before finishing.
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs => false,
            Self::ShortestJobFirst { preemptive } | Self::Priority { preemptive } => *preemptive,
            Self::RoundRobin { .. } => true,
        }
    }

    /// The rule ordering the ready queue, `None` for FIFO policies.
    pub fn rule(&self) -> Option<&'static dyn QueueRule> {
        match self {
            Self::ShortestJobFirst { .. } => Some(&ShortestRemaining),
            Self::Priority { .. } => Some(&LowestPriorityValue),
            Self::Fcfs | Self::RoundRobin { .. } => None,
        }
    }

    /// Reorders the ready queue in place.
    ///
    /// FIFO policies leave the queue untouched. Ordered policies sort by
    /// rank; the sort is stable, so equal ranks keep their queue position
    /// (arrival order, then requeue order).
    pub fn order_ready_queue(
        &self,
        queue: &mut VecDeque<ProcessId>,
        processes: &[Process],
        records: &[ProcessRecord],
    ) -> Result<(), PolicyError> {
        let Some(rule) = self.rule() else {
            return Ok(());
        };
        if queue.len() < 2 {
            return Ok(());
        }

        let mut ranked = queue
            .iter()
            .map(|&id| {
                rule.rank(&processes[id], records[id].remaining_time)
                    .map(|rank| (rank, id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        ranked.sort_by_key(|&(rank, _)| rank);

        queue.clear();
        queue.extend(ranked.into_iter().map(|(_, id)| id));
        Ok(())
    }

    /// Decides how long `current` runs from `clock`.
    ///
    /// `upcoming` holds the processes that have not arrived yet, in
    /// ascending arrival order. Only preemptive SJF and Priority consult it.
    pub fn advance(
        &self,
        current: &Process,
        remaining: Ticks,
        clock: Ticks,
        upcoming: &[Process],
    ) -> Result<Step, PolicyError> {
        match *self {
            Self::Fcfs | Self::ShortestJobFirst { preemptive: false } => {
                Ok(Step::run_to_completion(remaining))
            }
            Self::Priority { preemptive: false } => {
                LowestPriorityValue.rank(current, remaining)?;
                Ok(Step::run_to_completion(remaining))
            }
            Self::ShortestJobFirst { preemptive: true } => {
                Self::look_ahead(&ShortestRemaining, current, remaining, clock, upcoming)
            }
            Self::Priority { preemptive: true } => {
                LowestPriorityValue.rank(current, remaining)?;
                Self::look_ahead(&LowestPriorityValue, current, remaining, clock, upcoming)
            }
            Self::RoundRobin { quantum } => {
                if quantum == 0 {
                    return Err(PolicyError::InvalidQuantum(quantum));
                }
                let span = remaining.min(Ticks::from(quantum));
                Ok(Step::cut(remaining, span, false))
            }
        }
    }

    fn look_ahead(
        rule: &dyn QueueRule,
        current: &Process,
        remaining: Ticks,
        clock: Ticks,
        upcoming: &[Process],
    ) -> Result<Step, PolicyError> {
        let preempt_at = first_preemption(rule, current, remaining, clock, upcoming)?;
        Ok(match preempt_at {
            Some(span) => Step::cut(remaining, span, true),
            None => Step::run_to_completion(remaining),
        })
    }
}
