//! Ranking rules used by the ordered policies.
//!
//! # Score Convention
//! All rules return lower ranks for processes that should run first.
//! Equal ranks keep their ready-queue order.

use std::fmt::Debug;

use super::Rank;
use crate::error::PolicyError;
use crate::models::{Process, Ticks};

/// Ranks a process for dispatch.
///
/// The same rank decides both the ready-queue order and whether an
/// arriving process preempts the running one.
pub trait QueueRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT").
    fn name(&self) -> &'static str;

    /// Rank of `process` given its current remaining burst.
    fn rank(&self, process: &Process, remaining: Ticks) -> Result<Rank, PolicyError>;
}

/// Shortest Remaining Time.
///
/// Ranks by remaining burst. For a process that has not run yet this is
/// its full burst, which makes the non-preemptive variant plain SJF.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl QueueRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn rank(&self, _process: &Process, remaining: Ticks) -> Result<Rank, PolicyError> {
        Ok(remaining as Rank)
    }
}

/// Static priority, lower value first.
///
/// A process without a priority is a precondition violation.
#[derive(Debug, Clone, Copy)]
pub struct LowestPriorityValue;

impl QueueRule for LowestPriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn rank(&self, process: &Process, _remaining: Ticks) -> Result<Rank, PolicyError> {
        process.priority.ok_or(PolicyError::MissingPriority {
            process_id: process.id,
        })
    }
}

/// Offset from `clock` at which an upcoming arrival outranks the running
/// process, if any arrives before it would finish.
///
/// `upcoming` must be in ascending arrival order. Arrivals at or before
/// `clock` are skipped; they are already resident and were ranked by the
/// ready-queue ordering. An arrival exactly at the finish instant does not
/// preempt.
pub(crate) fn first_preemption<'a>(
    rule: &dyn QueueRule,
    current: &Process,
    remaining: Ticks,
    clock: Ticks,
    upcoming: impl IntoIterator<Item = &'a Process>,
) -> Result<Option<Ticks>, PolicyError> {
    let finish = clock.saturating_add(remaining);
    for arriving in upcoming {
        if arriving.arrival_time >= finish {
            break;
        }
        if arriving.arrival_time <= clock {
            continue;
        }

        let elapsed = arriving.arrival_time - clock;
        let current_rank = rule.rank(current, remaining - elapsed)?;
        let arriving_rank = rule.rank(arriving, arriving.burst_time)?;
        if arriving_rank < current_rank {
            return Ok(Some(elapsed));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_remaining() {
        let long = Process::new(0, 0, 10);
        assert_eq!(ShortestRemaining.rank(&long, 3).unwrap(), 3);
        assert_eq!(ShortestRemaining.name(), "SRT");
    }

    #[test]
    fn test_lowest_priority_value() {
        let p = Process::new(0, 0, 10).with_priority(2);
        assert_eq!(LowestPriorityValue.rank(&p, 1).unwrap(), 2);

        let missing = Process::new(4, 0, 10);
        assert_eq!(
            LowestPriorityValue.rank(&missing, 1),
            Err(PolicyError::MissingPriority { process_id: 4 })
        );
    }

    #[test]
    fn test_first_preemption_shorter_arrival() {
        // P0 remaining 7 at t=0; P1 (burst 4) arrives at t=1 when P0 has 6 left
        let current = Process::new(0, 0, 7);
        let upcoming = [Process::new(1, 1, 4)];
        let at = first_preemption(&ShortestRemaining, &current, 7, 0, &upcoming).unwrap();
        assert_eq!(at, Some(1));
    }

    #[test]
    fn test_first_preemption_requires_strictly_better() {
        // P1 arrives at t=3 with burst 4, P0 has exactly 4 left then
        let current = Process::new(0, 0, 7);
        let upcoming = [Process::new(1, 3, 4)];
        let at = first_preemption(&ShortestRemaining, &current, 7, 0, &upcoming).unwrap();
        assert_eq!(at, None);
    }

    #[test]
    fn test_first_preemption_skips_until_better() {
        let current = Process::new(0, 0, 10);
        let upcoming = [
            Process::new(1, 2, 9), // 8 left → no
            Process::new(2, 5, 2), // 5 left → yes
        ];
        let at = first_preemption(&ShortestRemaining, &current, 10, 0, &upcoming).unwrap();
        assert_eq!(at, Some(5));
    }

    #[test]
    fn test_first_preemption_arrival_at_finish() {
        let current = Process::new(0, 0, 3);
        let upcoming = [Process::new(1, 3, 1)];
        let at = first_preemption(&ShortestRemaining, &current, 3, 0, &upcoming).unwrap();
        assert_eq!(at, None);
    }

    #[test]
    fn test_first_preemption_by_priority() {
        let current = Process::new(0, 0, 10).with_priority(3);
        let upcoming = [
            Process::new(1, 2, 1).with_priority(3), // Equal → no
            Process::new(2, 4, 8).with_priority(1), // More urgent → yes
        ];
        let at = first_preemption(&LowestPriorityValue, &current, 10, 0, &upcoming).unwrap();
        assert_eq!(at, Some(4));
    }

    #[test]
    fn test_first_preemption_relative_to_clock() {
        // Resumed at t=5 with 6 left; arrival at t=8 with burst 2 (3 left then)
        let current = Process::new(0, 0, 11);
        let upcoming = [Process::new(1, 8, 2)];
        let at = first_preemption(&ShortestRemaining, &current, 6, 5, &upcoming).unwrap();
        assert_eq!(at, Some(3));
    }

    #[test]
    fn test_first_preemption_near_clock_limit() {
        // Finish saturates at u64::MAX, so the arrival there cannot cut in
        let current = Process::new(0, u64::MAX - 1, 5);
        let upcoming = [Process::new(1, u64::MAX, 1)];
        let at = first_preemption(&ShortestRemaining, &current, 5, u64::MAX - 1, &upcoming).unwrap();
        assert_eq!(at, None);
    }
}
