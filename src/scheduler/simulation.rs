//! Discrete-time CPU scheduling simulation.
//!
//! # Algorithm
//!
//! Each iteration:
//! 1. Admit every pending process with `arrival <= clock` (arrival order,
//!    ties by input position).
//! 2. Merge the processes requeued by the previous iteration.
//! 3. Let the policy order the ready queue.
//! 4. Pop the head and let the policy decide its execution span; advance
//!    the clock and record a busy segment. Finished processes get their
//!    metrics, unfinished ones are requeued for the next iteration.
//! 5. With nothing ready, jump to the next arrival and record the gap as
//!    idle time.
//!
//! The loop ends when nothing is pending, ready or requeued.
//!
//! # Termination
//! Pending arrivals only shrink and every dispatch consumes at least one
//! tick of a positive remaining burst.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, instrument, trace};

use super::kpi::MetricTotals;
use super::SimulationReport;
use crate::config::SimulationConfig;
use crate::error::{PolicyError, SimulationResult};
use crate::models::{Process, ProcessId, ProcessRecord, ScheduleInput, Ticks, Timeline};
use crate::policy::SchedulingPolicy;
use crate::validation::validate_input;
use crate::workload::pastel_color;

/// Runs simulations for one validated configuration.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::config::{Algorithm, SimulationConfig};
/// use cpu_sched_sim::models::{ScheduleInput, Segment};
/// use cpu_sched_sim::scheduler::Simulator;
///
/// let simulator = Simulator::new(SimulationConfig::new(Algorithm::Fcfs)).unwrap();
/// let input = ScheduleInput::new(vec![0, 1, 2], vec![5, 3, 1]);
/// let report = simulator.run(&input).unwrap();
///
/// assert_eq!(report.timeline.segments()[1], Segment::busy(1, 5, 8));
/// assert_eq!(report.processes[2].waiting_time, 6);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    policy: SchedulingPolicy,
}

impl Simulator {
    /// Validates the configuration and fixes the policy.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let policy = config.policy()?;
        Ok(Self { config, policy })
    }

    /// The configuration this simulator was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The policy selected by the configuration.
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Simulates `input` and returns the timeline and metrics.
    #[instrument(skip_all, fields(policy = self.policy.name(), processes = input.len()))]
    pub fn run(&self, input: &ScheduleInput) -> SimulationResult<SimulationReport> {
        validate_input(input, &self.config)?;

        let mut rng = SmallRng::seed_from_u64(self.config.color_seed);
        let processes = input.to_processes(|| pastel_color(&mut rng));

        let outcome = RunContext::new(&processes, self.policy).run()?;
        debug!(
            makespan = outcome.timeline.makespan(),
            segments = outcome.timeline.len(),
            preemptions = outcome.preemptions,
            "simulation finished"
        );

        Ok(SimulationReport::new(self.policy, &processes, outcome))
    }
}

/// Simulates `input` under `config`.
pub fn simulate(input: &ScheduleInput, config: &SimulationConfig) -> SimulationResult<SimulationReport> {
    Simulator::new(config.clone())?.run(input)
}

/// Everything a finished run hands to the report.
#[derive(Debug, Clone)]
pub(crate) struct RunOutcome {
    pub timeline: Timeline,
    pub records: Vec<ProcessRecord>,
    pub totals: MetricTotals,
    pub preemptions: usize,
}

/// Per-run mutable state.
///
/// `processes` is indexed by id and never changes. `arrivals` is an
/// independent copy sorted by arrival; the unconsumed tail past
/// `next_arrival` is both the pending list and the look-ahead window.
/// Only `records` carries mutable per-process state.
pub(crate) struct RunContext<'a> {
    processes: &'a [Process],
    policy: SchedulingPolicy,
    arrivals: Vec<Process>,
    next_arrival: usize,
    records: Vec<ProcessRecord>,
    ready: VecDeque<ProcessId>,
    requeue: Vec<ProcessId>,
    clock: Ticks,
    timeline: Timeline,
    totals: MetricTotals,
    preemptions: usize,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(processes: &'a [Process], policy: SchedulingPolicy) -> Self {
        let mut arrivals = processes.to_vec();
        arrivals.sort_by_key(|p| (p.arrival_time, p.id));

        Self {
            processes,
            policy,
            arrivals,
            next_arrival: 0,
            records: processes.iter().map(ProcessRecord::new).collect(),
            ready: VecDeque::with_capacity(processes.len()),
            requeue: Vec::new(),
            clock: 0,
            timeline: Timeline::new(),
            totals: MetricTotals::default(),
            preemptions: 0,
        }
    }

    pub(crate) fn run(mut self) -> Result<RunOutcome, PolicyError> {
        while !self.is_done() {
            self.admit_arrivals();
            self.ready.extend(self.requeue.drain(..));
            self.policy
                .order_ready_queue(&mut self.ready, self.processes, &self.records)?;

            if let Some(id) = self.ready.pop_front() {
                self.dispatch(id)?;
            } else if let Some(next) = self.upcoming().first().map(|p| p.arrival_time) {
                self.idle_until(next);
            }
        }

        debug_assert!(self.records.iter().all(ProcessRecord::is_finished));
        Ok(RunOutcome {
            timeline: self.timeline,
            records: self.records,
            totals: self.totals,
            preemptions: self.preemptions,
        })
    }

    fn is_done(&self) -> bool {
        self.upcoming().is_empty() && self.ready.is_empty() && self.requeue.is_empty()
    }

    fn upcoming(&self) -> &[Process] {
        &self.arrivals[self.next_arrival..]
    }

    fn admit_arrivals(&mut self) {
        while let Some(process) = self.arrivals.get(self.next_arrival) {
            if process.arrival_time > self.clock {
                break;
            }
            trace!(process = process.id, clock = self.clock, "arrived");
            self.ready.push_back(process.id);
            self.next_arrival += 1;
        }
    }

    fn dispatch(&mut self, id: ProcessId) -> Result<(), PolicyError> {
        let processes = self.processes;
        let process = &processes[id];
        let remaining = self.records[id].remaining_time;

        let step = self
            .policy
            .advance(process, remaining, self.clock, self.upcoming())?;
        debug_assert!(step.time_advanced > 0, "process {id} made no progress");

        let start = self.clock;
        self.clock += step.time_advanced;
        self.timeline.push_busy(id, start, self.clock);
        self.records[id].mark_dispatched(start);
        trace!(process = id, start, end = self.clock, "ran");

        if step.finished {
            let metrics = self.records[id].finish(process, self.clock);
            self.totals.add(&metrics);
            trace!(process = id, completion = metrics.completion_time, "finished");
        } else {
            if step.preempted {
                self.preemptions += 1;
                debug!(process = id, clock = self.clock, remaining = step.remaining_time, "preempted");
            }
            self.records[id].remaining_time = step.remaining_time;
            self.requeue.push(id);
        }
        Ok(())
    }

    fn idle_until(&mut self, next_arrival: Ticks) {
        debug_assert!(next_arrival > self.clock);
        debug!(from = self.clock, until = next_arrival, "cpu idle");
        self.timeline.idle_until(next_arrival);
        self.clock = next_arrival;
    }
}
