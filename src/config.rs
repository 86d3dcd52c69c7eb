//! Run configuration: algorithm selector, preemption flag and quantum.
//!
//! The configuration is checked once, when it is turned into a
//! [`SchedulingPolicy`]; the policy is then immutable for the whole run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimulationError;
use crate::policy::SchedulingPolicy;
use crate::validation::{validate_config, ValidationError, ValidationErrorKind};

/// Smallest accepted round-robin quantum.
pub const MIN_QUANTUM: u32 = 1;
/// Largest accepted round-robin quantum.
pub const MAX_QUANTUM: u32 = 1000;

/// Scheduling algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// First-come-first-served.
    Fcfs,
    /// Shortest job first (shortest remaining time when preemptive).
    Sjf,
    /// Static priority, lower value first.
    Priority,
    /// Round-robin with a fixed quantum.
    #[serde(rename = "rr", alias = "round_robin")]
    RoundRobin,
}

impl Algorithm {
    /// Short identifier as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "rr",
        }
    }

    /// Long human-readable name.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fcfs => "First Come First Served",
            Self::Sjf => "Shortest Job First",
            Self::Priority => "Priority",
            Self::RoundRobin => "Round Robin",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownAlgorithm,
                format!("Unknown scheduling algorithm: {other}"),
            )),
        }
    }
}

/// Configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Algorithm to simulate.
    pub algorithm: Algorithm,
    /// Whether a running process may be preempted.
    #[serde(default)]
    pub preemptive: bool,
    /// Round-robin quantum. Ignored by the other algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u32>,
    /// Seed for the cosmetic process colors.
    #[serde(default)]
    pub color_seed: u64,
}

impl SimulationConfig {
    /// Creates a non-preemptive configuration without quantum.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            preemptive: false,
            quantum: None,
            color_seed: 0,
        }
    }

    /// Round-robin with the given quantum (always preemptive).
    pub fn round_robin(quantum: u32) -> Self {
        Self::new(Algorithm::RoundRobin)
            .with_preemptive(true)
            .with_quantum(quantum)
    }

    /// Sets the preemption flag.
    pub fn with_preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }

    /// Sets the quantum.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the color seed.
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    /// Validates the configuration and selects the policy.
    pub fn policy(&self) -> Result<SchedulingPolicy, SimulationError> {
        validate_config(self)?;

        if self.algorithm != Algorithm::RoundRobin && self.quantum.is_some() {
            debug!(algorithm = %self.algorithm, "ignoring quantum for non round-robin algorithm");
        }

        Ok(match self.algorithm {
            Algorithm::Fcfs => SchedulingPolicy::Fcfs,
            Algorithm::Sjf => SchedulingPolicy::ShortestJobFirst {
                preemptive: self.preemptive,
            },
            Algorithm::Priority => SchedulingPolicy::Priority {
                preemptive: self.preemptive,
            },
            // validate_config guarantees the quantum
            Algorithm::RoundRobin => SchedulingPolicy::RoundRobin {
                quantum: self.quantum.unwrap_or_default(),
            },
        })
    }
}
