//! Simulation input: the validated numeric arrays handed over by the caller.

use serde::{Deserialize, Serialize};

use super::{Process, Ticks};

/// Parallel arrays describing the processes of one run.
///
/// Element `i` of every array belongs to process `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Arrival time per process.
    pub arrival_times: Vec<Ticks>,
    /// Burst time per process. Must be at least 1.
    pub burst_times: Vec<Ticks>,
    /// Priority per process (lower = more urgent). Required by `priority`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<i64>>,
}

impl ScheduleInput {
    /// Creates an input without priorities.
    pub fn new(arrival_times: Vec<Ticks>, burst_times: Vec<Ticks>) -> Self {
        Self {
            arrival_times,
            burst_times,
            priorities: None,
        }
    }

    /// Sets the priorities.
    pub fn with_priorities(mut self, priorities: Vec<i64>) -> Self {
        self.priorities = Some(priorities);
        self
    }

    /// Number of processes described by the arrival array.
    pub fn len(&self) -> usize {
        self.arrival_times.len()
    }

    /// Whether the input describes no processes.
    pub fn is_empty(&self) -> bool {
        self.arrival_times.is_empty()
    }

    /// Builds the static process list, one per input position.
    ///
    /// Assumes the input passed validation; surplus elements of longer
    /// arrays are ignored.
    pub fn to_processes(&self, mut color: impl FnMut() -> String) -> Vec<Process> {
        self.arrival_times
            .iter()
            .zip(&self.burst_times)
            .enumerate()
            .map(|(id, (&arrival, &burst))| {
                let mut process = Process::new(id, arrival, burst).with_color(color());
                if let Some(priority) = self.priorities.as_ref().and_then(|p| p.get(id)) {
                    process = process.with_priority(*priority);
                }
                process
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_processes() {
        let input = ScheduleInput::new(vec![0, 2], vec![5, 1]).with_priorities(vec![3, 1]);
        let processes = input.to_processes(|| "#ffffff".to_string());

        assert_eq!(processes.len(), 2);
        assert_eq!(processes[1].id, 1);
        assert_eq!(processes[1].arrival_time, 2);
        assert_eq!(processes[1].burst_time, 1);
        assert_eq!(processes[1].priority, Some(1));
        assert_eq!(processes[0].color, "#ffffff");
    }

    #[test]
    fn test_to_processes_without_priority() {
        let input = ScheduleInput::new(vec![0], vec![4]);
        let processes = input.to_processes(String::new);
        assert_eq!(processes[0].priority, None);
        assert!(!input.is_empty());
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_deserialize_without_priorities() {
        let input: ScheduleInput =
            serde_json::from_str(r#"{"arrival_times":[0,1],"burst_times":[3,2]}"#).unwrap();
        assert_eq!(input, ScheduleInput::new(vec![0, 1], vec![3, 2]));
    }
}
