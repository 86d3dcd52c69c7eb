//! Timeline (Gantt) model.
//!
//! A timeline is the ordered list of contiguous `[start, end)` segments the
//! CPU spent on each process, with explicit idle segments filling every gap.
//!
//! # Invariants
//! - Segments are appended in non-decreasing start order.
//! - `segments[i].end == segments[i + 1].start`; the first starts at 0.
//! - No segment is empty and no two idle segments are adjacent.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};

/// Numeric stand-in for the idle owner, for consumers that need a plain id.
pub const IDLE_PROCESS_ID: i64 = -1;

/// Who owns a timeline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOwner {
    /// The CPU executed this process.
    Process(ProcessId),
    /// No process was ready.
    Idle,
}

impl SegmentOwner {
    /// The process id, or [`IDLE_PROCESS_ID`] for idle time.
    pub fn as_id(&self) -> i64 {
        match self {
            Self::Process(id) => *id as i64,
            Self::Idle => IDLE_PROCESS_ID,
        }
    }

    /// Whether this is the idle owner.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// One contiguous interval on the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Owner of the interval.
    pub owner: SegmentOwner,
    /// Inclusive start.
    pub start: Ticks,
    /// Exclusive end.
    pub end: Ticks,
}

impl Segment {
    /// Creates a busy segment.
    pub fn busy(process_id: ProcessId, start: Ticks, end: Ticks) -> Self {
        Self {
            owner: SegmentOwner::Process(process_id),
            start,
            end,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            owner: SegmentOwner::Idle,
            start,
            end,
        }
    }

    /// `end - start`.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// An ordered, gapless Gantt timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the execution of `process_id` over `[start, end)`.
    ///
    /// Any gap between the current end and `start` is filled with an idle
    /// segment first. Empty intervals are dropped.
    pub fn push_busy(&mut self, process_id: ProcessId, start: Ticks, end: Ticks) {
        if end <= start {
            return;
        }
        self.idle_until(start);
        debug_assert_eq!(self.end(), start, "busy segment overlaps timeline");
        self.segments.push(Segment::busy(process_id, start, end));
    }

    /// Extends the timeline with idle time up to `until`.
    ///
    /// Does nothing when the timeline already reaches `until`. An idle
    /// segment directly following another idle segment is merged into it.
    pub fn idle_until(&mut self, until: Ticks) {
        let start = self.end();
        if until <= start {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.owner.is_idle() => last.end = until,
            _ => self.segments.push(Segment::idle(start, until)),
        }
    }

    /// End of the last segment (0 when empty).
    pub fn end(&self) -> Ticks {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Makespan: same as [`Timeline::end`].
    pub fn makespan(&self) -> Ticks {
        self.end()
    }

    /// All segments in time order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments executed by one process.
    pub fn segments_for(&self, process_id: ProcessId) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.owner == SegmentOwner::Process(process_id))
            .collect()
    }

    /// Total CPU time given to one process.
    pub fn busy_time_for(&self, process_id: ProcessId) -> Ticks {
        self.segments_for(process_id)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// Total CPU time given to any process.
    pub fn busy_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|s| !s.owner.is_idle())
            .map(|s| s.duration())
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Number of busy segments, i.e. how often a process was dispatched.
    pub fn dispatch_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.owner.is_idle()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_busy(0, 0, 3);
        t.push_busy(1, 5, 7); // Gap 3..5 becomes idle
        t.push_busy(0, 7, 9);
        t
    }

    #[test]
    fn test_gap_filled_with_idle() {
        let t = sample_timeline();
        assert_eq!(
            t.segments(),
            &[
                Segment::busy(0, 0, 3),
                Segment::idle(3, 5),
                Segment::busy(1, 5, 7),
                Segment::busy(0, 7, 9),
            ]
        );
    }

    #[test]
    fn test_leading_idle() {
        let mut t = Timeline::new();
        t.push_busy(0, 2, 4);
        assert_eq!(t.segments()[0], Segment::idle(0, 2));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_idle_segments_merge() {
        let mut t = Timeline::new();
        t.push_busy(0, 0, 1);
        t.idle_until(3);
        t.idle_until(6);
        t.idle_until(6); // No-op
        assert_eq!(t.segments(), &[Segment::busy(0, 0, 1), Segment::idle(1, 6)]);
    }

    #[test]
    fn test_empty_interval_dropped() {
        let mut t = Timeline::new();
        t.push_busy(0, 0, 0);
        t.idle_until(0);
        assert!(t.is_empty());
        assert_eq!(t.makespan(), 0);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 9);
        assert_eq!(t.busy_time(), 7);
        assert_eq!(t.idle_time(), 2);
        assert_eq!(t.busy_time_for(0), 5);
        assert_eq!(t.busy_time_for(1), 2);
        assert_eq!(t.busy_time_for(9), 0);
        assert_eq!(t.segments_for(0).len(), 2);
        assert_eq!(t.dispatch_count(), 3);
    }

    #[test]
    fn test_owner_as_id() {
        assert_eq!(SegmentOwner::Process(4).as_id(), 4);
        assert_eq!(SegmentOwner::Idle.as_id(), IDLE_PROCESS_ID);
    }

    #[test]
    fn test_timeline_serializes() {
        let t = sample_timeline();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"idle\""));
        let back: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
