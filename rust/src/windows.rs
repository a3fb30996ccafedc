//! Forward and backward passes over a topological order.

use crate::graph::{ActivityGraph, ActivityId};
use crate::log_debug;

/// Earliest and latest start/finish of one activity, in time units from 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeWindow {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: i64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: i64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: i64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: i64,
}

impl TimeWindow {
    /// Total float = LS - ES.
    pub fn total_float(&self) -> i64 {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.total_float() == 0
    }
}

/// Time windows for every activity of a graph, indexed by [`ActivityId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeWindows {
    pub windows: Vec<TimeWindow>,
    /// Maximum earliest finish over all activities.
    pub project_duration: i64,
}

impl TimeWindows {
    pub fn get(&self, id: ActivityId) -> &TimeWindow {
        &self.windows[id as usize]
    }

    pub fn total_float(&self, id: ActivityId) -> i64 {
        self.get(id).total_float()
    }

    /// Free float: how far `id` can slip without delaying any successor's
    /// earliest start. Sinks measure against the project duration.
    pub fn free_float(&self, graph: &ActivityGraph, id: ActivityId) -> i64 {
        let earliest_finish = self.get(id).earliest_finish;
        graph
            .successors(id)
            .iter()
            .map(|&succ| self.get(succ).earliest_start)
            .min()
            .unwrap_or(self.project_duration)
            - earliest_finish
    }
}

/// Compute ES/EF/LS/LF for every activity.
///
/// `order` must be a complete topological order of `graph`
/// (see [`crate::topo::TopologicalOrder::into_result`]). Plain addition is
/// safe here: [`ActivityGraph`] construction bounds the sum of all durations
/// by `i64::MAX`, and no window exceeds that sum.
pub fn compute_time_windows(
    graph: &ActivityGraph,
    order: &[ActivityId],
    verbosity: u8,
) -> TimeWindows {
    debug_assert_eq!(order.len(), graph.len(), "order must cover every activity");

    let mut windows = vec![TimeWindow::default(); graph.len()];

    // Forward pass: ES = max EF over predecessors, already final in topo order
    for &id in order {
        let earliest_start = graph
            .predecessors(id)
            .iter()
            .map(|&pred| windows[pred as usize].earliest_finish)
            .max()
            .unwrap_or(0);

        let window = &mut windows[id as usize];
        window.earliest_start = earliest_start;
        window.earliest_finish = earliest_start + graph.duration(id);

        log_debug!(
            verbosity,
            "[forward] {}: ES={} EF={}",
            graph.label(id),
            window.earliest_start,
            window.earliest_finish
        );
    }

    let project_duration = windows
        .iter()
        .map(|w| w.earliest_finish)
        .max()
        .unwrap_or(0);

    // Backward pass: sinks are anchored to the project duration
    for &id in order.iter().rev() {
        let latest_finish = graph
            .successors(id)
            .iter()
            .map(|&succ| windows[succ as usize].latest_start)
            .min()
            .unwrap_or(project_duration);

        let window = &mut windows[id as usize];
        window.latest_finish = latest_finish;
        window.latest_start = latest_finish - graph.duration(id);

        log_debug!(
            verbosity,
            "[backward] {}: LS={} LF={}",
            graph.label(id),
            window.latest_start,
            window.latest_finish
        );
    }

    TimeWindows {
        windows,
        project_duration,
    }
}
