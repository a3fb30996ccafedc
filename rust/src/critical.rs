//! Float, critical activities, critical edges and one critical path.

use crate::graph::{ActivityGraph, ActivityId};
use crate::windows::TimeWindows;

/// Critical-path artifacts derived from a graph and its time windows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalAnalysis {
    /// Total float per activity, indexed by [`ActivityId`].
    pub floats: Vec<i64>,
    /// Zero-float activities in index order.
    pub critical_activities: Vec<ActivityId>,
    /// Critical edges ordered by predecessor then successor index.
    pub critical_edges: Vec<(ActivityId, ActivityId)>,
    /// One source-to-sink chain of critical edges. Empty only for an empty graph.
    pub critical_path: Vec<ActivityId>,
}

/// An edge is critical when both ends have zero float and the successor's
/// earliest start equals the predecessor's earliest finish.
///
/// Two zero-float activities joined by an edge can still be separated by
/// slack when another path into the successor finishes later.
pub fn is_critical_edge(windows: &TimeWindows, from: ActivityId, to: ActivityId) -> bool {
    let from_window = windows.get(from);
    let to_window = windows.get(to);
    from_window.is_critical()
        && to_window.is_critical()
        && to_window.earliest_start == from_window.earliest_finish
}

/// Derive float, critical activities/edges and a single critical path.
pub fn extract_critical_path(graph: &ActivityGraph, windows: &TimeWindows) -> CriticalAnalysis {
    let floats: Vec<i64> = graph.ids().map(|id| windows.total_float(id)).collect();

    let critical_activities: Vec<ActivityId> = graph
        .ids()
        .filter(|&id| floats[id as usize] == 0)
        .collect();

    let critical_edges: Vec<(ActivityId, ActivityId)> = graph
        .edges()
        .filter(|&(from, to)| is_critical_edge(windows, from, to))
        .collect();

    let critical_path = trace_critical_path(graph, windows, &floats);

    CriticalAnalysis {
        floats,
        critical_activities,
        critical_edges,
        critical_path,
    }
}

/// Walk from the first zero-float source along the lowest-index critical
/// successor until none remains. When several critical paths exist only this
/// one is reported, so the result depends on activity input order.
fn trace_critical_path(
    graph: &ActivityGraph,
    windows: &TimeWindows,
    floats: &[i64],
) -> Vec<ActivityId> {
    let start = graph
        .sources()
        .find(|&id| floats[id as usize] == 0)
        .or_else(|| graph.ids().find(|&id| floats[id as usize] == 0));

    let Some(mut current) = start else {
        return Vec::new();
    };

    let mut path = vec![current];
    while let Some(next) = graph
        .successors(current)
        .iter()
        .copied()
        .find(move |&succ| is_critical_edge(windows, current, succ))
    {
        path.push(next);
        current = next;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topo::topological_order;
    use crate::windows::compute_time_windows;

    fn analyze(
        activities: &[(&str, i64)],
        edges: &[(&str, &str)],
    ) -> (ActivityGraph, CriticalAnalysis) {
        let graph = ActivityGraph::new(activities, edges).unwrap();
        let order = topological_order(&graph).into_result().unwrap();
        let windows = compute_time_windows(&graph, &order, 0);
        let analysis = extract_critical_path(&graph, &windows);
        (graph, analysis)
    }

    fn labels(graph: &ActivityGraph, ids: &[ActivityId]) -> Vec<String> {
        ids.iter().map(|&id| graph.label(id).to_string()).collect()
    }

    #[test]
    fn test_linear_chain_all_critical() {
        let (graph, analysis) =
            analyze(&[("X", 3), ("Y", 2), ("Z", 4)], &[("X", "Y"), ("Y", "Z")]);

        assert_eq!(analysis.floats, vec![0, 0, 0]);
        assert_eq!(labels(&graph, &analysis.critical_activities), vec!["X", "Y", "Z"]);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["X", "Y", "Z"]);
        assert_eq!(analysis.critical_edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_diamond_skips_floating_branch() {
        let (graph, analysis) = analyze(
            &[("A", 2), ("B", 3), ("C", 1), ("D", 2)],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );

        assert_eq!(analysis.floats, vec![0, 0, 2, 0]);
        assert_eq!(labels(&graph, &analysis.critical_activities), vec!["A", "B", "D"]);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["A", "B", "D"]);
        assert_eq!(analysis.critical_edges, vec![(0, 1), (1, 3)]);
    }

    #[test]
    fn test_single_zero_duration_activity() {
        let (graph, analysis) = analyze(&[("Solo", 0)], &[]);

        assert_eq!(labels(&graph, &analysis.critical_activities), vec!["Solo"]);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["Solo"]);
        assert!(analysis.critical_edges.is_empty());
    }

    #[test]
    fn test_zero_float_edge_with_slack_is_not_critical() {
        // A is critical through D, C is critical through B, yet EF(A)=2 < ES(C)=3.
        let (graph, analysis) = analyze(
            &[("A", 2), ("B", 3), ("C", 1), ("D", 2)],
            &[("A", "C"), ("B", "C"), ("A", "D")],
        );

        assert_eq!(analysis.floats, vec![0, 0, 0, 0]);
        assert_eq!(analysis.critical_edges, vec![(0, 3), (1, 2)]);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["A", "D"]);
    }

    #[test]
    fn test_first_critical_source_wins() {
        // Two equal parallel chains: P->Q and R->S, both critical.
        let (graph, analysis) = analyze(
            &[("R", 2), ("P", 2), ("S", 1), ("Q", 1)],
            &[("P", "Q"), ("R", "S")],
        );

        assert_eq!(analysis.critical_activities.len(), 4);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["R", "S"]);
    }

    #[test]
    fn test_branching_critical_path_takes_lowest_index() {
        let (graph, analysis) = analyze(
            &[("A", 1), ("C", 2), ("B", 2), ("D", 1)],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );

        assert_eq!(analysis.critical_edges.len(), 4);
        assert_eq!(labels(&graph, &analysis.critical_path), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_path_links_satisfy_critical_edge_test() {
        let (_, analysis) = analyze(
            &[("A", 2), ("B", 4), ("C", 3), ("D", 1), ("E", 2), ("F", 3)],
            &[
                ("A", "B"),
                ("A", "C"),
                ("B", "D"),
                ("C", "D"),
                ("C", "E"),
                ("D", "F"),
                ("E", "F"),
            ],
        );

        assert!(!analysis.critical_path.is_empty());
        for pair in analysis.critical_path.windows(2) {
            assert!(analysis.critical_edges.contains(&(pair[0], pair[1])));
            assert_eq!(analysis.floats[pair[0] as usize], 0);
            assert_eq!(analysis.floats[pair[1] as usize], 0);
        }
    }

    #[test]
    fn test_empty_graph_has_empty_path() {
        let (_, analysis) = analyze(&[], &[]);
        assert_eq!(analysis, CriticalAnalysis::default());
    }
}
