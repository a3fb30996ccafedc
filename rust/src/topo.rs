//! Topological ordering of the activity graph (Kahn's algorithm).

use std::collections::VecDeque;

use thiserror::Error;

use crate::graph::{ActivityGraph, ActivityId};

/// The graph contains at least one directed cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency detected: only {ordered} of {total} activities could be ordered")]
pub struct CyclePresentError {
    pub ordered: usize,
    pub total: usize,
}

/// Output of [`topological_order`]. Complete iff the graph is acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalOrder {
    order: Vec<ActivityId>,
    total: usize,
}

impl TopologicalOrder {
    /// True when every activity was emitted.
    pub fn is_complete(&self) -> bool {
        self.order.len() == self.total
    }

    /// The emitted activities; a strict prefix of a valid order when incomplete.
    pub fn order(&self) -> &[ActivityId] {
        &self.order
    }

    pub fn into_result(self) -> Result<Vec<ActivityId>, CyclePresentError> {
        if self.is_complete() {
            Ok(self.order)
        } else {
            Err(CyclePresentError {
                ordered: self.order.len(),
                total: self.total,
            })
        }
    }
}

/// Order activities so that every predecessor comes before its successors.
///
/// The queue is seeded with zero in-degree activities in index order and
/// processed FIFO, so ties always go to the lowest input index. Activities on
/// or downstream of a cycle never reach in-degree zero and are left out.
pub fn topological_order(graph: &ActivityGraph) -> TopologicalOrder {
    let n = graph.len();

    let mut in_degree: Vec<usize> = graph
        .ids()
        .map(|id| graph.predecessors(id).len())
        .collect();

    let mut queue: VecDeque<ActivityId> = graph
        .ids()
        .filter(|&id| in_degree[id as usize] == 0)
        .collect();

    let mut order: Vec<ActivityId> = Vec::with_capacity(n);

    while let Some(id) = queue.pop_front() {
        order.push(id);

        for &succ in graph.successors(id) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    TopologicalOrder { order, total: n }
}
