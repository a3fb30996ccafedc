//! Activity graph: activities on nodes, precedence constraints on edges.
//!
//! Activities live in a dense arena indexed by [`ActivityId`] in input order.
//! Predecessor and successor lists are deduplicated and kept sorted by index,
//! so every traversal over them is deterministic with respect to input order.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::models::Activity;

/// Dense activity index, assigned in input order.
pub type ActivityId = u32;

/// Errors raised while building an [`ActivityGraph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown activity label: {0}")]
    UnknownLabel(String),
    #[error("Duplicate activity label: {0}")]
    DuplicateLabel(String),
    #[error("Invalid duration {duration} for activity {label}: must be >= 0")]
    InvalidDuration { label: String, duration: i64 },
    #[error("Total duration overflows at activity {0}")]
    DurationOverflow(String),
}

/// Immutable precedence graph for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct ActivityGraph {
    labels: Vec<String>,
    ids_by_label: FxHashMap<String, ActivityId>,
    durations: Vec<i64>,
    predecessors: Vec<Vec<ActivityId>>,
    successors: Vec<Vec<ActivityId>>,
}

impl ActivityGraph {
    /// Build a graph from `(label, duration)` pairs and `(predecessor, successor)`
    /// label pairs.
    ///
    /// Fails without returning a partial graph if a label is repeated, a
    /// duration is negative, the durations sum past `i64::MAX`, or an edge
    /// names a label not in `activities`.
    pub fn new<A, E>(activities: &[(A, i64)], edges: &[(E, E)]) -> Result<Self, GraphError>
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        let mut builder = GraphBuilder::with_capacity(activities.len());
        for (label, duration) in activities {
            builder.add_activity(label.as_ref(), *duration)?;
        }
        for (pred, succ) in edges {
            builder.add_edge(pred.as_ref(), succ.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Build a graph from activities that carry their own predecessor lists.
    pub fn from_activities(activities: &[Activity]) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::with_capacity(activities.len());
        for activity in activities {
            builder.add_activity(&activity.label, activity.duration)?;
        }
        for activity in activities {
            for pred in &activity.predecessors {
                builder.add_edge(pred, &activity.label)?;
            }
        }
        Ok(builder.finish())
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// All activity IDs in input order.
    pub fn ids(&self) -> impl Iterator<Item = ActivityId> {
        0..self.len() as ActivityId
    }

    /// Resolve a label to its activity ID.
    pub fn id_of(&self, label: &str) -> Option<ActivityId> {
        self.ids_by_label.get(label).copied()
    }

    /// Label of an activity. Panics if `id` is out of range.
    pub fn label(&self, id: ActivityId) -> &str {
        &self.labels[id as usize]
    }

    /// Duration of an activity. Panics if `id` is out of range.
    pub fn duration(&self, id: ActivityId) -> i64 {
        self.durations[id as usize]
    }

    /// Activities with an edge into `id`, sorted by index.
    pub fn predecessors(&self, id: ActivityId) -> &[ActivityId] {
        &self.predecessors[id as usize]
    }

    /// Activities `id` has an edge into, sorted by index.
    pub fn successors(&self, id: ActivityId) -> &[ActivityId] {
        &self.successors[id as usize]
    }

    pub fn has_predecessor(&self, id: ActivityId) -> bool {
        !self.predecessors[id as usize].is_empty()
    }

    pub fn has_successor(&self, id: ActivityId) -> bool {
        !self.successors[id as usize].is_empty()
    }

    /// Activities without predecessors, in index order.
    pub fn sources(&self) -> impl Iterator<Item = ActivityId> + '_ {
        self.ids().filter(move |&id| !self.has_predecessor(id))
    }

    /// Activities without successors, in index order.
    pub fn sinks(&self) -> impl Iterator<Item = ActivityId> + '_ {
        self.ids().filter(move |&id| !self.has_successor(id))
    }

    /// Every edge as `(predecessor, successor)`, ordered by predecessor then
    /// successor index.
    pub fn edges(&self) -> impl Iterator<Item = (ActivityId, ActivityId)> + '_ {
        self.ids()
            .flat_map(move |from| self.successors(from).iter().map(move |&to| (from, to)))
    }
}

/// Accumulates activities and edges; only a fully valid set becomes a graph.
///
/// Every ES/EF/LS/LF is bounded by the sum of all durations, so keeping that
/// sum within `i64` keeps both passes free of overflow.
struct GraphBuilder {
    labels: Vec<String>,
    ids_by_label: FxHashMap<String, ActivityId>,
    durations: Vec<i64>,
    total_duration: i64,
    edges: Vec<(ActivityId, ActivityId)>,
    seen_edges: FxHashSet<(ActivityId, ActivityId)>,
}

impl GraphBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            ids_by_label: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            durations: Vec::with_capacity(capacity),
            total_duration: 0,
            edges: Vec::new(),
            seen_edges: FxHashSet::default(),
        }
    }

    fn add_activity(&mut self, label: &str, duration: i64) -> Result<(), GraphError> {
        if self.ids_by_label.contains_key(label) {
            return Err(GraphError::DuplicateLabel(label.to_string()));
        }
        if duration < 0 {
            return Err(GraphError::InvalidDuration {
                label: label.to_string(),
                duration,
            });
        }
        self.total_duration = self
            .total_duration
            .checked_add(duration)
            .ok_or_else(|| GraphError::DurationOverflow(label.to_string()))?;

        let id = self.labels.len() as ActivityId;
        self.ids_by_label.insert(label.to_string(), id);
        self.labels.push(label.to_string());
        self.durations.push(duration);
        Ok(())
    }

    fn resolve(&self, label: &str) -> Result<ActivityId, GraphError> {
        self.ids_by_label
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    fn add_edge(&mut self, pred: &str, succ: &str) -> Result<(), GraphError> {
        let from = self.resolve(pred)?;
        let to = self.resolve(succ)?;
        if self.seen_edges.insert((from, to)) {
            self.edges.push((from, to));
        }
        Ok(())
    }

    fn finish(self) -> ActivityGraph {
        let n = self.durations.len();
        let mut predecessors: Vec<Vec<ActivityId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<ActivityId>> = vec![Vec::new(); n];

        for (from, to) in self.edges {
            successors[from as usize].push(to);
            predecessors[to as usize].push(from);
        }
        for list in predecessors.iter_mut().chain(successors.iter_mut()) {
            list.sort_unstable();
        }

        ActivityGraph {
            labels: self.labels,
            ids_by_label: self.ids_by_label,
            durations: self.durations,
            predecessors,
            successors,
        }
    }
}
