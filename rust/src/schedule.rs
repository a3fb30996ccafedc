//! Schedule analysis pipeline: order, time windows, critical path.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::config::CpmConfig;
use crate::critical::{extract_critical_path, CriticalAnalysis};
use crate::graph::{ActivityGraph, ActivityId, GraphError};
use crate::models::{DatedWindow, ScheduleResult, ScheduleRow};
use crate::topo::{topological_order, CyclePresentError};
use crate::windows::{compute_time_windows, TimeWindow, TimeWindows};
use crate::{log_stages, log_summary};

/// Errors that end an analysis run.
#[derive(Error, Debug)]
pub enum CpmError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    CyclePresent(#[from] CyclePresentError),
    #[error("Date out of range: {offset} days after {start}")]
    DateOutOfRange { start: NaiveDate, offset: i64 },
    #[error("Failed to serialize schedule: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to write schedule: {0}")]
    Io(#[from] std::io::Error),
}

/// The outcome of one successful analysis run over a borrowed graph.
#[derive(Debug, Clone)]
pub struct Schedule<'g> {
    graph: &'g ActivityGraph,
    order: Vec<ActivityId>,
    windows: TimeWindows,
    analysis: CriticalAnalysis,
    start_date: Option<NaiveDate>,
}

/// Run the full CPM pipeline over `graph`.
///
/// Returns [`CpmError::CyclePresent`] before either pass runs if the graph is
/// not acyclic; no partial schedule is produced.
pub fn analyze<'g>(
    graph: &'g ActivityGraph,
    config: &CpmConfig,
) -> Result<Schedule<'g>, CpmError> {
    let verbosity = config.verbosity;

    let ordering = topological_order(graph);
    log_stages!(
        verbosity,
        "[order] {} of {} activities ordered",
        ordering.order().len(),
        graph.len()
    );
    let order = ordering.into_result()?;

    let windows = compute_time_windows(graph, &order, verbosity);
    log_stages!(
        verbosity,
        "[windows] project duration {}",
        windows.project_duration
    );

    let analysis = extract_critical_path(graph, &windows);
    log_summary!(
        verbosity,
        "Project duration {}, {} critical activities, critical path: {}",
        windows.project_duration,
        analysis.critical_activities.len(),
        analysis
            .critical_path
            .iter()
            .map(|&id| graph.label(id))
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    Ok(Schedule {
        graph,
        order,
        windows,
        analysis,
        start_date: config.start_date,
    })
}

impl<'g> Schedule<'g> {
    pub fn graph(&self) -> &'g ActivityGraph {
        self.graph
    }

    /// The topological order both passes ran over, as activity IDs.
    ///
    /// Public for callers that report or replay the processing order; it is
    /// the order Kahn's algorithm produced, so ties follow input order.
    pub fn order(&self) -> &[ActivityId] {
        &self.order
    }

    pub fn windows(&self) -> &TimeWindows {
        &self.windows
    }

    pub fn analysis(&self) -> &CriticalAnalysis {
        &self.analysis
    }

    pub fn window(&self, id: ActivityId) -> &TimeWindow {
        self.windows.get(id)
    }

    /// Window of the activity with `label`, if it exists.
    pub fn window_of(&self, label: &str) -> Option<&TimeWindow> {
        self.graph.id_of(label).map(|id| self.windows.get(id))
    }

    pub fn project_duration(&self) -> i64 {
        self.windows.project_duration
    }

    pub fn total_float(&self, id: ActivityId) -> i64 {
        self.analysis.floats[id as usize]
    }

    pub fn free_float(&self, id: ActivityId) -> i64 {
        self.windows.free_float(self.graph, id)
    }

    pub fn critical_activities(&self) -> Vec<&'g str> {
        self.labels_of(&self.analysis.critical_activities)
    }

    pub fn critical_path(&self) -> Vec<&'g str> {
        self.labels_of(&self.analysis.critical_path)
    }

    pub fn critical_edges(&self) -> Vec<(&'g str, &'g str)> {
        let graph = self.graph;
        self.analysis
            .critical_edges
            .iter()
            .map(|&(from, to)| (graph.label(from), graph.label(to)))
            .collect()
    }

    /// One row per activity, in input order.
    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.graph
            .ids()
            .map(|id| {
                let window = self.window(id);
                ScheduleRow {
                    label: self.graph.label(id).to_string(),
                    duration: self.graph.duration(id),
                    earliest_start: window.earliest_start,
                    earliest_finish: window.earliest_finish,
                    latest_start: window.latest_start,
                    latest_finish: window.latest_finish,
                    total_float: self.total_float(id),
                    free_float: self.free_float(id),
                    critical: window.is_critical(),
                }
            })
            .collect()
    }

    /// Calendar windows relative to the configured start date, or `None` when
    /// the run had no start date.
    pub fn dated_windows(&self) -> Result<Option<Vec<DatedWindow>>, CpmError> {
        self.start_date
            .map(|start| self.dated_windows_from(start))
            .transpose()
    }

    /// Calendar windows with time offset 0 mapped to `start`.
    pub fn dated_windows_from(&self, start: NaiveDate) -> Result<Vec<DatedWindow>, CpmError> {
        self.graph
            .ids()
            .map(|id| {
                let window = self.window(id);
                Ok(DatedWindow {
                    label: self.graph.label(id).to_string(),
                    earliest_start: offset_date(start, window.earliest_start)?,
                    earliest_finish: offset_date(start, window.earliest_finish)?,
                    latest_start: offset_date(start, window.latest_start)?,
                    latest_finish: offset_date(start, window.latest_finish)?,
                })
            })
            .collect()
    }

    /// Detach the results from the graph.
    pub fn to_result(&self) -> Result<ScheduleResult, CpmError> {
        Ok(ScheduleResult {
            rows: self.rows(),
            project_duration: self.project_duration(),
            critical_activities: owned_labels(self.critical_activities()),
            critical_path: owned_labels(self.critical_path()),
            critical_edges: self
                .critical_edges()
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            dated_windows: self.dated_windows()?.unwrap_or_default(),
        })
    }

    fn labels_of(&self, ids: &[ActivityId]) -> Vec<&'g str> {
        let graph = self.graph;
        ids.iter().map(|&id| graph.label(id)).collect()
    }
}

fn offset_date(start: NaiveDate, offset: i64) -> Result<NaiveDate, CpmError> {
    u64::try_from(offset)
        .ok()
        .and_then(|days| start.checked_add_days(Days::new(days)))
        .ok_or(CpmError::DateOutOfRange { start, offset })
}

fn owned_labels(labels: Vec<&str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}
