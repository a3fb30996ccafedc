//! Input and output records shared by the engine and the Python bindings.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// An activity as supplied by the caller: a unique label, a duration and the
/// labels of the activities that must finish before it can start.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    #[pyo3(get, set)]
    pub label: String,
    #[pyo3(get, set)]
    pub duration: i64,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

impl Activity {
    pub fn new<S: Into<String>>(label: S, duration: i64, predecessors: &[&str]) -> Self {
        Self {
            label: label.into(),
            duration,
            predecessors: predecessors.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (label, duration, predecessors=None))]
    fn py_new(label: String, duration: i64, predecessors: Option<Vec<String>>) -> Self {
        Self {
            label,
            duration,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(label={:?}, duration={}, predecessors={:?})",
            self.label, self.duration, self.predecessors
        )
    }
}

/// One line of the CPM table for a single activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRow {
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub earliest_start: i64,
    #[pyo3(get)]
    pub earliest_finish: i64,
    #[pyo3(get)]
    pub latest_start: i64,
    #[pyo3(get)]
    pub latest_finish: i64,
    /// LS - ES.
    #[pyo3(get)]
    pub total_float: i64,
    /// Slack before the earliest successor start is pushed back.
    #[pyo3(get)]
    pub free_float: i64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ScheduleRow {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleRow(label={:?}, es={}, ef={}, ls={}, lf={}, float={})",
            self.label,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.total_float
        )
    }
}

/// Time window of an activity projected onto the calendar.
///
/// Finish dates are exclusive: an activity with ES=0 and duration 3 starting
/// on a Monday finishes at the start of Thursday.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedWindow {
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub earliest_start: NaiveDate,
    #[pyo3(get)]
    pub earliest_finish: NaiveDate,
    #[pyo3(get)]
    pub latest_start: NaiveDate,
    #[pyo3(get)]
    pub latest_finish: NaiveDate,
}

#[pymethods]
impl DatedWindow {
    fn __repr__(&self) -> String {
        format!(
            "DatedWindow(label={:?}, earliest_start={}, latest_finish={})",
            self.label, self.earliest_start, self.latest_finish
        )
    }
}

/// Everything one analysis run reports, detached from the graph it came from.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Rows in activity input order.
    #[pyo3(get)]
    pub rows: Vec<ScheduleRow>,
    #[pyo3(get)]
    pub project_duration: i64,
    #[pyo3(get)]
    pub critical_activities: Vec<String>,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub critical_edges: Vec<(String, String)>,
    /// Empty unless the run was configured with a start date.
    #[pyo3(get)]
    pub dated_windows: Vec<DatedWindow>,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(activities={}, project_duration={}, critical_path={:?})",
            self.rows.len(),
            self.project_duration,
            self.critical_path
        )
    }
}
