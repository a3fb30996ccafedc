//! Critical Path Method (CPM) scheduling for activity-on-node project graphs.
//!
//! Given activities with durations and predecessor lists, computes earliest and
//! latest start/finish times, total float, the critical activities and one
//! critical path. Exposed both as a Rust library and as the `rust` Python
//! extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

mod config;
pub mod critical;
pub mod graph;
pub mod input;
pub mod interchange;
pub mod logging;
mod models;
pub mod schedule;
pub mod topo;
pub mod windows;

pub use config::CpmConfig;
pub use critical::{extract_critical_path, is_critical_edge, CriticalAnalysis};
pub use graph::{ActivityGraph, ActivityId, GraphError};
pub use input::{parse_predecessors, InputError, NO_PREDECESSORS};
pub use interchange::{EdgeEntry, InterchangeDocument, NodeEntry};
pub use models::{Activity, DatedWindow, ScheduleResult, ScheduleRow};
pub use schedule::{analyze, CpmError, Schedule};
pub use topo::{topological_order, CyclePresentError, TopologicalOrder};
pub use windows::{compute_time_windows, TimeWindow, TimeWindows};

fn to_py_err(err: CpmError) -> PyErr {
    match err {
        CpmError::Io(e) => PyOSError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Run the CPM analysis over a list of activities.
///
/// # Arguments
/// * `activities` - Activities in input order; order decides critical-path ties
/// * `config` - Run configuration (verbosity, optional calendar start date)
///
/// # Returns
/// * ScheduleResult with per-activity rows, project duration and critical path
///
/// # Raises
/// * ValueError on unknown/duplicate labels, negative durations or cycles
#[pyfunction]
#[pyo3(name = "analyze", signature = (activities, config=None))]
fn py_analyze(activities: Vec<Activity>, config: Option<CpmConfig>) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    let graph = ActivityGraph::from_activities(&activities)
        .map_err(|e| to_py_err(CpmError::from(e)))?;
    let schedule = analyze(&graph, &config).map_err(to_py_err)?;
    schedule.to_result().map_err(to_py_err)
}

/// Run the CPM analysis and render the interchange JSON document.
///
/// When `path` is given the document is also written there.
///
/// # Raises
/// * ValueError on invalid input or cycles
/// * OSError if the file cannot be written
#[pyfunction]
#[pyo3(name = "schedule_to_json", signature = (activities, config=None, path=None))]
fn py_schedule_to_json(
    activities: Vec<Activity>,
    config: Option<CpmConfig>,
    path: Option<String>,
) -> PyResult<String> {
    let config = config.unwrap_or_default();
    let graph = ActivityGraph::from_activities(&activities)
        .map_err(|e| to_py_err(CpmError::from(e)))?;
    let document = analyze(&graph, &config).map_err(to_py_err)?.to_interchange();
    if let Some(path) = path {
        document.write_to(path).map_err(to_py_err)?;
    }
    document.to_json_pretty().map_err(to_py_err)
}

/// Validate one predecessor line (`"A,B"` or `"-"`) against known labels.
///
/// # Raises
/// * ValueError if the line is blank, has an empty entry, or names unknown labels
#[pyfunction]
#[pyo3(name = "parse_predecessors")]
fn py_parse_predecessors(line: &str, labels: Vec<String>) -> PyResult<Vec<String>> {
    parse_predecessors(line, labels.as_slice()).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The pert_cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Activity>()?;
    m.add_class::<ScheduleRow>()?;
    m.add_class::<DatedWindow>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<CpmConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_analyze, m)?)?;
    m.add_function(wrap_pyfunction!(py_schedule_to_json, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_predecessors, m)?)?;

    Ok(())
}
