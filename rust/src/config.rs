//! Configuration for schedule analysis runs.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// Run configuration for the CPM engine.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=summary, 2=stages, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Calendar date of time offset 0. Enables dated windows when set.
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            verbosity: crate::logging::VERBOSITY_SILENT,
            start_date: None,
        }
    }
}

impl CpmConfig {
    /// Builder-style setter for the projection start date.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Builder-style setter for verbosity.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, start_date=None))]
    fn new(verbosity: Option<u8>, start_date: Option<NaiveDate>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            start_date: start_date.or(defaults.start_date),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmConfig(verbosity={}, start_date={:?})",
            self.verbosity, self.start_date
        )
    }
}
