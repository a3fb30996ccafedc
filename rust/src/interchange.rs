//! JSON interchange document for external graph visualization.
//!
//! Layout:
//! ```json
//! {
//!   "nodes": [{"id": "A", "duration": 2}],
//!   "edges": [{"from": "A", "to": "B"}],
//!   "critical_path": ["A", "B"],
//!   "critical_edges": [{"from": "A", "to": "B"}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::ActivityId;
use crate::schedule::{CpmError, Schedule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: String,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
}

/// Activities, precedence edges, the reported critical path and all
/// critical edges of one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterchangeDocument {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
    pub critical_path: Vec<String>,
    pub critical_edges: Vec<EdgeEntry>,
}

impl InterchangeDocument {
    pub fn from_schedule(schedule: &Schedule<'_>) -> Self {
        let graph = schedule.graph();
        let edge_entry = |(from, to): (ActivityId, ActivityId)| EdgeEntry {
            from: graph.label(from).to_string(),
            to: graph.label(to).to_string(),
        };

        Self {
            nodes: graph
                .ids()
                .map(|id| NodeEntry {
                    id: graph.label(id).to_string(),
                    duration: graph.duration(id),
                })
                .collect(),
            edges: graph.edges().map(edge_entry).collect(),
            critical_path: schedule
                .critical_path()
                .into_iter()
                .map(str::to_string)
                .collect(),
            critical_edges: schedule
                .analysis()
                .critical_edges
                .iter()
                .copied()
                .map(edge_entry)
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, CpmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CpmError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the pretty-printed document to `path`, replacing any existing file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), CpmError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }
}

impl Schedule<'_> {
    pub fn to_interchange(&self) -> InterchangeDocument {
        InterchangeDocument::from_schedule(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CpmConfig;
    use crate::graph::{ActivityGraph, ActivityId};
    use crate::schedule::analyze;
    use serde_json::{json, Value};

    fn diamond() -> ActivityGraph {
        ActivityGraph::new(
            &[("A", 2), ("B", 3), ("C", 1), ("D", 2)],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        )
        .unwrap()
    }

    #[test]
    fn test_document_shape() {
        let graph = diamond();
        let schedule = analyze(&graph, &CpmConfig::default()).unwrap();
        let json = schedule.to_interchange().to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            json!({
                "nodes": [
                    {"id": "A", "duration": 2},
                    {"id": "B", "duration": 3},
                    {"id": "C", "duration": 1},
                    {"id": "D", "duration": 2}
                ],
                "edges": [
                    {"from": "A", "to": "B"},
                    {"from": "A", "to": "C"},
                    {"from": "B", "to": "D"},
                    {"from": "C", "to": "D"}
                ],
                "critical_path": ["A", "B", "D"],
                "critical_edges": [
                    {"from": "A", "to": "B"},
                    {"from": "B", "to": "D"}
                ]
            })
        );
    }

    #[test]
    fn test_parse_document() {
        let doc = InterchangeDocument::from_json(
            r#"{"nodes": [{"id": "X", "duration": 0}], "edges": [],
                "critical_path": ["X"], "critical_edges": []}"#,
        )
        .unwrap();

        assert_eq!(
            doc.nodes,
            vec![NodeEntry {
                id: "X".to_string(),
                duration: 0
            }]
        );
        assert_eq!(doc.critical_path, vec!["X"]);
    }

    #[test]
    fn test_malformed_document_is_serialization_error() {
        let err = InterchangeDocument::from_json("{\"nodes\": 3}").unwrap_err();
        assert!(matches!(err, CpmError::Serialization(_)));
    }

    #[test]
    fn test_write_to_file() {
        let graph = diamond();
        let schedule = analyze(&graph, &CpmConfig::default()).unwrap();
        let path =
            std::env::temp_dir().join(format!("pert_cpm_graph_{}.json", std::process::id()));

        schedule.to_interchange().write_to(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(written.ends_with("}\n"));
        assert_eq!(
            InterchangeDocument::from_json(&written).unwrap(),
            schedule.to_interchange()
        );
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let graph = diamond();
        let schedule = analyze(&graph, &CpmConfig::default()).unwrap();
        let path = std::env::temp_dir()
            .join("pert_cpm_missing_dir")
            .join("nested")
            .join("graph.json");

        let err = schedule.to_interchange().write_to(path).unwrap_err();
        assert!(matches!(err, CpmError::Io(_)));
    }
}
