//! Validation of predecessor specifications typed by a user.
//!
//! A line is either a comma-separated list of activity labels (`A,B`) or the
//! sentinel `-` for "no predecessors". Callers that prompt interactively loop
//! on [`InputError`] instead of accepting a partially resolved line.

use rustc_hash::FxHashSet;
use thiserror::Error;

/// Sentinel meaning "this activity has no predecessors".
pub const NO_PREDECESSORS: &str = "-";

/// Errors from [`parse_predecessors`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Empty predecessor line (use '-' for none)")]
    Empty,
    #[error("Empty label in predecessor list: {0:?}")]
    EmptyToken(String),
    #[error("Unknown activity labels: {}", .0.join(", "))]
    UnknownLabels(Vec<String>),
}

/// Parse one predecessor line against the known activity labels.
///
/// Labels are trimmed and matched case-sensitively. Repeated labels are
/// returned once, in first-seen order. Every unknown label is reported, not
/// just the first.
pub fn parse_predecessors<S: AsRef<str>>(
    line: &str,
    known_labels: &[S],
) -> Result<Vec<String>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    if line == NO_PREDECESSORS {
        return Ok(Vec::new());
    }

    let known: FxHashSet<&str> = known_labels.iter().map(|l| l.as_ref()).collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut resolved = Vec::new();
    let mut unknown = Vec::new();

    for token in line.split(',').map(str::trim) {
        if token.is_empty() {
            return Err(InputError::EmptyToken(line.to_string()));
        }
        if !known.contains(token) {
            unknown.push(token.to_string());
        } else if seen.insert(token) {
            resolved.push(token.to_string());
        }
    }

    if !unknown.is_empty() {
        return Err(InputError::UnknownLabels(unknown));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 3] = ["A", "B", "C"];

    #[test]
    fn test_sentinel_means_none() {
        assert_eq!(parse_predecessors("-", &LABELS).unwrap(), Vec::<String>::new());
        assert_eq!(parse_predecessors("  - ", &LABELS).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_comma_separated_labels() {
        assert_eq!(parse_predecessors("A,C", &LABELS).unwrap(), vec!["A", "C"]);
        assert_eq!(parse_predecessors(" B , A ", &LABELS).unwrap(), vec!["B", "A"]);
    }

    #[test]
    fn test_repeated_label_kept_once() {
        assert_eq!(parse_predecessors("A,A,B", &LABELS).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_blank_line_rejected() {
        assert_eq!(parse_predecessors("   ", &LABELS), Err(InputError::Empty));
    }

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(
            parse_predecessors("A,,B", &LABELS),
            Err(InputError::EmptyToken("A,,B".to_string()))
        );
    }

    #[test]
    fn test_all_unknown_labels_reported() {
        let err = parse_predecessors("A,x,Z", &LABELS).unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownLabels(vec!["x".to_string(), "Z".to_string()])
        );
        assert_eq!(err.to_string(), "Unknown activity labels: x, Z");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(matches!(
            parse_predecessors("a", &LABELS),
            Err(InputError::UnknownLabels(_))
        ));
    }
}
