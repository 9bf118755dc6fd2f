use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{Action, Coord};

/// Convenient result alias for the parcelgrid library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A search that exhausts its frontier is not an error; it yields
/// [`SearchResult::no_path`](crate::search::SearchResult::no_path). The
/// variants below are either contract violations or rejected input.
#[derive(Debug, Error)]
pub enum Error {
    /// An action was applied to a state that cannot perform it.
    #[error("invalid transition: {action} is not applicable at {state}")]
    InvalidTransition { state: Coord, action: Action },

    /// Raised when a strategy code is not one of the eight known codes.
    #[error("unknown search strategy: {name}{}", format_suggestions(.suggestions))]
    UnknownStrategy {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a planner policy name is not recognised.
    #[error("unknown assignment policy: {name}; expected 'unique' or 'reusable'")]
    UnknownAssignmentPolicy { name: String },

    /// Raised when an action name cannot be parsed.
    #[error("unknown action: {name}")]
    UnknownAction { name: String },

    /// Raised when grid dimensions are not strictly positive.
    #[error("invalid grid dimensions {rows}x{columns}")]
    InvalidDimensions { rows: i32, columns: i32 },

    /// Raised when a coordinate lies outside `[0, rows) x [0, columns)`.
    #[error("{context} {coord} is outside the {rows}x{columns} grid")]
    CoordinateOutOfBounds {
        coord: Coord,
        rows: i32,
        columns: i32,
        context: &'static str,
    },

    /// Raised when a traffic level is outside `[0, 4]`.
    #[error("traffic level {level} on edge {from} -> {to} is outside 0..=4")]
    TrafficOutOfRange { from: Coord, to: Coord, level: u8 },

    /// Raised when a traffic edge joins two cells that are not 4-adjacent.
    #[error("traffic edge {from} -> {to} does not join adjacent cells")]
    NonAdjacentEdge { from: Coord, to: Coord },

    /// Raised when both tunnel entrances are the same cell.
    #[error("tunnel entrances must differ; both ends at {at}")]
    DegenerateTunnel { at: Coord },

    /// Raised when scenario input cannot be interpreted.
    #[error("malformed scenario: {message}")]
    MalformedScenario { message: String },

    /// Raised when a truck or customer index does not exist.
    #[error("{kind} index {index} is out of range ({len} available)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Raised when a scenario file could not be read.
    #[error("failed to read scenario from {path}: {source}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON (de)serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_lists_single_suggestion() {
        let err = Error::UnknownStrategy {
            name: "AS3".to_string(),
            suggestions: vec!["AS1".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown search strategy: AS3. Did you mean 'AS1'?"
        );
    }

    #[test]
    fn unknown_strategy_lists_multiple_suggestions() {
        let err = Error::UnknownStrategy {
            name: "GR".to_string(),
            suggestions: vec!["GR1".to_string(), "GR2".to_string()],
        };
        assert!(err.to_string().ends_with("Did you mean one of: 'GR1', 'GR2'?"));
    }

    #[test]
    fn invalid_transition_names_state_and_action() {
        let err = Error::InvalidTransition {
            state: Coord::new(1, 2),
            action: Action::Tunnel,
        };
        assert_eq!(
            err.to_string(),
            "invalid transition: tunnel is not applicable at (1,2)"
        );
    }

    #[test]
    fn read_failures_keep_the_path_and_source() {
        let err = Error::ScenarioRead {
            path: PathBuf::from("missing/scenario.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing/scenario.json"));
        assert!(std::error::Error::source(&err).is_some());

        let json: Error = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(json, Error::Json(_)));
    }
}
