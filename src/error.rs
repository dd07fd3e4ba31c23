use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup errors
// ---------------------------------------------------------------------------

/// Fatal errors raised while loading the startup artifacts.
///
/// Either kind puts the application into its terminal error state: the form
/// is never shown and no prediction can run.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// One or more artifact files do not exist.
    #[error("Model files not found: {}. Place them in the artifact directory and restart.", display_paths(.0))]
    Missing(Vec<PathBuf>),

    /// A file exists but could not be parsed or failed validation.
    #[error("Invalid artifact {}: {cause:#}", .path.display())]
    Invalid {
        path: PathBuf,
        cause: anyhow::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

/// Recoverable errors raised inside the encode → predict path.
#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("feature vector has {actual} values but the model expects {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("tree {tree} node {node} splits on feature {feature}, which is out of range")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
    },

    #[error("tree {tree} has no node at index {node}")]
    BrokenTree { tree: usize, node: usize },

    #[error("model returned a non-finite value ({0})")]
    NonFiniteOutput(f64),

    #[error("price overflowed after the inverse log transform (log value {0})")]
    NonFinitePrice(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_every_path() {
        let err = ArtifactError::Missing(vec![
            PathBuf::from("model.json"),
            PathBuf::from("address_list.json"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("'model.json'"));
        assert!(msg.contains("'address_list.json'"));
    }

    #[test]
    fn invalid_shows_cause_chain() {
        let cause = anyhow::anyhow!("expected array").context("parsing JSON");
        let err = ArtifactError::Invalid {
            path: PathBuf::from("cols.json"),
            cause,
        };
        assert_eq!(
            err.to_string(),
            "Invalid artifact cols.json: parsing JSON: expected array"
        );
    }
}
