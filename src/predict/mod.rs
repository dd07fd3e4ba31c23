/// Prediction layer: serialized regressors and the log-price transform.
///
/// ```text
///   FeatureVector ──► Regressor::predict ──► log price ──► expm1 ──► Price
/// ```

pub mod linear;
pub mod price;
pub mod sweep;
pub mod tree;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::ColumnSchema;
use crate::error::PredictionError;

pub use linear::LinearModel;
pub use price::{predict_price, Price};
pub use sweep::{area_sweep, AreaCurve};
pub use tree::TreeEnsemble;

/// Anything that maps one encoded row to a single scalar.
pub trait Regressor {
    /// Number of inputs the model expects, when the artifact records it.
    fn input_width(&self) -> Option<usize>;

    fn predict(&self, features: &[f64]) -> Result<f64, PredictionError>;
}

// ---------------------------------------------------------------------------
// ModelArtifact – the serialized model loaded at startup
// ---------------------------------------------------------------------------

/// A pre-trained regressor read from JSON, tagged by `"kind"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    GradientBoosting(TreeEnsemble),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::GradientBoosting(_) => "gradient_boosting",
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            ModelArtifact::Linear(m) => m.feature_names.as_deref(),
            ModelArtifact::GradientBoosting(m) => m.feature_names.as_deref(),
        }
    }

    /// Check the model's structure and that it agrees with the column list.
    pub fn validate(&self, schema: &ColumnSchema) -> Result<()> {
        if let Some(names) = self.feature_names() {
            if names != schema.columns() {
                bail!(
                    "model was trained on {} features that do not match the {} listed columns",
                    names.len(),
                    schema.len()
                );
            }
        }
        match self {
            ModelArtifact::Linear(m) => m.validate(schema.len()),
            ModelArtifact::GradientBoosting(m) => m.validate(schema.len()),
        }
    }
}

impl Regressor for ModelArtifact {
    fn input_width(&self) -> Option<usize> {
        match self {
            ModelArtifact::Linear(m) => m.input_width(),
            ModelArtifact::GradientBoosting(m) => m.input_width(),
        }
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        match self {
            ModelArtifact::Linear(m) => m.predict(features),
            ModelArtifact::GradientBoosting(m) => m.predict(features),
        }
    }
}
