use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::error::PredictionError;

/// Ordinary linear regression: `intercept + Σ coefficient * feature`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn validate(&self, width: usize) -> Result<()> {
        if self.coefficients.is_empty() {
            bail!("linear model has no coefficients");
        }
        if self.coefficients.len() != width {
            bail!(
                "linear model has {} coefficients but the column list has {width} entries",
                self.coefficients.len()
            );
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn input_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::WidthMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LinearModel {
        LinearModel {
            intercept: 1.0,
            coefficients: vec![0.5, -2.0],
            feature_names: None,
        }
    }

    #[test]
    fn predicts_dot_product_plus_intercept() {
        assert_eq!(model().predict(&[4.0, 1.0]), Ok(1.0));
    }

    #[test]
    fn rejects_wrong_width() {
        assert_eq!(
            model().predict(&[1.0]),
            Err(PredictionError::WidthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn validate_checks_coefficient_count() {
        assert!(model().validate(2).is_ok());
        assert!(model().validate(3).is_err());
        let empty = LinearModel {
            intercept: 0.0,
            coefficients: Vec::new(),
            feature_names: None,
        };
        assert!(empty.validate(0).is_err());
    }
}
