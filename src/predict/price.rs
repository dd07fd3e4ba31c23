use std::fmt;

use super::Regressor;
use crate::data::model::FeatureVector;
use crate::error::PredictionError;

/// A predicted price on the original (linear) scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(pub f64);

impl Price {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    /// `$1,234,567.89 USD`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} USD", group_thousands(self.0))
    }
}

/// Format with two decimals and comma thousands separators.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Run the model on an encoded row and undo the `log1p` target transform.
pub fn predict_price<R: Regressor + ?Sized>(
    model: &R,
    features: &FeatureVector,
) -> Result<Price, PredictionError> {
    let log_value = model.predict(features.values())?;
    if !log_value.is_finite() {
        return Err(PredictionError::NonFiniteOutput(log_value));
    }
    let price = log_value.exp_m1();
    if !price.is_finite() {
        return Err(PredictionError::NonFinitePrice(log_value));
    }
    log::debug!("log prediction {log_value:.6} → price {price:.2}");
    Ok(Price(price))
}
