use super::price::predict_price;
use crate::data::encoder::{encode, HouseInputs, AREA_MAX, AREA_MIN};
use crate::data::model::Artifacts;
use crate::error::PredictionError;

/// Predicted price as a function of area, for one room count.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaCurve {
    pub room: u8,
    /// `[area, price]` pairs in ascending area.
    pub points: Vec<[f64; 2]>,
}

/// Evaluate `steps` evenly spaced areas across the form's bounds, keeping
/// every other input from `base` except the room count.
pub fn area_sweep(
    artifacts: &Artifacts,
    base: &HouseInputs,
    room: u8,
    steps: usize,
) -> Result<AreaCurve, PredictionError> {
    let steps = steps.max(2);
    let mut inputs = base.clone();
    inputs.room = room;

    let points = (0..steps)
        .map(|i| {
            let t = i as f64 / (steps - 1) as f64;
            inputs.area = AREA_MIN + t * (AREA_MAX - AREA_MIN);
            let features = encode(&inputs, &artifacts.schema, &artifacts.catalog);
            predict_price(&artifacts.model, &features).map(|p| [inputs.area, p.value()])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AreaCurve { room, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AddressCatalog, ColumnSchema};
    use crate::predict::{LinearModel, ModelArtifact};

    fn artifacts() -> Artifacts {
        let schema = ColumnSchema::new(vec!["Area".into(), "Room".into()]).unwrap();
        Artifacts {
            model: ModelArtifact::Linear(LinearModel {
                intercept: 0.0,
                coefficients: vec![0.01, 0.0],
                feature_names: None,
            }),
            schema,
            catalog: AddressCatalog::default(),
        }
    }

    #[test]
    fn sweep_covers_bounds_in_order() {
        let base = HouseInputs::with_defaults(&AddressCatalog::default());
        let curve = area_sweep(&artifacts(), &base, 4, 5).unwrap();
        assert_eq!(curve.room, 4);
        assert_eq!(curve.points.len(), 5);
        assert_eq!(curve.points[0][0], AREA_MIN);
        assert_eq!(curve.points[4][0], AREA_MAX);
        assert!(curve.points.windows(2).all(|w| w[0][1] < w[1][1]));
        let expected = (0.01f64 * AREA_MIN).exp_m1();
        assert!((curve.points[0][1] - expected).abs() < 1e-12);
    }

    #[test]
    fn model_errors_propagate() {
        let mut broken = artifacts();
        broken.model = ModelArtifact::Linear(LinearModel {
            intercept: 0.0,
            coefficients: vec![1.0],
            feature_names: None,
        });
        let base = HouseInputs::with_defaults(&AddressCatalog::default());
        assert!(matches!(
            area_sweep(&broken, &base, 2, 3),
            Err(PredictionError::WidthMismatch { .. })
        ));
    }
}
