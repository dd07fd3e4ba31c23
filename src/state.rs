use crate::data::encoder::{encode, HouseInputs, ROOM_CHOICES};
use crate::data::model::{Artifacts, FeatureVector};
use crate::predict::{area_sweep, predict_price, AreaCurve, Price};

/// Number of sampled areas per sensitivity curve.
const SWEEP_STEPS: usize = 98;

// ---------------------------------------------------------------------------
// Outcome of a submission
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Predicted {
        price: Price,
        features: FeatureVector,
    },
    Errored(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The form is either Idle (`outcome` is `None`) or showing the result of the
/// last submission. Editing any input after a submission drops back to Idle.
pub struct AppState {
    /// Startup artifacts, read-only for the life of the process.
    pub artifacts: Artifacts,

    /// Current form values.
    pub inputs: HouseInputs,

    /// Result of the last submission, with the inputs it was computed from.
    outcome: Option<(HouseInputs, Outcome)>,

    /// Whether the encoded feature table is shown under the result.
    pub show_features: bool,

    /// Whether the area sensitivity chart is shown.
    pub show_chart: bool,

    /// Cached sensitivity curves and the inputs they were computed for.
    curves: Option<(HouseInputs, Result<Vec<AreaCurve>, String>)>,
}

impl AppState {
    pub fn new(artifacts: Artifacts) -> Self {
        let inputs = HouseInputs::with_defaults(&artifacts.catalog);
        Self {
            artifacts,
            inputs,
            outcome: None,
            show_features: false,
            show_chart: false,
            curves: None,
        }
    }

    /// Encode the current inputs and run the model.
    ///
    /// Prediction failures are kept as an inline message; the form stays
    /// usable for another attempt.
    pub fn submit(&mut self) {
        let features = encode(
            &self.inputs,
            &self.artifacts.schema,
            &self.artifacts.catalog,
        );
        let outcome = match predict_price(&self.artifacts.model, &features) {
            Ok(price) => {
                log::info!("Predicted {price} for {:?}", self.inputs);
                Outcome::Predicted { price, features }
            }
            Err(e) => {
                log::error!("Prediction failed: {e}");
                Outcome::Errored(format!("An error occurred during prediction: {e}"))
            }
        };
        self.outcome = Some((self.inputs.clone(), outcome));
    }

    /// Return to Idle if the form was edited after the last submission.
    pub fn sync_idle(&mut self) {
        if matches!(&self.outcome, Some((submitted, _)) if *submitted != self.inputs) {
            self.outcome = None;
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref().map(|(_, o)| o)
    }

    /// Sensitivity curves for every room count, recomputed only when the
    /// inputs change.
    pub fn curves(&mut self) -> &Result<Vec<AreaCurve>, String> {
        if matches!(&self.curves, Some((at, _)) if *at != self.inputs) {
            self.curves = None;
        }
        let artifacts = &self.artifacts;
        let inputs = &self.inputs;
        &self
            .curves
            .get_or_insert_with(|| (inputs.clone(), sweep_all_rooms(artifacts, inputs)))
            .1
    }
}

fn sweep_all_rooms(artifacts: &Artifacts, inputs: &HouseInputs) -> Result<Vec<AreaCurve>, String> {
    ROOM_CHOICES
        .iter()
        .map(|&room| area_sweep(artifacts, inputs, room, SWEEP_STEPS))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())
}
