use eframe::egui;

use crate::data::model::Artifacts;
use crate::error::ArtifactError;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Either a usable form, or the terminal state reached when the startup
/// artifacts could not be loaded.
pub enum HousePriceApp {
    Ready(Box<AppState>),
    Failed { message: String },
}

impl HousePriceApp {
    pub fn new(loaded: Result<Artifacts, ArtifactError>) -> Self {
        match loaded {
            Ok(artifacts) => {
                log::info!("Loaded artifacts: {artifacts}");
                HousePriceApp::Ready(Box::new(AppState::new(artifacts)))
            }
            Err(e) => {
                log::error!("Failed to load artifacts: {e}");
                HousePriceApp::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl eframe::App for HousePriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            HousePriceApp::Ready(state) => state,
            HousePriceApp::Failed { message } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::startup_error(ui, message);
                });
                return;
            }
        };

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Central panel: form, result, optional chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::form(ui, state);
                    panels::result(ui, state);

                    if state.show_chart {
                        ui.add_space(12.0);
                        ui.separator();
                        ui.strong("Price vs. area");
                        plot::sensitivity_plot(ui, state);
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_artifacts_never_build_a_form() {
        let app = HousePriceApp::new(Err(ArtifactError::Missing(vec![PathBuf::from(
            "model_columns.json",
        )])));
        match app {
            HousePriceApp::Failed { message } => assert!(message.contains("model_columns.json")),
            HousePriceApp::Ready(_) => panic!("form must not be usable without artifacts"),
        }
    }
}
