use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::encoder::{AREA_MAX, AREA_MIN, ROOM_CHOICES};
use crate::state::{AppState, Outcome};
use crate::ui::table;

const SUCCESS_FILL: Color32 = Color32::from_rgb(0x1f, 0x4d, 0x2e);
const ERROR_FILL: Color32 = Color32::from_rgb(0x5c, 0x1f, 0x1f);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            ui.checkbox(&mut state.show_features, "Encoded features");
            ui.checkbox(&mut state.show_chart, "Area sensitivity chart");
        });

        ui.separator();

        ui.label(format!(
            "{} model · {} features · {} neighborhoods",
            state.artifacts.model.kind(),
            state.artifacts.schema.len(),
            state.artifacts.catalog.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Input form
// ---------------------------------------------------------------------------

/// Render the house attribute form and the predict button.
pub fn form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Iranian House Price Prediction App 🏠");
    ui.label("Enter the details of a house to get a price prediction based on our machine learning model.");
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        let inputs = &mut state.inputs;
        let addresses = state.artifacts.catalog.addresses();

        cols[0].label("Area (in square meters)");
        cols[0]
            .add(
                egui::DragValue::new(&mut inputs.area)
                    .range(AREA_MIN..=AREA_MAX)
                    .speed(1.0)
                    .max_decimals(0),
            )
            .on_hover_text("Enter the total area of the house.");

        cols[0].label("Number of Rooms");
        egui::ComboBox::from_id_salt("room")
            .selected_text(inputs.room.to_string())
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for room in ROOM_CHOICES {
                    ui.selectable_value(&mut inputs.room, room, room.to_string());
                }
            })
            .response
            .on_hover_text("Select the number of bedrooms.");

        cols[0].label("Address / Neighborhood");
        egui::ComboBox::from_id_salt("address")
            .selected_text(inputs.address.as_str())
            .width(220.0)
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for address in addresses {
                    ui.selectable_value(&mut inputs.address, address.clone(), address);
                }
            })
            .response
            .on_hover_text("Select the neighborhood.");

        cols[1].add_space(24.0);
        cols[1].checkbox(&mut inputs.parking, "Has Parking?");
        cols[1].checkbox(&mut inputs.warehouse, "Has Warehouse?");
        cols[1].checkbox(&mut inputs.elevator, "Has Elevator?");
    });

    // Any edit since the last submission clears the result.
    state.sync_idle();

    ui.add_space(8.0);
    let button = egui::Button::new(RichText::new("Predict Price").strong())
        .fill(ui.visuals().selection.bg_fill);
    if ui.add(button).clicked() {
        state.submit();
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Render the last submission's price or error, if any.
pub fn result(ui: &mut Ui, state: &AppState) {
    let Some(outcome) = state.outcome() else {
        return;
    };

    ui.add_space(8.0);
    match outcome {
        Outcome::Predicted { price, features } => {
            egui::Frame::group(ui.style())
                .fill(SUCCESS_FILL)
                .show(ui, |ui: &mut Ui| {
                    ui.label(
                        RichText::new(format!("Predicted Price: {price}"))
                            .size(18.0)
                            .color(Color32::WHITE),
                    );
                });

            if state.show_features {
                ui.add_space(8.0);
                ui.strong("Encoded features");
                table::feature_table(ui, features);
            }
        }
        Outcome::Errored(msg) => {
            egui::Frame::group(ui.style())
                .fill(ERROR_FILL)
                .show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(msg).color(Color32::WHITE));
                });
        }
    }
}

// ---------------------------------------------------------------------------
// Startup failure
// ---------------------------------------------------------------------------

/// The only thing drawn when the artifacts failed to load.
pub fn startup_error(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        egui::Frame::group(ui.style())
            .fill(ERROR_FILL)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(message).color(Color32::WHITE).size(16.0));
            });
    });
}
