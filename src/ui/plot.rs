use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use crate::color::SeriesColors;
use crate::data::encoder::ROOM_CHOICES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Area sensitivity plot
// ---------------------------------------------------------------------------

/// Predicted price against area, one line per room count, with every other
/// input held at the current form values.
pub fn sensitivity_plot(ui: &mut Ui, state: &mut AppState) {
    let selected_room = state.inputs.room;
    let selected_area = state.inputs.area;

    let curves = match state.curves() {
        Ok(curves) => curves,
        Err(msg) => {
            ui.colored_label(Color32::RED, format!("Cannot plot: {msg}"));
            return;
        }
    };

    let colors = SeriesColors::new(ROOM_CHOICES.len());

    Plot::new("area_sensitivity")
        .legend(Legend::default())
        .x_axis_label("Area (m²)")
        .y_axis_label("Predicted price (USD)")
        .height(280.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, curve) in curves.iter().enumerate() {
                let highlighted = curve.room == selected_room;
                let points: PlotPoints = curve.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(format!("{} rooms", curve.room))
                    .color(colors.color_for(idx, highlighted))
                    .width(if highlighted { 2.5 } else { 1.0 });
                plot_ui.line(line);
            }
            plot_ui.vline(
                VLine::new(selected_area)
                    .name("Selected area")
                    .color(Color32::LIGHT_GRAY),
            );
        });
}
