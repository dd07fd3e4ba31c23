use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::FeatureVector;

/// Column-by-column view of the row the model received.
pub fn feature_table(ui: &mut Ui, features: &FeatureVector) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(260.0)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Column");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (column, value) in features.iter() {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(column);
                    });
                    row.col(|ui: &mut Ui| {
                        // Non-zero cells stand out in a mostly one-hot row.
                        let text = RichText::new(format!("{value}"));
                        ui.label(if value == 0.0 { text.weak() } else { text.strong() });
                    });
                });
            }
        });
}
