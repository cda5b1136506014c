use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{HLine, Plot};

use crate::report::dependence::build_dependence;
use crate::session::Session;
use crate::state::Selection;

use super::plot::{error_panel, gradient_legend, gradient_points};

// ---------------------------------------------------------------------------
// Dependence tab: feature value vs. attribution, coloured by interaction
// ---------------------------------------------------------------------------

/// Returns the newly picked feature when the user changes the selection.
pub fn dependence_tab(ui: &mut Ui, session: &Session, selection: &Selection) -> Option<usize> {
    let mut chosen = selection.dependence_feature;
    feature_picker(ui, session, &mut chosen);

    if let Err(e) = dependence_plot(ui, session, chosen) {
        error_panel(ui, &e);
    }

    (chosen != selection.dependence_feature).then_some(chosen)
}

fn feature_picker(ui: &mut Ui, session: &Session, chosen: &mut usize) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Feature");
        let current = session
            .feature_names
            .get(*chosen)
            .map_or("", String::as_str);
        egui::ComboBox::from_id_salt("dependence_feature")
            .selected_text(current)
            .width(280.0)
            .show_ui(ui, |ui: &mut Ui| {
                for (j, name) in session.feature_names.iter().enumerate() {
                    ui.selectable_value(chosen, j, name);
                }
            });
    });
}

fn dependence_plot(ui: &mut Ui, session: &Session, feature: usize) -> crate::error::Result<()> {
    let report = build_dependence(
        &session.feature_names,
        &session.attributions,
        &session.x_test_transformed,
        feature,
    )?;

    ui.heading(format!("Dependence: {}", report.feature));
    let points: Vec<([f64; 2], Option<f64>)> = report
        .points
        .iter()
        .map(|p| ([p.value, p.attribution], p.color))
        .collect();

    Plot::new("dependence")
        .height((ui.available_height() - 60.0).max(240.0))
        .x_axis_label(report.feature.clone())
        .y_axis_label("Attribution value")
        .show(ui, |plot_ui| {
            plot_ui.hline(HLine::new(0.0).color(Color32::GRAY));
            gradient_points(plot_ui, &points, 3.0);
        });

    match &report.interaction {
        Some(name) => gradient_legend(ui, &format!("Colour: {name}")),
        None => {
            ui.label(RichText::new("No interacting feature found; points are uncoloured.").weak());
        }
    }
    ui.label(
        RichText::new(
            "Vertical spread at a fixed value shows how much the effect depends on other features.",
        )
        .weak(),
    );
    Ok(())
}
