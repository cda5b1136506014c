use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::FEATURE_COUNT_RANGE;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – configuration widgets
// ---------------------------------------------------------------------------

/// Render the left configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configuration");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No artifacts loaded.");
        return;
    };
    let n_employees = session.n_employees();

    // ---- Employee selector ----
    ui.strong("Employee");
    let mut employee = state.selection.employee;
    egui::ComboBox::from_id_salt("employee")
        .selected_text(format!("Employee #{employee}"))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for i in 0..n_employees {
                ui.selectable_value(&mut employee, i, format!("Employee #{i}"));
            }
        });
    if employee != state.selection.employee {
        state.select_employee(employee);
    }
    ui.add_space(8.0);

    // ---- Feature count ----
    ui.strong("Features to display");
    let mut n = state.selection.n_features;
    if ui.add(egui::Slider::new(&mut n, FEATURE_COUNT_RANGE)).changed() {
        state.set_feature_count(n);
    }
    ui.separator();

    ui.label(
        RichText::new(
            "Positive attributions push the prediction towards attrition, \
             negative ones towards retention.",
        )
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open artifacts…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} employees, {} features",
                session.source.display(),
                session.n_employees(),
                session.feature_names.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open model artifacts folder")
        .pick_folder();

    if let Some(dir) = folder {
        state.load_session(&dir);
    }
}
