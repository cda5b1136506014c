use std::path::Path;

use eframe::egui::{self, RichText, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{dependence, importance, individual, overview, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplainerApp {
    pub state: AppState,
}

impl ExplainerApp {
    /// Start with the artifacts found in `dir`, if any load cleanly.
    pub fn new(dir: &Path) -> Self {
        let mut state = AppState::default();
        state.load_session(dir);
        Self { state }
    }
}

impl eframe::App for ExplainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: configuration ----
        egui::SidePanel::left("config_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_none() {
                empty_view(ui);
                return;
            }
            ui.horizontal(|ui: &mut Ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.selection.tab, tab, tab.title());
                }
            });
            ui.separator();

            let Some(session) = &self.state.session else {
                return;
            };
            let selection = &self.state.selection;
            let picked = match selection.tab {
                Tab::Overview => {
                    overview::overview_tab(ui, session, selection);
                    None
                }
                Tab::Individual => {
                    individual::individual_tab(ui, session, selection);
                    None
                }
                Tab::Importance => {
                    importance::importance_tab(ui, session, selection);
                    None
                }
                Tab::Dependence => dependence::dependence_tab(ui, session, selection),
            };
            if let Some(feature) = picked {
                self.state.select_dependence_feature(feature);
            }
        });
    }
}

fn empty_view(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new("No model artifacts loaded.\nUse File → Open artifacts… to pick a folder.")
                .weak(),
        );
    });
}
