use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::report::importance::top_n;
use crate::session::Session;
use crate::state::Selection;

use super::overview::importance_bars;

// ---------------------------------------------------------------------------
// Feature importance tab: top-N bars + full ranked table
// ---------------------------------------------------------------------------

pub fn importance_tab(ui: &mut Ui, session: &Session, selection: &Selection) {
    ui.heading("Feature importance");
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!("Top {} features", selection.n_features));
            importance_bars(ui, "importance_tab_bars", top_n(&session.ranking, selection.n_features));

            ui.separator();
            ui.strong("Full ranking");
            ui.push_id("importance_table", |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .column(Column::auto().at_least(40.0))
                    .column(Column::auto().at_least(260.0))
                    .column(Column::remainder())
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });
                        header.col(|ui| {
                            ui.strong("Feature");
                        });
                        header.col(|ui| {
                            ui.strong("Mean |attribution|");
                        });
                    })
                    .body(|body| {
                        body.rows(18.0, session.ranking.len(), |mut row| {
                            let r = row.index();
                            let item = &session.ranking[r];
                            row.col(|ui| {
                                ui.label((r + 1).to_string());
                            });
                            row.col(|ui| {
                                ui.label(&item.feature);
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.4}", item.importance));
                            });
                        });
                    });
            });
        });
}
