use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text, VLine};

use crate::color::{contribution_color, risk_color, NEGATIVE, POSITIVE};
use crate::report::force::{ForceLayout, ForceSegment};
use crate::report::individual::{build_individual, class_label, IndividualReport};
use crate::report::waterfall::Waterfall;
use crate::session::Session;
use crate::state::Selection;

use super::plot::{error_panel, labelled_rows_plot, row_y};

// ---------------------------------------------------------------------------
// Individual prediction tab
// ---------------------------------------------------------------------------

pub fn individual_tab(ui: &mut Ui, session: &Session, selection: &Selection) {
    let report = match build_individual(session, selection.employee, selection.n_features) {
        Ok(report) => report,
        Err(e) => {
            error_panel(ui, &e);
            return;
        }
    };

    ui.heading(format!("Employee #{}", report.index));
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics_row(ui, &report);
            ui.separator();

            egui::CollapsingHeader::new("Employee data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| raw_values_table(ui, &report));

            ui.strong("Waterfall: feature contributions");
            waterfall_plot(ui, &report.waterfall);

            ui.strong("Force plot");
            force_plot(ui, &report.force);

            ui.strong("Top factors for this prediction");
            top_factors_table(ui, &report);
        });
}

fn metric(ui: &mut Ui, caption: &str, value: String, color: Color32) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(caption).weak());
        ui.label(RichText::new(value).heading().color(color));
    });
}

fn metrics_row(ui: &mut Ui, report: &IndividualReport) {
    let strong = ui.visuals().strong_text_color();
    let plain = ui.visuals().text_color();
    let actual = report
        .actual_class
        .map_or_else(|| "unknown".to_string(), |c| class_label(c).to_string());
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Prediction", report.predicted_label().to_string(), strong);
        metric(
            &mut cols[1],
            "Attrition probability",
            format!("{:.1}%", report.probability * 100.0),
            strong,
        );
        metric(&mut cols[2], "Risk", report.risk.to_string(), risk_color(report.risk));
        metric(&mut cols[3], "Actual outcome", actual, plain);
    });
}

fn raw_values_table(ui: &mut Ui, report: &IndividualReport) {
    ui.push_id("raw_values", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(200.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Column");
                });
                header.col(|ui| {
                    ui.strong(format!("Employee #{}", report.index));
                });
            })
            .body(|mut body| {
                for (name, value) in &report.raw_values {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(name);
                        });
                        row.col(|ui| {
                            ui.label(value);
                        });
                    });
                }
            });
    });
}

fn waterfall_plot(ui: &mut Ui, waterfall: &Waterfall) {
    let labels: Vec<String> = waterfall.steps.iter().map(|s| s.label.clone()).collect();
    let n = waterfall.steps.len();
    let bars: Vec<Bar> = waterfall
        .steps
        .iter()
        .enumerate()
        .map(|(r, step)| {
            Bar::new(row_y(n, r), step.contribution)
                .base_offset(step.start)
                .fill(contribution_color(step.contribution))
                .name(&step.label)
                .width(0.7)
        })
        .collect();
    let annotations: Vec<(f64, f64, f64)> = waterfall
        .steps
        .iter()
        .enumerate()
        .map(|(r, s)| (s.start.max(s.end), row_y(n, r), s.contribution))
        .collect();

    let x_label = format!(
        "E[f(x)] = {:.3}   →   f(x) = {:.3}",
        waterfall.base_value, waterfall.output_value
    );
    labelled_rows_plot("waterfall", labels, &x_label).show(ui, |plot_ui| {
        plot_ui.vline(VLine::new(waterfall.base_value).color(Color32::GRAY).name("E[f(x)]"));
        plot_ui.vline(VLine::new(waterfall.output_value).color(Color32::DARK_GRAY).name("f(x)"));
        plot_ui.bar_chart(BarChart::new(bars).horizontal());
        for (x, y, contribution) in annotations {
            plot_ui.text(
                Text::new(PlotPoint::new(x, y), format!(" {contribution:+.3}"))
                    .anchor(Align2::LEFT_CENTER)
                    .color(contribution_color(contribution)),
            );
        }
    });
}

fn force_plot(ui: &mut Ui, force: &ForceLayout) {
    let segment = |s: &ForceSegment, color: Color32| {
        Bar::new(0.0, s.end - s.start)
            .base_offset(s.start)
            .fill(color)
            .name(format!("{} ({:+.3})", s.feature, s.attribution))
            .width(0.5)
    };
    let increasing: Vec<Bar> = force.increasing.iter().map(|s| segment(s, POSITIVE)).collect();
    let decreasing: Vec<Bar> = force.decreasing.iter().map(|s| segment(s, NEGATIVE)).collect();

    // Only the three strongest segments per side get a label.
    let labels: Vec<(f64, f64, String, Color32)> = force
        .increasing
        .iter()
        .take(3)
        .map(|s| ((s.start + s.end) / 2.0, 0.45, s.feature.clone(), POSITIVE))
        .chain(
            force
                .decreasing
                .iter()
                .take(3)
                .map(|s| ((s.start + s.end) / 2.0, -0.45, s.feature.clone(), NEGATIVE)),
        )
        .collect();

    Plot::new("force")
        .height(140.0)
        .show_axes([true, false])
        .show_grid([true, false])
        .include_y(-0.8)
        .include_y(0.8)
        .x_axis_label(format!(
            "base value {:.3}   →   f(x) = {:.3}",
            force.base_value, force.output_value
        ))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(increasing).horizontal().name("increases risk"));
            plot_ui.bar_chart(BarChart::new(decreasing).horizontal().name("decreases risk"));
            plot_ui.vline(VLine::new(force.output_value).color(Color32::BLACK).width(2.0));
            plot_ui.vline(VLine::new(force.base_value).color(Color32::GRAY));
            for (x, y, text, color) in labels {
                plot_ui.text(Text::new(PlotPoint::new(x, y), text).color(color));
            }
        });
}

fn top_factors_table(ui: &mut Ui, report: &IndividualReport) {
    ui.push_id("top_factors", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(260.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Feature");
                });
                header.col(|ui| {
                    ui.strong("Attribution");
                });
                header.col(|ui| {
                    ui.strong("Impact");
                });
            })
            .body(|mut body| {
                for item in &report.top {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&item.feature);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:+.4}", item.attribution));
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(item.direction.to_string())
                                    .color(contribution_color(item.attribution)),
                            );
                        });
                    });
                }
            });
    });
}
