use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, VLine};

use crate::color::NEUTRAL;
use crate::report::importance::{top_n, ImportanceRow};
use crate::report::summary::build_beeswarm;
use crate::session::Session;
use crate::state::Selection;

use super::plot::{gradient_legend, gradient_points, labelled_rows_plot, row_y};

// ---------------------------------------------------------------------------
// Overview tab: beeswarm summary + mean |attribution| bars
// ---------------------------------------------------------------------------

pub fn overview_tab(ui: &mut Ui, session: &Session, selection: &Selection) {
    ui.heading("Model overview");
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Summary (beeswarm)");
        beeswarm_plot(&mut cols[0], session, selection.n_features);
        cols[1].strong("Feature importance");
        importance_bars(&mut cols[1], "overview_importance", top_n(&session.ranking, selection.n_features));
    });
}

fn beeswarm_plot(ui: &mut Ui, session: &Session, n: usize) {
    let rows = build_beeswarm(&session.ranking, &session.attributions, &session.x_test_transformed, n);
    let labels: Vec<String> = rows.iter().map(|r| r.feature.clone()).collect();
    let n_rows = rows.len();

    let points: Vec<([f64; 2], Option<f64>)> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            let y = row_y(n_rows, r);
            row.points
                .iter()
                .map(move |p| ([p.attribution, y + p.offset], Some(p.color)))
        })
        .collect();

    labelled_rows_plot("beeswarm", labels, "Attribution value (impact on model output)").show(
        ui,
        |plot_ui| {
            plot_ui.vline(VLine::new(0.0).color(Color32::GRAY));
            gradient_points(plot_ui, &points, 2.5);
        },
    );
    gradient_legend(ui, "Feature value");
}

/// Horizontal bars of mean |attribution|, most important on top.
pub fn importance_bars(ui: &mut Ui, id: &str, rows: &[ImportanceRow]) {
    let labels: Vec<String> = rows.iter().map(|r| r.feature.clone()).collect();
    let n = rows.len();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            Bar::new(row_y(n, r), row.importance)
                .name(&row.feature)
                .fill(NEUTRAL)
                .width(0.7)
        })
        .collect();

    labelled_rows_plot(id, labels, "mean(|attribution value|)").show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).horizontal().color(NEUTRAL));
    });
}
