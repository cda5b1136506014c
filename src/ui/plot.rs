use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{uniform_grid_spacer, GridMark, Plot, PlotPoints, PlotUi, Points};

use crate::color::{bucket_color, gradient_bucket, GRADIENT_STEPS, MISSING};
use crate::error::ExplainError;

// ---------------------------------------------------------------------------
// Row-labelled plots (bar charts, beeswarm)
// ---------------------------------------------------------------------------

/// Vertical position of row `r` out of `n`; row 0 is drawn at the top.
pub fn row_y(n: usize, r: usize) -> f64 {
    (n - 1 - r) as f64
}

/// A static plot whose y axis shows `labels`, one per integer row.
pub fn labelled_rows_plot<'a>(id: &str, labels: Vec<String>, x_label: &str) -> Plot<'a> {
    let n = labels.len();
    Plot::new(id)
        .x_axis_label(x_label.to_string())
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let v = mark.value;
            if (v - v.round()).abs() > 1e-6 || v < 0.0 {
                return String::new();
            }
            let r = v.round() as usize;
            if r >= n {
                return String::new();
            }
            labels[n - 1 - r].clone()
        })
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_min_width(200.0)
        .include_y(-0.6)
        .include_y(n as f64 - 0.4)
        .height((28.0 * n as f32).max(220.0))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// Draw dots coloured along the blue→red value gradient. Dots without a
/// colour value are grey.
pub fn gradient_points(plot_ui: &mut PlotUi, points: &[([f64; 2], Option<f64>)], radius: f32) {
    let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); GRADIENT_STEPS];
    let mut uncoloured = Vec::new();
    for (xy, color) in points {
        match color {
            Some(t) => buckets[gradient_bucket(*t)].push(*xy),
            None => uncoloured.push(*xy),
        }
    }

    if !uncoloured.is_empty() {
        plot_ui.points(Points::new(PlotPoints::from(uncoloured)).color(MISSING).radius(radius));
    }
    for (b, xy) in buckets.into_iter().enumerate() {
        if xy.is_empty() {
            continue;
        }
        plot_ui.points(
            Points::new(PlotPoints::from(xy))
                .color(bucket_color(b))
                .radius(radius),
        );
    }
}

/// A small "low ─ high" legend for the value gradient.
pub fn gradient_legend(ui: &mut Ui, caption: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(caption).weak());
        ui.label(RichText::new("low").color(bucket_color(0)));
        for b in 1..GRADIENT_STEPS - 1 {
            ui.label(RichText::new("■").color(bucket_color(b)));
        }
        ui.label(RichText::new("high").color(bucket_color(GRADIENT_STEPS - 1)));
    });
}

// ---------------------------------------------------------------------------
// Errors shown in place of a panel
// ---------------------------------------------------------------------------

pub fn error_panel(ui: &mut Ui, err: &ExplainError) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
    });
}
