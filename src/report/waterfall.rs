use super::contributions::order_by_magnitude;

/// One bar of a waterfall chart.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallStep {
    /// `"value = feature"`, or `"k other features"` for the aggregate bar.
    pub label: String,
    pub contribution: f64,
    /// Running total before and after this bar.
    pub start: f64,
    pub end: f64,
}

/// Base value plus signed contributions accumulating to the model output.
#[derive(Debug, Clone, PartialEq)]
pub struct Waterfall {
    pub base_value: f64,
    pub output_value: f64,
    /// Top to bottom: largest |contribution| first, aggregate last.
    pub steps: Vec<WaterfallStep>,
}

/// Build a waterfall for one instance.
///
/// With more features than `max_display`, the `max_display - 1` largest are
/// shown individually and the rest are folded into one "other features"
/// bar, so the chart always has at most `max_display` bars. Accumulation
/// starts at the bottom bar from `base_value`.
pub fn build_waterfall(
    feature_names: &[String],
    feature_values: &[f64],
    attributions: &[f64],
    base_value: f64,
    max_display: usize,
) -> Waterfall {
    let order = order_by_magnitude(attributions);
    let max_display = max_display.max(1);

    let (shown, rest) = if order.len() > max_display {
        order.split_at(max_display - 1)
    } else {
        (order.as_slice(), &[][..])
    };

    let mut top_down: Vec<(String, f64)> = shown
        .iter()
        .map(|&j| {
            (
                format!("{} = {}", format_value(feature_values[j]), feature_names[j]),
                attributions[j],
            )
        })
        .collect();
    if !rest.is_empty() {
        let other: f64 = rest.iter().map(|&j| attributions[j]).sum();
        top_down.push((format!("{} other features", rest.len()), other));
    }

    let mut cursor = base_value;
    let mut steps: Vec<WaterfallStep> = top_down
        .into_iter()
        .rev()
        .map(|(label, contribution)| {
            let start = cursor;
            cursor += contribution;
            WaterfallStep {
                label,
                contribution,
                start,
                end: cursor,
            }
        })
        .collect();
    steps.reverse();

    Waterfall {
        base_value,
        output_value: cursor,
        steps,
    }
}

/// Compact value formatting for bar labels.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}
