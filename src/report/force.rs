/// One segment of the force bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSegment {
    pub feature: String,
    pub attribution: f64,
    pub start: f64,
    pub end: f64,
}

/// Single-row force layout: positive contributions stack up to the output
/// from the left, negative ones stack away from it to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceLayout {
    pub base_value: f64,
    pub output_value: f64,
    /// Nearest to the output first.
    pub increasing: Vec<ForceSegment>,
    pub decreasing: Vec<ForceSegment>,
}

pub fn build_force(feature_names: &[String], attributions: &[f64], base_value: f64) -> ForceLayout {
    let output_value = base_value + attributions.iter().sum::<f64>();

    let mut positive: Vec<usize> = (0..attributions.len()).filter(|&j| attributions[j] > 0.0).collect();
    let mut negative: Vec<usize> = (0..attributions.len()).filter(|&j| attributions[j] < 0.0).collect();
    positive.sort_by(|&a, &b| attributions[b].total_cmp(&attributions[a]));
    negative.sort_by(|&a, &b| attributions[a].total_cmp(&attributions[b]));

    let mut cursor = output_value;
    let increasing = positive
        .into_iter()
        .map(|j| {
            let end = cursor;
            cursor -= attributions[j];
            ForceSegment {
                feature: feature_names[j].clone(),
                attribution: attributions[j],
                start: cursor,
                end,
            }
        })
        .collect();

    let mut cursor = output_value;
    let decreasing = negative
        .into_iter()
        .map(|j| {
            let start = cursor;
            cursor -= attributions[j];
            ForceSegment {
                feature: feature_names[j].clone(),
                attribution: attributions[j],
                start,
                end: cursor,
            }
        })
        .collect();

    ForceLayout {
        base_value,
        output_value,
        increasing,
        decreasing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_meet_at_the_output() {
        let names: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let phi = [0.5, -0.25, 1.0, 0.0, -1.5];
        let layout = build_force(&names, &phi, 0.0);

        assert_eq!(layout.output_value, -0.25);
        let inc: Vec<&str> = layout.increasing.iter().map(|s| s.feature.as_str()).collect();
        let dec: Vec<&str> = layout.decreasing.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(inc, vec!["c", "a"]);
        assert_eq!(dec, vec!["e", "b"]);

        assert_eq!(layout.increasing[0].end, layout.output_value);
        assert_eq!(layout.decreasing[0].start, layout.output_value);
        assert_eq!(layout.increasing[1].start, -1.75);
        assert_eq!(layout.decreasing[1].end, 1.5);
    }
}
