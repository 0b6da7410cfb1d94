use crate::config::AccumulationMode;

/// Reduces the collected scalar list to one output value. `None` signals
/// "no data": an empty input, a NaN, or a result of exactly zero. A true
/// zero score is not distinguishable from an unset cell in the source
/// system and both render as an empty corner.
pub fn accumulate(
    mode: AccumulationMode,
    scores: &[f64],
    percentile: Option<u8>,
) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let value = match mode {
        AccumulationMode::Best => scores.iter().copied().fold(f64::INFINITY, f64::min),
        AccumulationMode::Worst => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AccumulationMode::Average => {
            round_to_tenth(scores.iter().sum::<f64>() / scores.len() as f64)
        }
        AccumulationMode::Latest => *scores.last()?,
        // Relevant trusts the caller to have constrained selection to the
        // one round per player that matters.
        AccumulationMode::First | AccumulationMode::Relevant => *scores.first()?,
        AccumulationMode::Percentile => inverted_percentile(scores, percentile?)?,
    };
    if value == 0.0 || value.is_nan() {
        return None;
    }
    Some(value)
}

/// Golf-inverted nearest-rank percentile: lower raw scores are better, and
/// the configured `X` means "X% of scores are worse (higher) than this
/// value", the opposite of the conventional definition.
pub fn inverted_percentile(scores: &[f64], percentile: u8) -> Option<f64> {
    if scores.is_empty() || percentile > 99 {
        return None;
    }
    let sorted = sorted_ascending(scores);
    let traditional = f64::from(100 - percentile);
    let index = (traditional / 100.0 * sorted.len() as f64).ceil() as usize;
    Some(sorted[index.saturating_sub(1).min(sorted.len() - 1)])
}

/// Higher-fidelity sibling of [`inverted_percentile`]: linearly interpolates
/// between the two bracketing sorted entries and rounds to one decimal.
/// Used for venue-wide hole statistics.
pub fn inverted_percentile_interpolated(scores: &[f64], percentile: u8) -> Option<f64> {
    if scores.is_empty() || percentile > 99 {
        return None;
    }
    let sorted = sorted_ascending(scores);
    let traditional = f64::from(100 - percentile);
    let position = traditional / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (position.ceil() as usize).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    let value = sorted[lower] + (sorted[upper] - sorted[lower]) * fraction;
    Some(round_to_tenth(value))
}

fn sorted_ascending(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_is_min_and_worst_is_max() {
        let scores = [3.0, 5.0, 1.0, 4.0];
        assert_eq!(accumulate(AccumulationMode::Best, &scores, None), Some(1.0));
        assert_eq!(accumulate(AccumulationMode::Worst, &scores, None), Some(5.0));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(
            accumulate(AccumulationMode::Average, &[3.0, 4.0, 4.0], None),
            Some(3.7)
        );
    }

    #[test]
    fn latest_and_first_read_the_ends_of_the_ordered_list() {
        let scores = [4.0, 6.0, 3.0];
        assert_eq!(accumulate(AccumulationMode::Latest, &scores, None), Some(3.0));
        assert_eq!(accumulate(AccumulationMode::First, &scores, None), Some(4.0));
        assert_eq!(accumulate(AccumulationMode::Relevant, &scores, None), Some(4.0));
    }

    #[test]
    fn empty_and_zero_results_are_no_data() {
        assert_eq!(accumulate(AccumulationMode::Best, &[], None), None);
        assert_eq!(accumulate(AccumulationMode::Best, &[0.0], None), None);
        assert_eq!(accumulate(AccumulationMode::Average, &[0.0, 0.0], None), None);
    }

    #[test]
    fn percentile_is_golf_inverted() {
        let scores = [1.0, 2.0, 3.0, 4.0, 5.0];
        // X=25 means "25% are worse (higher)": the traditional 75th
        // percentile entry, not the 25th.
        assert_eq!(inverted_percentile(&scores, 25), Some(4.0));
        assert_eq!(
            accumulate(AccumulationMode::Percentile, &scores, Some(25)),
            Some(4.0)
        );
        assert_eq!(inverted_percentile(&scores, 0), Some(5.0));
        assert_eq!(inverted_percentile(&scores, 99), Some(1.0));
    }

    #[test]
    fn percentile_without_a_configured_value_is_no_data() {
        assert_eq!(
            accumulate(AccumulationMode::Percentile, &[1.0, 2.0], None),
            None
        );
    }

    #[test]
    fn interpolated_percentile_brackets_and_rounds() {
        assert_eq!(
            inverted_percentile_interpolated(&[1.0, 2.0, 3.0, 4.0, 5.0], 25),
            Some(4.0)
        );
        // traditional 50 over [2, 4] sits halfway between the entries
        assert_eq!(inverted_percentile_interpolated(&[4.0, 2.0], 50), Some(3.0));
        assert_eq!(inverted_percentile_interpolated(&[3.0], 80), Some(3.0));
    }
}
