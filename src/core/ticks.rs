pub const AXIS_VALUE_TARGET_SPACING_PX: f64 = 40.0;
pub const AXIS_VALUE_MIN_TICKS: usize = 2;
pub const AXIS_VALUE_MAX_TICKS: usize = 10;

/// Number of value ticks that fit `axis_span_px` at `target_spacing_px`.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Signed tick increment for `[start, stop]` split into about `count` steps.
///
/// Positive results are the step itself. Negative results encode steps below
/// one as `-1 / step` so that tick values can be produced by division, which
/// keeps values like `0.6` exact.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Round tick values covering `[start, stop]`, in ascending order.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (low, high) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let increment = tick_increment(low, high, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    if increment > 0.0 {
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = -increment;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    }
}

/// Decimal places needed to tell ticks `step` apart.
#[must_use]
pub fn tick_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    ((-step.log10() - 1e-9).ceil() as usize).min(12)
}

/// Formats a tick value with thousands separators and `step`-derived precision.
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let decimals = tick_precision(step);
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut label = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    let negative =
        value < 0.0 && formatted.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    if negative {
        label.push('-');
    }
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            label.push(',');
        }
        label.push(ch);
    }
    if let Some(fraction) = fraction {
        label.push('.');
        label.push_str(fraction);
    }
    label
}

#[cfg(test)]
mod tests {
    use super::{axis_tick_target_count, format_tick_label, linear_ticks, tick_precision};

    #[test]
    fn ticks_cover_integer_domain_with_round_steps() {
        assert_eq!(
            linear_ticks(0.0, 10.0, 5),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
    }

    #[test]
    fn ticks_below_one_stay_exact() {
        assert_eq!(
            linear_ticks(0.0, 1.0, 5),
            vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        );
    }

    #[test]
    fn reversed_domain_yields_ascending_ticks() {
        assert_eq!(linear_ticks(10.0, 0.0, 2), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(tick_precision(1_000.0), 0);
        assert_eq!(tick_precision(0.2), 1);
        assert_eq!(tick_precision(0.1), 1);
        assert_eq!(tick_precision(0.05), 2);
    }

    #[test]
    fn labels_group_thousands() {
        assert_eq!(format_tick_label(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_label(-2_500.0, 500.0), "-2,500");
        assert_eq!(format_tick_label(0.4, 0.2), "0.4");
        assert_eq!(format_tick_label(-0.0, 1.0), "0");
    }

    #[test]
    fn target_count_is_clamped() {
        assert_eq!(axis_tick_target_count(0.0, 40.0, 2, 10), 2);
        assert_eq!(axis_tick_target_count(200.0, 40.0, 2, 10), 6);
        assert_eq!(axis_tick_target_count(10_000.0, 40.0, 2, 10), 10);
    }
}
