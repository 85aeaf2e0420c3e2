/**
Sorts a copy of `values` in ascending order using the IEEE total order,
so any NaN ends up at one end rather than splitting the finite values.
 */
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted_values = values.to_vec();
    sorted_values.sort_by(f64::total_cmp);
    sorted_values
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/**
Calculates the median of a slice of f64 values.

## Arguments
- `values`: A slice of f64 values.

## Returns
The median of the values, or `None` if the slice is empty.
 */
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/**
Calculates the sample standard deviation (n - 1 denominator) of a slice of f64 values.

## Arguments
- `values`: A slice of f64 values.

## Returns
The standard deviation, or `None` if calculation is not possible (fewer than two values, or any non-finite value).
 */
pub fn std_deviation(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mean = values.iter().sum::<f64>() / (n as f64);

    let variance = values
        .iter()
        .map(|value| {
            let diff = mean - value;
            diff * diff
        })
        .sum::<f64>()
        / ((n - 1) as f64);

    Some(variance.sqrt())
}

/**
Quantile of already sorted values using linear interpolation between order
statistics (the default "type 7" definition).

## Arguments
- `sorted_values`: Values in ascending order.
- `p`: Probability in `[0, 1]`.

## Returns
The interpolated quantile, or `None` for an empty slice or `p` outside `[0, 1]`.
 */
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> Option<f64> {
    if sorted_values.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let n = sorted_values.len();
    if n == 1 {
        return Some(sorted_values[0]);
    }
    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        Some(sorted_values[lower])
    } else {
        let frac = rank - lower as f64;
        Some(sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac)
    }
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
