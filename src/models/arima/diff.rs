//! Differencing helpers for ARIMA models.

/// Difference `series` `d` times.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() < 2 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Lag-`period` difference: `y[t] - y[t - period]`.
pub fn seasonal_difference(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || series.len() <= period {
        return series.to_vec();
    }
    series[period..]
        .iter()
        .zip(series)
        .map(|(now, before)| now - before)
        .collect()
}

/// Undo `d` rounds of differencing on `forecasts`, anchoring each level on
/// the end of `history`.
pub fn integrate(forecasts: &[f64], history: &[f64], d: usize) -> Vec<f64> {
    let mut result = forecasts.to_vec();
    for level in (0..d).rev() {
        let mut level_value = difference(history, level).last().copied().unwrap_or(0.0);
        for v in result.iter_mut() {
            level_value += *v;
            *v = level_value;
        }
    }
    result
}

/// Undo a lag-`period` difference on `forecasts` continuing `history`.
pub fn seasonal_integrate(forecasts: &[f64], history: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || history.len() < period {
        return forecasts.to_vec();
    }
    let mut extended = history.to_vec();
    for &f in forecasts {
        let same_season = extended[extended.len() - period];
        extended.push(same_season + f);
    }
    extended.split_off(history.len())
}

/// Suggest a differencing order (0, 1 or 2) from how much each round of
/// differencing shrinks the variance.
pub fn suggest_differencing(series: &[f64]) -> usize {
    if series.len() < 3 {
        return 0;
    }
    let var_0 = variance(series);
    let once = difference(series, 1);
    let var_1 = variance(&once);
    if var_0 <= 0.0 || var_1 / var_0 >= 0.9 {
        return 0;
    }

    let twice = difference(&once, 1);
    if twice.len() >= 2 {
        let var_2 = variance(&twice);
        if var_1 > 0.0 && var_2 / var_1 < 0.9 && var_2 < var_0 {
            return 2;
        }
    }
    1
}

/// Whether a lag-`period` difference removes more than 30% of the variance.
pub fn seasonal_differencing_helps(series: &[f64], period: usize) -> bool {
    if period < 2 || series.len() < 2 * period {
        return false;
    }
    let diffed = seasonal_difference(series, period);
    variance(&diffed) < 0.7 * variance(series)
}

fn variance(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (series.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_orders() {
        let series = [1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 0), series.to_vec());
        assert_eq!(difference(&series, 1), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(difference(&series, 2), vec![1.0, 1.0, 1.0]);
        assert!(difference(&[], 1).is_empty());
    }

    #[test]
    fn seasonal_difference_quarterly() {
        let series = [100.0, 120.0, 80.0, 90.0, 110.0, 130.0, 90.0, 100.0];
        assert_eq!(seasonal_difference(&series, 4), vec![10.0; 4]);
    }

    #[test]
    fn integrate_continues_from_history() {
        let history = [10.0, 12.0, 15.0, 19.0, 24.0];
        let integrated = integrate(&[6.0, 7.0], &history, 1);
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_second_order_extends_quadratic() {
        // Triangular numbers have constant second difference 1.
        let history = [1.0, 3.0, 6.0, 10.0, 15.0];
        let integrated = integrate(&[1.0, 1.0], &history, 2);
        assert_relative_eq!(integrated[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 28.0, epsilon = 1e-10);
    }

    #[test]
    fn seasonal_integrate_reverses_seasonal_difference() {
        let history = [1.0, 2.0, 3.0, 2.0, 3.0, 4.0];
        let forecast = seasonal_integrate(&[1.0, 1.0, 1.0, 1.0], &history, 3);
        assert_eq!(forecast, vec![3.0, 4.0, 5.0, 4.0]);
    }

    #[test]
    fn suggest_differencing_cases() {
        let stationary = [1.0, 0.5, 1.2, 0.8, 1.1, 0.9, 1.0, 1.1];
        assert_eq!(suggest_differencing(&stationary), 0);

        let trend: Vec<f64> = (0..20).map(|i| 10.0 + 2.0 * i as f64).collect();
        assert!(suggest_differencing(&trend) >= 1);
    }

    #[test]
    fn seasonal_differencing_detects_repeating_pattern() {
        let seasonal: Vec<f64> = (0..48).map(|i| [5.0, 9.0, 2.0, 7.0][i % 4]).collect();
        assert!(seasonal_differencing_helps(&seasonal, 4));
        assert!(!seasonal_differencing_helps(&seasonal[..6], 4));
    }
}
