//! Rolling-window and regression helpers shared by the indicator and analysis layers.
//!
//! Every rolling function returns a vector aligned 1:1 with its input. Positions
//! inside the warm-up window are `None`.

/// Smoothing factor for an EMA with the given span.
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Single EMA step: `value * alpha + previous * (1 - alpha)`.
pub fn ema_from_previous(value: f64, previous: f64, span: usize) -> f64 {
    let alpha = ema_alpha(span);
    value * alpha + previous * (1.0 - alpha)
}

/// Exponential moving average seeded with the first value (no bias adjustment).
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            Some(p) => ema_from_previous(value, p, span),
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Neumaier-compensated running sum. Removing a value adds its negation.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Length of the run of identical values ending at each index.
fn equal_runs(values: &[f64]) -> Vec<usize> {
    let mut runs = Vec::with_capacity(values.len());
    let mut run = 0;
    for (i, &value) in values.iter().enumerate() {
        run = if i > 0 && value == values[i - 1] { run + 1 } else { 1 };
        runs.push(run);
    }
    runs
}

/// Simple rolling mean over `window` values.
///
/// A window of identical values yields that value exactly.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let runs = equal_runs(values);
    let mut sum = CompensatedSum::default();
    for (i, &value) in values.iter().enumerate() {
        sum.add(value);
        if i >= window {
            sum.add(-values[i - window]);
        }
        if i + 1 >= window {
            out[i] = if runs[i] >= window {
                Some(value)
            } else {
                Some(sum.value() / window as f64)
            };
        }
    }
    out
}

/// Rolling mean and population standard deviation over `window` values.
///
/// Sums are accumulated relative to the first value so that large price
/// levels do not swamp the variance term. A window of identical values
/// yields that value and a deviation of exactly zero.
pub fn rolling_mean_std(values: &[f64], window: usize) -> Vec<Option<(f64, f64)>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let runs = equal_runs(values);
    let shift = values[0];
    let n = window as f64;
    let mut sum = CompensatedSum::default();
    let mut sum_sq = CompensatedSum::default();
    for (i, &value) in values.iter().enumerate() {
        let x = value - shift;
        sum.add(x);
        sum_sq.add(x * x);
        if i >= window {
            let old = values[i - window] - shift;
            sum.add(-old);
            sum_sq.add(-(old * old));
        }
        if i + 1 < window {
            continue;
        }
        if runs[i] >= window {
            out[i] = Some((value, 0.0));
            continue;
        }
        let mean = sum.value() / n;
        let variance = (sum_sq.value() / n - mean * mean).max(0.0);
        out[i] = Some((mean + shift, variance.sqrt()));
    }
    out
}

/// Period-over-period fractional change. Index 0 and any non-finite ratio are `None`.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let change = (values[i] - values[i - 1]) / values[i - 1];
        out.push(change.is_finite().then_some(change));
    }
    out
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. 0 when `y` has zero variance.
    pub r_squared: f64,
}

/// Fit a line through `(x, y)` pairs. Non-finite pairs are skipped.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    let points: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &points {
        sxx += (x - mean_x).powi(2);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    // A flat series has no variance to explain.
    let (min_y, max_y) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });
    let r_squared = if max_y == min_y {
        0.0
    } else {
        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
            .sum();
        if ss_tot == 0.0 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        }
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}
