//! RSI (Relative Strength Index) indicator

/// Calculate RSI for every bar of a price series.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss, both simple means over the trailing `period` deltas.
///
/// The first defined value is at index `period`. A window whose loss average is zero
/// has no defined RS and yields `None`.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; prices.len()];
    if period == 0 || prices.len() <= period {
        return out;
    }

    let delta = |i: usize| prices[i] - prices[i - 1];

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    // Counts keep the zero-loss test exact despite running-sum drift.
    let mut gain_count = 0usize;
    let mut loss_count = 0usize;

    for i in 1..prices.len() {
        let change = delta(i);
        if change > 0.0 {
            gain_sum += change;
            gain_count += 1;
        } else if change < 0.0 {
            loss_sum -= change;
            loss_count += 1;
        }

        if i > period {
            let old = delta(i - period);
            if old > 0.0 {
                gain_sum -= old;
                gain_count -= 1;
            } else if old < 0.0 {
                loss_sum += old;
                loss_count -= 1;
            }
        }

        if gain_count == 0 {
            gain_sum = 0.0;
        }
        if loss_count == 0 {
            loss_sum = 0.0;
        }

        if i < period || loss_count == 0 {
            continue;
        }

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;
        let rs = avg_gain / avg_loss;
        let rsi = 100.0 - (100.0 / (1.0 + rs));
        out[i] = Some(rsi.clamp(0.0, 100.0));
    }

    out
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(prices: &[f64]) -> Vec<Option<f64>> {
    calculate_rsi(prices, 14)
}
