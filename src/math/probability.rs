/// Shannon entropy (in bits) of a discrete distribution given by raw weights
///
/// With `W` the total weight this is `log2(W) - sum(w * log2(w)) / W`, which
/// avoids normalising each weight first. A single positive weight yields 0.
/// Non-positive weights are skipped; an empty or all-zero input yields 0.
pub fn weighted_entropy(weights: impl IntoIterator<Item = f64>) -> f64 {
    let mut total = 0.0_f64;
    let mut weighted_logs = 0.0_f64;
    for weight in weights {
        if weight > 0.0 {
            total += weight;
            weighted_logs += weight * weight.log2();
        }
    }

    if total <= 0.0 {
        return 0.0;
    }
    total.log2() - weighted_logs / total
}

/// Index drawn from `weights` given a uniform sample `unit` in `[0, 1)`
///
/// Walks the cumulative distribution; the last index absorbs any rounding
/// slack. Returns 0 for empty or all-zero weights.
pub fn cumulative_choice(weights: &[f64], unit: f64) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let mut remaining = unit * total;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        remaining -= weight;
        if remaining < 0.0 {
            return i;
        }
    }
    weights
        .iter()
        .rposition(|&weight| weight > 0.0)
        .unwrap_or(0)
}
