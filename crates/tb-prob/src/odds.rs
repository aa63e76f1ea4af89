//! Conversions between probabilities and odds.

/// Odds in favor for probability `p`.
///
/// `p = 0.75` gives 3 (3:1 in favor). `odds(1)` is `+inf`.
pub fn odds(p: f64) -> f64 {
    if p == 1.0 {
        return f64::INFINITY;
    }
    p / (1.0 - p)
}

/// Probability for odds `o` in favor: `o / (o + 1)`.
pub fn probability(o: f64) -> f64 {
    if o.is_infinite() && o > 0.0 {
        return 1.0;
    }
    o / (o + 1.0)
}

/// Probability for odds given as `yes:no`.
///
/// `probability2(1, 5)` (5:1 against) is `1/6`.
pub fn probability2(yes: f64, no: f64) -> f64 {
    yes / (yes + no)
}

/// Log-odds `ln(p / (1 - p))`.
pub fn log_odds(p: f64) -> f64 {
    p.ln() - (-p).ln_1p()
}

/// Probability for log-odds `lo` (the logistic sigmoid).
///
/// Branchless core: single `exp(-|x|)`, then a select for the sign flip.
#[inline]
pub fn probability_from_log_odds(lo: f64) -> f64 {
    let e = (-lo.abs()).exp();
    let recip = 1.0 / (1.0 + e);
    // lo >= 0: 1/(1+exp(-lo)) = recip
    // lo <  0: exp(lo)/(1+exp(lo)) = e*recip
    if lo >= 0.0 { recip } else { e * recip }
}
