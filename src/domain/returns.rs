//! Period and cumulative return helpers shared by the valuator and benchmarks.
//!
//! Convention for the first observation: the period return is `None` (there is
//! no prior value to compare against) and the cumulative return is `0.0`.

/// Simple percentage change between consecutive values.
///
/// The first element is always `None`. A zero previous value yields a
/// non-finite return rather than being masked.
pub fn period_returns(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|w| Some(w[1] / w[0] - 1.0)));
    out
}

/// Compounded return since the start: `Π(1 + r) - 1`, restarting from 1.
pub fn cumulative_returns(period: &[Option<f64>]) -> Vec<f64> {
    let mut growth = 1.0_f64;
    period
        .iter()
        .map(|r| {
            if let Some(r) = r {
                growth *= 1.0 + r;
            }
            growth - 1.0
        })
        .collect()
}
