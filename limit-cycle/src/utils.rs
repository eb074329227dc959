use crate::types::OscillatorError;

/// Convert a signed step count from an external caller into a usable count.
pub fn checked_steps(steps: i64) -> Result<usize, OscillatorError> {
    usize::try_from(steps).map_err(|_| OscillatorError::InvalidStepCount(steps))
}

/// `n` evenly spaced values from `range.0` to `range.1` inclusive.
pub fn linspace(range: (f64, f64), n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![range.0],
        _ => (0..n)
            .map(|i| range.0 + (range.1 - range.0) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}
