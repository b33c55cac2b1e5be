// the collection of utility functions for sampling and scanning evaluated vectors
use ndarray::Array1;

/// `num_values` evenly spaced points from `start` to `end`, both ends included.
///
/// The points are interpolated as `start*(1-t) + end*t`, so every point of a grid between
/// two finite ends is finite even when `end - start` overflows, and the last point is
/// `end` itself.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Array1<f64> {
    match num_values {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let last = num_values - 1;
            Array1::from_iter((0..num_values).map(|i| {
                if i == last {
                    end
                } else {
                    let t = i as f64 / last as f64;
                    start * (1.0 - t) + end * t
                }
            }))
        }
    }
}

/// index of the first NaN or infinite element
pub fn first_non_finite(values: &Array1<f64>) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}

/// index i of the first pair (values[i], values[i+1]) with strictly opposite signs
pub fn first_sign_change(values: &Array1<f64>) -> Option<usize> {
    values
        .iter()
        .zip(values.iter().skip(1))
        .position(|(&a, &b)| (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0))
}
