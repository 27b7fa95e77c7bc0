//! Rank-based transformation of a channel field into Gaussian space
//!
//! Replaces every pixel value with the Gaussian quantile of its rank
//! while leaving positions untouched, so the transformed field keeps the
//! spatial structure of the exemplar but follows the target distribution.

use crate::io::error::{Result, SynthesisError};
use crate::math::gaussian::Gaussian;
use ndarray::Array2;

/// Transform a channel field into an approximately Gaussian-distributed field
///
/// Pixels are stable-sorted by value; the i-th entry of a population of
/// N is assigned the quantile (i + 0.5) / N of the target distribution
/// and written back at its original position. Equal values keep their
/// row-major order, so the output is deterministic. A single-pixel field
/// maps to exactly the distribution mean.
///
/// # Errors
///
/// Returns an error if the field contains no pixels
pub fn gaussianize(field: &Array2<f64>, gaussian: &Gaussian) -> Result<Array2<f64>> {
    let (rows, cols) = field.dim();
    let count = rows * cols;
    if count == 0 {
        return Err(SynthesisError::InvalidSourceData {
            reason: "channel field contains no pixels".to_string(),
        });
    }

    let mut ranked: Vec<(usize, usize, f64)> = Vec::with_capacity(count);
    for ((row, col), &value) in field.indexed_iter() {
        ranked.push((row, col, value));
    }
    ranked.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut output = Array2::zeros((rows, cols));
    let population = count as f64;
    for (i, &(row, col, _)) in ranked.iter().enumerate() {
        let quantile = (i as f64 + 0.5) / population;
        if let Some(cell) = output.get_mut((row, col)) {
            *cell = gaussian.quantile(quantile);
        }
    }

    Ok(output)
}
