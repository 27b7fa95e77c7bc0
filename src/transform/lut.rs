//! Inverse lookup tables mapping Gaussian values back to exemplar intensities

use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::math::gaussian::Gaussian;
use ndarray::Array2;

/// Inverse transformation table for one channel
///
/// Bin i holds the exemplar intensity whose rank quantile matches the
/// cumulative probability of the Gaussian bin center (i + 0.5) / len.
/// Entries are monotonically non-decreasing because both the CDF and the
/// sorted source sequence are.
#[derive(Debug, Clone)]
pub struct InverseLut {
    values: Vec<f64>,
}

impl InverseLut {
    /// Build the table from the original (untransformed) channel field
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `length` is zero
    /// - the field contains no pixels
    pub fn build(field: &Array2<f64>, gaussian: &Gaussian, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(invalid_parameter(
                "lut_length",
                &length,
                &"lookup table needs at least one bin",
            ));
        }

        let mut sorted: Vec<f64> = field.iter().copied().collect();
        if sorted.is_empty() {
            return Err(SynthesisError::InvalidSourceData {
                reason: "channel field contains no pixels".to_string(),
            });
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let population = sorted.len();
        let mut values = Vec::with_capacity(length);
        for bin in 0..length {
            let center = (bin as f64 + 0.5) / length as f64;
            let cumulative = gaussian.cdf(center);
            // The CDF can round to exactly 1.0 at the top bins
            let index = ((cumulative * population as f64).floor() as usize).min(population - 1);
            values.push(sorted.get(index).copied().unwrap_or(0.0));
        }

        Ok(Self { values })
    }

    /// Reconstructed intensity for a Gaussian-space value
    ///
    /// The query is clamped to [0, 1] before quantization, so variance
    /// corrected blends slightly outside the unit range stay valid.
    pub fn lookup(&self, value: f64) -> f64 {
        let last = self.values.len().saturating_sub(1);
        let bin = ((value.clamp(0.0, 1.0) * last as f64).floor() as usize).min(last);
        self.values.get(bin).copied().unwrap_or(0.0)
    }

    /// Number of bins in the table
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no bins (never true for a built table)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Table entries in bin order
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_monotonically_non_decreasing() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        let field =
            Array2::from_shape_vec((2, 3), vec![0.9, 0.1, 0.5, 0.3, 0.7, 0.2]).unwrap();

        let lut = InverseLut::build(&field, &gaussian, 256).unwrap();

        assert_eq!(lut.len(), 256);
        for pair in lut.values().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_extreme_bins_reach_extreme_values() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        let field =
            Array2::from_shape_vec((2, 2), vec![0.8, 0.2, 0.6, 0.4]).unwrap();

        let lut = InverseLut::build(&field, &gaussian, 256).unwrap();

        // Bottom bins sit far below the mean, so they index the smallest
        // source value; top bins the largest
        assert!((lut.lookup(0.0) - 0.2).abs() < 1e-12);
        assert!((lut.lookup(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_clamps_out_of_range_queries() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        let field = Array2::from_elem((1, 2), 0.5);

        let lut = InverseLut::build(&field, &gaussian, 16).unwrap();

        assert!((lut.lookup(-3.0) - 0.5).abs() < 1e-12);
        assert!((lut.lookup(7.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_bin_table() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        let field = Array2::from_shape_vec((1, 3), vec![0.1, 0.5, 0.9]).unwrap();

        let lut = InverseLut::build(&field, &gaussian, 1).unwrap();

        // One bin centered at 0.5 indexes the median rank
        assert_eq!(lut.len(), 1);
        assert!((lut.lookup(0.3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_rejected() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        let field = Array2::from_elem((1, 1), 0.5);

        assert!(InverseLut::build(&field, &gaussian, 0).is_err());
    }
}
