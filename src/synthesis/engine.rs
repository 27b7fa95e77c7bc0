//! Synthesis configuration and the per-pixel engine
//!
//! The engine holds the per-channel Gaussian fields and lookup tables,
//! built once before any pixel work. Every output pixel is then a pure
//! function of its coordinates, so channels synthesize row-parallel with
//! nothing shared but read-only references.

use crate::io::configuration::{
    DEFAULT_LUT_LENGTH, GAUSSIAN_AVERAGE, GAUSSIAN_STD, MAX_OUTPUT_DIMENSION,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::lattice::hashing::{fract, vertex_offset};
use crate::lattice::tiling::triangle_at;
use crate::math::gaussian::Gaussian;
use crate::synthesis::blend::blend_samples;
use crate::transform::gaussianize::gaussianize;
use crate::transform::lut::InverseLut;
use ndarray::Array2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Immutable parameters controlling one synthesis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    /// Target distribution for the rank transform and its inverse
    pub gaussian: Gaussian,
    /// Bin count of each channel's inverse lookup table
    pub lut_length: usize,
    /// Output raster width in pixels
    pub output_width: usize,
    /// Output raster height in pixels
    pub output_height: usize,
}

impl SynthesisConfig {
    /// Configuration with reference defaults for the given output size
    pub const fn with_output_size(output_width: usize, output_height: usize) -> Self {
        Self {
            gaussian: Gaussian::new(GAUSSIAN_AVERAGE, GAUSSIAN_STD),
            lut_length: DEFAULT_LUT_LENGTH,
            output_width,
            output_height,
        }
    }

    /// Validate parameters before any synthesis work begins
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the lookup table length is zero
    /// - an output dimension is below 2 (UV normalization divides by
    ///   dimension - 1)
    /// - an output dimension exceeds the allocation safety limit
    pub fn validate(&self) -> Result<()> {
        if self.lut_length == 0 {
            return Err(invalid_parameter(
                "lut_length",
                &self.lut_length,
                &"lookup table needs at least one bin",
            ));
        }
        for (name, dimension) in [
            ("output_width", self.output_width),
            ("output_height", self.output_height),
        ] {
            if dimension < 2 {
                return Err(invalid_parameter(
                    name,
                    &dimension,
                    &"output dimensions must be at least 2 pixels",
                ));
            }
            if dimension > MAX_OUTPUT_DIMENSION {
                return Err(invalid_parameter(
                    name,
                    &dimension,
                    &format!("exceeds maximum dimension {MAX_OUTPUT_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Precomputed per-channel state for histogram-preserving synthesis
///
/// Construction runs the rank transform and builds the inverse lookup
/// table for every channel; synthesis only reads them.
pub struct Synthesizer {
    gaussian_fields: Vec<Array2<f64>>,
    lookup_tables: Vec<InverseLut>,
    config: SynthesisConfig,
}

impl Synthesizer {
    /// Build the Gaussian fields and lookup tables for each channel
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration fails validation
    /// - any channel field contains no pixels
    pub fn from_channels(channels: &[Array2<f64>], config: SynthesisConfig) -> Result<Self> {
        config.validate()?;

        let mut gaussian_fields = Vec::with_capacity(channels.len());
        let mut lookup_tables = Vec::with_capacity(channels.len());
        for channel in channels {
            gaussian_fields.push(gaussianize(channel, &config.gaussian)?);
            lookup_tables.push(InverseLut::build(channel, &config.gaussian, config.lut_length)?);
        }

        Ok(Self {
            gaussian_fields,
            lookup_tables,
            config,
        })
    }

    /// Number of channels the synthesizer was built from
    pub fn channel_count(&self) -> usize {
        self.gaussian_fields.len()
    }

    /// The validated configuration in effect
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// The Gaussian field built for a channel
    pub fn gaussian_field(&self, channel: usize) -> Option<&Array2<f64>> {
        self.gaussian_fields.get(channel)
    }

    /// The inverse lookup table built for a channel
    pub fn lookup_table(&self, channel: usize) -> Option<&InverseLut> {
        self.lookup_tables.get(channel)
    }

    /// Reconstructed intensity at a normalized surface coordinate
    ///
    /// Pure per-point synthesis: tile, hash, sample, blend, invert.
    /// Returns None for a channel index out of range.
    pub fn sample(&self, channel: usize, u: f64, v: f64) -> Option<f64> {
        let field = self.gaussian_fields.get(channel)?;
        let lut = self.lookup_tables.get(channel)?;
        Some(sample_point(field, lut, self.config.gaussian.mean, u, v))
    }

    /// Synthesize one output channel, reporting each completed row
    ///
    /// Rows are computed in parallel and the callback may fire from
    /// worker threads, hence the Sync bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel index is out of range
    pub fn synthesize_channel_with<F>(&self, channel: usize, on_row: F) -> Result<Array2<f64>>
    where
        F: Fn() + Sync,
    {
        let field = self.gaussian_fields.get(channel).ok_or_else(|| {
            invalid_parameter("channel", &channel, &"exceeds available channel count")
        })?;
        let lut = self.lookup_tables.get(channel).ok_or_else(|| {
            invalid_parameter("channel", &channel, &"exceeds available channel count")
        })?;

        let width = self.config.output_width;
        let height = self.config.output_height;
        let max_col = (width - 1) as f64;
        let max_row = (height - 1) as f64;
        let mean = self.config.gaussian.mean;

        let rows: Vec<Vec<f64>> = (0..height)
            .into_par_iter()
            .map(|y| {
                let v = y as f64 / max_row;
                let mut row = Vec::with_capacity(width);
                for x in 0..width {
                    let u = x as f64 / max_col;
                    row.push(sample_point(field, lut, mean, u, v));
                }
                on_row();
                row
            })
            .collect();

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((height, width), flat)
            .map_err(|e| computation_error("output channel assembly", &e))
    }

    /// Synthesize every channel without progress reporting
    ///
    /// # Errors
    ///
    /// Propagates channel synthesis failures
    pub fn synthesize(&self) -> Result<Vec<Array2<f64>>> {
        (0..self.channel_count())
            .map(|channel| self.synthesize_channel_with(channel, || {}))
            .collect()
    }
}

// One pixel of one channel: locate the lattice triangle, offset the
// query into three hashed exemplar patches, blend with variance
// correction, and invert through the lookup table.
fn sample_point(field: &Array2<f64>, lut: &InverseLut, mean: f64, u: f64, v: f64) -> f64 {
    let triangle = triangle_at(u, v);

    let mut samples = [0.0_f64; 3];
    for (slot, vertex) in samples.iter_mut().zip(triangle.vertices) {
        let offset = vertex_offset(vertex);
        let sample_u = fract(u + offset[0]);
        let sample_v = fract(v + offset[1]);
        *slot = nearest_sample(field, sample_u, sample_v);
    }

    let blended = blend_samples(samples, triangle.weights, mean);
    lut.lookup(blended)
}

// Nearest-neighbor lookup by normalized UV; u selects the column, v the row
fn nearest_sample(field: &Array2<f64>, u: f64, v: f64) -> f64 {
    let (rows, cols) = field.dim();
    let row = ((v * (rows - 1) as f64).floor() as usize).min(rows - 1);
    let col = ((u * (cols - 1) as f64).floor() as usize).min(cols - 1);
    field.get((row, col)).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_channel() -> Array2<f64> {
        Array2::from_shape_vec((2, 2), vec![0.1, 0.9, 0.9, 0.1]).unwrap()
    }

    #[test]
    fn test_validation_rejects_zero_lut_length() {
        let mut config = SynthesisConfig::with_output_size(8, 8);
        config.lut_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_degenerate_output() {
        assert!(SynthesisConfig::with_output_size(1, 8).validate().is_err());
        assert!(SynthesisConfig::with_output_size(8, 1).validate().is_err());
        assert!(SynthesisConfig::with_output_size(8, 8).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_oversized_output() {
        let config = SynthesisConfig::with_output_size(MAX_OUTPUT_DIMENSION + 1, 8);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_synthesized_values_come_from_the_exemplar_range() {
        let channels = vec![checker_channel()];
        let synthesizer =
            Synthesizer::from_channels(&channels, SynthesisConfig::with_output_size(16, 16))
                .unwrap();

        let output = synthesizer.synthesize().unwrap();
        assert_eq!(output.len(), 1);
        for &value in output.first().unwrap() {
            // Lookup tables reconstruct only intensities the exemplar holds
            assert!((0.1..=0.9).contains(&value));
        }
    }

    #[test]
    fn test_synthesis_is_reproducible() {
        let channels = vec![checker_channel()];
        let config = SynthesisConfig::with_output_size(12, 9);
        let first = Synthesizer::from_channels(&channels, config)
            .unwrap()
            .synthesize()
            .unwrap();
        let second = Synthesizer::from_channels(&channels, config)
            .unwrap()
            .synthesize()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_callback_fires_per_row() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let channels = vec![checker_channel()];
        let config = SynthesisConfig::with_output_size(4, 7);
        let synthesizer = Synthesizer::from_channels(&channels, config).unwrap();

        let counter = AtomicUsize::new(0);
        synthesizer
            .synthesize_channel_with(0, || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_out_of_range_channel_rejected() {
        let channels = vec![checker_channel()];
        let synthesizer =
            Synthesizer::from_channels(&channels, SynthesisConfig::with_output_size(4, 4))
                .unwrap();
        assert!(synthesizer.synthesize_channel_with(1, || {}).is_err());
        assert!(synthesizer.sample(1, 0.5, 0.5).is_none());
    }

    #[test]
    fn test_output_dimensions_match_config() {
        let channels = vec![checker_channel()];
        let synthesizer =
            Synthesizer::from_channels(&channels, SynthesisConfig::with_output_size(10, 6))
                .unwrap();
        let output = synthesizer.synthesize_channel_with(0, || {}).unwrap();
        assert_eq!(output.dim(), (6, 10));
    }
}
