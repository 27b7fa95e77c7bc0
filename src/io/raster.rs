//! Exemplar loading and output raster assembly
//!
//! Converts between 8-bit RGB images on disk and the per-channel
//! floating point fields the pipeline operates on. Everything here is
//! glue; the synthesis components never touch image formats.

use crate::io::error::{Result, SynthesisError};
use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array2;
use std::path::Path;

/// An exemplar image split into normalized channel fields
#[derive(Debug, Clone)]
pub struct Exemplar {
    channels: Vec<Array2<f64>>,
    width: usize,
    height: usize,
}

impl Exemplar {
    /// Load an RGB exemplar and split it into [0, 1] channel fields
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the file cannot be opened or decoded
    /// - the image has zero pixels
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Self::from_rgb_image(&img.to_rgb8())
    }

    /// Split a decoded RGB image into normalized channel fields
    ///
    /// # Errors
    ///
    /// Returns an error if the image has zero pixels
    pub fn from_rgb_image(rgb: &RgbImage) -> Result<Self> {
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        if width == 0 || height == 0 {
            return Err(SynthesisError::InvalidSourceData {
                reason: "exemplar image has no pixels".to_string(),
            });
        }

        let mut channels = vec![Array2::zeros((height, width)); 3];
        for (x, y, pixel) in rgb.enumerate_pixels() {
            for (c, channel) in channels.iter_mut().enumerate() {
                let value = pixel.0.get(c).copied().unwrap_or(0);
                if let Some(cell) = channel.get_mut((y as usize, x as usize)) {
                    *cell = f64::from(value) / 255.0;
                }
            }
        }

        Ok(Self {
            channels,
            width,
            height,
        })
    }

    /// The normalized channel fields in red, green, blue order
    pub fn channels(&self) -> &[Array2<f64>] {
        &self.channels
    }

    /// Exemplar width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Exemplar height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }
}

/// Assemble channel rasters into an RGB image and save it as PNG
///
/// Values are clamped to [0, 1] and quantized to 8 bits. The parent
/// directory is created when missing.
///
/// # Errors
///
/// Returns an error if:
/// - the channel count is not 3 or the channel shapes disagree
/// - the parent directory cannot be created
/// - the image cannot be saved to the specified path
pub fn export_channels_as_png(channels: &[Array2<f64>], output_path: &str) -> Result<()> {
    let [red, green, blue] = channels else {
        return Err(SynthesisError::InvalidSourceData {
            reason: format!("expected 3 output channels, got {}", channels.len()),
        });
    };

    let (height, width) = red.dim();
    if green.dim() != (height, width) || blue.dim() != (height, width) {
        return Err(SynthesisError::InvalidSourceData {
            reason: "output channels disagree on dimensions".to_string(),
        });
    }

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let position = (y as usize, x as usize);
        *pixel = Rgb([
            quantize(red.get(position).copied().unwrap_or(0.0)),
            quantize(green.get(position).copied().unwrap_or(0.0)),
            quantize(blue.get(position).copied().unwrap_or(0.0)),
        ]);
    }

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}

// 8-bit quantization with clamping at the unit range boundaries
fn quantize(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
