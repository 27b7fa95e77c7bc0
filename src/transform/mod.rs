//! Exemplar preprocessing: rank transformation and inverse lookup tables

/// Rank-based transformation of channel fields into Gaussian space
pub mod gaussianize;
/// Lookup tables mapping Gaussian values back to exemplar intensities
pub mod lut;
