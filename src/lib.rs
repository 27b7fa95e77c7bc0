//! Histogram-preserving blending for procedural tiling of an exemplar texture
//!
//! A small exemplar image is transformed into an approximately Gaussian
//! distributed representation, tiled over an arbitrary-size output using a
//! randomized hexagonal lattice with per-vertex hashing, and inverse
//! transformed back to the original color statistics via per-channel
//! lookup tables.

#![forbid(unsafe_code)]

/// Input/output operations, configuration, and error handling
pub mod io;
/// Implicit lattice queries: hexagonal tiling and vertex hashing
pub mod lattice;
/// Gaussian distribution functions
pub mod math;
/// Per-pixel output synthesis engine
pub mod synthesis;
/// Exemplar preprocessing: rank transform and inverse lookup tables
pub mod transform;

pub use io::error::{Result, SynthesisError};
