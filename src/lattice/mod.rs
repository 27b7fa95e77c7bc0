//! Implicit lattice queries for seamless tiling
//!
//! The tiling lattice is never materialized: triangle vertices and their
//! pseudo-random offsets are computed on demand from surface coordinates,
//! keeping memory bounded regardless of output size.

/// Deterministic per-vertex hashing for tile decorrelation
pub mod hashing;
/// Skewed hexagonal grid queries with barycentric weights
pub mod tiling;

pub use tiling::TriangleSample;
