//! Per-pixel output synthesis from preprocessed exemplar channels

/// Variance-corrected recombination of triangle samples
pub mod blend;
/// Synthesis configuration and the per-pixel engine
pub mod engine;

pub use engine::{SynthesisConfig, Synthesizer};
