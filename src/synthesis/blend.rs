//! Variance-corrected recombination of triangle samples

/// Blend three Gaussian-space samples with barycentric weights
///
/// A weighted mix of independent Gaussians shrinks the standard
/// deviation by √(w1² + w2² + w3²); the blend is recentered around the
/// mean and divided by that factor so the result keeps the target
/// spread for every weight combination. At a lattice vertex, where the
/// weights are (1, 0, 0), the divisor is 1 and the blend equals the
/// vertex sample exactly.
pub fn blend_samples(samples: [f64; 3], weights: [f64; 3], mean: f64) -> f64 {
    let blended = weights[2].mul_add(
        samples[2],
        weights[1].mul_add(samples[1], weights[0] * samples[0]),
    );
    // Weights sum to 1 with at least one >= 1/3, so the divisor is >= 1/√3
    let correction = (weights[0].powi(2) + weights[1].powi(2) + weights[2].powi(2)).sqrt();
    (blended - mean) / correction + mean
}
