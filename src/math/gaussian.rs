//! Gaussian distribution functions with explicit mean and standard deviation
//!
//! Rational approximations for the error function and the normal
//! quantile keep the probability calculations accurate enough for
//! lookup-table indexing while avoiding a statistics dependency.

/// Error function approximation using Abramowitz and Stegun method
///
/// Maximum absolute error is about 1.5e-7, sufficient for quantile
/// indexing into lookup tables of practical lengths.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

// Inverse CDF of the standard normal distribution using Acklam's
// rational approximation. Relative error stays below 1.2e-9 over (0, 1).
fn standard_quantile(p: f64) -> f64 {
    let a1 = -39.696_830_286_653_76_f64;
    let a2 = 220.946_098_424_520_5_f64;
    let a3 = -275.928_510_446_968_7_f64;
    let a4 = 138.357_751_867_269_f64;
    let a5 = -30.664_798_066_147_16_f64;
    let a6 = 2.506_628_277_459_239_f64;

    let b1 = -54.476_098_798_224_06_f64;
    let b2 = 161.585_836_858_040_9_f64;
    let b3 = -155.698_979_859_886_6_f64;
    let b4 = 66.801_311_887_719_72_f64;
    let b5 = -13.280_681_552_885_72_f64;

    let c1 = -7.784_894_002_430_293e-3_f64;
    let c2 = -0.322_396_458_041_136_5_f64;
    let c3 = -2.400_758_277_161_838_f64;
    let c4 = -2.549_732_539_343_734_f64;
    let c5 = 4.374_664_141_464_968_f64;
    let c6 = 2.938_163_982_698_783_f64;

    let d1 = 7.784_695_709_041_462e-3_f64;
    let d2 = 0.322_467_129_070_039_8_f64;
    let d3 = 2.445_134_137_142_996_f64;
    let d4 = 3.754_408_661_907_416_f64;

    // Breakpoints between the lower tail, central, and upper tail regions
    let p_low = 0.024_25;
    let p_high = 1.0 - p_low;

    if p < p_low {
        let q = (-2.0 * p.ln()).sqrt();
        (c1.mul_add(q, c2)
            .mul_add(q, c3)
            .mul_add(q, c4)
            .mul_add(q, c5))
        .mul_add(q, c6)
            / d1.mul_add(q, d2).mul_add(q, d3).mul_add(q, d4).mul_add(q, 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (a1.mul_add(r, a2)
            .mul_add(r, a3)
            .mul_add(r, a4)
            .mul_add(r, a5))
        .mul_add(r, a6)
            * q
            / b1.mul_add(r, b2)
                .mul_add(r, b3)
                .mul_add(r, b4)
                .mul_add(r, b5)
                .mul_add(r, 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -((c1.mul_add(q, c2)
            .mul_add(q, c3)
            .mul_add(q, c4)
            .mul_add(q, c5))
        .mul_add(q, c6)
            / d1.mul_add(q, d2).mul_add(q, d3).mul_add(q, d4).mul_add(q, 1.0))
    }
}

/// Normal distribution parameterized by mean and standard deviation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    /// Distribution mean
    pub mean: f64,
    /// Distribution standard deviation
    pub std: f64,
}

impl Gaussian {
    /// Create a distribution from mean and standard deviation
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Cumulative distribution function P(X <= x)
    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / (self.std * std::f64::consts::SQRT_2);
        0.5 * (1.0 + erf(z))
    }

    /// Quantile function (inverse CDF)
    ///
    /// Evaluates the value whose cumulative probability is `p`. The
    /// probability is clamped just inside (0, 1); callers pass bin-center
    /// quantiles that never reach the boundaries.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = p.clamp(f64::EPSILON, 1.0 - f64::EPSILON);
        self.std.mul_add(standard_quantile(p), self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf_known_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.842_700_792_949_715).abs() < 1e-6);
        assert!((erf(-1.0) + 0.842_700_792_949_715).abs() < 1e-6);
        assert!((erf(3.0) - 0.999_977_909_503_001).abs() < 1e-6);
    }

    #[test]
    fn test_quantile_median_is_mean() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        assert!((gaussian.quantile(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_standard_normal() {
        let standard = Gaussian::new(0.0, 1.0);
        // 97.5th percentile of the standard normal
        assert!((standard.quantile(0.975) - 1.959_963_984_540_054).abs() < 1e-8);
        assert!((standard.quantile(0.025) + 1.959_963_984_540_054).abs() < 1e-8);
    }

    #[test]
    fn test_cdf_quantile_round_trip() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        for i in 1..100 {
            let p = f64::from(i) / 100.0;
            let round_trip = gaussian.cdf(gaussian.quantile(p));
            // erf approximation bounds the round-trip accuracy
            assert!(
                (round_trip - p).abs() < 1e-6,
                "round trip of p = {p} gave {round_trip}"
            );
        }
    }

    #[test]
    fn test_cdf_symmetry() {
        let gaussian = Gaussian::new(0.5, 1.0 / 6.0);
        assert!((gaussian.cdf(0.5) - 0.5).abs() < 1e-9);
        assert!((gaussian.cdf(0.3) + gaussian.cdf(0.7) - 1.0).abs() < 1e-6);
    }
}
