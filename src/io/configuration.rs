//! Pipeline constants and runtime configuration defaults

// Target distribution for the rank transform
/// Mean of the target Gaussian distribution
pub const GAUSSIAN_AVERAGE: f64 = 0.5;

/// Standard deviation of the target Gaussian distribution
///
/// One sixth places three standard deviations at each edge of the unit
/// intensity range, matching the lookup table's quantization domain
pub const GAUSSIAN_STD: f64 = 1.0 / 6.0;

/// Default bin count for inverse lookup tables
///
/// Minimum of 256 because intensity levels are 8 bits; more bins reduce
/// banding in the reconstruction
pub const DEFAULT_LUT_LENGTH: usize = 256;

// Lattice geometry
/// Hexagon cell scale applied to surface coordinates before tiling (2√3)
pub const HEX_GRID_SCALE: f64 = 3.464_101_615_137_754_4;

// Vertex hash parameters
/// Hash basis row producing the x component of a vertex offset
pub const HASH_BASIS_X: [f64; 2] = [127.1, 269.5];
/// Hash basis row producing the y component of a vertex offset
pub const HASH_BASIS_Y: [f64; 2] = [311.7, 183.3];
/// Sine amplification factor for the vertex hash
pub const HASH_SCALE: f64 = 43_758.545_3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 20_000;

/// Output size relative to the exemplar when no dimensions are given
pub const DEFAULT_OUTPUT_SCALE: usize = 2;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
