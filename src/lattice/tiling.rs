//! Skewed hexagonal grid queries with barycentric triangle weights
//!
//! A fixed skew matrix maps hexagon space onto a square lattice whose
//! unit cells split into two triangles. Locating a point therefore
//! reduces to a floor, a fractional remainder, and a sign test, and the
//! fractional parts double as the barycentric weights.

use crate::io::configuration::HEX_GRID_SCALE;

// 1/√3 and 2/√3, the non-trivial entries of the skew matrix
const INV_SQRT_3: f64 = 0.577_350_269_189_625_8;
const TWO_INV_SQRT_3: f64 = 1.154_700_538_379_251_5;

/// Result of locating a surface point within the triangular lattice
///
/// Weights are non-negative and sum to 1 within floating tolerance.
/// Vertices are integer lattice IDs, valid as hash keys only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSample {
    /// Barycentric weights of the query point, one per vertex
    pub weights: [f64; 3],
    /// Lattice IDs of the enclosing triangle's vertices
    pub vertices: [[i64; 2]; 3],
}

/// Locate the lattice triangle enclosing a surface coordinate
///
/// The coordinate is scaled by the fixed hexagon factor, skewed into the
/// triangular basis, and split into an integer cell ID plus fractional
/// remainder. The remainder selects the lower or upper triangle of the
/// cell and yields the barycentric weights directly, so adjacent queries
/// agree on shared edges and no seams appear at cell boundaries.
pub fn triangle_at(u: f64, v: f64) -> TriangleSample {
    let scaled_u = u * HEX_GRID_SCALE;
    let scaled_v = v * HEX_GRID_SCALE;

    // Skew matrix rows: [1, -1/√3] and [0, 2/√3]
    let skewed_x = scaled_v.mul_add(-INV_SQRT_3, scaled_u);
    let skewed_y = scaled_v * TWO_INV_SQRT_3;

    let base = [skewed_x.floor() as i64, skewed_y.floor() as i64];
    let x_frac = skewed_x - skewed_x.floor();
    let y_frac = skewed_y - skewed_y.floor();
    let z_frac = 1.0 - x_frac - y_frac;

    if z_frac > 0.0 {
        TriangleSample {
            weights: [z_frac, y_frac, x_frac],
            vertices: [
                base,
                [base[0], base[1] + 1],
                [base[0] + 1, base[1]],
            ],
        }
    } else {
        TriangleSample {
            weights: [-z_frac, 1.0 - y_frac, 1.0 - x_frac],
            vertices: [
                [base[0] + 1, base[1] + 1],
                [base[0] + 1, base[1]],
                [base[0], base[1] + 1],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_weights_valid(sample: &TriangleSample) {
        let sum: f64 = sample.weights.iter().sum();
        assert!(
            (sum - 1.0).abs() < 1e-5,
            "weights {:?} sum to {sum}",
            sample.weights
        );
        for &w in &sample.weights {
            assert!(w >= 0.0, "negative weight in {:?}", sample.weights);
            assert!(w <= 1.0 + 1e-9, "weight above one in {:?}", sample.weights);
        }
    }

    #[test]
    fn test_weights_partition_unity_on_grid_sweep() {
        for i in 0..50 {
            for j in 0..50 {
                let u = f64::from(i) / 49.0;
                let v = f64::from(j) / 49.0;
                assert_weights_valid(&triangle_at(u, v));
            }
        }
    }

    #[test]
    fn test_negative_coordinates_supported() {
        let sample = triangle_at(-0.7, -1.3);
        assert_weights_valid(&sample);
    }

    #[test]
    fn test_triangles_use_three_distinct_vertices() {
        let sample = triangle_at(0.31, 0.77);
        assert_ne!(sample.vertices[0], sample.vertices[1]);
        assert_ne!(sample.vertices[0], sample.vertices[2]);
        assert_ne!(sample.vertices[1], sample.vertices[2]);
    }

    #[test]
    fn test_origin_lands_on_lattice_vertex() {
        let sample = triangle_at(0.0, 0.0);
        // At the origin the skewed coordinate is exactly (0, 0): the full
        // weight belongs to the base vertex
        assert!((sample.weights[0] - 1.0).abs() < 1e-9);
        assert_eq!(sample.vertices[0], [0, 0]);
    }

    #[test]
    fn test_nearby_queries_share_triangle() {
        let a = triangle_at(0.400, 0.400);
        let b = triangle_at(0.400_001, 0.400_001);
        // A negligible perturbation stays inside the same triangle
        assert_eq!(a.vertices, b.vertices);
    }
}
