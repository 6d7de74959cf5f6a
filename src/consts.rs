//! This file provides constants that are used for matrix multiplication and color space conversion,
//! along with a function for computing inverses. The reason for this method of doing things instead
//! of tabulating every inverse by hand is because tabulated inverses become slightly off, allowing
//! for errors to slowly creep in even when doing things that should not change the result at all,
//! e.g., converting to CAM16 and back again. Thus, inverses and RGB matrices are computed once, at
//! first use, from the defining values.

use rulinalg::matrix::Matrix;
use rulinalg::vector::Vector;

use illuminants::{xy_to_xyz, Illuminant};

/// Not safe for general use. The only reason this is here is to calculate the inverse of constant
/// matrices. This panics on singular matrices!
pub fn inv(m: &Matrix<f64>) -> Matrix<f64> {
    match m.clone().inverse() {
        Ok(inverse) => inverse,
        Err(_) => panic!("Constant matrix not invertible!"),
    }
}

/// Builds a rulinalg matrix out of a row-major array.
pub fn to_matrix(m: &[[f64; 3]; 3]) -> Matrix<f64> {
    Matrix::new(
        3,
        3,
        vec![
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        ],
    )
}

/// Reads a 3x3 rulinalg matrix back into a row-major array, for cheap use in hot loops.
pub fn to_array(m: &Matrix<f64>) -> [[f64; 3]; 3] {
    let mut arr = [[0.0; 3]; 3];
    for (i, row) in arr.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = m[[i, j]];
        }
    }
    arr
}

/// Multiplies a 3x3 row-major matrix by a column vector.
pub fn dot(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Computes the linear RGB to XYZ matrix of an RGB space from the chromaticities of its primaries
/// and its white: the primaries form a change-of-basis matrix, with each column scaled so that
/// (1, 1, 1) maps to the white point.
fn rgb_to_xyz(primaries: [[f64; 2]; 3], white: Illuminant) -> Matrix<f64> {
    let r = xy_to_xyz(primaries[0]);
    let g = xy_to_xyz(primaries[1]);
    let b = xy_to_xyz(primaries[2]);
    let basis = to_matrix(&[[r[0], g[0], b[0]], [r[1], g[1], b[1]], [r[2], g[2], b[2]]]);
    let w = white.white_point();
    let scale = inv(&basis) * Vector::new(vec![w[0], w[1], w[2]]);
    to_matrix(&[
        [r[0] * scale[0], g[0] * scale[1], b[0] * scale[2]],
        [r[1] * scale[0], g[1] * scale[1], b[1] * scale[2]],
        [r[2] * scale[0], g[2] * scale[1], b[2] * scale[2]],
    ])
}

/// The CAT16 chromatic adaptation matrix, taking XYZ to sharpened cone responses.
pub const CAT16: [[f64; 3]; 3] = [
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
];

/// Recovers post-adaptation cone responses from the achromatic response and the two opponent
/// components (scaled by 1403).
pub const OPPONENT_TO_RGB: [[f64; 3]; 3] = [
    [460.0, 451.0, 288.0],
    [460.0, -891.0, -261.0],
    [460.0, -220.0, -6300.0],
];

/// The sRGB primaries.
const SRGB_PRIMARIES: [[f64; 2]; 3] = [[0.64, 0.33], [0.30, 0.60], [0.15, 0.06]];

/// The Adobe RGB (1998) primaries.
const ADOBE_RGB_PRIMARIES: [[f64; 2]; 3] = [[0.64, 0.33], [0.21, 0.71], [0.15, 0.06]];

lazy_static! {
    /// The inverse of CAT16.
    pub static ref CAT16_INV: [[f64; 3]; 3] = to_array(&inv(&to_matrix(&CAT16)));
    /// Linear sRGB to D65 XYZ.
    pub static ref SRGB_TO_XYZ: [[f64; 3]; 3] =
        to_array(&rgb_to_xyz(SRGB_PRIMARIES, Illuminant::D65));
    /// D65 XYZ to linear sRGB.
    pub static ref XYZ_TO_SRGB: [[f64; 3]; 3] =
        to_array(&inv(&rgb_to_xyz(SRGB_PRIMARIES, Illuminant::D65)));
    /// Linear Adobe RGB to D65 XYZ.
    pub static ref ADOBE_RGB_TO_XYZ: [[f64; 3]; 3] =
        to_array(&rgb_to_xyz(ADOBE_RGB_PRIMARIES, Illuminant::D65));
    /// D65 XYZ to linear Adobe RGB.
    pub static ref XYZ_TO_ADOBE_RGB: [[f64; 3]; 3] =
        to_array(&inv(&rgb_to_xyz(ADOBE_RGB_PRIMARIES, Illuminant::D65)));
}

/// The exponent of the CAM16 post-adaptation compression.
pub const ADAPTED_COEF: f64 = 0.42;

/// Hue substituted for colors whose hue is undefined, on the way back to XYZ. This is the average
/// hue CAM16 assigns to neutral colors, so inverting with it disturbs achromatic colors the least.
pub const ACHROMATIC_HUE: f64 = 209.52412994958826;

/// CIE L* cube-root cutoff, (6/29)^3.
pub const LAB_EPSILON: f64 = 216.0 / 24389.0;

/// CIE L* linear segment slope, (29/3)^3.
pub const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// The L* at which the linear and cube-root segments meet, kappa * epsilon.
pub const LAB_KE: f64 = 8.0;

/// Precision used when checking round trips in tests.
#[cfg(test)]
pub const TEST_PRECISION: f64 = 1e-10;

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_srgb_matrix() {
        // the well-known CSS Color 4 values
        let m = *SRGB_TO_XYZ;
        assert!((m[0][0] - 0.41239079926595934).abs() <= 1e-12);
        assert!((m[1][1] - 0.715168678767756).abs() <= 1e-12);
        assert!((m[2][2] - 0.9505321522496607).abs() <= 1e-12);
        // white maps to white
        let w = dot(&m, [1.0, 1.0, 1.0]);
        let d65 = Illuminant::D65.white_point();
        for i in 0..3 {
            assert!((w[i] - d65[i]).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_cat16_inverse() {
        let v = [0.2, 0.5, 0.9];
        let back = dot(&CAT16_INV, dot(&CAT16, v));
        for i in 0..3 {
            assert!((v[i] - back[i]).abs() <= TEST_PRECISION);
        }
    }

    #[test]
    fn test_inv_leaves_input() {
        let m = to_matrix(&CAT16);
        let product = &m * &inv(&m);
        let identity = to_array(&product);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((identity[i][j] - expected).abs() <= TEST_PRECISION);
            }
        }
        assert_eq!(to_array(&m), CAT16);
    }

    #[test]
    fn test_adobe_round_trip() {
        let v = [0.3, 0.1, 0.7];
        let back = dot(&XYZ_TO_ADOBE_RGB, dot(&ADOBE_RGB_TO_XYZ, v));
        for i in 0..3 {
            assert!((v[i] - back[i]).abs() <= TEST_PRECISION);
        }
    }
}
