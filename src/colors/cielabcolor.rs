//! A module that implements the [CIELAB color
//! space](https://en.wikipedia.org/wiki/Lab_color_space#CIELAB). The CIELAB color space is used as a
//! device-independent color space that has an L value for luminance and two opponent color axes for
//! chromaticity (loosely, hue). Formally, the three values that define a CIELAB color are called
//! L\*, A\*, and B\* to distinguish them from [generic
//! Lab](https://en.wikipedia.org/wiki/Lab_color_space), but for convenience they are just `L`, `a`,
//! and `b` in this module.
//!
//! Here CIELAB is relative to the same D65 white as every other type, with no chromatic adaptation.
//! Its lightness, L\*, is what the HCT space calls tone: the free functions [`y_to_lstar`] and
//! [`lstar_to_y`] convert between it and relative luminance directly.

use color::{Color, XYZColor};
use consts::{LAB_EPSILON, LAB_KAPPA, LAB_KE};
use coord::Coord;

/// The CIELAB companding function, applied to each white-relative tristimulus value.
fn f(x: f64) -> f64 {
    if x > LAB_EPSILON {
        x.cbrt()
    } else {
        (LAB_KAPPA * x + 16.0) / 116.0
    }
}

/// The inverse of `f`, used for X and Z.
fn f_inv(x: f64) -> f64 {
    let cubed = x * x * x;
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (116.0 * x - 16.0) / LAB_KAPPA
    }
}

/// Converts relative luminance (the white's Y is 1) to CIE L\*.
pub fn y_to_lstar(y: f64) -> f64 {
    116.0 * f(y) - 16.0
}

/// Converts CIE L\* to relative luminance (the white's Y is 1). Below L\* = 8 the curve is linear.
pub fn lstar_to_y(l: f64) -> f64 {
    if l > LAB_KE {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l / LAB_KAPPA
    }
}

/// A color in the CIELAB color space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELABColor {
    /// The luminance (loosely, brightness) of a given color. 0 is the lowest visible value and gives
    /// black, whereas 100 is the value of diffuse white: it is perhaps possible to have a higher
    /// value for reflective surfaces.
    pub l: f64,
    /// The first opponent color axis. Negative values are green and positive values are magenta.
    pub a: f64,
    /// The second opponent color axis. Negative values are blue and positive values are yellow.
    pub b: f64,
}

impl Color for CIELABColor {
    /// Converts a given CIE XYZ color to CIELAB, using the D65 reference white.
    fn from_xyz(xyz: XYZColor) -> CIELABColor {
        // https://en.wikipedia.org/wiki/Lab_color_space#CIELAB-CIEXYZ_conversions
        let white = XYZColor::white();
        let fx = f(xyz.x / white.x);
        let fy = f(xyz.y / white.y);
        let fz = f(xyz.z / white.z);
        // note how a and b are opponent color axes
        CIELABColor {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
    /// Returns the XYZ color that corresponds to the CIELAB color.
    fn to_xyz(&self) -> XYZColor {
        let white = XYZColor::white();
        let fy = (self.l + 16.0) / 116.0;
        XYZColor {
            x: white.x * f_inv(fy + self.a / 500.0),
            y: white.y * lstar_to_y(self.l),
            z: white.z * f_inv(fy - self.b / 200.0),
        }
    }
}

impl From<Coord> for CIELABColor {
    fn from(c: Coord) -> CIELABColor {
        CIELABColor {
            l: c.x,
            a: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for CIELABColor {
    fn into(self) -> Coord {
        Coord {
            x: self.l,
            y: self.a,
            z: self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use color::RGBColor;
    use consts::TEST_PRECISION;

    #[test]
    fn test_cielab_xyz_conversion() {
        let xyz = XYZColor { x: 0.4, y: 0.2, z: 0.6 };
        let xyz2 = CIELABColor::from_xyz(xyz).to_xyz();
        assert!(xyz.approx_equal_within(&xyz2, TEST_PRECISION));
        let dark = XYZColor { x: 0.001, y: 0.002, z: 0.0005 };
        assert!(dark.approx_equal_within(&CIELABColor::from_xyz(dark).to_xyz(), TEST_PRECISION));
    }

    #[test]
    fn test_lstar() {
        assert!((lstar_to_y(50.0) - 0.18418651851244416).abs() <= 1e-15);
        assert!(y_to_lstar(0.0).abs() <= 1e-12);
        assert!((y_to_lstar(1.0) - 100.0).abs() <= 1e-12);
        for &l in &[0.5, 7.9, 8.0, 8.1, 53.2, 99.0, 140.0] {
            assert!((y_to_lstar(lstar_to_y(l)) - l).abs() <= 1e-10);
        }
    }

    #[test]
    fn test_white_and_gray() {
        let white: CIELABColor = RGBColor::gray(1.0).convert();
        assert!((white.l - 100.0).abs() <= 1e-9);
        assert!(white.a.abs() <= 1e-9);
        assert!(white.b.abs() <= 1e-9);
    }
}
