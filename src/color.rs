//! This file defines the [`Color`] trait, the reference tristimulus type [`XYZColor`] that every
//! conversion passes through, and the ubiquitous [`RGBColor`]. Every CAM16-derived space in this
//! crate converts to and from [`XYZColor`], so anything that implements [`Color`] can be fed to
//! them directly.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use float_cmp::{ApproxEq, F64Margin};
use regex::Regex;

use consts::{dot, SRGB_TO_XYZ, XYZ_TO_SRGB};
use coord::Coord;
use illuminants::Illuminant;

/// A point in the CIE 1931 XYZ color space, relative to the D65 reference white with the white's Y
/// component equal to 1. Every color type converts through this one, so it is the "reference"
/// space: nothing else in this crate has to care about white points or chromatic adaptation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis of the CIE 1931 XYZ space, roughly representing the long-wavelength receptors in
    /// the human eye.
    pub x: f64,
    /// The Y axis of the CIE 1931 XYZ space, roughly representing the middle-wavelength receptors in
    /// the human eye. This is the relative luminance of the color: 0 is black, 1 is the reference
    /// white.
    pub y: f64,
    /// The Z axis of the CIE 1931 XYZ space, roughly representing the short-wavelength receptors in
    /// the human eye.
    pub z: f64,
}

impl XYZColor {
    /// The D65 reference white.
    pub fn white() -> XYZColor {
        XYZColor::from(Illuminant::D65.white_point())
    }
    /// Returns `true` if the given other XYZ color's coordinates are all within 1e-10 of each other
    /// (or a couple of ULPs away, for large values). This is a numerical check, not a perceptual
    /// one: it is meant for checking round trips.
    pub fn approx_equal(&self, other: &XYZColor) -> bool {
        self.approx_equal_within(other, 1e-10)
    }
    /// Like `approx_equal`, but with a caller-chosen absolute tolerance.
    pub fn approx_equal_within(&self, other: &XYZColor, epsilon: f64) -> bool {
        let margin = F64Margin { epsilon, ulps: 2 };
        self.x.approx_eq(other.x, margin)
            && self.y.approx_eq(other.y, margin)
            && self.z.approx_eq(other.z, margin)
    }
}

impl From<[f64; 3]> for XYZColor {
    fn from(arr: [f64; 3]) -> XYZColor {
        XYZColor::from(Coord::from_array(arr))
    }
}

impl Into<[f64; 3]> for XYZColor {
    fn into(self) -> [f64; 3] {
        Into::<Coord>::into(self).to_array()
    }
}

impl From<Coord> for XYZColor {
    fn from(c: Coord) -> XYZColor {
        XYZColor {
            x: c.x,
            y: c.y,
            z: c.z,
        }
    }
}

impl Into<Coord> for XYZColor {
    fn into(self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// A trait that includes any color representation that can be converted to and from the CIE 1931 XYZ
/// color space without any extra information. Spaces that need viewing conditions (like CAM16) are
/// described by [`ColorSpace`](../space/trait.ColorSpace.html) instead, and accept any `Color` as
/// input.
pub trait Color: Sized {
    /// Converts from a color in CIE 1931 XYZ to the given color type.
    fn from_xyz(xyz: XYZColor) -> Self;
    /// Converts from the given color type to a color in CIE 1931 XYZ space.
    fn to_xyz(&self) -> XYZColor;
    /// Converts the given Color to a different Color type, by going through XYZ.
    /// # Example
    ///
    /// ```
    /// # use cam16::prelude::*;
    /// # use cam16::colors::CIELABColor;
    /// let red = RGBColor{r: 1., g: 0., b: 0.};
    /// let lab: CIELABColor = red.convert();
    /// assert!((lab.l - 53.2371).abs() <= 1e-3);
    /// ```
    fn convert<T: Color>(&self) -> T {
        T::from_xyz(self.to_xyz())
    }
}

impl Color for XYZColor {
    fn from_xyz(xyz: XYZColor) -> XYZColor {
        xyz
    }
    fn to_xyz(&self) -> XYZColor {
        *self
    }
}

/// The sRGB transfer function, taking gamma-encoded values to linear light. This is extended to
/// every real number by mirroring negative values and continuing the power curve above 1.
pub(crate) fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    let lin = if abs <= 0.04045 {
        abs / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4)
    };
    lin * c.signum()
}

/// The inverse of `srgb_to_linear`.
pub(crate) fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    let enc = if abs <= 0.0031308 {
        abs * 12.92
    } else {
        1.055 * abs.powf(1.0 / 2.4) - 0.055
    };
    enc * c.signum()
}

/// A color in the sRGB color space, gamma-encoded. Components nominally range between 0 and 1, but
/// values outside that range are kept rather than clipped, so that high-dynamic-range and
/// out-of-gamut colors survive conversion. Only the hex representation clamps.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red component, nominally between 0 and 1.
    pub r: f64,
    /// The green component, nominally between 0 and 1.
    pub g: f64,
    /// The blue component, nominally between 0 and 1.
    pub b: f64,
}

impl RGBColor {
    /// A neutral color with all three components equal to the given value.
    pub fn gray(level: f64) -> RGBColor {
        RGBColor {
            r: level,
            g: level,
            b: level,
        }
    }
    /// Given a string that represents a hex code, returns the RGB color that the given hex code
    /// represents. Four formats are accepted: `"#rgb"` as a shorthand for `"#rrggbb"`, `#rrggbb` by
    /// itself, and either of those formats without `#`: `"rgb"` or `"rrggbb"` are acceptable. Returns
    /// a `RGBParseError` if the given string does not follow one of these formats.
    /// # Example
    ///
    /// ```
    /// # use cam16::prelude::*;
    /// let fuchsia = RGBColor::from_hex_code("#ff00ff").unwrap();
    /// let fuchsia2 = RGBColor::from_hex_code("f0f").unwrap();
    /// assert_eq!(fuchsia, fuchsia2);
    /// assert!(RGBColor::from_hex_code("#ff00f").is_err());
    /// ```
    pub fn from_hex_code(hex: &str) -> Result<RGBColor, RGBParseError> {
        lazy_static! {
            static ref HEX_RE: Regex =
                Regex::new(r"^#?(?:([0-9a-fA-F]{6})|([0-9a-fA-F]{3}))$").unwrap();
        }
        let caps = HEX_RE.captures(hex).ok_or(RGBParseError::InvalidHexSyntax)?;
        let digits: String = match (caps.get(1), caps.get(2)) {
            (Some(long), _) => long.as_str().to_string(),
            // "#abc" doubles every digit: "#aabbcc"
            (None, Some(short)) => short.as_str().chars().flat_map(|c| vec![c, c]).collect(),
            (None, None) => return Err(RGBParseError::InvalidHexSyntax),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|_| RGBParseError::InvalidHexSyntax)
        };
        Ok(RGBColor::from((channel(0)?, channel(1)?, channel(2)?)))
    }
    /// The three components clamped to [0, 1] and scaled to the nearest integer in 0-255.
    pub fn int_rgb_tup(&self) -> (u8, u8, u8) {
        let to_int = |x: f64| (x.max(0.0).min(1.0) * 255.0).round() as u8;
        (to_int(self.r), to_int(self.g), to_int(self.b))
    }
}

impl Color for RGBColor {
    fn from_xyz(xyz: XYZColor) -> RGBColor {
        let rgb = dot(&XYZ_TO_SRGB, xyz.into());
        RGBColor {
            r: linear_to_srgb(rgb[0]),
            g: linear_to_srgb(rgb[1]),
            b: linear_to_srgb(rgb[2]),
        }
    }
    fn to_xyz(&self) -> XYZColor {
        let lin = [srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b)];
        XYZColor::from(dot(&SRGB_TO_XYZ, lin))
    }
}

impl From<(u8, u8, u8)> for RGBColor {
    fn from(rgb: (u8, u8, u8)) -> RGBColor {
        let (r, g, b) = rgb;
        RGBColor {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }
}

impl From<Coord> for RGBColor {
    fn from(c: Coord) -> RGBColor {
        RGBColor {
            r: c.x,
            g: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for RGBColor {
    fn into(self) -> Coord {
        Coord {
            x: self.r,
            y: self.g,
            z: self.b,
        }
    }
}

impl fmt::Display for RGBColor {
    /// Formats as an uppercase hex code, clamping out-of-range components.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (r, g, b) = self.int_rgb_tup();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// An error that occurs when parsing a string as an RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RGBParseError {
    /// The string was not a 3- or 6-digit hex code, with or without a leading `#`.
    InvalidHexSyntax,
}

impl fmt::Display for RGBParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            RGBParseError::InvalidHexSyntax => "Invalid hex code syntax",
        };
        write!(f, "RGB parsing error: {}", msg)
    }
}

impl Error for RGBParseError {}

impl FromStr for RGBColor {
    type Err = RGBParseError;

    fn from_str(s: &str) -> Result<RGBColor, RGBParseError> {
        RGBColor::from_hex_code(s.trim())
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let red = RGBColor::from_hex_code("#ff0000").unwrap();
        assert_eq!(red, RGBColor { r: 1.0, g: 0.0, b: 0.0 });
        assert_eq!("#F00".parse::<RGBColor>().unwrap(), red);
        assert_eq!(RGBColor::from_hex_code("808080").unwrap(), RGBColor::from((128, 128, 128)));
        for bad in &["#ff000", "#gg0000", "", "##fff", "#ff0000 extra"] {
            assert_eq!(RGBColor::from_hex_code(bad), Err(RGBParseError::InvalidHexSyntax));
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = "#ff".parse::<RGBColor>().unwrap_err();
        assert_eq!(err.to_string(), "RGB parsing error: Invalid hex code syntax");
    }

    #[test]
    fn test_xyz_arrays() {
        let xyz = XYZColor::from([0.25, 0.5, 0.75]);
        assert_eq!(xyz, XYZColor { x: 0.25, y: 0.5, z: 0.75 });
        let arr: [f64; 3] = xyz.into();
        assert_eq!(arr, [0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(RGBColor::from((17, 69, 124)).to_string(), "#11457C");
        assert_eq!(RGBColor { r: 1.2, g: -0.3, b: 0.5 }.to_string(), "#FF0080");
    }

    #[test]
    fn test_srgb_xyz() {
        let white = RGBColor::gray(1.0).to_xyz();
        assert!(white.approx_equal(&XYZColor::white()));
        let red = RGBColor { r: 1.0, g: 0.0, b: 0.0 }.to_xyz();
        assert!((red.y - 0.2126390058715104).abs() <= 1e-12);
        let color = RGBColor { r: 0.3, g: 0.7, b: 0.2 };
        let back: RGBColor = color.to_xyz().convert();
        assert!((back.r - color.r).abs() <= 1e-10);
        assert!((back.g - color.g).abs() <= 1e-10);
        assert!((back.b - color.b).abs() <= 1e-10);
    }

    #[test]
    fn test_extended_transfer() {
        // negative and above-one values survive the round trip
        for &x in &[-0.5, -0.01, 0.0, 0.02, 0.5, 1.0, 3.7] {
            assert!((linear_to_srgb(srgb_to_linear(x)) - x).abs() <= 1e-12);
        }
        assert!(srgb_to_linear(-0.5) < 0.0);
        assert!(srgb_to_linear(2.0) > 1.0);
    }
}
