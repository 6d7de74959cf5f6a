//! A module that implements the Adobe RGB color space. The Adobe RGB space differs greatly from
//! sRGB: its components are floating points that range between 0 and 1, and it has a set of
//! primaries designed to give it a wider coverage (over half of CIE 1931). It is D65, like every
//! other type here, so no chromatic adaptation is needed.

use bound::{Bound, Channel};
use color::{Color, XYZColor};
use consts::{dot, ADOBE_RGB_TO_XYZ, XYZ_TO_ADOBE_RGB};
use coord::Coord;

/// The Adobe RGB gamma, 2 + 51/256.
const GAMMA: f64 = 563.0 / 256.0;

/// A color in the Adobe RGB (1998) space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdobeRGBColor {
    /// The red primary component. This is a float that should range between 0 and 1.
    pub r: f64,
    /// The green primary component. This is a float that should range between 0 and 1.
    pub g: f64,
    /// The blue primary component. This is a float that should range between 0 and 1.
    pub b: f64,
}

impl Color for AdobeRGBColor {
    /// Converts a given XYZ color to Adobe RGB. Values outside of the Adobe RGB gamut are kept, with
    /// the gamma curve mirrored for negative components.
    fn from_xyz(xyz: XYZColor) -> AdobeRGBColor {
        // https://en.wikipedia.org/wiki/Adobe_RGB_color_space
        let rgb = dot(&XYZ_TO_ADOBE_RGB, xyz.into());
        let gamma = |x: f64| x.abs().powf(1.0 / GAMMA) * x.signum();
        AdobeRGBColor {
            r: gamma(rgb[0]),
            g: gamma(rgb[1]),
            b: gamma(rgb[2]),
        }
    }
    /// Converts from Adobe RGB to an XYZ color.
    fn to_xyz(&self) -> XYZColor {
        // undo gamma transformation
        let ungamma = |x: f64| x.abs().powf(GAMMA) * x.signum();
        let lin = [ungamma(self.r), ungamma(self.g), ungamma(self.b)];
        XYZColor::from(dot(&ADOBE_RGB_TO_XYZ, lin))
    }
}

impl From<Coord> for AdobeRGBColor {
    fn from(c: Coord) -> AdobeRGBColor {
        AdobeRGBColor {
            r: c.x,
            g: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for AdobeRGBColor {
    fn into(self) -> Coord {
        Coord {
            x: self.r,
            y: self.g,
            z: self.b,
        }
    }
}

impl Bound for AdobeRGBColor {
    fn channels() -> [Channel; 3] {
        [
            Channel::new("r", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
            Channel::new("g", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
            Channel::new("b", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
        ]
    }
}
