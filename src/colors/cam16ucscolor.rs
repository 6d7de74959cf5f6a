//! A module that implements CAM16-UCS, the uniform color space built on CAM16. Lightness J and
//! colorfulness M are remapped so that Euclidean distance approximates perceived color difference,
//! and the hue angle turns the remapped colorfulness into two opponent axes, `a` and `b`.
//!
//! There are three variants, differing only in the coefficients of the remapping: `ucs` for general
//! use, `lcd` for large color differences, and `scd` for small ones. They are the same [`Cam16Ucs`]
//! type built with different [`UcsCoefficients`](../../environment/enum.UcsCoefficients.html).

use bound::{Bound, Channel};
use cam16::{cam16_to_xyz, xyz_to_cam16, Chroma, Hue, Lightness};
use color::XYZColor;
use coord::Coord;
use environment::{Environment, UcsCoefficients, ViewingConditions};
use space::ColorSpace;

/// A color in CAM16-UCS (or one of its LCD and SCD variants).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CAM16UCSColor {
    /// The remapped lightness, J'. 0 is black and 100 is the reference white.
    pub j: f64,
    /// The red-green axis: the remapped colorfulness times the cosine of the hue.
    pub a: f64,
    /// The yellow-blue axis: the remapped colorfulness times the sine of the hue.
    pub b: f64,
}

impl From<Coord> for CAM16UCSColor {
    fn from(c: Coord) -> CAM16UCSColor {
        CAM16UCSColor {
            j: c.x,
            a: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for CAM16UCSColor {
    fn into(self) -> Coord {
        Coord {
            x: self.j,
            y: self.a,
            z: self.b,
        }
    }
}

impl Bound for CAM16UCSColor {
    fn channels() -> [Channel; 3] {
        [
            Channel::new("j", 0.0, 100.0),
            Channel::new("a", -100.0, 100.0),
            Channel::new("b", -100.0, 100.0),
        ]
    }
}

/// The CAM16-UCS space under a given set of viewing conditions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cam16Ucs {
    env: Environment,
}

impl Cam16Ucs {
    /// The space under the given viewing conditions. Their `coefficients` pick the variant.
    pub fn new(conditions: ViewingConditions) -> Cam16Ucs {
        Cam16Ucs {
            env: conditions.environment(),
        }
    }
    /// Standard viewing conditions with the general-purpose `ucs` coefficients.
    pub fn ucs() -> Cam16Ucs {
        Cam16Ucs::new(ViewingConditions::standard())
    }
    /// Standard viewing conditions with the large-color-difference coefficients.
    pub fn lcd() -> Cam16Ucs {
        Cam16Ucs::new(ViewingConditions::standard().with_coefficients(UcsCoefficients::Lcd))
    }
    /// Standard viewing conditions with the small-color-difference coefficients.
    pub fn scd() -> Cam16Ucs {
        Cam16Ucs::new(ViewingConditions::standard().with_coefficients(UcsCoefficients::Scd))
    }
    /// Which variant this is.
    pub fn coefficients(&self) -> UcsCoefficients {
        self.env.conditions().coefficients
    }
}

impl Default for Cam16Ucs {
    fn default() -> Cam16Ucs {
        Cam16Ucs::ucs()
    }
}

impl ColorSpace for Cam16Ucs {
    type Color = CAM16UCSColor;

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn from_xyz(&self, xyz: XYZColor) -> CAM16UCSColor {
        let cam = xyz_to_cam16(xyz, &self.env);
        let j = self.env.ucs_lightness(cam.j);
        let m = self.env.ucs_colorfulness(cam.m);
        CAM16UCSColor::from(Coord::from_yz_polar(j, m, cam.h))
    }

    fn to_xyz(&self, color: CAM16UCSColor) -> XYZColor {
        let (m, h) = Into::<Coord>::into(color).yz_polar();
        cam16_to_xyz(
            Lightness::J(self.env.inverse_ucs_lightness(color.j)),
            Chroma::M(self.env.inverse_ucs_colorfulness(m)),
            Hue::Angle(h),
            &self.env,
        )
    }
}
