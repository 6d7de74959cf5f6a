//! A module that implements the polar form of CAM16-UCS: remapped lightness J', remapped
//! colorfulness M', and the CAM16 hue angle h. Because CAM16 never gives neutral colors exactly
//! zero colorfulness, this space carries an [`AchromaticBoundary`] fitted to its own neutral ramp,
//! and reports the hue of any color under that boundary as undefined (NaN). Going the other way,
//! achromatic colors get a fixed hue so that round trips stay stable.

use achromatic::{AchromaticBoundary, SampleRange, SplineKind};
use bound::{Bound, Channel};
use cam16::{cam16_to_xyz, xyz_to_cam16, Chroma, Hue, Lightness};
use color::XYZColor;
use consts::ACHROMATIC_HUE;
use coord::Coord;
use environment::{Environment, ViewingConditions};
use space::ColorSpace;

/// A color in the polar CAM16-UCS space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CAM16JMhColor {
    /// The remapped lightness, J'. 0 is black and 100 is the reference white.
    pub j: f64,
    /// The remapped colorfulness, M'.
    pub m: f64,
    /// The hue angle in degrees, or NaN if the color is achromatic.
    pub h: f64,
}

impl From<Coord> for CAM16JMhColor {
    fn from(c: Coord) -> CAM16JMhColor {
        CAM16JMhColor {
            j: c.x,
            m: c.y,
            h: c.z,
        }
    }
}

impl Into<Coord> for CAM16JMhColor {
    fn into(self) -> Coord {
        Coord {
            x: self.j,
            y: self.m,
            z: self.h,
        }
    }
}

impl Bound for CAM16JMhColor {
    fn channels() -> [Channel; 3] {
        [
            Channel::new("j", 0.0, 100.0),
            Channel::new("m", 0.0, 55.0).with_floor(0.0),
            Channel::angle("h"),
        ]
    }
    fn nan_channel() -> Option<usize> {
        Some(2)
    }
}

/// The polar CAM16-UCS space under a given set of viewing conditions, with the achromatic boundary
/// derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cam16UcsJmh {
    env: Environment,
    achromatic: AchromaticBoundary,
}

impl Cam16UcsJmh {
    /// Neutral sample levels for the achromatic boundary: dense near black where the curve bends,
    /// sparse above, and out to HDR values well past white.
    pub const ACHROMATIC_RANGES: [SampleRange; 3] = [
        SampleRange { start: 0, end: 25, step: 1, scale: 100.0 },
        SampleRange { start: 25, end: 101, step: 25, scale: 55.0 },
        SampleRange { start: 101, end: 252, step: 25, scale: 45.0 },
    ];
    /// How far above the boundary a color may be and still count as achromatic.
    pub const ACHROMATIC_THRESHOLD: f64 = 0.06;
    /// The spline fitted through the boundary samples.
    pub const ACHROMATIC_SPLINE: SplineKind = SplineKind::CatmullRom;

    /// The space under the given viewing conditions, with the default achromatic tuning.
    pub fn new(conditions: ViewingConditions) -> Cam16UcsJmh {
        Cam16UcsJmh::with_tuning(
            conditions,
            &Cam16UcsJmh::ACHROMATIC_RANGES,
            Cam16UcsJmh::ACHROMATIC_THRESHOLD,
            Cam16UcsJmh::ACHROMATIC_SPLINE,
        )
    }

    /// The space under the given viewing conditions, with a custom achromatic boundary. The
    /// colorfulness ceiling is derived from the samples.
    pub fn with_tuning(
        conditions: ViewingConditions,
        ranges: &[SampleRange],
        threshold: f64,
        kind: SplineKind,
    ) -> Cam16UcsJmh {
        let env = conditions.environment();
        let achromatic = AchromaticBoundary::new(ranges, threshold, kind, None, |xyz| {
            let jmh = xyz_to_jmh(xyz, &env);
            (jmh.j, jmh.m)
        });
        Cam16UcsJmh { env, achromatic }
    }

    /// The achromatic boundary of this space.
    pub fn achromatic(&self) -> &AchromaticBoundary {
        &self.achromatic
    }

    /// Whether the given color has no meaningful hue.
    pub fn is_achromatic(&self, color: CAM16JMhColor) -> bool {
        self.achromatic.is_achromatic(color.j, color.m)
    }

    /// Replaces any NaN component with 0, then marks the hue as undefined if the color is
    /// achromatic.
    /// # Example
    /// ```
    /// # use cam16::colors::{CAM16JMhColor, Cam16UcsJmh};
    /// let space = Cam16UcsJmh::default();
    /// let gray = space.normalize(CAM16JMhColor{j: 50., m: 0.05, h: 30.});
    /// assert!(gray.h.is_nan());
    /// let unknown = space.normalize(CAM16JMhColor{j: 59., m: f64::NAN, h: 27.});
    /// assert!(unknown.m == 0. && unknown.h.is_nan());
    /// ```
    pub fn normalize(&self, color: CAM16JMhColor) -> CAM16JMhColor {
        let zero_nan = |x: f64| if x.is_nan() { 0.0 } else { x };
        let mut color = CAM16JMhColor {
            j: zero_nan(color.j),
            m: zero_nan(color.m),
            h: zero_nan(color.h),
        };
        if self.is_achromatic(color) {
            color.h = f64::NAN;
        }
        color
    }
}

impl Default for Cam16UcsJmh {
    fn default() -> Cam16UcsJmh {
        Cam16UcsJmh::new(ViewingConditions::standard())
    }
}

/// The unnormalized forward transform.
fn xyz_to_jmh(xyz: XYZColor, env: &Environment) -> CAM16JMhColor {
    let cam = xyz_to_cam16(xyz, env);
    CAM16JMhColor {
        j: env.ucs_lightness(cam.j),
        m: env.ucs_colorfulness(cam.m),
        h: cam.h,
    }
}

impl ColorSpace for Cam16UcsJmh {
    type Color = CAM16JMhColor;

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn from_xyz(&self, xyz: XYZColor) -> CAM16JMhColor {
        self.normalize(xyz_to_jmh(xyz, &self.env))
    }

    /// Achromatic colors, and any color whose hue is undefined, are converted with the average hue
    /// of the neutral axis.
    fn to_xyz(&self, color: CAM16JMhColor) -> XYZColor {
        let h = if color.h.is_nan() || self.is_achromatic(color) {
            ACHROMATIC_HUE
        } else {
            color.h
        };
        cam16_to_xyz(
            Lightness::J(self.env.inverse_ucs_lightness(color.j)),
            Chroma::M(self.env.inverse_ucs_colorfulness(color.m)),
            Hue::Angle(h),
            &self.env,
        )
    }
}
