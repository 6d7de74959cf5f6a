//! A module that implements HCT (hue, chroma, tone), the space behind Material Design's dynamic
//! color. HCT takes hue and chroma from CAM16 and replaces CAM16's lightness with CIE L\* (tone),
//! which has a simple relationship to contrast. The catch is that there is no closed-form inverse:
//! CAM16 needs a lightness J to reconstruct a color, and the J that keeps the given hue and chroma
//! while landing on the given L\* can only be searched for. [`hct_to_xyz`] does that with a
//! bisection on J.
//!
//! Like the polar CAM16-UCS space, HCT carries its own [`AchromaticBoundary`], tuned in terms of
//! tone and chroma, and reports the hue of neutral colors as NaN.

use achromatic::{AchromaticBoundary, SampleRange, SplineKind};
use bound::{Bound, Channel};
use cam16::{cam16_to_xyz, xyz_to_cam16, Chroma, Hue, Lightness};
use color::XYZColor;
use colors::cielabcolor::{lstar_to_y, y_to_lstar};
use consts::ACHROMATIC_HUE;
use coord::Coord;
use environment::{Environment, ViewingConditions};
use space::ColorSpace;

/// A color in the HCT space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HCTColor {
    /// The CAM16 hue angle in degrees, or NaN if the color is achromatic.
    pub h: f64,
    /// The CAM16 chroma.
    pub c: f64,
    /// The tone: CIE L\*, with 0 as black and 100 as the reference white.
    pub t: f64,
    /// The opacity, from 0 to 1. Conversions ignore it.
    pub alpha: f64,
}

impl HCTColor {
    /// An opaque color with the given hue, chroma and tone.
    pub fn new(h: f64, c: f64, t: f64) -> HCTColor {
        HCTColor { h, c, t, alpha: 1.0 }
    }
}

impl From<Coord> for HCTColor {
    fn from(c: Coord) -> HCTColor {
        HCTColor::new(c.x, c.y, c.z)
    }
}

impl Into<Coord> for HCTColor {
    fn into(self) -> Coord {
        Coord {
            x: self.h,
            y: self.c,
            z: self.t,
        }
    }
}

impl Bound for HCTColor {
    fn channels() -> [Channel; 3] {
        [
            Channel::angle("h"),
            Channel::new("c", 0.0, 145.0).with_floor(0.0),
            Channel::new("t", 0.0, 100.0).with_floor(0.0),
        ]
    }
    fn nan_channel() -> Option<usize> {
        Some(0)
    }
    fn clamp(self) -> HCTColor {
        HCTColor {
            alpha: self.alpha,
            ..HCTColor::from(HCTColor::clamp_coord(self.into()))
        }
    }
}

/// Converts tristimulus values to HCT under the given environment. Tone is measured against the
/// environment's white and never goes below 0. The hue is always defined: classifying achromatic
/// colors is up to the [`Hct`] space.
pub fn xyz_to_hct(xyz: XYZColor, env: &Environment) -> HCTColor {
    let cam = xyz_to_cam16(xyz, env);
    let t = y_to_lstar(xyz.y / env.ref_white().y);
    HCTColor::new(cam.h, cam.c, t.max(0.0))
}

/// Converts HCT to tristimulus values under the given environment, by bisecting on CAM16 lightness
/// until the luminance of the result matches the tone to within [`Hct::BISECTION_TOLERANCE`]. The
/// search gives up after [`Hct::MAX_ITERATIONS`] steps and returns its best estimate. A NaN hue is
/// treated as 0.
pub fn hct_to_xyz(color: HCTColor, env: &Environment) -> XYZColor {
    let h = if color.h.is_nan() { 0.0 } else { color.h };
    let c = color.c;
    let t = color.t;
    if t == 0.0 {
        return XYZColor::from([0.0; 3]);
    }
    if t == 100.0 {
        return env.ref_white();
    }

    let tolerance = Hct::BISECTION_TOLERANCE;
    let mut j = t;
    let mut low = 0.0;
    // tones past white can need far higher lightness
    let mut high = if t <= 100.0 { 100.0 } else { 1000.0 };
    let y = lstar_to_y(t) * env.ref_white().y;

    let mut iterations = 0;
    while high - low > tolerance && iterations < Hct::MAX_ITERATIONS {
        iterations += 1;
        let xyz = cam16_to_xyz(Lightness::J(j), Chroma::C(c), Hue::Angle(h), env);
        let delta = xyz.y - y;
        if delta.abs() <= tolerance {
            trace!(iterations, "HCT inversion converged");
            return xyz;
        }
        if delta < 0.0 {
            low = j;
        } else {
            high = j;
        }
        j = (high + low) * 0.5;
    }

    if iterations >= Hct::MAX_ITERATIONS {
        debug!(h, c, t, iterations, "HCT inversion hit the iteration cap");
    } else {
        trace!(iterations, "HCT inversion bracket collapsed");
    }
    cam16_to_xyz(Lightness::J(j), Chroma::C(c), Hue::Angle(h), env)
}

/// The HCT space under a given set of viewing conditions, with the achromatic boundary derived from
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Hct {
    env: Environment,
    achromatic: AchromaticBoundary,
}

impl Hct {
    /// Neutral sample levels for the achromatic boundary. The first bend needs the most resolution;
    /// above it the curve is nearly straight.
    pub const ACHROMATIC_RANGES: [SampleRange; 3] = [
        SampleRange { start: 0, end: 51, step: 1, scale: 200.0 },
        SampleRange { start: 50, end: 101, step: 5, scale: 100.0 },
        SampleRange { start: 101, end: 502, step: 25, scale: 75.0 },
    ];
    /// How far above the boundary a color may be and still count as achromatic.
    pub const ACHROMATIC_THRESHOLD: f64 = 0.085;
    /// The spline fitted through the boundary samples.
    pub const ACHROMATIC_SPLINE: SplineKind = SplineKind::Natural;
    /// No color with more chroma than this is achromatic.
    pub const ACHROMATIC_MAX_CHROMA: f64 = 7.5;
    /// How close the luminance found by the inverse must be to the luminance of the target tone.
    pub const BISECTION_TOLERANCE: f64 = 2e-9;
    /// The most bisection steps the inverse will take.
    pub const MAX_ITERATIONS: usize = 100;

    /// The space under the given viewing conditions, with the default achromatic tuning.
    pub fn new(conditions: ViewingConditions) -> Hct {
        Hct::with_tuning(
            conditions,
            &Hct::ACHROMATIC_RANGES,
            Hct::ACHROMATIC_THRESHOLD,
            Hct::ACHROMATIC_SPLINE,
            Hct::ACHROMATIC_MAX_CHROMA,
        )
    }

    /// The space under the given viewing conditions, with a custom achromatic boundary.
    pub fn with_tuning(
        conditions: ViewingConditions,
        ranges: &[SampleRange],
        threshold: f64,
        kind: SplineKind,
        max_chroma: f64,
    ) -> Hct {
        let env = conditions.environment();
        let achromatic = AchromaticBoundary::new(ranges, threshold, kind, Some(max_chroma), |xyz| {
            let hct = xyz_to_hct(xyz, &env);
            (hct.t, hct.c)
        });
        Hct { env, achromatic }
    }

    /// The achromatic boundary of this space, as chroma against tone.
    pub fn achromatic(&self) -> &AchromaticBoundary {
        &self.achromatic
    }

    /// Whether the given color has no meaningful hue.
    pub fn is_achromatic(&self, color: HCTColor) -> bool {
        self.achromatic.is_achromatic(color.t, color.c)
    }

    /// Replaces any NaN component with 0, then marks the hue as undefined if the color is
    /// achromatic.
    pub fn normalize(&self, color: HCTColor) -> HCTColor {
        let zero_nan = |x: f64| if x.is_nan() { 0.0 } else { x };
        let mut color = HCTColor {
            h: zero_nan(color.h),
            c: zero_nan(color.c),
            t: zero_nan(color.t),
            alpha: zero_nan(color.alpha),
        };
        if self.is_achromatic(color) {
            color.h = f64::NAN;
        }
        color
    }
}

impl Default for Hct {
    fn default() -> Hct {
        Hct::new(ViewingConditions::hct())
    }
}

impl ColorSpace for Hct {
    type Color = HCTColor;

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn from_xyz(&self, xyz: XYZColor) -> HCTColor {
        self.normalize(xyz_to_hct(xyz, &self.env))
    }

    /// Achromatic colors are converted with the average hue of the neutral axis.
    fn to_xyz(&self, color: HCTColor) -> XYZColor {
        let color = if self.is_achromatic(color) {
            HCTColor {
                h: ACHROMATIC_HUE,
                ..color
            }
        } else {
            color
        };
        hct_to_xyz(color, &self.env)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use color::{Color, RGBColor};
    use colors::AdobeRGBColor;

    fn hex(code: &str) -> RGBColor {
        RGBColor::from_hex_code(code).unwrap()
    }

    #[test]
    fn test_named_colors() {
        let space = Hct::default();
        let cases = [
            ("#ff0000", (27.4098, 113.3564, 53.23712)),
            ("#ffa500", (71.25707, 60.52848, 74.93391)),
            ("#ffff00", (111.04563, 75.50438, 97.13856)),
            ("#008000", (142.23082, 71.13571, 46.22791)),
            ("#0000ff", (282.76218, 87.22804, 32.30087)),
            ("#4b0082", (310.96047, 60.76549, 20.47002)),
            ("#ee82ee", (331.48696, 65.00065, 69.69502)),
        ];
        for &(code, (h, c, t)) in cases.iter() {
            let color = space.convert_from(&hex(code));
            assert!((color.h - h).abs() <= 1e-3, "{} {:?}", code, color);
            assert!((color.c - c).abs() <= 1e-3, "{} {:?}", code, color);
            assert!((color.t - t).abs() <= 1e-3, "{} {:?}", code, color);
            assert_eq!(color.alpha, 1.0);
        }
    }

    #[test]
    fn test_neutrals() {
        let space = Hct::default();
        let white = space.convert_from(&hex("#ffffff"));
        assert!(white.h.is_nan());
        assert!((white.c - 2.8716).abs() <= 1e-3);
        assert!((white.t - 100.0).abs() <= 1e-9);
        let gray = space.convert_from(&hex("#808080"));
        assert!(gray.h.is_nan());
        assert!((gray.c - 1.8977).abs() <= 1e-3);
        assert!((gray.t - 53.585).abs() <= 1e-3);
        let black = space.convert_from(&hex("#000000"));
        assert_eq!((black.c, black.t), (0.0, 0.0));
        assert!(black.h.is_nan());
    }

    #[test]
    fn test_achromatic_ramps() {
        let space = Hct::default();
        for level in 0..=255u8 {
            let srgb = space.convert_from(&RGBColor::from((level, level, level)));
            assert!(srgb.h.is_nan(), "sRGB {} {:?}", level, srgb);
            let x = f64::from(level) / 255.0;
            let adobe = space.convert_from(&AdobeRGBColor { r: x, g: x, b: x });
            assert!(adobe.h.is_nan(), "Adobe RGB {} {:?}", level, adobe);
        }
    }

    #[test]
    fn test_normalize() {
        let space = Hct::default();
        for &(h, c, t) in &[(90.0, 0.05, 30.0), (30.0, 0.05, 7.0), (30.0, 0.05, 1.0)] {
            assert!(space.normalize(HCTColor::new(h, c, t)).h.is_nan(), "{} {}", c, t);
        }
        let red = space.convert_from(&hex("#ff0000"));
        assert!(!space.is_achromatic(red));
        let undefined = space.normalize(HCTColor::new(f64::NAN, 113.0, 53.0));
        assert_eq!(undefined.h, 0.0);
    }

    #[test]
    fn test_shortcuts() {
        let space = Hct::default();
        let black = space.to_xyz(HCTColor::new(120.0, 40.0, 0.0));
        assert_eq!(black, XYZColor::from([0.0; 3]));
        let white = space.to_xyz(HCTColor::new(120.0, 40.0, 100.0));
        assert_eq!(white, space.environment().ref_white());
    }

    #[test]
    fn test_undefined_tone() {
        let space = Hct::default();
        let color = HCTColor::new(30.0, 2.0, f64::NAN);
        assert!(!space.is_achromatic(color));
        let xyz = space.to_xyz(color);
        assert!(xyz.y.is_nan());
        // an undefined tone reads as black, where a chroma of 2 is well clear of the boundary
        let normalized = space.normalize(color);
        assert_eq!((normalized.h, normalized.c, normalized.t), (30.0, 2.0, 0.0));
    }

    #[test]
    fn test_round_trip() {
        let space = Hct::default();
        let colors = [
            hex("#ff0000").to_xyz(),
            hex("#ffa500").to_xyz(),
            hex("#0000ff").to_xyz(),
            hex("#2e8b57").to_xyz(),
            RGBColor { r: 0.2, g: 0.02, b: 0.5 }.to_xyz(),
            // past white
            RGBColor { r: 3.0, g: 2.5, b: 2.7 }.to_xyz(),
        ];
        for xyz in colors.iter() {
            let hct = space.from_xyz(*xyz);
            let back = space.to_xyz(hct);
            assert!(xyz.approx_equal_within(&back, 1e-8), "{:?} {:?}", xyz, back);
            let again = space.from_xyz(back);
            assert!((again.h - hct.h).abs() <= 1e-3);
            assert!((again.c - hct.c).abs() <= 1e-3);
            assert!((again.t - hct.t).abs() <= 1e-3);
        }
        // neutrals come back with the average neutral hue
        for code in &["#ffffff", "#808080", "#1a1a1a"] {
            let xyz = hex(code).to_xyz();
            assert!(xyz.approx_equal_within(&space.to_xyz(space.from_xyz(xyz)), 1e-4), "{}", code);
        }
    }

    #[test]
    fn test_bisection_matches_tone() {
        let env = ViewingConditions::hct().environment();
        let gray = hct_to_xyz(HCTColor::new(0.0, 0.0, 50.0), &env);
        assert!((gray.y - lstar_to_y(50.0)).abs() <= Hct::BISECTION_TOLERANCE);
        let blue = hct_to_xyz(HCTColor::new(282.76, 40.0, 60.0), &env);
        assert!((y_to_lstar(blue.y) - 60.0).abs() <= 1e-6);
    }

    #[test]
    fn test_bisection_terminates() {
        // an undefined chroma never converges, but the search still ends
        let env = ViewingConditions::hct().environment();
        let xyz = hct_to_xyz(HCTColor::new(30.0, f64::NAN, 50.0), &env);
        assert!(xyz.y.is_nan());
    }

    #[test]
    fn test_clamp_keeps_alpha() {
        let color = HCTColor { h: 370.0, c: -4.0, t: 50.0, alpha: 0.5 };
        let clamped = color.clamp();
        assert_eq!(clamped, HCTColor { h: 10.0, c: 0.0, t: 50.0, alpha: 0.5 });
        assert_eq!(HCTColor::nan_channel(), Some(0));
    }
}
