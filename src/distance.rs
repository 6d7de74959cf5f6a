//! This module provides color difference and contrast measures built on the perceptual spaces of
//! this crate. [`DeltaE`] is implemented by the spaces that have a difference formula of their own:
//! [`Cam16Ucs`] (in any of its three variants) and [`Hct`]. Both need a built space, so build one
//! and reuse it rather than measuring through a fresh space each time.
//!
//! [`Cam16Ucs`]: ../colors/cam16ucscolor/struct.Cam16Ucs.html
//! [`Hct`]: ../colors/hctcolor/struct.Hct.html

use color::Color;
use colors::cielabcolor::CIELABColor;
use colors::{CAM16UCSColor, Cam16Ucs, HCTColor, Hct};
use coord::Coord;
use space::ColorSpace;

/// A color space with a perceptual color difference formula.
/// # Example
/// ```
/// # use cam16::prelude::*;
/// # use cam16::colors::Cam16Ucs;
/// let red = RGBColor::from_hex_code("#ff0000").unwrap();
/// let orange = RGBColor::from_hex_code("#ffa500").unwrap();
/// let space = Cam16Ucs::ucs();
/// assert!((space.delta_e_between(&red, &orange) - 37.32).abs() <= 1e-3);
/// ```
pub trait DeltaE: ColorSpace {
    /// The difference between two colors of this space. It is 0 for identical colors and symmetric.
    fn delta_e(&self, color: Self::Color, sample: Self::Color) -> f64;
    /// The difference between two colors of any types, measured in this space.
    fn delta_e_between<T: Color, U: Color>(&self, color: &T, sample: &U) -> f64 {
        self.delta_e(self.convert_from(color), self.convert_from(sample))
    }
}

fn no_nan(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x
    }
}

impl DeltaE for Cam16Ucs {
    /// Euclidean distance in the uniform space, with the lightness difference divided by the
    /// variant's `K_L`.
    fn delta_e(&self, color: CAM16UCSColor, sample: CAM16UCSColor) -> f64 {
        let c1: Coord = color.into();
        let c2: Coord = sample.into();
        let zero_nan = |c: Coord| Coord {
            x: no_nan(c.x),
            y: no_nan(c.y),
            z: no_nan(c.z),
        };
        zero_nan(c1).weighted_distance(&zero_nan(c2), [self.environment().kl(), 1.0, 1.0])
    }
}

impl Hct {
    /// Projects hue and chroma onto the opponent axes of CAM16-UCS, using this space's colorfulness
    /// remapping. An undefined hue counts as 0.
    fn ucs_ab(&self, color: HCTColor) -> (f64, f64) {
        let m = self.environment().ucs_colorfulness(no_nan(color.c));
        let h = no_nan(color.h).to_radians();
        (m * h.cos(), m * h.sin())
    }
}

impl DeltaE for Hct {
    /// Tone differences are weighted as lightness is in CIEDE2000, so they count for less away
    /// from the middle of the tone range. Chroma and hue are compared as the opponent axes of
    /// CAM16-UCS.
    fn delta_e(&self, color: HCTColor, sample: HCTColor) -> f64 {
        let (a1, b1) = self.ucs_ab(color);
        let (a2, b2) = self.ucs_ab(sample);
        let (t1, t2) = (no_nan(color.t), no_nan(sample.t));

        let mean_offset = ((t1 + t2) / 2.0 - 50.0).powi(2);
        let s_l = 1.0 + 0.015 * mean_offset / (20.0 + mean_offset).sqrt();

        let c1 = Coord { x: t1, y: a1, z: b1 };
        let c2 = Coord { x: t2, y: a2, z: b2 };
        c1.weighted_distance(&c2, [s_l, 1.0, 1.0])
    }
}

/// The contrast between two colors as the absolute difference of their CIE L\* values, which is
/// how tone differences are read in HCT. A difference of 40 is the usual floor for legible text, 50
/// for small text.
/// # Example
/// ```
/// # use cam16::prelude::*;
/// # use cam16::distance::contrast_lstar;
/// let white = RGBColor::from_hex_code("#ffffff").unwrap();
/// let black = RGBColor::from_hex_code("#000000").unwrap();
/// assert!((contrast_lstar(&white, &black) - 100.).abs() <= 1e-9);
/// ```
pub fn contrast_lstar<T: Color, U: Color>(color1: &T, color2: &U) -> f64 {
    let l1 = color1.convert::<CIELABColor>().l;
    let l2 = color2.convert::<CIELABColor>().l;
    (l1 - l2).abs()
}
