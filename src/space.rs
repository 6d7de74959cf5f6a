//! This module defines [`ColorSpace`], the interface of the color spaces that need viewing
//! conditions to be defined. Unlike a [`Color`], whose conversions are fixed functions of its
//! components, a `ColorSpace` is a value: it owns the `Environment` (and anything else, like an
//! achromatic boundary) that it derives once when it is built, and every conversion goes through
//! it. Build a space once and reuse it.

use color::{Color, XYZColor};
use environment::Environment;

/// A color space whose conversions depend on state computed when the space is built.
/// # Example
/// ```
/// # use cam16::prelude::*;
/// # use cam16::colors::{Cam16Ucs, CAM16UCSColor};
/// let space = Cam16Ucs::ucs();
/// let red = RGBColor::from_hex_code("#ff0000").unwrap();
/// let ucs = space.convert_from(&red);
/// assert!((ucs.j - 59.178).abs() <= 1e-3);
/// let back: RGBColor = space.convert_to(ucs);
/// assert_eq!(back.to_string(), "#FF0000");
/// ```
pub trait ColorSpace {
    /// The coordinates of a color in this space.
    type Color: Copy;
    /// The viewing conditions this space was built with.
    fn environment(&self) -> &Environment;
    /// Converts D65-relative tristimulus values to coordinates in this space.
    fn from_xyz(&self, xyz: XYZColor) -> Self::Color;
    /// Converts coordinates in this space back to D65-relative tristimulus values.
    fn to_xyz(&self, color: Self::Color) -> XYZColor;
    /// Converts any `Color` into this space.
    fn convert_from<T: Color>(&self, color: &T) -> Self::Color {
        self.from_xyz(color.to_xyz())
    }
    /// Converts coordinates in this space into any `Color`.
    fn convert_to<T: Color>(&self, color: Self::Color) -> T {
        T::from_xyz(self.to_xyz(color))
    }
}
