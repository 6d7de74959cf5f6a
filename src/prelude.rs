//! This module simply brings the most common functionality of the crate under a single namespace,
//! to prevent excessive imports. The prelude includes every trait in the crate, the ubiquitous
//! [`RGBColor`] and [`XYZColor`], the associated parse error [`RGBParseError`], the [`Illuminant`],
//! and the viewing-condition types. The perceptual spaces themselves live in the [`colors`] module
//! and are not included.
//!
//! [`colors`]: ../colors/index.html

pub use bound::Bound;
pub use color::{Color, RGBColor, RGBParseError, XYZColor};
pub use distance::DeltaE;
pub use environment::{Surround, UcsCoefficients, ViewingConditions};
pub use illuminants::Illuminant;
pub use space::ColorSpace;
