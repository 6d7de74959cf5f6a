//! An implementation of the CAM16 color appearance model and the perceptual color spaces built on
//! it: CAM16-UCS with its large and small color difference variants, the polar J'M'h form of
//! CAM16-UCS, and HCT, the hue/chroma/tone space behind Material Design's dynamic color.
//!
//! CAM16 describes how a color looks rather than how it is measured, and that depends on how it is
//! viewed: the white the eye is adapted to, how bright the surroundings are, and so on. These
//! viewing conditions are captured once in an [`Environment`], and each perceptual space is a value
//! that owns one. Build a space once and convert many colors with it:
//!
//! ```
//! use cam16::prelude::*;
//! use cam16::colors::Hct;
//!
//! let hct = Hct::default();
//! let red = hct.convert_from(&RGBColor::from_hex_code("#ff0000").unwrap());
//! assert!((red.t - 53.237).abs() <= 1e-3);
//! let gray = hct.convert_from(&RGBColor::from_hex_code("#808080").unwrap());
//! // neutral colors have no hue
//! assert!(gray.h.is_nan());
//! ```
//!
//! [`Environment`]: environment/struct.Environment.html

// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

extern crate float_cmp;
#[macro_use]
extern crate lazy_static;
extern crate num;
extern crate regex;
extern crate rulinalg;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate tracing;

pub mod achromatic;
pub mod bound;
pub mod cam16;
pub mod color;
pub mod colors;
mod consts;
pub mod coord;
pub mod distance;
pub mod environment;
pub mod illuminants;
pub mod prelude;
pub mod space;
