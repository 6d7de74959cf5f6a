//! This module contains the concrete color types of the crate. The host spaces (CIELAB and Adobe
//! RGB) implement [`Color`]; the CAM16 family is defined relative to viewing conditions, so each of
//! those comes as a coordinate type paired with a [`ColorSpace`] that performs the conversions. For
//! convenience, each main type is imported into this module's namespace directly.
//!
//! [`Color`]: ../color/trait.Color.html
//! [`ColorSpace`]: ../space/trait.ColorSpace.html
pub mod adobergbcolor;
pub mod cam16jmhcolor;
pub mod cam16ucscolor;
pub mod cielabcolor;
pub mod hctcolor;

// for convenience, use this namespace for the color objects
pub use self::adobergbcolor::AdobeRGBColor;
pub use self::cam16jmhcolor::{CAM16JMhColor, Cam16UcsJmh};
pub use self::cam16ucscolor::{CAM16UCSColor, Cam16Ucs};
pub use self::cielabcolor::CIELABColor;
pub use self::hctcolor::{HCTColor, Hct};
