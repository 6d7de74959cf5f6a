//! This module describes the channels of a color type and the [`Bound`] trait built on them. Each
//! channel has a name, a nominal range (where "typical" colors land, for example 0-100 for a
//! lightness), optional hard limits that no valid color may cross, and whether it is a cyclic hue
//! angle. Hosts use this to label axes, clamp colors, and know which channel may carry an undefined
//! (NaN) hue.

use color::RGBColor;
use coord::Coord;

/// A declaration of one channel of a three-channel color type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Channel {
    /// The short name of the channel, such as `"j"` or `"h"`.
    pub name: &'static str,
    /// The nominal (low, high) range of the channel. Colors may leave this range: it only describes
    /// where most visible colors fall.
    pub range: (f64, f64),
    /// A hard lower limit, if the channel has one.
    pub floor: Option<f64>,
    /// A hard upper limit, if the channel has one.
    pub ceiling: Option<f64>,
    /// Whether this channel is a hue angle in degrees, wrapping around at 360.
    pub angle: bool,
}

impl Channel {
    /// A channel with the given nominal range and no hard limits.
    pub fn new(name: &'static str, low: f64, high: f64) -> Channel {
        Channel {
            name,
            range: (low, high),
            floor: None,
            ceiling: None,
            angle: false,
        }
    }
    /// A cyclic hue channel, in degrees.
    pub fn angle(name: &'static str) -> Channel {
        Channel {
            angle: true,
            ..Channel::new(name, 0.0, 360.0)
        }
    }
    /// Adds a hard lower limit.
    pub fn with_floor(self, floor: f64) -> Channel {
        Channel {
            floor: Some(floor),
            ..self
        }
    }
    /// Adds a hard upper limit.
    pub fn with_ceiling(self, ceiling: f64) -> Channel {
        Channel {
            ceiling: Some(ceiling),
            ..self
        }
    }
    /// Forces a value into the channel's hard limits: angles are wrapped into [0, 360), other values
    /// are clamped to the floor and ceiling. NaN is left alone.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        if self.angle {
            return value.rem_euclid(360.0);
        }
        let value = self.floor.map_or(value, |floor| value.max(floor));
        self.ceiling.map_or(value, |ceiling| value.min(ceiling))
    }
}

/// Describes a color type whose three channels have known names and bounds, in the order that they
/// appear in the `Coord` representation.
/// # Example
/// Bound a clearly-problematic color within sRGB.
///
/// ```
/// # use cam16::prelude::*;
/// let out_of_bounds = RGBColor{r: 1.2, g: -0.1, b: 0.5};
/// let in_bounds = out_of_bounds.clamp();
/// assert_eq!(in_bounds, RGBColor{r: 1., g: 0., b: 0.5});
/// assert_eq!(RGBColor::channels()[0].name, "r");
/// ```
pub trait Bound: Into<Coord> + From<Coord> + Copy {
    /// The three channel declarations.
    fn channels() -> [Channel; 3];
    /// The index of the channel that holds NaN when its value is undefined (a hue, for spaces that
    /// detect achromatic colors), if any.
    fn nan_channel() -> Option<usize> {
        None
    }
    /// Returns an array [(min1, max1), (min2, max2), (min3, max3)] of the nominal ranges of each
    /// component.
    fn bounds() -> [(f64, f64); 3] {
        let channels = Self::channels();
        [channels[0].range, channels[1].range, channels[2].range]
    }
    /// Given a Coord, returns a Coord such that each component has been forced into its channel's
    /// hard limits. See trait documentation for example usage.
    fn clamp_coord(point: Coord) -> Coord {
        let channels = Self::channels();
        Coord {
            x: channels[0].clamp(point.x),
            y: channels[1].clamp(point.y),
            z: channels[2].clamp(point.z),
        }
    }
    /// Returns a copy of this color with every component inside its hard limits.
    fn clamp(self) -> Self {
        Self::from(Self::clamp_coord(self.into()))
    }
}

// implement Bound for the base colors in the color module, to avoid cluttering that more than it
// already is
impl Bound for RGBColor {
    fn channels() -> [Channel; 3] {
        [
            Channel::new("r", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
            Channel::new("g", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
            Channel::new("b", 0.0, 1.0).with_floor(0.0).with_ceiling(1.0),
        ]
    }
}
