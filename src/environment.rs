//! This module describes the viewing conditions that CAM16 needs, and derives from them the bundle
//! of coefficients ([`Environment`]) that the forward and inverse transforms use. An `Environment`
//! is computed once, from a [`ViewingConditions`] record or directly from its inputs, and is never
//! mutated afterwards: every space in this crate owns one and passes it explicitly to each
//! conversion.
//!
//! The inputs are the reference white, the luminance of the adapting field in cd/m², the relative
//! luminance of the background, the surround category, whether the observer is assumed to fully
//! discount the illuminant, and which of the three CAM16-UCS coefficient presets to use for the
//! uniform-space remapping.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use cam16::{adapt, Cam16Error};
use color::XYZColor;
use colors::cielabcolor::lstar_to_y;
use consts::{dot, CAT16};
use illuminants::Illuminant;

/// The surround of the viewing field: how bright the area around the stimulus and its background
/// is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surround {
    /// Viewing in a dark room, such as a projector in a theater.
    Dark,
    /// A dimly lit room, such as watching television at night.
    Dim,
    /// Normal viewing of surface colors or a monitor in a lit room.
    Average,
}

impl Surround {
    /// The surround factors `(F, c, Nc)`: the degree-of-adaptation factor, the impact of the
    /// surround, and the chromatic induction factor.
    pub fn factors(&self) -> (f64, f64, f64) {
        match *self {
            Surround::Dark => (0.8, 0.525, 0.8),
            Surround::Dim => (0.9, 0.59, 0.9),
            Surround::Average => (1.0, 0.69, 1.0),
        }
    }
}

impl Default for Surround {
    fn default() -> Surround {
        Surround::Average
    }
}

impl FromStr for Surround {
    type Err = Cam16Error;

    fn from_str(s: &str) -> Result<Surround, Cam16Error> {
        match s {
            "dark" => Ok(Surround::Dark),
            "dim" => Ok(Surround::Dim),
            "average" => Ok(Surround::Average),
            _ => Err(Cam16Error::UnknownSurround),
        }
    }
}

impl fmt::Display for Surround {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Surround::Dark => "dark",
            Surround::Dim => "dim",
            Surround::Average => "average",
        };
        write!(f, "{}", name)
    }
}

/// The coefficient presets of CAM16-UCS. `Ucs` is the general-purpose uniform space; `Lcd` is
/// tuned for large color differences and `Scd` for small ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UcsCoefficients {
    /// Large color differences.
    Lcd,
    /// Small color differences.
    Scd,
    /// The uniform color space proper.
    Ucs,
}

impl UcsCoefficients {
    /// The `(K_L, c1, c2)` triple: the lightness weight used by color difference, and the
    /// coefficients of the lightness and colorfulness remapping.
    pub fn values(&self) -> (f64, f64, f64) {
        match *self {
            UcsCoefficients::Lcd => (0.77, 0.007, 0.0053),
            UcsCoefficients::Scd => (1.24, 0.007, 0.0363),
            UcsCoefficients::Ucs => (1.00, 0.007, 0.0228),
        }
    }
}

impl Default for UcsCoefficients {
    fn default() -> UcsCoefficients {
        UcsCoefficients::Ucs
    }
}

impl FromStr for UcsCoefficients {
    type Err = Cam16Error;

    fn from_str(s: &str) -> Result<UcsCoefficients, Cam16Error> {
        match s {
            "lcd" => Ok(UcsCoefficients::Lcd),
            "scd" => Ok(UcsCoefficients::Scd),
            "ucs" => Ok(UcsCoefficients::Ucs),
            _ => Err(Cam16Error::UnknownCoefficients),
        }
    }
}

impl fmt::Display for UcsCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            UcsCoefficients::Lcd => "lcd",
            UcsCoefficients::Scd => "scd",
            UcsCoefficients::Ucs => "ucs",
        };
        write!(f, "{}", name)
    }
}

/// The inputs of an [`Environment`], as a plain record that can be stored in and loaded from any
/// serde format.
///
/// # Example
/// ```
/// # use cam16::environment::{ViewingConditions, Surround, UcsCoefficients};
/// let conditions = ViewingConditions::default()
///     .with_surround(Surround::Dim)
///     .with_coefficients(UcsCoefficients::Lcd);
/// let env = conditions.environment();
/// assert_eq!(env.conditions().surround, Surround::Dim);
/// assert_eq!(env.kl(), 0.77);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewingConditions {
    /// The reference white.
    pub white: Illuminant,
    /// The luminance of the adapting field, in cd/m².
    pub adapting_luminance: f64,
    /// The relative luminance of the background, on a scale where the white is 100.
    pub background_luminance: f64,
    /// The surround category.
    pub surround: Surround,
    /// Whether the illuminant is discounted, i.e. adaptation is assumed to be complete.
    pub discounting: bool,
    /// Which CAM16-UCS preset to use.
    pub coefficients: UcsCoefficients,
}

impl ViewingConditions {
    /// The standard conditions: a D65 white, an adapting luminance of `64/π · 0.2` cd/m² (a 64 lux
    /// room with a gray-world assumption), a background at 20% of the white, an average surround,
    /// no discounting, and the `ucs` coefficients.
    pub fn standard() -> ViewingConditions {
        ViewingConditions {
            white: Illuminant::D65,
            adapting_luminance: 64.0 / PI * 0.2,
            background_luminance: 20.0,
            surround: Surround::Average,
            discounting: false,
            coefficients: UcsCoefficients::Ucs,
        }
    }
    /// The conditions of the HCT space: the adapting field and background are both set from the
    /// luminance of a mid-tone (L* = 50) gray, with 200 lux of ambient light.
    pub fn hct() -> ViewingConditions {
        let y50 = lstar_to_y(50.0);
        ViewingConditions {
            adapting_luminance: 200.0 / PI * y50,
            background_luminance: y50 * 100.0,
            ..ViewingConditions::standard()
        }
    }
    /// Replaces the UCS coefficient preset.
    pub fn with_coefficients(self, coefficients: UcsCoefficients) -> ViewingConditions {
        ViewingConditions {
            coefficients,
            ..self
        }
    }
    /// Replaces the surround.
    pub fn with_surround(self, surround: Surround) -> ViewingConditions {
        ViewingConditions { surround, ..self }
    }
    /// Replaces the discounting flag.
    pub fn with_discounting(self, discounting: bool) -> ViewingConditions {
        ViewingConditions {
            discounting,
            ..self
        }
    }
    /// Derives the environment for these conditions.
    pub fn environment(&self) -> Environment {
        Environment::new(
            self.white,
            self.adapting_luminance,
            self.background_luminance,
            self.surround,
            self.discounting,
            self.coefficients,
        )
    }
}

impl Default for ViewingConditions {
    fn default() -> ViewingConditions {
        ViewingConditions::standard()
    }
}

/// The coefficients CAM16 derives from a set of viewing conditions. Two environments built from the
/// same inputs are identical.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Environment {
    conditions: ViewingConditions,
    ref_white: [f64; 3],
    c: f64,
    nc: f64,
    kl: f64,
    c1: f64,
    c2: f64,
    fl: f64,
    fl_root: f64,
    n: f64,
    z: f64,
    nbb: f64,
    ncb: f64,
    d_rgb: [f64; 3],
    d_rgb_inv: [f64; 3],
    a_w: f64,
}

impl Environment {
    /// Derives the coefficients for the given white, adapting luminance (cd/m²), background
    /// luminance (relative, white = 100), surround, discounting flag and UCS preset.
    pub fn new(
        white: Illuminant,
        adapting_luminance: f64,
        background_luminance: f64,
        surround: Surround,
        discounting: bool,
        coefficients: UcsCoefficients,
    ) -> Environment {
        let la = adapting_luminance;
        let yb = background_luminance;
        let ref_white = white.white_point();
        let xyz_w = [ref_white[0] * 100.0, ref_white[1] * 100.0, ref_white[2] * 100.0];
        let y_w = xyz_w[1];
        let rgb_w = dot(&CAT16, xyz_w);

        let (f, c, nc) = surround.factors();
        let (kl, c1, c2) = coefficients.values();

        // luminance-level adaptation factor
        let k = 1.0 / (5.0 * la + 1.0);
        let k4 = k.powi(4);
        let fl = k4 * la + 0.1 * (1.0 - k4).powi(2) * (5.0 * la).powf(1.0 / 3.0);
        let fl_root = fl.powf(0.25);

        // background and chromatic induction
        let n = yb / y_w;
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 * n.powf(-0.2);
        let ncb = nbb;

        // degree of adaptation
        let d = if discounting {
            1.0
        } else {
            (f * (1.0 - 1.0 / 3.6 * ((-la - 42.0) / 92.0).exp()))
                .max(0.0)
                .min(1.0)
        };
        let gain = |i: usize| 1.0 + (y_w / rgb_w[i] - 1.0) * d;
        let d_rgb = [gain(0), gain(1), gain(2)];
        let d_rgb_inv = [1.0 / d_rgb[0], 1.0 / d_rgb[1], 1.0 / d_rgb[2]];

        let rgb_aw = adapt(
            [rgb_w[0] * d_rgb[0], rgb_w[1] * d_rgb[1], rgb_w[2] * d_rgb[2]],
            fl,
        );
        let a_w = nbb * (2.0 * rgb_aw[0] + rgb_aw[1] + 0.05 * rgb_aw[2]);

        debug!(
            adapting_luminance = la,
            background_luminance = yb,
            surround = %surround,
            coefficients = %coefficients,
            fl,
            a_w,
            "derived CAM16 environment"
        );

        Environment {
            conditions: ViewingConditions {
                white,
                adapting_luminance,
                background_luminance,
                surround,
                discounting,
                coefficients,
            },
            ref_white,
            c,
            nc,
            kl,
            c1,
            c2,
            fl,
            fl_root,
            n,
            z,
            nbb,
            ncb,
            d_rgb,
            d_rgb_inv,
            a_w,
        }
    }

    /// Like `new`, but takes the surround and UCS preset by name, as they would appear in a
    /// configuration file.
    /// # Errors
    /// Returns `Cam16Error::UnknownSurround` or `Cam16Error::UnknownCoefficients` if either name is
    /// not recognized.
    pub fn from_names(
        white: Illuminant,
        adapting_luminance: f64,
        background_luminance: f64,
        surround: &str,
        discounting: bool,
        coefficients: &str,
    ) -> Result<Environment, Cam16Error> {
        Ok(Environment::new(
            white,
            adapting_luminance,
            background_luminance,
            surround.parse()?,
            discounting,
            coefficients.parse()?,
        ))
    }

    /// The inputs this environment was derived from.
    pub fn conditions(&self) -> ViewingConditions {
        self.conditions
    }
    /// The reference white, with Y = 1.
    pub fn ref_white(&self) -> XYZColor {
        XYZColor::from(self.ref_white)
    }
    /// The impact of the surround, `c`.
    pub fn c(&self) -> f64 {
        self.c
    }
    /// The chromatic induction factor, `Nc`.
    pub fn nc(&self) -> f64 {
        self.nc
    }
    /// The lightness weight used in CAM16-UCS color difference.
    pub fn kl(&self) -> f64 {
        self.kl
    }
    /// The lightness remapping coefficient of CAM16-UCS.
    pub fn c1(&self) -> f64 {
        self.c1
    }
    /// The colorfulness remapping coefficient of CAM16-UCS.
    pub fn c2(&self) -> f64 {
        self.c2
    }
    /// The luminance-level adaptation factor, `F_L`.
    pub fn fl(&self) -> f64 {
        self.fl
    }
    /// The fourth root of `F_L`.
    pub fn fl_root(&self) -> f64 {
        self.fl_root
    }
    /// The background ratio, `n = Yb / Yw`.
    pub fn n(&self) -> f64 {
        self.n
    }
    /// The base exponential nonlinearity, `z`.
    pub fn z(&self) -> f64 {
        self.z
    }
    /// The background induction factor, `Nbb`.
    pub fn nbb(&self) -> f64 {
        self.nbb
    }
    /// The chromatic background induction factor, `Ncb`. Always equal to `Nbb`.
    pub fn ncb(&self) -> f64 {
        self.ncb
    }
    /// The chromatic adaptation gain for each cone channel.
    pub fn d_rgb(&self) -> [f64; 3] {
        self.d_rgb
    }
    /// The reciprocal of each chromatic adaptation gain.
    pub fn d_rgb_inv(&self) -> [f64; 3] {
        self.d_rgb_inv
    }
    /// The achromatic response of the white, `A_w`.
    pub fn a_w(&self) -> f64 {
        self.a_w
    }

    /// Maps CAM16 lightness J to CAM16-UCS J'.
    pub fn ucs_lightness(&self, j: f64) -> f64 {
        (1.0 + 100.0 * self.c1) * j / (1.0 + self.c1 * j)
    }
    /// The inverse of `ucs_lightness`.
    pub fn inverse_ucs_lightness(&self, j_prime: f64) -> f64 {
        j_prime / (1.0 - self.c1 * (j_prime - 100.0))
    }
    /// Maps CAM16 colorfulness M to CAM16-UCS M'.
    pub fn ucs_colorfulness(&self, m: f64) -> f64 {
        (1.0 + self.c2 * m).ln() / self.c2
    }
    /// The inverse of `ucs_colorfulness`.
    pub fn inverse_ucs_colorfulness(&self, m_prime: f64) -> f64 {
        ((m_prime * self.c2).exp() - 1.0) / self.c2
    }
}

impl Default for Environment {
    fn default() -> Environment {
        ViewingConditions::standard().environment()
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_standard_environment() {
        let env = Environment::default();
        assert!((env.fl() - 0.27313053667320736).abs() <= 1e-12);
        assert!((env.a_w() - 25.518496218771627).abs() <= 1e-9);
        assert!((env.n() - 0.2).abs() <= 1e-12);
        assert!((env.z() - 1.9272135954999579).abs() <= 1e-12);
        assert!((env.nbb() - 1.0003040045593807).abs() <= 1e-12);
        assert_eq!(env.nbb(), env.ncb());
        assert_eq!((env.kl(), env.c1(), env.c2()), (1.0, 0.007, 0.0228));
        assert!(env.ref_white().approx_equal(&XYZColor::white()));
        for i in 0..3 {
            assert!((env.d_rgb()[i] * env.d_rgb_inv()[i] - 1.0).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_hct_environment() {
        let env = ViewingConditions::hct().environment();
        assert!((env.fl() - 0.3884814537800353).abs() <= 1e-12);
        assert!((env.a_w() - 29.980990887425254).abs() <= 1e-9);
    }

    #[test]
    fn test_environment_is_pure() {
        let conditions = ViewingConditions::default().with_surround(Surround::Dark);
        assert_eq!(conditions.environment(), conditions.environment());
        assert_eq!(conditions.environment().conditions(), conditions);
    }

    #[test]
    fn test_discounting() {
        // full adaptation: every cone channel is scaled so the white is neutral
        let env = ViewingConditions::default().with_discounting(true).environment();
        let rgb_w = dot(&CAT16, [95.04559270516716, 100.0, 108.90577507598784]);
        for i in 0..3 {
            assert!((rgb_w[i] * env.d_rgb()[i] - 100.0).abs() <= 1e-9);
        }
    }

    #[test]
    fn test_from_names() {
        let env = Environment::from_names(Illuminant::D65, 40.0, 20.0, "dim", false, "scd").unwrap();
        assert_eq!(env.conditions().surround, Surround::Dim);
        assert_eq!(env.c(), 0.59);
        assert_eq!(env.kl(), 1.24);
        assert_eq!(
            Environment::from_names(Illuminant::D65, 40.0, 20.0, "bright", false, "ucs"),
            Err(Cam16Error::UnknownSurround)
        );
        assert_eq!(
            Environment::from_names(Illuminant::D65, 40.0, 20.0, "dim", false, "hcd"),
            Err(Cam16Error::UnknownCoefficients)
        );
        assert_eq!("Average".parse::<Surround>(), Err(Cam16Error::UnknownSurround));
    }

    #[test]
    fn test_ucs_remapping() {
        let env = Environment::default();
        assert!((env.ucs_lightness(100.0) - 100.0).abs() <= 1e-12);
        for &j in &[0.0, 12.5, 59.0, 140.0] {
            assert!((env.inverse_ucs_lightness(env.ucs_lightness(j)) - j).abs() <= 1e-10);
        }
        for &m in &[0.0, 3.0, 45.0, 120.0] {
            assert!((env.inverse_ucs_colorfulness(env.ucs_colorfulness(m)) - m).abs() <= 1e-10);
        }
    }
}
