//! This module decides when a color is achromatic, i.e. when its hue means nothing. CAM16 does not
//! give neutral colors zero colorfulness: the colorfulness of a gray rises with its lightness, so a
//! fixed cutoff is wrong at one end of the lightness range or the other. Instead, an
//! [`AchromaticBoundary`] samples the neutral ramp (equal R, G and B, well past white into HDR
//! values) through a space's own forward transform, fits a spline through the (lightness,
//! colorfulness) pairs it finds, and classifies a color as achromatic if its colorfulness is below
//! that curve or within a small threshold of it.
//!
//! The spline is fitted over a normalized parameter: each consecutive pair of samples takes up an
//! equal share of [0, 1], whatever their spacing in lightness. Lightness is mapped into that
//! parameter piecewise linearly, so the curve can be sampled densely where it bends.

use color::{Color, RGBColor, XYZColor};

/// One run of neutral sample levels: the integers `start, start + step, ...` below `end`, each
/// divided by `scale` to get the sRGB component value.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    /// The first integer level.
    pub start: u32,
    /// One past the last integer level.
    pub end: u32,
    /// The distance between levels.
    pub step: u32,
    /// The divisor turning a level into an sRGB component.
    pub scale: f64,
}

impl SampleRange {
    /// The sRGB component values of this range, in increasing order.
    pub fn levels(&self) -> Vec<f64> {
        let scale = self.scale;
        (self.start..self.end)
            .step_by(self.step.max(1) as usize)
            .map(|level| f64::from(level) / scale)
            .collect()
    }
}

/// The kind of spline fitted through the boundary samples.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplineKind {
    /// A Catmull-Rom spline, passing through every sample with tangents taken from its neighbors.
    CatmullRom,
    /// A natural cubic spline: twice continuously differentiable, with zero curvature at the ends.
    Natural,
    /// A monotone cubic (Fritsch-Carlson) spline, which never overshoots the samples.
    Monotone,
}

/// A cubic spline through values at evenly spaced knots on [0, 1], extrapolated linearly outside
/// that interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    kind: SplineKind,
    values: Vec<f64>,
    // second derivatives for natural splines, tangents for monotone ones, unused for Catmull-Rom
    coefs: Vec<f64>,
}

impl Spline {
    /// Fits a spline of the given kind through the given values.
    pub fn fit(kind: SplineKind, values: Vec<f64>) -> Spline {
        let coefs = match kind {
            SplineKind::CatmullRom => vec![],
            SplineKind::Natural => natural_second_derivatives(&values),
            SplineKind::Monotone => monotone_tangents(&values),
        };
        Spline {
            kind,
            values,
            coefs,
        }
    }

    /// The kind of this spline.
    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Evaluates the spline at `t`. Values of `t` outside [0, 1] continue the line through the
    /// first or last two knots.
    pub fn eval(&self, t: f64) -> f64 {
        let y = &self.values;
        if t.is_nan() {
            return t;
        }
        match y.len() {
            0 => return 0.0,
            1 => return y[0],
            _ => {}
        }
        let n = y.len() - 1;
        let nf = n as f64;
        if t < 0.0 {
            return y[0] + (y[1] - y[0]) * t * nf;
        }
        if t > 1.0 {
            return y[n] + (y[n] - y[n - 1]) * (t - 1.0) * nf;
        }

        let i = ((t * nf).floor() as usize).min(n - 1);
        let u = t * nf - i as f64;
        match self.kind {
            SplineKind::CatmullRom => {
                // the ends are padded by reflecting the neighboring knot
                let p0 = if i > 0 { y[i - 1] } else { 2.0 * y[0] - y[1] };
                let p1 = y[i];
                let p2 = y[i + 1];
                let p3 = if i + 2 <= n { y[i + 2] } else { 2.0 * y[n] - y[n - 1] };
                0.5 * (2.0 * p1
                    + (-p0 + p2) * u
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u * u
                    + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u * u * u)
            }
            SplineKind::Natural => {
                let m = &self.coefs;
                let v = 1.0 - u;
                v * y[i] + u * y[i + 1]
                    + (v * v * v - v) * m[i] / 6.0
                    + (u * u * u - u) * m[i + 1] / 6.0
            }
            SplineKind::Monotone => {
                let m = &self.coefs;
                let (u2, u3) = (u * u, u * u * u);
                (2.0 * u3 - 3.0 * u2 + 1.0) * y[i]
                    + (u3 - 2.0 * u2 + u) * m[i]
                    + (-2.0 * u3 + 3.0 * u2) * y[i + 1]
                    + (u3 - u2) * m[i + 1]
            }
        }
    }
}

/// Second derivatives of the natural cubic spline through `y` at unit knot spacing, found with the
/// Thomas algorithm. The ends are zero.
fn natural_second_derivatives(y: &[f64]) -> Vec<f64> {
    let len = y.len();
    let mut m = vec![0.0; len];
    if len <= 2 {
        return m;
    }
    // tridiagonal system over the interior knots: m[i-1] + 4 m[i] + m[i+1] = d[i]
    let size = len - 2;
    let mut diag = vec![4.0; size];
    let mut rhs: Vec<f64> = (1..len - 1)
        .map(|i| 6.0 * (y[i + 1] - 2.0 * y[i] + y[i - 1]))
        .collect();
    for i in 1..size {
        let w = 1.0 / diag[i - 1];
        diag[i] -= w;
        rhs[i] -= w * rhs[i - 1];
    }
    m[size] = rhs[size - 1] / diag[size - 1];
    for i in (0..size - 1).rev() {
        m[i + 1] = (rhs[i] - m[i + 2]) / diag[i];
    }
    m
}

/// Fritsch-Carlson tangents for the monotone cubic through `y` at unit knot spacing.
fn monotone_tangents(y: &[f64]) -> Vec<f64> {
    let len = y.len();
    if len < 2 {
        return vec![0.0; len];
    }
    let d: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
    let mut t = vec![0.0; len];
    t[0] = d[0];
    t[len - 1] = d[len - 2];
    for i in 1..len - 1 {
        t[i] = if d[i - 1] * d[i] <= 0.0 {
            0.0
        } else {
            (d[i - 1] + d[i]) / 2.0
        };
    }
    for i in 0..len - 1 {
        if d[i] == 0.0 {
            t[i] = 0.0;
            t[i + 1] = 0.0;
            continue;
        }
        let alpha = t[i] / d[i];
        let beta = t[i + 1] / d[i];
        let sum = alpha * alpha + beta * beta;
        if sum > 9.0 {
            let tau = 3.0 / sum.sqrt();
            t[i] = tau * alpha * d[i];
            t[i + 1] = tau * beta * d[i];
        }
    }
    t
}

/// The boundary between achromatic and chromatic colors of one space, as a function of that space's
/// lightness. Built once and then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct AchromaticBoundary {
    domain: Vec<f64>,
    spline: Spline,
    threshold: f64,
    max_colorfulness: f64,
}

impl AchromaticBoundary {
    /// Samples the neutral sRGB ramp at the levels given by `ranges`, converting each gray to XYZ
    /// and then to a (lightness, colorfulness) pair with `sampler`, and fits a spline of the given
    /// kind through the colorfulness values. `threshold` is how far above the curve a color may be
    /// and still count as achromatic. Anything more colorful than `ceiling` is never achromatic; if
    /// no ceiling is given, it is one more than the largest colorfulness sampled, rounded to three
    /// decimal places.
    ///
    /// The lightness values produced must not decrease along the ramp.
    pub fn new<F>(
        ranges: &[SampleRange],
        threshold: f64,
        kind: SplineKind,
        ceiling: Option<f64>,
        sampler: F,
    ) -> AchromaticBoundary
    where
        F: Fn(XYZColor) -> (f64, f64),
    {
        let mut domain = vec![];
        let mut colorfulness = vec![];
        let mut max_sampled: f64 = 0.0;
        for range in ranges {
            for level in range.levels() {
                let (lightness, m) = sampler(RGBColor::gray(level).to_xyz());
                max_sampled = max_sampled.max(m);
                domain.push(lightness);
                colorfulness.push(m);
            }
        }
        let max_colorfulness =
            ceiling.unwrap_or_else(|| (max_sampled * 1000.0).round() / 1000.0 + 1.0);

        debug!(
            samples = domain.len(),
            max_colorfulness,
            kind = ?kind,
            "fitted achromatic boundary"
        );

        AchromaticBoundary {
            domain,
            spline: Spline::fit(kind, colorfulness),
            threshold,
            max_colorfulness,
        }
    }

    /// Maps a lightness to the spline's parameter: the first sample maps to 0, the last to 1, and
    /// each span between consecutive samples to an equal share of the interval. Outside the sampled
    /// lightnesses, the mapping continues linearly, scaled by the whole sampled span. NaN maps to
    /// NaN.
    pub fn scale(&self, lightness: f64) -> f64 {
        let d = &self.domain;
        if lightness.is_nan() {
            return lightness;
        }
        if d.len() < 2 {
            return 0.0;
        }
        let first = d[0];
        let last = d[d.len() - 1];
        let span = last - first;
        if lightness <= first {
            return (lightness - first) / span;
        }
        if lightness >= last {
            return 1.0 + (lightness - last) / span;
        }

        let size = 1.0 / (d.len() - 1) as f64;
        // index of the last sample not above the lightness
        let i = d.partition_point(|&x| x <= lightness) - 1;
        let (a, b) = (d[i], d[i + 1]);
        let adj = if b > a { (lightness - a) / (b - a) } else { 0.0 };
        size * i as f64 + adj * size
    }

    /// The interpolated colorfulness of a neutral color with the given lightness. Below the darkest
    /// sample this is 0.
    pub fn boundary(&self, lightness: f64) -> f64 {
        let t = self.scale(lightness);
        if t < 0.0 {
            0.0
        } else {
            self.spline.eval(t)
        }
    }

    /// Whether a color with the given lightness and colorfulness should be treated as having no
    /// hue. A color with an undefined lightness or colorfulness is never achromatic.
    pub fn is_achromatic(&self, lightness: f64, colorfulness: f64) -> bool {
        if lightness.is_nan() || colorfulness.is_nan() || colorfulness > self.max_colorfulness {
            return false;
        }
        let limit = self.boundary(lightness);
        colorfulness < limit || (limit - colorfulness).abs() < self.threshold
    }

    /// The sampled lightness values, in order.
    pub fn samples(&self) -> &[f64] {
        &self.domain
    }
    /// How far above the boundary a color may be and still count as achromatic.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
    /// The colorfulness above which nothing is achromatic.
    pub fn max_colorfulness(&self) -> f64 {
        self.max_colorfulness
    }
    /// The fitted spline.
    pub fn spline(&self) -> &Spline {
        &self.spline
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    const KINDS: [SplineKind; 3] = [SplineKind::CatmullRom, SplineKind::Natural, SplineKind::Monotone];

    #[test]
    fn test_levels() {
        let range = SampleRange { start: 101, end: 252, step: 25, scale: 45.0 };
        let levels = range.levels();
        assert_eq!(levels.len(), 7);
        assert_eq!(levels[0], 101.0 / 45.0);
        assert_eq!(levels[6], 251.0 / 45.0);
    }

    #[test]
    fn test_splines_through_knots() {
        let values = vec![0.0, 0.3, 0.5, 2.0, 2.2, 2.3];
        for &kind in KINDS.iter() {
            let spline = Spline::fit(kind, values.clone());
            for (i, &v) in values.iter().enumerate() {
                let t = i as f64 / 5.0;
                assert!((spline.eval(t) - v).abs() <= 1e-12, "{:?} {}", kind, i);
            }
        }
    }

    #[test]
    fn test_splines_reproduce_lines() {
        let values = vec![1.0, 3.0, 5.0, 7.0];
        for &kind in KINDS.iter() {
            let spline = Spline::fit(kind, values.clone());
            for &t in &[0.1, 0.25, 0.5, 0.9] {
                assert!((spline.eval(t) - (1.0 + 6.0 * t)).abs() <= 1e-12, "{:?} {}", kind, t);
            }
        }
    }

    #[test]
    fn test_linear_extrapolation() {
        let values = vec![0.0, 1.0, 4.0, 5.0];
        for &kind in KINDS.iter() {
            let spline = Spline::fit(kind, values.clone());
            // slope of the first and last segments, three segments per unit
            assert!((spline.eval(-0.5) + 1.5).abs() <= 1e-12);
            assert!((spline.eval(1.5) - 6.5).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_monotone_does_not_overshoot() {
        let values = vec![0.0, 0.0, 1.0, 1.0];
        let catrom = Spline::fit(SplineKind::CatmullRom, values.clone());
        let monotone = Spline::fit(SplineKind::Monotone, values.clone());
        assert!(catrom.eval(0.2) < 0.0);
        for i in 0..=100u32 {
            let v = monotone.eval(f64::from(i) / 100.0);
            assert!(v >= 0.0 && v <= 1.0);
        }
    }

    #[test]
    fn test_natural_curvature() {
        let spline = Spline::fit(SplineKind::Natural, vec![0.0, 1.0, 0.0]);
        // m = [0, -3, 0]: the midpoint of each half bulges above the line
        assert!((spline.eval(0.25) - 0.6875).abs() <= 1e-12);
        assert!((spline.eval(0.75) - 0.6875).abs() <= 1e-12);
    }

    fn flat_boundary() -> AchromaticBoundary {
        let ranges = [SampleRange { start: 0, end: 5, step: 1, scale: 4.0 }];
        AchromaticBoundary::new(&ranges, 0.06, SplineKind::CatmullRom, None, |xyz| (xyz.y, 0.5))
    }

    #[test]
    fn test_scale() {
        let boundary = flat_boundary();
        let d = boundary.samples().to_vec();
        assert_eq!(d.len(), 5);
        assert_eq!(boundary.scale(d[0]), 0.0);
        assert_eq!(boundary.scale(d[4]), 1.0);
        assert!((boundary.scale(d[2]) - 0.5).abs() <= 1e-12);
        assert!((boundary.scale((d[1] + d[2]) / 2.0) - 0.375).abs() <= 1e-12);
        let span = d[4] - d[0];
        assert!((boundary.scale(d[0] - span) + 1.0).abs() <= 1e-12);
        assert!((boundary.scale(d[4] + span / 2.0) - 1.5).abs() <= 1e-12);
    }

    #[test]
    fn test_classification() {
        let boundary = flat_boundary();
        assert_eq!(boundary.max_colorfulness(), 1.5);
        let mid = boundary.samples()[2];
        assert!(boundary.is_achromatic(mid, 0.4));
        assert!(boundary.is_achromatic(mid, 0.55));
        assert!(!boundary.is_achromatic(mid, 0.7));
        assert!(!boundary.is_achromatic(mid, 2.0));
        // below the darkest sample the boundary is zero, leaving only the threshold
        assert!(boundary.is_achromatic(-1.0, 0.01));
        assert!(!boundary.is_achromatic(-1.0, 0.1));
    }

    #[test]
    fn test_undefined_lightness() {
        let boundary = flat_boundary();
        assert!(boundary.scale(f64::NAN).is_nan());
        assert!(boundary.boundary(f64::NAN).is_nan());
        assert!(!boundary.is_achromatic(f64::NAN, 0.4));
        assert!(!boundary.is_achromatic(boundary.samples()[2], f64::NAN));
        assert!(boundary.spline().eval(f64::NAN).is_nan());
    }

    #[test]
    fn test_fixed_ceiling() {
        let ranges = [SampleRange { start: 0, end: 5, step: 1, scale: 4.0 }];
        let boundary =
            AchromaticBoundary::new(&ranges, 0.06, SplineKind::Natural, Some(0.45), |xyz| (xyz.y, 0.5));
        assert_eq!(boundary.max_colorfulness(), 0.45);
        assert!(!boundary.is_achromatic(boundary.samples()[2], 0.46));
        assert_eq!(boundary.spline().kind(), SplineKind::Natural);
    }
}
