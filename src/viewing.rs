//! This module defines the viewing conditions that the appearance model is parameterized by. In
//! traditional color spaces a color is identified entirely by the observer's measurement of the
//! light itself; a color appearance model also needs to know about the environment the light is
//! seen in, because the eye adapts. The same physical orange looks vivid against mid-gray in a dim
//! room and washed out on a sunlit white page. All of those environmental facts (the white point,
//! how bright the surroundings are, how dark the background is, whether the viewer's vision has
//! fully discounted the illuminant) get digested here, once, into the handful of derived factors
//! the forward and inverse transforms actually use.

use std::f64::consts::PI;

use cam16::XYZ_TO_CAM16_RGB;
use color::y_from_lstar;
use illuminants::Illuminant;

fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * stop
}

/// The parameters of the environment a color is viewed in, in the digested form the appearance
/// model consumes. Construct one with [`new`](#method.new); every field is derived
/// deterministically from the physical inputs and never changes afterward. The
/// [`standard`](#method.standard) instance describes a typical sRGB viewing environment and is
/// what every conditions-free operation in this crate uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewingConditions {
    /// Achromatic response to the white point.
    pub aw: f64,
    /// Brightness induction factor.
    pub nbb: f64,
    /// Colorfulness induction factor.
    pub ncb: f64,
    /// Exponential nonlinearity, derived from the surround.
    pub c: f64,
    /// Chromatic induction factor.
    pub nc: f64,
    /// Background factor: background luminance relative to the white point's.
    pub n: f64,
    /// Per-channel chromatic adaptation factors in the cone response basis.
    pub rgb_d: [f64; 3],
    /// Luminance-level adaptation factor.
    pub fl: f64,
    /// The fourth root of `fl`, the form the brightness and colorfulness correlates consume.
    pub fl_root: f64,
    /// Base exponent for the lightness correlate.
    pub z: f64,
}

lazy_static! {
    /// Viewing conditions for a typical sRGB environment: D65 white point, an adapting luminance
    /// matching an average surface, a mid-gray (tone 50) background, an average surround, and no
    /// discounting of the illuminant. Computed once; referentially transparent thereafter.
    pub static ref STANDARD: ViewingConditions = ViewingConditions::new(
        Illuminant::D65,
        200.0 / PI * y_from_lstar(50.0) / 100.0,
        50.0,
        2.0,
        false,
    );
}

impl ViewingConditions {
    /// Creates viewing conditions from physically meaningful parameters.
    ///
    /// * `illuminant`: the light source, supplying the white point.
    /// * `adapting_luminance`: luminance of the adapting field in cd/m², often taken as 20% of the
    ///   luminance of a white surface in the scene.
    /// * `background_lstar`: tone of the background behind the colors being viewed. A background
    ///   of pure black is non-physical and leads to infinities, so anything below 0.1 is treated
    ///   as 0.1.
    /// * `surround`: how bright the field beyond the background is, from 0 (dark, as in a cinema)
    ///   through 2 (average, as in a lit room).
    /// * `discounting_illuminant`: whether the viewer's vision is treated as fully adapted to the
    ///   illuminant, as when judging the color of an object rather than of the light.
    pub fn new(
        illuminant: Illuminant,
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> ViewingConditions {
        let white_point = illuminant.white_point();
        let background_lstar = background_lstar.max(0.1);

        // project the white point into the cone response basis
        let r_w = white_point[0] * XYZ_TO_CAM16_RGB[0][0]
            + white_point[1] * XYZ_TO_CAM16_RGB[0][1]
            + white_point[2] * XYZ_TO_CAM16_RGB[0][2];
        let g_w = white_point[0] * XYZ_TO_CAM16_RGB[1][0]
            + white_point[1] * XYZ_TO_CAM16_RGB[1][1]
            + white_point[2] * XYZ_TO_CAM16_RGB[1][2];
        let b_w = white_point[0] * XYZ_TO_CAM16_RGB[2][0]
            + white_point[1] * XYZ_TO_CAM16_RGB[2][1]
            + white_point[2] * XYZ_TO_CAM16_RGB[2][2];

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };

        // degree of chromatic adaptation, 1 when the illuminant is discounted entirely
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        };
        let d = d.max(0.0).min(1.0);

        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        // the luminance adaptation factor blends a linear and a fourth-power response so it stays
        // smooth as the adapting luminance approaches zero
        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let rgb_a_factors = [
            (fl * rgb_d[0] * r_w / 100.0).powf(0.42),
            (fl * rgb_d[1] * g_w / 100.0).powf(0.42),
            (fl * rgb_d[2] * b_w / 100.0).powf(0.42),
        ];
        let rgb_a = [
            400.0 * rgb_a_factors[0] / (rgb_a_factors[0] + 27.13),
            400.0 * rgb_a_factors[1] / (rgb_a_factors[1] + 27.13),
            400.0 * rgb_a_factors[2] / (rgb_a_factors[2] + 27.13),
        ];
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        ViewingConditions {
            aw,
            nbb,
            ncb,
            c,
            nc,
            n,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// The standard sRGB-like viewing conditions. This is what every operation that doesn't take
    /// explicit conditions assumes.
    pub fn standard() -> &'static ViewingConditions {
        &STANDARD
    }

    /// The standard conditions, but with the given background tone instead of mid-gray. Useful
    /// for dark themes, where the background behind the colors is closer to tone 10 than 50.
    pub fn with_background_lstar(background_lstar: f64) -> ViewingConditions {
        ViewingConditions::new(
            Illuminant::D65,
            200.0 / PI * y_from_lstar(50.0) / 100.0,
            background_lstar,
            2.0,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_standard_conditions() {
        // reference values for the default sRGB-like environment
        let vc = ViewingConditions::standard();
        assert!((vc.n - 0.184).abs() <= 1e-3);
        assert!((vc.aw - 29.981).abs() <= 1e-3);
        assert!((vc.nbb - 1.017).abs() <= 1e-3);
        assert!((vc.ncb - 1.017).abs() <= 1e-3);
        assert!((vc.c - 0.69).abs() <= 1e-3);
        assert!((vc.nc - 1.0).abs() <= 1e-3);
        assert!((vc.rgb_d[0] - 1.021).abs() <= 1e-3);
        assert!((vc.rgb_d[1] - 0.986).abs() <= 1e-3);
        assert!((vc.rgb_d[2] - 0.934).abs() <= 1e-3);
        assert!((vc.fl - 0.388).abs() <= 1e-3);
        assert!((vc.fl_root - 0.789).abs() <= 1e-3);
        assert!((vc.z - 1.909).abs() <= 1e-3);
    }

    #[test]
    fn test_black_background_is_clamped() {
        let pitch_black = ViewingConditions::new(Illuminant::D65, 11.72, 0.0, 2.0, false);
        let dimmest = ViewingConditions::new(Illuminant::D65, 11.72, 0.1, 2.0, false);
        assert_eq!(pitch_black, dimmest);
        assert!(pitch_black.n.is_finite());
        assert!(pitch_black.aw.is_finite());
    }

    #[test]
    fn test_discounting_maximizes_adaptation() {
        let discounted = ViewingConditions::new(Illuminant::D65, 11.72, 50.0, 2.0, true);
        // with d pinned at 1, the adaptation factors are exactly the white point ratios
        assert!((discounted.rgb_d[0] - 100.0 / 97.555293).abs() <= 1e-3);
        let undiscounted = ViewingConditions::new(Illuminant::D65, 11.72, 50.0, 2.0, false);
        assert!(discounted.rgb_d[0] > undiscounted.rgb_d[0]);
    }
}
