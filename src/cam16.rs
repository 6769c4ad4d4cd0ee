//! This module implements the CAM16 color appearance model. Where a color space says what a color
//! *is* (as coordinates of light), an appearance model predicts what a color *looks like* to a
//! human observer in a particular environment, producing separate correlates for hue, chroma,
//! lightness, brightness, colorfulness, and saturation. The model runs in both directions: forward
//! from a measured color and viewing conditions to its appearance, and inverse from desired
//! appearance correlates back to a color. The inverse is exact algebra but has no notion of a
//! screen's gamut, so the color it asks for may not be encodable; see the
//! [`gamut`](../gamut/index.html) module for the machinery that handles that honestly.
//!
//! The model also provides the CAM16-UCS coordinates, a projection of its correlates into a space
//! where straight-line Euclidean distance tracks perceived color difference. That is the right
//! space for "how different do these two colors look?" questions, and the only use this crate has
//! for it.

use std::f64::consts::PI;

use color::{RGBColor, XYZColor};
use coord::Coord;
use viewing::ViewingConditions;

/// Projects CIE XYZ into the cone response basis the model adapts in.
pub(crate) const XYZ_TO_CAM16_RGB: [[f64; 3]; 3] = [
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
];

/// The inverse of `XYZ_TO_CAM16_RGB`, precomputed.
pub(crate) const CAM16_RGB_TO_XYZ: [[f64; 3]; 3] = [
    [1.8620678, -1.0112547, 0.14918678],
    [0.38752654, 0.62144744, -0.00897398],
    [-0.01584150, -0.03412294, 1.0499644],
];

/// A color as it appears under some viewing conditions, as predicted by CAM16. The first six
/// fields are the model's appearance correlates; the starred triple is the CAM16-UCS projection,
/// kept around because it is what [`distance`](#method.distance) measures in. Values are never
/// mutated: a `CAM16Color` is a measurement, and editing a measurement means taking a new one (see
/// the constructors, which is also how the single-correlate "setters" on
/// [`HCTColor`](../hct/struct.HCTColor.html) work underneath).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CAM16Color {
    /// Hue angle in degrees, in [0, 360).
    pub hue: f64,
    /// Chroma: colorfulness relative to the brightness of white under the same conditions. Zero
    /// is gray; the theoretical ceiling is unbounded, and far above what sRGB can render.
    pub chroma: f64,
    /// The lightness correlate, 0 for black through roughly 100 for white.
    pub j: f64,
    /// The brightness correlate: unlike lightness, an absolute quantity that grows with the
    /// adapting luminance. A white page is lighter than its gray text everywhere, but both are
    /// brighter outdoors.
    pub q: f64,
    /// The colorfulness correlate: like chroma, but absolute rather than relative to white.
    pub m: f64,
    /// The saturation correlate: colorfulness relative to the color's own brightness.
    pub s: f64,
    /// Lightness coordinate in CAM16-UCS.
    pub jstar: f64,
    /// Red-green coordinate in CAM16-UCS.
    pub astar: f64,
    /// Yellow-blue coordinate in CAM16-UCS.
    pub bstar: f64,
}

impl CAM16Color {
    /// Measures the appearance of a color under the standard viewing conditions.
    pub fn from_color(color: &RGBColor) -> CAM16Color {
        CAM16Color::from_color_in_conditions(color, ViewingConditions::standard())
    }

    /// Measures the appearance of a color under the given viewing conditions.
    pub fn from_color_in_conditions(
        color: &RGBColor,
        conditions: &ViewingConditions,
    ) -> CAM16Color {
        CAM16Color::from_xyz_in_conditions(color.to_xyz(), conditions)
    }

    /// Measures the appearance of a point of CIE XYZ under the given viewing conditions. This is
    /// the forward transform proper: pure closed-form arithmetic, total over all real inputs.
    pub fn from_xyz_in_conditions(xyz: XYZColor, conditions: &ViewingConditions) -> CAM16Color {
        // project into the cone response basis and apply chromatic adaptation
        let r_c = xyz.x * XYZ_TO_CAM16_RGB[0][0]
            + xyz.y * XYZ_TO_CAM16_RGB[0][1]
            + xyz.z * XYZ_TO_CAM16_RGB[0][2];
        let g_c = xyz.x * XYZ_TO_CAM16_RGB[1][0]
            + xyz.y * XYZ_TO_CAM16_RGB[1][1]
            + xyz.z * XYZ_TO_CAM16_RGB[1][2];
        let b_c = xyz.x * XYZ_TO_CAM16_RGB[2][0]
            + xyz.y * XYZ_TO_CAM16_RGB[2][1]
            + xyz.z * XYZ_TO_CAM16_RGB[2][2];
        let r_d = conditions.rgb_d[0] * r_c;
        let g_d = conditions.rgb_d[1] * g_c;
        let b_d = conditions.rgb_d[2] * b_c;

        // compressive nonlinearity, preserving the sign of each channel
        let r_af = (conditions.fl * r_d.abs() / 100.0).powf(0.42);
        let g_af = (conditions.fl * g_d.abs() / 100.0).powf(0.42);
        let b_af = (conditions.fl * b_d.abs() / 100.0).powf(0.42);
        let r_a = r_d.signum() * 400.0 * r_af / (r_af + 27.13);
        let g_a = g_d.signum() * 400.0 * g_af / (g_af + 27.13);
        let b_a = b_d.signum() * 400.0 * b_af / (b_af + 27.13);

        // opponent axes: redness-greenness and yellowness-blueness
        let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        // auxiliary components for the achromatic response and the hue eccentricity weighting
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let atan_degrees = b.atan2(a) * 180.0 / PI;
        let hue = if atan_degrees < 0.0 {
            atan_degrees + 360.0
        } else if atan_degrees >= 360.0 {
            atan_degrees - 360.0
        } else {
            atan_degrees
        };
        let hue_radians = hue * PI / 180.0;

        let ac = p2 * conditions.nbb;
        let j = 100.0 * (ac / conditions.aw).powf(conditions.c * conditions.z);
        let q = 4.0 / conditions.c
            * (j / 100.0).sqrt()
            * (conditions.aw + 4.0)
            * conditions.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime * PI / 180.0 + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * conditions.nc * conditions.ncb;
        let t = p1 * (a * a + b * b).sqrt() / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(conditions.n)).powf(0.73);

        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * conditions.fl_root;
        let s = 50.0 * ((alpha * conditions.c) / (conditions.aw + 4.0)).sqrt();

        // the UCS projection: a log compression of colorfulness spread over the hue angle
        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = 1.0 / 0.0228 * (1.0 + 0.0228 * m).ln();
        let astar = mstar * hue_radians.cos();
        let bstar = mstar * hue_radians.sin();

        CAM16Color {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar,
            bstar,
        }
    }

    /// Constructs an appearance directly from lightness, chroma, and hue under the standard
    /// viewing conditions, deriving the remaining correlates.
    pub fn from_jch(j: f64, chroma: f64, hue: f64) -> CAM16Color {
        CAM16Color::from_jch_in_conditions(j, chroma, hue, ViewingConditions::standard())
    }

    /// Constructs an appearance directly from lightness, chroma, and hue under the given viewing
    /// conditions. Nothing checks that the triple is the appearance of any renderable color; that
    /// is by construction impossible to know without running the inverse transform.
    pub fn from_jch_in_conditions(
        j: f64,
        chroma: f64,
        hue: f64,
        conditions: &ViewingConditions,
    ) -> CAM16Color {
        let q = 4.0 / conditions.c
            * (j / 100.0).sqrt()
            * (conditions.aw + 4.0)
            * conditions.fl_root;
        let m = chroma * conditions.fl_root;
        let alpha = chroma / (j / 100.0).sqrt();
        let s = 50.0 * ((alpha * conditions.c) / (conditions.aw + 4.0)).sqrt();

        let hue_radians = hue * PI / 180.0;
        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = 1.0 / 0.0228 * (1.0 + 0.0228 * m).ln();
        let astar = mstar * hue_radians.cos();
        let bstar = mstar * hue_radians.sin();

        CAM16Color {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar,
            bstar,
        }
    }

    /// Constructs an appearance from CAM16-UCS coordinates under the standard viewing conditions.
    pub fn from_ucs(jstar: f64, astar: f64, bstar: f64) -> CAM16Color {
        CAM16Color::from_ucs_in_conditions(jstar, astar, bstar, ViewingConditions::standard())
    }

    /// Constructs an appearance from CAM16-UCS coordinates under the given viewing conditions,
    /// undoing the log compression and hue projection.
    pub fn from_ucs_in_conditions(
        jstar: f64,
        astar: f64,
        bstar: f64,
        conditions: &ViewingConditions,
    ) -> CAM16Color {
        let mstar = (astar * astar + bstar * bstar).sqrt();
        let m = ((mstar * 0.0228).exp() - 1.0) / 0.0228;
        let chroma = m / conditions.fl_root;
        let hue_degrees = bstar.atan2(astar) * 180.0 / PI;
        let hue = if hue_degrees < 0.0 {
            hue_degrees + 360.0
        } else {
            hue_degrees
        };
        let j = jstar / (1.0 - (jstar - 100.0) * 0.007);
        CAM16Color::from_jch_in_conditions(j, chroma, hue, conditions)
    }

    /// The color that would produce this appearance under the standard viewing conditions,
    /// clamped into the sRGB gamut channelwise if it falls outside.
    pub fn to_color(&self) -> RGBColor {
        self.to_color_in_conditions(ViewingConditions::standard())
    }

    /// The color that would produce this appearance under the given viewing conditions, clamped
    /// into the sRGB gamut channelwise if it falls outside.
    pub fn to_color_in_conditions(&self, conditions: &ViewingConditions) -> RGBColor {
        self.to_xyz_in_conditions(conditions).to_rgb()
    }

    /// The CIE XYZ point that would produce this appearance under the given viewing conditions.
    /// This is the exact algebraic inverse of
    /// [`from_xyz_in_conditions`](#method.from_xyz_in_conditions), and it is *not* gamut checked:
    /// for appearance triples no real color produces, the result can have negative or
    /// larger-than-white tristimulus values. Converting such a point onward to sRGB clamps, which
    /// silently discards the excess; the [`gamut`](../gamut/index.html) solver exists so that
    /// callers never have to accept that silently.
    pub fn to_xyz_in_conditions(&self, conditions: &ViewingConditions) -> XYZColor {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };

        let t = (alpha / (1.64 - 0.29f64.powf(conditions.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue * PI / 180.0;

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = conditions.aw * (self.j / 100.0).powf(1.0 / conditions.c / conditions.z);
        let p1 = e_hue * (50000.0 / 13.0) * conditions.nc * conditions.ncb;
        let p2 = ac / conditions.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();

        // recover the opponent axes from the eccentricity-weighted magnitude
        let gamma =
            23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        // invert the compressive nonlinearity, sign preserved explicitly
        let r_c_base = (27.13 * r_a.abs() / (400.0 - r_a.abs())).max(0.0);
        let r_c = r_a.signum() * (100.0 / conditions.fl) * r_c_base.powf(1.0 / 0.42);
        let g_c_base = (27.13 * g_a.abs() / (400.0 - g_a.abs())).max(0.0);
        let g_c = g_a.signum() * (100.0 / conditions.fl) * g_c_base.powf(1.0 / 0.42);
        let b_c_base = (27.13 * b_a.abs() / (400.0 - b_a.abs())).max(0.0);
        let b_c = b_a.signum() * (100.0 / conditions.fl) * b_c_base.powf(1.0 / 0.42);

        let r_f = r_c / conditions.rgb_d[0];
        let g_f = g_c / conditions.rgb_d[1];
        let b_f = b_c / conditions.rgb_d[2];

        XYZColor {
            x: r_f * CAM16_RGB_TO_XYZ[0][0]
                + g_f * CAM16_RGB_TO_XYZ[0][1]
                + b_f * CAM16_RGB_TO_XYZ[0][2],
            y: r_f * CAM16_RGB_TO_XYZ[1][0]
                + g_f * CAM16_RGB_TO_XYZ[1][1]
                + b_f * CAM16_RGB_TO_XYZ[1][2],
            z: r_f * CAM16_RGB_TO_XYZ[2][0]
                + g_f * CAM16_RGB_TO_XYZ[2][1]
                + b_f * CAM16_RGB_TO_XYZ[2][2],
        }
    }

    /// Perceptual distance to another appearance: Euclidean distance in CAM16-UCS, passed through
    /// the standard power-law correction so that the scale matches judged color difference.
    /// Distance 0 means the two appearances are identical; around 1 is a just-noticeable
    /// difference.
    pub fn distance(&self, other: &CAM16Color) -> f64 {
        let here = Coord {
            x: self.jstar,
            y: self.astar,
            z: self.bstar,
        };
        let there = Coord {
            x: other.jstar,
            y: other.astar,
            z: other.bstar,
        };
        1.41 * here.euclidean_distance(&there).powf(0.63)
    }
}
