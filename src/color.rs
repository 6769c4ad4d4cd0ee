//! This file defines the device color type that everything in Huetone ultimately produces, along
//! with the CIE 1931 XYZ color that sits between device color and the appearance model. sRGB
//! colors here are 8 bits per channel, the way they are actually stored and displayed, rather than
//! floats in [0, 1]: the whole point of the gamut solver is to land exactly on colors this type
//! can represent, so the type should not pretend to more precision than a screen has. An alpha
//! channel rides along untouched; no transform in this crate reads or changes it.

use std::fmt;
use std::error::Error;

use regex::Regex;

use coord::Coord;

/// The 3x3 matrix projecting linear sRGB intensities (on a 0-100 scale) to CIE XYZ.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

/// The inverse of `SRGB_TO_XYZ`, precomputed: deriving it at runtime would invite exactly the
/// creeping round-trip error a fixed pair of constants avoids.
const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2413774792388685, -1.5376652402851851, -0.49885366846268053],
    [-0.9691452513005321, 1.8758853451067872, 0.04156585616912061],
    [0.05562093689691305, -0.20395524564742123, 1.0571799111220335],
];

// the CIE standard constants for the L* curve, in their exact rational form
const LAB_E: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

lazy_static! {
    // guaranteed to be a valid pattern, so unwrapping is fine: panicking indicates a bug
    static ref HEX_CODE: Regex =
        Regex::new("^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap();
}

/// An error that arises from parsing a string as an RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RGBParseError {
    /// The string was not a valid 3-, 6-, or 8-digit hex code, with or without a leading `#`.
    InvalidHexCode,
}

impl fmt::Display for RGBParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid hex color code")
    }
}

impl Error for RGBParseError {}

/// A color in the sRGB encoding: 8 bits each of red, green, and blue, plus an 8-bit alpha channel.
/// This is the gamut the rest of the crate solves against. Every combination of channel values is
/// a real, renderable color, which is precisely what can't be said of an arbitrary point in the
/// appearance model's space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red channel, 0-255.
    pub r: u8,
    /// The green channel, 0-255.
    pub g: u8,
    /// The blue channel, 0-255.
    pub b: u8,
    /// The alpha channel, 0-255, where 255 is fully opaque. Carried through every operation in
    /// this crate unchanged.
    pub a: u8,
}

/// A point in the CIE 1931 XYZ color space, the device-independent hub that the appearance model
/// converts through. The scale here puts the Y (luminance) of diffuse white at 100.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X tristimulus value, loosely a red-ish response.
    pub x: f64,
    /// The Y tristimulus value, which is exactly relative luminance.
    pub y: f64,
    /// The Z tristimulus value, loosely a blue-ish response.
    pub z: f64,
}

/// Decodes one 8-bit sRGB channel to a linear intensity on a 0-100 scale, undoing the piecewise
/// gamma encoding.
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040449936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Encodes a linear intensity on a 0-100 scale back to an 8-bit sRGB channel, applying the
/// piecewise gamma curve, rounding, and clamping. The clamping is the lossy step: intensities
/// outside [0, 100] silently pin to the nearest channel extreme, which is why the gamut solver
/// exists at all.
pub fn delinearized(intensity: f64) -> u8 {
    let normalized = intensity / 100.0;
    let encoded = if normalized <= 0.0031308 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    let rounded = (encoded * 255.0).round();
    if rounded < 0.0 {
        0
    } else if rounded > 255.0 {
        255
    } else {
        rounded as u8
    }
}

/// Converts an L\* value (perceptual lightness, 0-100) to Y (relative luminance, 0-100). This is
/// the exact inverse of [`lstar_from_y`](fn.lstar_from_y.html).
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_invf((lstar + 16.0) / 116.0)
}

/// Converts Y (relative luminance, 0-100) to L\* (perceptual lightness, 0-100). Unlike Y, L\* is
/// linear with respect to human brightness perception: a tone ramp with evenly spaced L\* values
/// looks evenly spaced.
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0) * 116.0 - 16.0
}

// the forward nonlinearity of the L* curve, with the linear toe near black
fn lab_f(t: f64) -> f64 {
    if t > LAB_E {
        t.powf(1.0 / 3.0)
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_invf(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_E {
        ft3
    } else {
        (116.0 * ft - 16.0) / LAB_KAPPA
    }
}

impl RGBColor {
    /// Creates a fully opaque color from the three channel values.
    pub fn new(r: u8, g: u8, b: u8) -> RGBColor {
        RGBColor { r, g, b, a: 255 }
    }

    /// Unpacks a color from a 32-bit ARGB word, alpha in the high byte.
    pub fn from_argb(argb: u32) -> RGBColor {
        RGBColor {
            r: ((argb >> 16) & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            b: (argb & 0xFF) as u8,
            a: ((argb >> 24) & 0xFF) as u8,
        }
    }

    /// Packs the color into a 32-bit ARGB word, alpha in the high byte.
    pub fn to_argb(&self) -> u32 {
        (u32::from(self.a) << 24)
            | (u32::from(self.r) << 16)
            | (u32::from(self.g) << 8)
            | u32::from(self.b)
    }

    /// Parses a hex code, with or without a leading `#`, into a color. Three-digit codes expand
    /// each nibble (`#fa0` is `#ffaa00`), six-digit codes are opaque RGB, and eight-digit codes
    /// are AARRGGBB.
    /// # Example
    /// ```
    /// # use huetone::color::RGBColor;
    /// let maroon = RGBColor::from_hex_code("#800000").unwrap();
    /// assert_eq!(maroon, RGBColor::new(128, 0, 0));
    /// assert!(RGBColor::from_hex_code("#80000").is_err());
    /// ```
    pub fn from_hex_code(code: &str) -> Result<RGBColor, RGBParseError> {
        if !HEX_CODE.is_match(code) {
            return Err(RGBParseError::InvalidHexCode);
        }
        let digits = code.trim_start_matches('#');
        // the regex can't rule out overflow-free parsing on its own for the 8-digit form, so
        // parse errors still map to the same variant instead of unwrapping
        let word = u32::from_str_radix(digits, 16).map_err(|_| RGBParseError::InvalidHexCode)?;
        match digits.len() {
            3 => {
                let r = ((word >> 8) & 0xF) as u8;
                let g = ((word >> 4) & 0xF) as u8;
                let b = (word & 0xF) as u8;
                Ok(RGBColor::new(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => Ok(RGBColor::from_argb(0xFF000000 | word)),
            _ => Ok(RGBColor::from_argb(word)),
        }
    }

    /// Returns `true` if the color's alpha channel is at its maximum.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// The color's linear intensities as a point in 3D space, each channel on a 0-100 scale. This
    /// is the space the gamut solver does its geometry in.
    pub fn to_linear(&self) -> Coord {
        Coord {
            x: linearized(self.r),
            y: linearized(self.g),
            z: linearized(self.b),
        }
    }

    /// Creates an opaque color from linear intensities on a 0-100 scale, encoding and clamping
    /// each channel.
    pub fn from_linear(linear: Coord) -> RGBColor {
        RGBColor::new(
            delinearized(linear.x),
            delinearized(linear.y),
            delinearized(linear.z),
        )
    }

    /// Converts to CIE XYZ via the standard sRGB matrix.
    pub fn to_xyz(&self) -> XYZColor {
        let linear = self.to_linear();
        XYZColor {
            x: SRGB_TO_XYZ[0][0] * linear.x + SRGB_TO_XYZ[0][1] * linear.y
                + SRGB_TO_XYZ[0][2] * linear.z,
            y: SRGB_TO_XYZ[1][0] * linear.x + SRGB_TO_XYZ[1][1] * linear.y
                + SRGB_TO_XYZ[1][2] * linear.z,
            z: SRGB_TO_XYZ[2][0] * linear.x + SRGB_TO_XYZ[2][1] * linear.y
                + SRGB_TO_XYZ[2][2] * linear.z,
        }
    }

    /// Converts from CIE XYZ to the nearest encodable sRGB color. Out-of-gamut tristimulus values
    /// clamp channelwise; there is no appearance-aware mapping at this level.
    pub fn from_xyz(xyz: XYZColor) -> RGBColor {
        xyz.to_rgb()
    }

    /// The color's relative luminance Y, on a 0-100 scale.
    pub fn luminance(&self) -> f64 {
        let linear = self.to_linear();
        0.2126 * linear.x + 0.7152 * linear.y + 0.0722 * linear.z
    }

    /// The color's tone: its CIE L\* perceptual lightness, 0 for black through 100 for white.
    /// Note that this is a different quantity from the appearance model's lightness correlate `j`;
    /// tone is the scale contrast ratios are defined against, so it is computed directly from
    /// luminance with no viewing-condition adjustment.
    pub fn lstar(&self) -> f64 {
        lstar_from_y(self.luminance())
    }

    /// Creates the opaque gray with the given tone: the unique achromatic color at each L\*. Tones
    /// at or beyond the ends of the scale give exact black and exact white.
    pub fn from_lstar(lstar: f64) -> RGBColor {
        let component = delinearized(y_from_lstar(lstar));
        RGBColor::new(component, component, component)
    }
}

impl XYZColor {
    /// Converts to the nearest encodable sRGB color, clamping channelwise where the tristimulus
    /// values fall outside the gamut.
    pub fn to_rgb(&self) -> RGBColor {
        let linear_r =
            XYZ_TO_SRGB[0][0] * self.x + XYZ_TO_SRGB[0][1] * self.y + XYZ_TO_SRGB[0][2] * self.z;
        let linear_g =
            XYZ_TO_SRGB[1][0] * self.x + XYZ_TO_SRGB[1][1] * self.y + XYZ_TO_SRGB[1][2] * self.z;
        let linear_b =
            XYZ_TO_SRGB[2][0] * self.x + XYZ_TO_SRGB[2][1] * self.y + XYZ_TO_SRGB[2][2] * self.z;
        RGBColor::new(
            delinearized(linear_r),
            delinearized(linear_g),
            delinearized(linear_b),
        )
    }

    /// The perceptual lightness L\* of this point, derived from Y.
    pub fn lstar(&self) -> f64 {
        lstar_from_y(self.y)
    }
}

impl fmt::Display for RGBColor {
    /// Formats as an uppercase six-digit hex code with a leading `#`. Alpha is not printed.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_argb_packing() {
        let color = RGBColor::from_argb(0xFF123456);
        assert_eq!(color.r, 0x12);
        assert_eq!(color.g, 0x34);
        assert_eq!(color.b, 0x56);
        assert_eq!(color.a, 0xFF);
        assert_eq!(color.to_argb(), 0xFF123456);
        assert_eq!(RGBColor::new(50, 150, 250).to_argb(), 0xFF3296FA);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(
            RGBColor::from_hex_code("#f44336").unwrap(),
            RGBColor::new(0xF4, 0x43, 0x36)
        );
        // no octothorpe needed
        assert_eq!(
            RGBColor::from_hex_code("f44336").unwrap(),
            RGBColor::new(0xF4, 0x43, 0x36)
        );
        // nibble expansion
        assert_eq!(
            RGBColor::from_hex_code("#fa0").unwrap(),
            RGBColor::new(0xFF, 0xAA, 0x00)
        );
        // alpha comes along in the 8-digit form
        let translucent = RGBColor::from_hex_code("#80123456").unwrap();
        assert_eq!(translucent.a, 0x80);
        assert!(!translucent.is_opaque());
        // and the failure modes
        assert_eq!(
            RGBColor::from_hex_code("#12345"),
            Err(RGBParseError::InvalidHexCode)
        );
        assert_eq!(
            RGBColor::from_hex_code("#gg0000"),
            Err(RGBParseError::InvalidHexCode)
        );
    }

    #[test]
    fn test_display_round_trip() {
        let color = RGBColor::from_hex_code("#11457c").unwrap();
        assert_eq!(color.to_string(), "#11457C");
        assert_eq!(RGBColor::from_hex_code(&color.to_string()).unwrap(), color);
    }

    #[test]
    fn test_linearized() {
        // expected values from the sRGB transfer function definition
        let cases = [
            (0u8, 0.0),
            (1, 0.0303527),
            (2, 0.0607054),
            (8, 0.242822),
            (9, 0.273174),
            (16, 0.518152),
            (32, 1.44438),
            (64, 5.12695),
            (128, 21.5861),
            (255, 100.0),
        ];
        for &(component, expected) in cases.iter() {
            assert!(
                (linearized(component) - expected).abs() <= 1e-4,
                "linearized({}) was {}",
                component,
                linearized(component)
            );
        }
    }

    #[test]
    fn test_delinearized() {
        let cases = [
            (0.0, 0u8),
            (0.0303527, 1),
            (0.518152, 16),
            (1.44438, 32),
            (5.12695, 64),
            (21.5861, 128),
            (100.0, 255),
            (25.0, 137),
            (50.0, 188),
            (75.0, 225),
            // clamping on both ends
            (-1.0, 0),
            (101.0, 255),
        ];
        for &(intensity, expected) in cases.iter() {
            assert_eq!(delinearized(intensity), expected);
        }
    }

    #[test]
    fn test_delinearize_round_trip() {
        // delinearizing what linearized produced should always give back the original channel
        for component in 0..256 {
            let component = component as u8;
            assert_eq!(delinearized(linearized(component)), component);
        }
    }

    #[test]
    fn test_lstar_y_round_trip() {
        for i in 0..1001 {
            let lstar = f64::from(i) / 10.0;
            let round_tripped = lstar_from_y(y_from_lstar(lstar));
            assert!(
                (round_tripped - lstar).abs() <= 1e-8,
                "round trip of {} was {}",
                lstar,
                round_tripped
            );
        }
        assert!((y_from_lstar(0.0)).abs() <= 1e-10);
        assert!((y_from_lstar(100.0) - 100.0).abs() <= 1e-8);
        assert!((y_from_lstar(50.0) - 18.418651851244416).abs() <= 1e-9);
    }

    #[test]
    fn test_lstar_of_known_colors() {
        assert!((RGBColor::new(255, 255, 255).lstar() - 100.0).abs() <= 1e-6);
        assert!(RGBColor::new(0, 0, 0).lstar().abs() <= 1e-6);
        // red's luminance is the 0.2126 weight alone
        let red = RGBColor::new(255, 0, 0);
        assert!((red.luminance() - 21.26).abs() <= 1e-8);
        assert!((red.lstar() - 53.2329).abs() <= 1e-3);
    }

    #[test]
    fn test_from_lstar_is_gray_at_tone() {
        for i in 0..101 {
            let lstar = f64::from(i);
            let gray = RGBColor::from_lstar(lstar);
            assert_eq!(gray.r, gray.g);
            assert_eq!(gray.g, gray.b);
            // 8 bits of gray can't represent every tone exactly, but it gets close
            assert!(
                (gray.lstar() - lstar).abs() <= 0.3,
                "gray at tone {} measured {}",
                lstar,
                gray.lstar()
            );
        }
        assert_eq!(RGBColor::from_lstar(0.0), RGBColor::new(0, 0, 0));
        assert_eq!(RGBColor::from_lstar(100.0), RGBColor::new(255, 255, 255));
    }

    #[test]
    fn test_xyz_round_trip() {
        let color = RGBColor::new(50, 150, 250);
        let there_and_back = color.to_xyz().to_rgb();
        assert_eq!(color, there_and_back);
    }
}
