//! This file implements HCT, the color system the rest of the crate exists to support. An
//! `HCTColor` is described by hue and chroma from the CAM16 appearance model and by tone, which is
//! CIE L\* rather than the model's own lightness correlate. That split is deliberate. Contrast
//! ratio, the quantity accessibility guidelines are written in, is a function of relative
//! luminance, and L\* is the perceptually even scale over luminance: holding tone steady while
//! changing hue or chroma holds contrast steady, and a difference of 40 in tone guarantees a
//! contrast ratio of 3.0 regardless of the colors' hues. The appearance model's lightness makes no
//! such promise.
//!
//! The other thing an `HCTColor` promises is renderability. Not every (hue, chroma, tone) triple
//! corresponds to an sRGB color; the achievable chroma ceiling depends on both hue and tone, and
//! is generally far below the model's theoretical range. Construction therefore runs the gamut
//! solver and then *re-measures* the color it produced, so the values stored are the values the
//! actual backing color has. Ask for the impossible and the color you get is the nearest possible;
//! its chroma field tells you what you actually received.

use std::fmt;

use cam16::CAM16Color;
use color::{lstar_from_y, RGBColor};
use gamut;
use viewing::ViewingConditions;

/// A color described by hue, chroma, and tone, backed by the renderable sRGB color nearest to that
/// description. The fields always describe the backing color as measured, not the values a caller
/// originally asked for; the two differ exactly when the request was outside the sRGB gamut.
///
/// `HCTColor` is immutable. To change one coordinate, use [`with_hue`](#method.with_hue),
/// [`with_chroma`](#method.with_chroma), or [`with_tone`](#method.with_tone), each of which
/// re-solves from scratch and returns a new value: changing tone or hue changes the achievable
/// chroma ceiling, so there is no cheaper correct way to "edit" one field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HCTColor {
    hue: f64,
    chroma: f64,
    tone: f64,
    color: RGBColor,
}

impl HCTColor {
    /// Creates the renderable color nearest to the given hue, chroma, and tone. Hue is taken
    /// modulo 360, chroma has a floor of 0, and tone clamps to [0, 100]; beyond that, any triple
    /// is acceptable and the result's fields report what was actually achievable.
    /// # Example
    /// ```
    /// # use huetone::hct::HCTColor;
    /// // sRGB has no green with chroma 200; the solver takes what it can get
    /// let green = HCTColor::new(120.0, 200.0, 50.0);
    /// assert!(green.chroma() < 120.0);
    /// ```
    pub fn new(hue: f64, chroma: f64, tone: f64) -> HCTColor {
        let solved = gamut::solve(hue, chroma.max(0.0), tone.max(0.0).min(100.0));
        HCTColor::from_color(solved)
    }

    /// Measures an existing color: hue and chroma from the forward appearance transform under the
    /// standard viewing conditions, tone from the color's luminance. The color itself becomes the
    /// backing color, alpha and all.
    pub fn from_color(color: RGBColor) -> HCTColor {
        let cam = CAM16Color::from_color(&color);
        HCTColor {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: color.lstar(),
            color,
        }
    }

    /// The hue angle, in degrees in [0, 360).
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// The chroma actually achieved. At most the requested chroma, and at most the gamut's
    /// ceiling for this hue and tone.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The tone: CIE L\* in [0, 100].
    pub fn tone(&self) -> f64 {
        self.tone
    }

    /// The renderable sRGB color these coordinates describe.
    pub fn color(&self) -> RGBColor {
        self.color
    }

    /// This color with a different hue: a fresh solve, since the chroma that survives rotation
    /// differs from hue to hue.
    pub fn with_hue(&self, hue: f64) -> HCTColor {
        HCTColor::new(hue, self.chroma, self.tone)
    }

    /// This color with a different chroma, or as much of it as the gamut allows.
    pub fn with_chroma(&self, chroma: f64) -> HCTColor {
        HCTColor::new(self.hue, chroma, self.tone)
    }

    /// This color with a different tone. Raising or lowering tone typically costs chroma; the
    /// result reports what is left.
    pub fn with_tone(&self, tone: f64) -> HCTColor {
        HCTColor::new(self.hue, self.chroma, tone)
    }

    /// Translates this color into the given viewing conditions: the color that, seen there, looks
    /// the way this color looks in the standard conditions. The result is re-solved, so it is
    /// renderable like any other `HCTColor`. Useful for simulating dark surroundings or
    /// dimmed screens without abandoning the default-conditions color system everywhere else.
    pub fn in_viewing_conditions(&self, conditions: &ViewingConditions) -> HCTColor {
        // measure under the default conditions, then ask what XYZ would produce that appearance
        // in the target environment
        let cam = CAM16Color::from_color(&self.color);
        let viewed = cam.to_xyz_in_conditions(conditions);
        // re-measure that light in the default conditions to name it in standard HCT terms
        let recast = CAM16Color::from_xyz_in_conditions(viewed, ViewingConditions::standard());
        HCTColor::new(recast.hue, recast.chroma, lstar_from_y(viewed.y))
    }
}

impl fmt::Display for HCTColor {
    /// Formats as the backing color's hex code.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn is_on_cube_boundary(color: &RGBColor) -> bool {
        color.r == 0 || color.r == 255 || color.g == 0 || color.g == 255 || color.b == 0
            || color.b == 255
    }

    #[test]
    fn test_measures_green() {
        let hct = HCTColor::from_color(RGBColor::new(0, 255, 0));
        assert!((hct.hue() - 142.139).abs() <= 1e-2);
        assert!((hct.chroma() - 108.410).abs() <= 1e-2);
        assert!((hct.tone() - 87.737).abs() <= 1e-2);
    }

    #[test]
    fn test_measures_blue() {
        let hct = HCTColor::from_color(RGBColor::new(0, 0, 255));
        assert!((hct.hue() - 282.788).abs() <= 1e-2);
        assert!((hct.chroma() - 87.230).abs() <= 1e-2);
        assert!((hct.tone() - 32.302).abs() <= 1e-2);
    }

    #[test]
    fn test_blue_raised_to_tone_90() {
        // blue's chroma collapses when forced that light, but hue and tone hold
        let hct = HCTColor::new(282.788, 87.230, 90.0);
        assert!((hct.hue() - 282.239).abs() <= 1e-2);
        assert!((hct.chroma() - 19.144).abs() <= 1e-2);
        assert!((hct.tone() - 90.035).abs() <= 1e-2);
    }

    #[test]
    fn test_impossible_chroma_reduced_and_consistent() {
        let hct = HCTColor::new(120.0, 200.0, 50.0);
        assert!(hct.chroma() < 200.0);
        // the stored values must describe the backing color exactly as re-measured
        let remeasured = HCTColor::from_color(hct.color());
        assert!((hct.hue() - remeasured.hue()).abs() <= 1e-9);
        assert!((hct.chroma() - remeasured.chroma()).abs() <= 1e-9);
        assert!((hct.tone() - remeasured.tone()).abs() <= 1e-9);
        assert!(is_on_cube_boundary(&hct.color()));
    }

    #[test]
    fn test_with_methods_re_solve() {
        let base = HCTColor::new(120.0, 50.0, 75.0);
        let rotated = base.with_hue(180.0);
        assert!((rotated.hue() - 180.0).abs() <= 1.0);
        let muted = rotated.with_chroma(30.0);
        assert!((muted.chroma() - 30.0).abs() <= 1.0);
        let lightened = muted.with_tone(90.0);
        assert!((lightened.tone() - 90.0).abs() <= 1.0);
        // the original never changed
        assert!((base.tone() - 75.0).abs() <= 1.0);
    }

    #[test]
    fn test_tone_clamps() {
        let hct = HCTColor::new(120.0, 60.0, 50.0).with_tone(180.0);
        assert_eq!(hct.color(), RGBColor::new(255, 255, 255));
        assert!((hct.tone() - 100.0).abs() <= 1e-6);
    }

    #[test]
    fn test_solver_grid() {
        // a sweep over the whole space: hue must be respected wherever chroma is nonzero, chroma
        // never exceeds the request, colors that fall well short sit on the gamut boundary, and
        // tone is always essentially exact
        for hue_index in 0..12 {
            let hue = f64::from(hue_index) * 30.0 + 15.0;
            for chroma_index in 0..11 {
                let chroma = f64::from(chroma_index) * 10.0;
                for tone_index in 0..7 {
                    let tone = f64::from(tone_index) * 10.0 + 20.0;
                    let hct = HCTColor::new(hue, chroma, tone);
                    assert!(hct.color().is_opaque());
                    if chroma > 0.0 {
                        assert!(
                            (hct.hue() - hue).abs() <= 4.0,
                            "hue {} became {}",
                            hue,
                            hct.hue()
                        );
                    }
                    assert!(
                        hct.chroma() >= 0.0 && hct.chroma() <= chroma + 2.5,
                        "chroma {} became {}",
                        chroma,
                        hct.chroma()
                    );
                    if hct.chroma() < chroma - 2.5 {
                        assert!(
                            is_on_cube_boundary(&hct.color()),
                            "expected {} on boundary",
                            hct.color()
                        );
                    }
                    assert!(
                        (hct.tone() - tone).abs() <= 0.5,
                        "tone {} became {}",
                        tone,
                        hct.tone()
                    );
                }
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_color() {
        // a coarse lattice over the whole cube survives measure-then-solve exactly
        let mut channel_values = vec![];
        let mut channel = 0i32;
        while channel < 296 {
            channel_values.push(channel.min(255) as u8);
            channel += 37;
        }
        for &r in channel_values.iter() {
            for &g in channel_values.iter() {
                for &b in channel_values.iter() {
                    let color = RGBColor::new(r, g, b);
                    let hct = HCTColor::from_color(color);
                    let reconstructed = HCTColor::new(hct.hue(), hct.chroma(), hct.tone());
                    assert_eq!(
                        reconstructed.color(),
                        color,
                        "{} came back as {}",
                        color,
                        reconstructed.color()
                    );
                }
            }
        }
    }

    #[test]
    fn test_in_viewing_conditions_moves_the_color() {
        let base = HCTColor::new(240.0, 40.0, 50.0);
        // a dark background exaggerates apparent chroma, so the translated color differs
        let dark = ViewingConditions::with_background_lstar(10.0);
        let translated = base.in_viewing_conditions(&dark);
        assert!(translated.color().is_opaque());
        // the identity translation is a fixed point up to 8-bit rounding
        let same = base.in_viewing_conditions(ViewingConditions::standard());
        assert!((f64::from(same.color().r) - f64::from(base.color().r)).abs() <= 2.0);
        assert!((f64::from(same.color().g) - f64::from(base.color().g)).abs() <= 2.0);
        assert!((f64::from(same.color().b) - f64::from(base.color().b)).abs() <= 2.0);
    }
}
