//! Contrast ratio utilities, stated in tones. The WCAG contrast ratio is defined on relative
//! luminance, `(lighter + 5) / (darker + 5)`, which makes it awkward to design with directly:
//! luminance is far from perceptually even. Tone is even, and converts to luminance exactly, so
//! this module lets palette and scheme code ask its real questions ("what tone do I need against
//! tone 30 to hit 4.5:1?") without leaving the tone scale. Everything here is plain arithmetic on
//! numbers; no colors are involved, because contrast genuinely doesn't depend on hue or chroma.

use color::{lstar_from_y, y_from_lstar};

/// The lowest possible contrast ratio, that of a color against itself.
pub const RATIO_MIN: f64 = 1.0;
/// The highest possible contrast ratio, that of pure white against pure black.
pub const RATIO_MAX: f64 = 21.0;
/// The WCAG AA minimum ratio for large text.
pub const RATIO_30: f64 = 3.0;
/// The WCAG AA minimum ratio for normal text.
pub const RATIO_45: f64 = 4.5;
/// The WCAG AAA minimum ratio for normal text.
pub const RATIO_70: f64 = 7.0;

// how far a real ratio may fall below a requested one before the request counts as unmet. Ratios
// this close are visually indistinguishable, and the tone scale's 8-bit backing can't always do
// better.
const RATIO_EPSILON: f64 = 0.04;

// tones returned to callers get nudged this far into the passing side, so that converting the
// tone to an 8-bit color and back cannot round it across the threshold
const LUMINANCE_GAMUT_MAP_TOLERANCE: f64 = 0.4;

/// The WCAG contrast ratio of two relative luminance values (0-100 scale). Symmetric in its
/// arguments; between [`RATIO_MIN`](constant.RATIO_MIN.html) and
/// [`RATIO_MAX`](constant.RATIO_MAX.html) always.
pub fn ratio_of_ys(y1: f64, y2: f64) -> f64 {
    let lighter = y1.max(y2);
    let darker = if lighter == y2 { y1 } else { y2 };
    (lighter + 5.0) / (darker + 5.0)
}

/// The WCAG contrast ratio of two tones. This is the contrast between any two colors with these
/// tones, whatever their hue and chroma.
/// # Example
/// ```
/// # use huetone::contrast::ratio_of_tones;
/// // white on black is the maximum
/// assert!((ratio_of_tones(100.0, 0.0) - 21.0).abs() < 0.1);
/// ```
pub fn ratio_of_tones(t1: f64, t2: f64) -> f64 {
    ratio_of_ys(y_from_lstar(t1), y_from_lstar(t2))
}

/// The lightest tone at least as light as `tone` that contrasts with it by at least `ratio`, if
/// one exists. `None` when no tone can deliver the ratio (the input is already too light), or
/// when `tone` is outside [0, 100].
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if tone < 0.0 || tone > 100.0 {
        return None;
    }
    // invert the ratio equation for the lighter luminance, given the darker one
    let dark_y = y_from_lstar(tone);
    let light_y = ratio * (dark_y + 5.0) - 5.0;
    if light_y < 0.0 || light_y > 100.0 {
        return None;
    }
    let real_contrast = ratio_of_ys(light_y, dark_y);
    let delta = (real_contrast - ratio).abs();
    if real_contrast < ratio && delta > RATIO_EPSILON {
        return None;
    }
    let value = lstar_from_y(light_y) + LUMINANCE_GAMUT_MAP_TOLERANCE;
    if value < 0.0 || value > 100.0 {
        None
    } else {
        Some(value)
    }
}

/// The darkest tone at least as dark as `tone` that contrasts with it by at least `ratio`, if one
/// exists. `None` when no tone can deliver the ratio, or when `tone` is outside [0, 100].
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if tone < 0.0 || tone > 100.0 {
        return None;
    }
    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    if dark_y < 0.0 || dark_y > 100.0 {
        return None;
    }
    let real_contrast = ratio_of_ys(light_y, dark_y);
    let delta = (real_contrast - ratio).abs();
    if real_contrast < ratio && delta > RATIO_EPSILON {
        return None;
    }
    let value = lstar_from_y(dark_y) - LUMINANCE_GAMUT_MAP_TOLERANCE;
    if value < 0.0 || value > 100.0 {
        None
    } else {
        Some(value)
    }
}

/// Like [`lighter`](fn.lighter.html), but total: falls back to tone 100 when the ratio cannot be
/// met, on the theory that white is the best available attempt.
pub fn lighter_or_white(tone: f64, ratio: f64) -> f64 {
    lighter(tone, ratio).unwrap_or(100.0)
}

/// Like [`darker`](fn.darker.html), but total: falls back to tone 0 when the ratio cannot be met.
pub fn darker_or_black(tone: f64, ratio: f64) -> f64 {
    darker(tone, ratio).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_ratio_of_ys() {
        assert!((ratio_of_ys(100.0, 0.0) - 21.0).abs() <= 0.1);
        assert!((ratio_of_ys(100.0, 100.0) - 1.0).abs() <= 0.1);
        // symmetric
        assert_eq!(ratio_of_ys(30.0, 70.0), ratio_of_ys(70.0, 30.0));
    }

    #[test]
    fn test_ratio_of_tones() {
        assert!((ratio_of_tones(100.0, 0.0) - 21.0).abs() <= 0.1);
        assert!((ratio_of_tones(50.0, 50.0) - 1.0).abs() <= 0.1);
        // a tone difference of 40 guarantees at least 3:1, the large-text threshold
        assert!(ratio_of_tones(70.0, 30.0) >= RATIO_30);
        // and 50 guarantees 4.5:1
        assert!(ratio_of_tones(75.0, 25.0) >= RATIO_45);
    }

    #[test]
    fn test_lighter() {
        let lighter_tone = lighter(10.0, 2.0).expect("2:1 against tone 10 is achievable");
        assert!(lighter_tone > 10.0);
        assert!(ratio_of_tones(lighter_tone, 10.0) >= 2.0 - 0.04);
        // already near-white: 3:1 lighter does not exist
        assert_eq!(lighter(95.0, 3.0), None);
        // out-of-range tones are refused rather than guessed at
        assert_eq!(lighter(-1.0, 2.0), None);
        assert_eq!(lighter_or_white(95.0, 3.0), 100.0);
    }

    #[test]
    fn test_darker() {
        let darker_tone = darker(90.0, 2.0).expect("2:1 against tone 90 is achievable");
        assert!(darker_tone < 90.0);
        assert!(ratio_of_tones(90.0, darker_tone) >= 2.0 - 0.04);
        // already near-black: 3:1 darker does not exist
        assert_eq!(darker(5.0, 3.0), None);
        assert_eq!(darker(101.0, 2.0), None);
        assert_eq!(darker_or_black(5.0, 3.0), 0.0);
    }
}
