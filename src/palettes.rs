//! Tonal palettes: the bridge from a single color to a family of them. A tonal palette fixes a
//! hue and a chroma and hands out colors at whatever tones a caller asks for, which is exactly
//! the shape UI theming needs: "the brand blue, but at tone 90 for a container and tone 10 for
//! text on it." Because every color comes from the gamut solver, the palette silently does the
//! right thing at tones where the fixed chroma is unachievable, sliding along the gamut boundary
//! rather than clipping. Palettes hold no cache; each request is an independent pure computation,
//! and callers that want memoization are free to build it on top with whatever synchronization
//! suits them.

use color::RGBColor;
use hct::HCTColor;

/// A convenience type for retrieving colors that are constant in hue and chroma but vary in tone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
    key_color: HCTColor,
}

impl TonalPalette {
    /// Creates a palette with the hue and chroma of the given color.
    pub fn from_color(color: RGBColor) -> TonalPalette {
        TonalPalette::from_hct(HCTColor::from_color(color))
    }

    /// Creates a palette with the hue and chroma of the given HCT color; the color itself becomes
    /// the palette's key color.
    pub fn from_hct(hct: HCTColor) -> TonalPalette {
        TonalPalette {
            hue: hct.hue(),
            chroma: hct.chroma(),
            key_color: hct,
        }
    }

    /// Creates a palette from a hue and a chroma. The key color is chosen as the color nearest
    /// tone 50 at which the full requested chroma is closest to achievable, which is the tone
    /// region where chroma ceilings peak for most hues.
    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> TonalPalette {
        TonalPalette {
            hue,
            chroma,
            key_color: create_key_color(hue, chroma),
        }
    }

    /// The palette's hue, in degrees.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// The palette's chroma: the target for every tone, met wherever the gamut allows.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The representative color of this palette: its hue and chroma at the tone where they are
    /// best realized.
    pub fn key_color(&self) -> HCTColor {
        self.key_color
    }

    /// The palette's color at the given tone.
    /// # Example
    /// ```
    /// # use huetone::palettes::TonalPalette;
    /// let blues = TonalPalette::from_hue_and_chroma(240.0, 40.0);
    /// let container = blues.tone(90.0);
    /// let on_container = blues.tone(10.0);
    /// ```
    pub fn tone(&self, tone: f64) -> RGBColor {
        HCTColor::new(self.hue, self.chroma, tone).color()
    }

    /// The palette's color at the given tone, as HCT.
    pub fn hct(&self, tone: f64) -> HCTColor {
        HCTColor::new(self.hue, self.chroma, tone)
    }
}

// Searches tones around 50, nearest first, for the one whose achievable chroma is closest to the
// request. Ties go to the tone closer to 50.
fn create_key_color(hue: f64, chroma: f64) -> HCTColor {
    let start_tone = 50.0;
    let mut smallest_delta_hct = HCTColor::new(hue, chroma, start_tone);
    let mut smallest_delta = (smallest_delta_hct.chroma() - chroma).abs();

    let mut delta = 1.0;
    while delta < 50.0 {
        let darker = HCTColor::new(hue, chroma, start_tone - delta);
        let darker_delta = (darker.chroma() - chroma).abs();
        if darker_delta < smallest_delta {
            smallest_delta = darker_delta;
            smallest_delta_hct = darker;
        }

        let lighter = HCTColor::new(hue, chroma, start_tone + delta);
        let lighter_delta = (lighter.chroma() - chroma).abs();
        if lighter_delta < smallest_delta {
            smallest_delta = lighter_delta;
            smallest_delta_hct = lighter;
        }

        delta += 1.0;
    }

    smallest_delta_hct
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_tones_get_lighter() {
        let palette = TonalPalette::from_color(RGBColor::new(0, 0, 255));
        let dark = palette.tone(10.0).lstar();
        let mid = palette.tone(50.0).lstar();
        let light = palette.tone(90.0).lstar();
        assert!(dark < mid);
        assert!(mid < light);
    }

    #[test]
    fn test_tone_extremes() {
        let palette = TonalPalette::from_hue_and_chroma(240.0, 50.0);
        assert_eq!(palette.tone(0.0), RGBColor::new(0, 0, 0));
        assert_eq!(palette.tone(100.0), RGBColor::new(255, 255, 255));
    }

    #[test]
    fn test_palette_keeps_hue() {
        let palette = TonalPalette::from_hue_and_chroma(120.0, 40.0);
        for &tone in [20.0, 35.0, 50.0, 65.0, 80.0].iter() {
            let hct = palette.hct(tone);
            // wherever there's chroma left to speak of, the hue should hold
            if hct.chroma() > 5.0 {
                assert!(
                    (hct.hue() - 120.0).abs() <= 4.0,
                    "tone {} drifted to hue {}",
                    tone,
                    hct.hue()
                );
            }
        }
    }

    #[test]
    fn test_key_color_realizes_chroma() {
        // chroma 40 at hue 240 is achievable somewhere near mid-tone, so the key color should
        // essentially hit it
        let palette = TonalPalette::from_hue_and_chroma(240.0, 40.0);
        let key = palette.key_color();
        assert!((key.chroma() - 40.0).abs() <= 2.5);
        // and for an impossible chroma the key color is simply the best the hue can do
        let wild = TonalPalette::from_hue_and_chroma(240.0, 200.0);
        assert!(wild.key_color().chroma() < 200.0);
    }
}
