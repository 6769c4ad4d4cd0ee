//! Functions for blending colors in the appearance model's terms rather than by averaging
//! channels. Averaging sRGB channels is the classic way to get muddy in-between colors; blending
//! hue around the hue circle, or interpolating in the uniform CAM16-UCS space, moves colors
//! toward each other along paths that look like what "in between" means to an observer. The main
//! customer is theming: [`harmonize`](fn.harmonize.html) is how a fixed brand color gets gently
//! pulled toward a user-chosen key color without losing its identity.

use angles::{difference_degrees, rotation_direction, sanitize_degrees};
use cam16::CAM16Color;
use color::RGBColor;
use hct::HCTColor;

/// Rotates the design color's hue toward the source color's, by half the angle between them but
/// never more than 15 degrees, keeping the design color's own chroma and tone. The result stays
/// recognizably the design color while sitting more comfortably next to the source.
pub fn harmonize(design_color: RGBColor, source_color: RGBColor) -> RGBColor {
    let from_hct = HCTColor::from_color(design_color);
    let to_hct = HCTColor::from_color(source_color);
    let difference_degrees = difference_degrees(from_hct.hue(), to_hct.hue());
    let rotation_degrees = (difference_degrees * 0.5).min(15.0);
    let output_hue = sanitize_degrees(
        from_hct.hue()
            + rotation_degrees * rotation_direction(from_hct.hue(), to_hct.hue()),
    );
    HCTColor::new(output_hue, from_hct.chroma(), from_hct.tone()).color()
}

/// Blends `amount` of the hue of `to` into `from`, leaving chroma and tone alone. The hue travels
/// along the CAM16-UCS interpolation path rather than naively through degree space, so a 50%
/// blend of complementary colors picks the perceptual halfway point rather than an arbitrary one.
pub fn hct_hue(from: RGBColor, to: RGBColor, amount: f64) -> RGBColor {
    let ucs = cam16_ucs(from, to, amount);
    let ucs_hct = HCTColor::from_color(ucs);
    let from_hct = HCTColor::from_color(from);
    from_hct.with_hue(ucs_hct.hue()).color()
}

/// Linear interpolation between two colors in CAM16-UCS coordinates. At `amount` 0 this is
/// `from`; at 1 it is `to`; in between it is the straight perceptual path, which changes all
/// three of hue, chroma, and tone together.
pub fn cam16_ucs(from: RGBColor, to: RGBColor, amount: f64) -> RGBColor {
    let from_cam = CAM16Color::from_color(&from);
    let to_cam = CAM16Color::from_color(&to);
    let jstar = from_cam.jstar + (to_cam.jstar - from_cam.jstar) * amount;
    let astar = from_cam.astar + (to_cam.astar - from_cam.astar) * amount;
    let bstar = from_cam.bstar + (to_cam.bstar - from_cam.bstar) * amount;
    CAM16Color::from_ucs(jstar, astar, bstar).to_color()
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    const RED: RGBColor = RGBColor {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
    const BLUE: RGBColor = RGBColor {
        r: 0,
        g: 0,
        b: 255,
        a: 255,
    };
    const GREEN: RGBColor = RGBColor {
        r: 0,
        g: 255,
        b: 0,
        a: 255,
    };
    const YELLOW: RGBColor = RGBColor {
        r: 255,
        g: 255,
        b: 0,
        a: 255,
    };

    fn assert_close(actual: RGBColor, expected_argb: u32) {
        let expected = RGBColor::from_argb(expected_argb);
        // allow one encoded unit of drift per channel
        assert!(
            (i32::from(actual.r) - i32::from(expected.r)).abs() <= 1
                && (i32::from(actual.g) - i32::from(expected.g)).abs() <= 1
                && (i32::from(actual.b) - i32::from(expected.b)).abs() <= 1,
            "{} is not close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_harmonize_known_pairs() {
        assert_close(harmonize(RED, BLUE), 0xffFB0057);
        assert_close(harmonize(RED, GREEN), 0xffD85600);
        assert_close(harmonize(RED, YELLOW), 0xffD85600);
        assert_close(harmonize(BLUE, GREEN), 0xff0047A3);
        assert_close(harmonize(BLUE, RED), 0xff5700DC);
        assert_close(harmonize(BLUE, YELLOW), 0xff0047A3);
        assert_close(harmonize(GREEN, BLUE), 0xff00FC94);
        assert_close(harmonize(GREEN, RED), 0xffB1F000);
        assert_close(harmonize(GREEN, YELLOW), 0xffB1F000);
        assert_close(harmonize(YELLOW, BLUE), 0xffEBFFBA);
        assert_close(harmonize(YELLOW, GREEN), 0xffEBFFBA);
        assert_close(harmonize(YELLOW, RED), 0xffFFF6E3);
    }

    #[test]
    fn test_harmonize_with_self_is_identity() {
        for &color in [RED, BLUE, GREEN, YELLOW].iter() {
            assert_close(harmonize(color, color), color.to_argb());
        }
    }

    #[test]
    fn test_cam16_ucs_endpoints() {
        assert_close(cam16_ucs(RED, BLUE, 0.0), RED.to_argb());
        assert_close(cam16_ucs(RED, BLUE, 1.0), BLUE.to_argb());
    }

    #[test]
    fn test_hct_hue_keeps_tone() {
        let blended = hct_hue(RED, BLUE, 0.8);
        assert_close(blended, 0xff905EFF);
        // the blend moved hue toward blue but kept red's tone
        let red_tone = HCTColor::from_color(RED).tone();
        let blended_tone = HCTColor::from_color(blended).tone();
        assert!((red_tone - blended_tone).abs() <= 1.0);
    }
}
