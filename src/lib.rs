//! Huetone is a library for describing color the way people actually see it. Most color libraries
//! stop at device color spaces like sRGB, which are convenient for monitors and poor analogues to
//! human vision: equal steps in RGB are not equal steps in appearance, and the same RGB triple
//! looks different under different lighting. Huetone instead builds on a color appearance model
//! (CAM16), which predicts hue, chroma, lightness, and friends from a color *and* the conditions
//! it is viewed in, and pairs that with L\*, the lightness scale that contrast and accessibility
//! math is defined in. The resulting HCT color (hue and chroma from the appearance model, tone
//! from L\*) has one hard guarantee the underlying model lacks: every `HCTColor` describes a
//! color that can actually be shown on a screen. Asking for more chroma than sRGB can render at a
//! given hue and tone doesn't fail and doesn't lie; the gamut solver finds the closest renderable
//! color and the stored values describe that.

// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

extern crate num;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[cfg(test)]
extern crate float_cmp;

pub mod angles;
pub mod blend;
pub mod cam16;
pub mod color;
pub mod contrast;
pub mod coord;
pub mod gamut;
pub mod hct;
pub mod illuminants;
pub mod palettes;
pub mod prelude;
pub mod viewing;
