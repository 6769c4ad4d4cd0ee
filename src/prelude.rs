//! This module brings the most common Huetone functionality under a single namespace, to prevent
//! excessive imports: the device color type and its parse error, the appearance model color, the
//! HCT color, viewing conditions, and illuminants. The free-function modules (the solver,
//! contrast, blending, angles) are not re-exported; call them through their modules, where the
//! names read sensibly.

pub use cam16::CAM16Color;
pub use color::{RGBColor, RGBParseError, XYZColor};
pub use hct::HCTColor;
pub use illuminants::Illuminant;
pub use palettes::TonalPalette;
pub use viewing::ViewingConditions;
