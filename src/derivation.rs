//! Thresholds, emitter ratios and the amber/UV helpers shared by every mapper.
//!
//! All inputs are normalized components in `0.0..=1.0`. Changing any constant
//! here changes visible output on stage and breaks forward/reverse agreement.

use crate::channel::ChannelRole;
use crate::color::clamp01;

/// How strongly blue content suppresses amber.
pub const AMBER_BLUE_REDUCTION: f32 = 0.3;

/// Blue level above which UV may engage.
pub const UV_BLUE_THRESHOLD: f32 = 0.5;
/// Red and green must both stay below this for UV to engage.
pub const UV_MAX_RED_GREEN: f32 = 0.3;
/// UV level per unit of blue dominance (basic and intelligent mapping).
pub const UV_DOMINANCE_GAIN: f32 = 0.5;
/// UV level per unit of remaining blue (advanced mapping).
pub const UV_EXTRACTED_BLUE_GAIN: f32 = 0.6;

/// The off component of a cyan/magenta/yellow candidate must stay below this.
pub const SECONDARY_MAX_OFF: f32 = 0.1;
pub const LIME_MIN_GREEN: f32 = 0.5;
pub const LIME_RED_RANGE: (f32, f32) = (0.2, 0.6);
pub const INDIGO_MIN_BLUE: f32 = 0.3;
pub const INDIGO_RED_RANGE: (f32, f32) = (0.1, 0.4);
/// Share of the driving component given to a booster emitter (lime, indigo).
pub const BOOSTER_SHARE: f32 = 0.5;

/// White-type emitters are driven, and read back, at this fraction.
pub const WHITE_EMITTER_GAIN: f32 = 0.95;

/// Red/green/blue light emitted by each color role at full level.
pub const RED_RGB: (f32, f32, f32) = (1.0, 0.0, 0.0);
pub const GREEN_RGB: (f32, f32, f32) = (0.0, 1.0, 0.0);
pub const BLUE_RGB: (f32, f32, f32) = (0.0, 0.0, 1.0);
pub const WHITE_RGB: (f32, f32, f32) = (1.0, 1.0, 1.0);
pub const AMBER_RGB: (f32, f32, f32) = (1.0, 0.75, 0.0);
pub const UV_RGB: (f32, f32, f32) = (0.29, 0.0, 0.51);
pub const CYAN_RGB: (f32, f32, f32) = (0.0, 1.0, 1.0);
pub const MAGENTA_RGB: (f32, f32, f32) = (1.0, 0.0, 1.0);
pub const YELLOW_RGB: (f32, f32, f32) = (1.0, 1.0, 0.0);
pub const LIME_RGB: (f32, f32, f32) = (0.5, 1.0, 0.0);
pub const INDIGO_RGB: (f32, f32, f32) = (0.29, 0.0, 0.51);
pub const COLD_WHITE_RGB: (f32, f32, f32) = (0.85, 0.90, 1.0);
pub const WARM_WHITE_RGB: (f32, f32, f32) = (1.0, 0.85, 0.70);

/// Light a color role contributes per unit level, white-type gain included.
/// `None` for roles that emit no color of their own.
pub fn emitter_rgb(role: ChannelRole) -> Option<(f32, f32, f32)> {
    let white = |(r, g, b): (f32, f32, f32)| {
        (
            r * WHITE_EMITTER_GAIN,
            g * WHITE_EMITTER_GAIN,
            b * WHITE_EMITTER_GAIN,
        )
    };
    match role {
        ChannelRole::Red => Some(RED_RGB),
        ChannelRole::Green => Some(GREEN_RGB),
        ChannelRole::Blue => Some(BLUE_RGB),
        ChannelRole::White => Some(white(WHITE_RGB)),
        ChannelRole::Amber => Some(AMBER_RGB),
        ChannelRole::UV => Some(UV_RGB),
        ChannelRole::Cyan => Some(CYAN_RGB),
        ChannelRole::Magenta => Some(MAGENTA_RGB),
        ChannelRole::Yellow => Some(YELLOW_RGB),
        ChannelRole::Lime => Some(LIME_RGB),
        ChannelRole::Indigo => Some(INDIGO_RGB),
        ChannelRole::ColdWhite => Some(white(COLD_WHITE_RGB)),
        ChannelRole::WarmWhite => Some(white(WARM_WHITE_RGB)),
        ChannelRole::Intensity
        | ChannelRole::Pan
        | ChannelRole::PanFine
        | ChannelRole::Tilt
        | ChannelRole::TiltFine
        | ChannelRole::ColorWheel
        | ChannelRole::GoboWheel
        | ChannelRole::GoboRotation
        | ChannelRole::Shutter
        | ChannelRole::Strobe
        | ChannelRole::Zoom
        | ChannelRole::Focus
        | ChannelRole::Prism
        | ChannelRole::Frost
        | ChannelRole::Control
        | ChannelRole::Speed => None,
    }
}

/// Amber level for a color: the yellow content not already explained by blue.
/// Full blue suppresses amber entirely; white carries that case instead.
pub fn amber(r: f32, g: f32, b: f32) -> f32 {
    let yellow = r.min(g);
    if yellow > 0.0 && b < yellow {
        clamp01(yellow - b * AMBER_BLUE_REDUCTION)
    } else {
        0.0
    }
}

/// UV is reserved for near-pure deep blue and purple.
pub fn should_activate_uv(r: f32, g: f32, b: f32, blue_threshold: f32) -> bool {
    b > blue_threshold && r < UV_MAX_RED_GREEN && g < UV_MAX_RED_GREEN
}

/// UV level proportional to how far blue rises above red and green.
pub fn uv_from_dominance(r: f32, g: f32, b: f32) -> f32 {
    clamp01((b - r.max(g)) * UV_DOMINANCE_GAIN)
}
