//! Brightness-maximizing allocation for fixtures with extended emitters
//! (cyan, magenta, yellow, lime, indigo, warm and cold white).
//!
//! The color is decomposed in stages. Each stage takes the share of the
//! remaining pure red/green/blue it explains, so no light is counted twice:
//!
//! 1. neutral white is split off the target color
//! 2. secondaries (cyan, magenta, yellow) and boosters (lime, indigo)
//! 3. white onto warm, cold or generic white emitters
//! 4. amber and UV from what remains
//! 5. blue synthesized from indigo or cyan on fixtures without a blue emitter
//! 6. the remainder onto red/green/blue
//!
//! An explicit `intensity` below 1.0 scales the whole result last.

use std::hash::Hash;

use crate::channel::{Channel, ChannelMapping, ChannelRole, RoleLevels, RoleSet};
use crate::color::{Color, clamp01};
use crate::derivation::{
    BOOSTER_SHARE, CYAN_RGB, INDIGO_MIN_BLUE, INDIGO_RED_RANGE, INDIGO_RGB, LIME_MIN_GREEN,
    LIME_RED_RANGE, SECONDARY_MAX_OFF, UV_BLUE_THRESHOLD, WHITE_EMITTER_GAIN, amber,
    should_activate_uv, uv_from_dominance,
};

/// Pure red/green/blue still unexplained by any allocated emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Remaining {
    r: f32,
    g: f32,
    b: f32,
}

impl Remaining {
    fn is_cyan(&self) -> bool {
        self.g > 0.0 && self.b > 0.0 && self.r < SECONDARY_MAX_OFF
    }

    fn is_magenta(&self) -> bool {
        self.r > 0.0 && self.b > 0.0 && self.g < SECONDARY_MAX_OFF
    }

    fn is_yellow(&self) -> bool {
        self.r > 0.0 && self.g > 0.0 && self.b < SECONDARY_MAX_OFF
    }

    fn is_lime(&self) -> bool {
        self.g > LIME_MIN_GREEN
            && self.r > LIME_RED_RANGE.0
            && self.r < LIME_RED_RANGE.1
            && self.b < SECONDARY_MAX_OFF
    }

    fn is_indigo(&self) -> bool {
        self.b > INDIGO_MIN_BLUE
            && self.r > INDIGO_RED_RANGE.0
            && self.r < INDIGO_RED_RANGE.1
            && self.g < SECONDARY_MAX_OFF
    }
}

pub fn map_intelligent<I: Clone + Eq + Hash>(
    color: Color,
    channels: &[Channel<I>],
    intensity: Option<f32>,
) -> ChannelMapping<I> {
    let (r, g, b) = color.normalized();
    let roles = RoleSet::of(channels);
    let mut levels = RoleLevels::default();

    let white = r.min(g).min(b);
    let mut rem = Remaining {
        r: r - white,
        g: g - white,
        b: b - white,
    };

    if roles.contains(ChannelRole::Cyan) && rem.is_cyan() {
        let cyan = rem.g.min(rem.b);
        levels.set(ChannelRole::Cyan, cyan);
        rem.g -= cyan;
        rem.b -= cyan;
    }
    if roles.contains(ChannelRole::Magenta) && rem.is_magenta() {
        let magenta = rem.r.min(rem.b);
        levels.set(ChannelRole::Magenta, magenta);
        rem.r -= magenta;
        rem.b -= magenta;
    }
    if roles.contains(ChannelRole::Yellow) && rem.is_yellow() {
        let yellow = rem.r.min(rem.g);
        levels.set(ChannelRole::Yellow, yellow);
        rem.r -= yellow;
        rem.g -= yellow;
    }
    // Boosters add punch on top of the primaries rather than replacing them.
    if roles.contains(ChannelRole::Lime) && rem.is_lime() {
        levels.set(ChannelRole::Lime, rem.g * BOOSTER_SHARE);
    }
    if roles.contains(ChannelRole::Indigo) && rem.is_indigo() {
        levels.set(ChannelRole::Indigo, rem.b * BOOSTER_SHARE);
    }
    tracing::trace!(?rem, "secondary stage done");

    let has_warm = roles.contains(ChannelRole::WarmWhite);
    let has_cold = roles.contains(ChannelRole::ColdWhite);
    let white_role = if has_warm && r > g && r > b {
        Some(ChannelRole::WarmWhite)
    } else if has_cold && b > r && b > g {
        Some(ChannelRole::ColdWhite)
    } else if !has_warm && !has_cold && roles.contains(ChannelRole::White) {
        Some(ChannelRole::White)
    } else {
        None
    };
    match white_role {
        Some(role) if white > 0.0 => levels.set(role, white * WHITE_EMITTER_GAIN),
        Some(_) => {}
        None => {
            // No emitter can carry the neutral part, so hand it back to the primaries.
            rem.r += white;
            rem.g += white;
            rem.b += white;
        }
    }

    if roles.contains(ChannelRole::Amber) {
        levels.set(ChannelRole::Amber, amber(rem.r, rem.g, rem.b));
    }
    if roles.contains(ChannelRole::UV) {
        let uv = if should_activate_uv(rem.r, rem.g, rem.b, UV_BLUE_THRESHOLD) {
            uv_from_dominance(rem.r, rem.g, rem.b)
        } else {
            0.0
        };
        levels.set(ChannelRole::UV, uv);
    }

    if !roles.contains(ChannelRole::Blue) {
        if roles.contains(ChannelRole::Indigo) && rem.b > 0.0 {
            let indigo = synthesize_blue(&mut levels, ChannelRole::Indigo, rem.b / INDIGO_RGB.2);
            rem.b = (rem.b - indigo * INDIGO_RGB.2).max(0.0);
            rem.r = (rem.r - indigo * INDIGO_RGB.0).max(0.0);
        }
        if roles.contains(ChannelRole::Cyan) && rem.b > 0.0 {
            let cyan = synthesize_blue(&mut levels, ChannelRole::Cyan, rem.b / CYAN_RGB.2);
            rem.b = (rem.b - cyan * CYAN_RGB.2).max(0.0);
            rem.g = (rem.g - cyan * CYAN_RGB.1).max(0.0);
        }
    }

    for (role, level) in [
        (ChannelRole::Red, rem.r),
        (ChannelRole::Green, rem.g),
        (ChannelRole::Blue, rem.b),
    ] {
        if roles.contains(role) {
            levels.set(role, level);
        }
    }

    if let Some(intensity) = intensity.filter(|i| *i < 1.0) {
        levels.scale(intensity);
    }

    levels.render(channels)
}

/// Raises `role` on top of any level an earlier stage gave it, so it emits
/// the missing blue. Returns the increase actually applied, which is less than
/// `wanted` when the emitter saturates.
fn synthesize_blue(levels: &mut RoleLevels, role: ChannelRole, wanted: f32) -> f32 {
    let existing = levels.get(role).unwrap_or(0.0);
    let raised = clamp01(existing + wanted);
    levels.set(role, raised);
    let added = raised - existing;
    tracing::trace!(%role, existing, added, "synthesized missing blue");
    added
}
