//! White/amber extraction mapping for RGBWA and RGBWAU fixtures.

use std::hash::Hash;

use crate::channel::{Channel, ChannelMapping, ChannelRole, RoleLevels, RoleSet};
use crate::color::{Color, clamp01};
use crate::derivation::{UV_BLUE_THRESHOLD, UV_EXTRACTED_BLUE_GAIN, UV_MAX_RED_GREEN};

/// Moves the neutral part of `color` onto white and the remaining yellow part
/// onto amber; red/green/blue only carry what is left.
///
/// UV is tested in two stages: blue must be strong in the target color itself,
/// and red/green must be weak after extraction. Testing the extracted blue
/// alone would miss blue-dominant colors whose blue was mostly moved to white.
pub fn map_advanced<I: Clone + Eq + Hash>(color: Color, channels: &[Channel<I>]) -> ChannelMapping<I> {
    let (r, g, b) = color.normalized();
    let roles = RoleSet::of(channels);

    let white = r.min(g).min(b);
    let (pure_r, pure_g, pure_b) = (r - white, g - white, b - white);
    let yellow = pure_r.min(pure_g);
    let (final_r, final_g, final_b) = (pure_r - yellow, pure_g - yellow, pure_b);

    let uv = if b > UV_BLUE_THRESHOLD && final_r < UV_MAX_RED_GREEN && final_g < UV_MAX_RED_GREEN {
        clamp01(final_b * UV_EXTRACTED_BLUE_GAIN)
    } else {
        0.0
    };

    let mut levels = RoleLevels::default();
    for (role, level) in [
        (ChannelRole::Red, final_r),
        (ChannelRole::Green, final_g),
        (ChannelRole::Blue, final_b),
        (ChannelRole::White, white),
        (ChannelRole::Amber, yellow),
        (ChannelRole::UV, uv),
    ] {
        if roles.contains(role) {
            levels.set(role, level);
        }
    }

    levels.render(channels)
}
