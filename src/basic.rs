//! Direct RGB(+W+A+UV) allocation for traditional fixtures.

use std::hash::Hash;

use crate::channel::{Channel, ChannelMapping, ChannelRole, RoleLevels, RoleSet};
use crate::color::{Color, unit};
use crate::derivation::{UV_BLUE_THRESHOLD, amber, should_activate_uv, uv_from_dominance};

/// Maps `color` straight onto whichever color channels the fixture has.
///
/// With `preserve_intensity`, a nonzero INTENSITY channel already on the fixture
/// scales every computed level by its current value, so the color can be
/// re-derived without disturbing brightness. The INTENSITY channel itself is
/// never written here.
pub fn map_basic<I: Clone + Eq + Hash>(
    color: Color,
    channels: &[Channel<I>],
    preserve_intensity: bool,
) -> ChannelMapping<I> {
    let (r, g, b) = color.normalized();
    let roles = RoleSet::of(channels);
    let mut levels = RoleLevels::default();

    let uv = if should_activate_uv(r, g, b, UV_BLUE_THRESHOLD) && b > r && b > g {
        uv_from_dominance(r, g, b)
    } else {
        0.0
    };

    for (role, level) in [
        (ChannelRole::Red, r),
        (ChannelRole::Green, g),
        (ChannelRole::Blue, b),
        (ChannelRole::White, r.min(g).min(b)),
        (ChannelRole::Amber, amber(r, g, b)),
        (ChannelRole::UV, uv),
    ] {
        if roles.contains(role) {
            levels.set(role, level);
        }
    }

    if preserve_intensity {
        let existing = channels
            .iter()
            .find(|c| c.role == ChannelRole::Intensity && c.value > 0);
        if let Some(dimmer) = existing {
            levels.scale(unit(dimmer.value));
        }
    }

    levels.render(channels)
}
