//! Picks a mapper for a fixture and applies the brightness policy.
//!
//! Brightness is applied exactly once. A fixture with a dedicated INTENSITY
//! channel gets `round(intensity * 255)` on that channel and unscaled color
//! channels; a fixture without one gets its color channels scaled instead.

use std::hash::Hash;

use crate::advanced::map_advanced;
use crate::basic::map_basic;
use crate::channel::{Channel, ChannelMapping, ChannelRole, RoleSet, scale_mapping};
use crate::classify::MixingClass;
use crate::color::{Color, to_dmx};
use crate::intelligent::map_intelligent;

/// Mapper chosen for a fixture.
#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display)]
pub enum Strategy {
    Basic,
    Advanced,
    Intelligent,
}

impl Strategy {
    pub fn for_roles(roles: RoleSet) -> Self {
        if roles.has_extended() {
            Strategy::Intelligent
        } else if MixingClass::of_roles(roles).extracts_white() {
            Strategy::Advanced
        } else {
            Strategy::Basic
        }
    }
}

/// Maps `color` onto the fixture's channels with the best available strategy.
///
/// `intensity` is optional; values outside `0.0..=1.0` are clamped and NaN is
/// treated as absent.
pub fn create_optimized_color_mapping<I: Clone + Eq + Hash>(
    color: Color,
    channels: &[Channel<I>],
    intensity: Option<f32>,
) -> ChannelMapping<I> {
    let intensity = match intensity {
        Some(i) if i.is_nan() => {
            tracing::warn!("ignoring NaN intensity");
            None
        }
        other => other.map(|i| i.clamp(0.0, 1.0)),
    };
    let roles = RoleSet::of(channels);
    let has_dimmer = roles.contains(ChannelRole::Intensity);
    let strategy = Strategy::for_roles(roles);
    tracing::debug!(
        %strategy,
        class = %MixingClass::of_roles(roles),
        ?intensity,
        has_dimmer,
        "mapping color"
    );

    let mut mapping = match strategy {
        Strategy::Intelligent => {
            let scale = if has_dimmer { None } else { intensity };
            map_intelligent(color, channels, scale)
        }
        Strategy::Advanced => map_advanced(color, channels),
        Strategy::Basic => map_basic(color, channels, false),
    };

    if strategy != Strategy::Intelligent && !has_dimmer {
        if let Some(i) = intensity.filter(|i| *i != 1.0) {
            scale_mapping(&mut mapping, i);
        }
    }

    if let Some(i) = intensity {
        apply_dimmer(&mut mapping, channels, i);
    }
    mapping
}

/// Writes `intensity` onto every INTENSITY channel, overriding whatever the
/// mapper produced there.
pub fn apply_dimmer<I: Clone + Eq + Hash>(
    mapping: &mut ChannelMapping<I>,
    channels: &[Channel<I>],
    intensity: f32,
) {
    let level = to_dmx(intensity);
    for channel in channels.iter().filter(|c| c.role == ChannelRole::Intensity) {
        mapping.insert(channel.id.clone(), level);
    }
}
