//! Channel roles and the channel lists the mappers read and write.
//!
//! ## Types
//! - [`ChannelRole`] - closed set of DMX channel functions
//! - [`Channel`] - one channel of a fixture: opaque id, role, current value
//! - [`ChannelMapping`] - mapper output, channel id to DMX value
//! - [`RoleSet`] - which roles a fixture exposes
//! - [`RoleLevels`] - normalized per-role levels a mapper has decided on

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::color::{clamp01, to_dmx};

/// Function of a single fixture channel.
/// Color roles are driven by the mixing engine; every other role is carried
/// through untouched.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Debug,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ChannelRole {
    /// Intensity/Dimmer - overall brightness, independent of color
    Intensity,
    Red,
    Green,
    Blue,
    /// White LED, neutral color temperature
    White,
    /// Amber LED, warm orange
    Amber,
    /// Ultraviolet, renders as deep violet
    UV,
    Cyan,
    Magenta,
    Yellow,
    /// Lime LED, yellow-green booster
    Lime,
    /// Indigo / royal blue LED
    Indigo,
    ColdWhite,
    WarmWhite,
    Pan,
    PanFine,
    Tilt,
    TiltFine,
    ColorWheel,
    GoboWheel,
    GoboRotation,
    Shutter,
    Strobe,
    Zoom,
    Focus,
    Prism,
    Frost,
    Control,
    Speed,
}

impl ChannelRole {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelRole::Intensity => "Intensity",
            ChannelRole::Red => "Red",
            ChannelRole::Green => "Green",
            ChannelRole::Blue => "Blue",
            ChannelRole::White => "White",
            ChannelRole::Amber => "Amber",
            ChannelRole::UV => "UV",
            ChannelRole::Cyan => "Cyan",
            ChannelRole::Magenta => "Magenta",
            ChannelRole::Yellow => "Yellow",
            ChannelRole::Lime => "Lime",
            ChannelRole::Indigo => "Indigo",
            ChannelRole::ColdWhite => "Cold White",
            ChannelRole::WarmWhite => "Warm White",
            ChannelRole::Pan => "Pan",
            ChannelRole::PanFine => "Pan Fine",
            ChannelRole::Tilt => "Tilt",
            ChannelRole::TiltFine => "Tilt Fine",
            ChannelRole::ColorWheel => "Color Wheel",
            ChannelRole::GoboWheel => "Gobo Wheel",
            ChannelRole::GoboRotation => "Gobo Rotation",
            ChannelRole::Shutter => "Shutter",
            ChannelRole::Strobe => "Strobe",
            ChannelRole::Zoom => "Zoom",
            ChannelRole::Focus => "Focus",
            ChannelRole::Prism => "Prism",
            ChannelRole::Frost => "Frost",
            ChannelRole::Control => "Control",
            ChannelRole::Speed => "Speed",
        }
    }

    /// Roles that emit light of a particular color. Intensity is not one of them.
    pub fn is_color(&self) -> bool {
        match self {
            ChannelRole::Red
            | ChannelRole::Green
            | ChannelRole::Blue
            | ChannelRole::White
            | ChannelRole::Amber
            | ChannelRole::UV
            | ChannelRole::Cyan
            | ChannelRole::Magenta
            | ChannelRole::Yellow
            | ChannelRole::Lime
            | ChannelRole::Indigo
            | ChannelRole::ColdWhite
            | ChannelRole::WarmWhite => true,
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
            | ChannelRole::Speed => false,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            ChannelRole::Red | ChannelRole::Green | ChannelRole::Blue
        )
    }

    /// Non-primary color roles found only on advanced fixtures.
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            ChannelRole::Cyan
                | ChannelRole::Magenta
                | ChannelRole::Yellow
                | ChannelRole::Lime
                | ChannelRole::Indigo
                | ChannelRole::ColdWhite
                | ChannelRole::WarmWhite
        )
    }

    fn bit(self) -> u64 {
        1 << (self as u32)
    }
}

/// A single channel of a fixture as seen by the engine.
/// `id` is echoed back in mappings and never interpreted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Channel<I> {
    pub id: I,
    pub role: ChannelRole,
    /// Current DMX value (0-255)
    pub value: u8,
}

impl<I> Channel<I> {
    pub fn new(id: I, role: ChannelRole, value: u8) -> Self {
        Self { id, role, value }
    }
}

/// Mapper output: channel id to DMX value, only for the channels actually driven.
pub type ChannelMapping<I> = HashMap<I, u8>;

/// Set of roles present on a fixture.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct RoleSet(u64);

impl RoleSet {
    pub fn of<I>(channels: &[Channel<I>]) -> Self {
        channels.iter().map(|c| c.role).collect()
    }

    pub fn insert(&mut self, role: ChannelRole) {
        self.0 |= role.bit();
    }

    pub fn contains(&self, role: ChannelRole) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn has_rgb(&self) -> bool {
        self.contains(ChannelRole::Red)
            && self.contains(ChannelRole::Green)
            && self.contains(ChannelRole::Blue)
    }

    pub fn has_extended(&self) -> bool {
        use strum::IntoEnumIterator;
        ChannelRole::iter().any(|role| role.is_extended() && self.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<ChannelRole> for RoleSet {
    fn from_iter<T: IntoIterator<Item = ChannelRole>>(iter: T) -> Self {
        let mut set = RoleSet::default();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

/// Normalized levels (0.0 - 1.0) a mapper assigned to roles.
/// Rendering against a channel list yields the [`ChannelMapping`].
#[derive(Clone, Default, Debug)]
pub struct RoleLevels {
    levels: HashMap<ChannelRole, f32>,
}

impl RoleLevels {
    pub fn set(&mut self, role: ChannelRole, level: f32) {
        self.levels.insert(role, clamp01(level));
    }

    pub fn get(&self, role: ChannelRole) -> Option<f32> {
        self.levels.get(&role).copied()
    }

    pub fn scale(&mut self, factor: f32) {
        for level in self.levels.values_mut() {
            *level = clamp01(*level * factor);
        }
    }

    /// Every channel whose role received a level gets that level; two channels
    /// with the same role are driven identically.
    pub fn render<I: Clone + Eq + Hash>(&self, channels: &[Channel<I>]) -> ChannelMapping<I> {
        channels
            .iter()
            .filter_map(|c| self.get(c.role).map(|level| (c.id.clone(), to_dmx(level))))
            .collect()
    }
}

/// Scales every value of a finished mapping, rounding to the nearest DMX step.
pub fn scale_mapping<I>(mapping: &mut ChannelMapping<I>, factor: f32) {
    let factor = clamp01(factor);
    for value in mapping.values_mut() {
        *value = (*value as f32 * factor).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn role_labels_round_trip_through_strum() {
        for role in ChannelRole::iter() {
            let label: &'static str = role.into();
            assert_eq!(label.parse::<ChannelRole>().unwrap(), role);
        }
        assert_eq!(ChannelRole::ColdWhite.to_string(), "ColdWhite");
        assert_eq!(ChannelRole::ColdWhite.name(), "Cold White");
    }

    #[test]
    fn role_categories_are_consistent() {
        let colors = ChannelRole::iter().filter(ChannelRole::is_color).count();
        assert_eq!(colors, 13);
        for role in ChannelRole::iter() {
            if role.is_primary() || role.is_extended() {
                assert!(role.is_color(), "{role} should be a color role");
            }
        }
        assert!(!ChannelRole::Intensity.is_color());
    }

    #[test]
    fn role_set_tracks_membership() {
        let channels = vec![
            Channel::new(1, ChannelRole::Red, 0),
            Channel::new(2, ChannelRole::Green, 0),
            Channel::new(3, ChannelRole::Blue, 0),
            Channel::new(4, ChannelRole::Pan, 0),
        ];
        let set = RoleSet::of(&channels);
        assert!(set.has_rgb());
        assert!(set.contains(ChannelRole::Pan));
        assert!(!set.contains(ChannelRole::White));
        assert!(!set.has_extended());
        assert!(RoleSet::of::<u32>(&[]).is_empty());
    }

    #[test]
    fn render_only_includes_driven_roles() {
        let channels = vec![
            Channel::new("r", ChannelRole::Red, 10),
            Channel::new("pan", ChannelRole::Pan, 90),
            Channel::new("r2", ChannelRole::Red, 0),
        ];
        let mut levels = RoleLevels::default();
        levels.set(ChannelRole::Red, 0.5);
        levels.set(ChannelRole::Blue, 1.0);
        let mapping = levels.render(&channels);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["r"], 128);
        assert_eq!(mapping["r2"], 128);
        assert!(!mapping.contains_key("pan"));
    }

    #[test]
    fn scaling_rounds_to_nearest_step() {
        let mut mapping: ChannelMapping<u32> = [(1, 255), (2, 3)].into_iter().collect();
        scale_mapping(&mut mapping, 0.5);
        assert_eq!(mapping[&1], 128);
        assert_eq!(mapping[&2], 2);
    }
}
