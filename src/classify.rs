use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelRole, RoleSet};

/// Color mixing capability of a fixture, derived from its channel roles.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Debug,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum MixingClass {
    #[strum(serialize = "RGB")]
    Rgb,
    #[strum(serialize = "RGBW")]
    Rgbw,
    #[strum(serialize = "RGBA")]
    Rgba,
    #[strum(serialize = "RGBWA")]
    Rgbwa,
    #[strum(serialize = "RGBWAU")]
    Rgbwau,
    /// Not RGB-complete; a dimmer or single-color fixture
    #[strum(serialize = "SINGLE")]
    Single,
}

impl MixingClass {
    pub fn of_roles(roles: RoleSet) -> Self {
        if !roles.has_rgb() {
            return MixingClass::Single;
        }
        let white = roles.contains(ChannelRole::White);
        let amber = roles.contains(ChannelRole::Amber);
        let uv = roles.contains(ChannelRole::UV);
        match (white, amber, uv) {
            (true, true, true) => MixingClass::Rgbwau,
            (true, true, false) => MixingClass::Rgbwa,
            (false, true, _) => MixingClass::Rgba,
            (true, false, _) => MixingClass::Rgbw,
            (false, false, _) => MixingClass::Rgb,
        }
    }

    /// Fixtures whose white and amber emitters are worth extracting into.
    pub fn extracts_white(&self) -> bool {
        matches!(self, MixingClass::Rgbwa | MixingClass::Rgbwau)
    }
}

pub fn classify<I>(channels: &[Channel<I>]) -> MixingClass {
    MixingClass::of_roles(RoleSet::of(channels))
}
