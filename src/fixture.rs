//! Fixture profiles and patching
//!
//! Connects the mixing engine to concrete DMX layouts:
//!
//! - [`ChannelDef`] - one channel of a mode, by role and offset
//! - [`FixtureMode`] - a channel layout (e.g. "4ch (Dimmer)")
//! - [`FixtureProfile`] - a fixture type with one or more modes
//! - [`ProfileLibrary`] - built-in and user-defined profiles
//! - [`PatchedFixture`] - a profile placed at a start address
//! - [`Universe`] - the 512 DMX values a patched fixture reads and writes

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::channel::{Channel, ChannelMapping, ChannelRole};
use crate::color::{Color, ColorWithIntensity};
use crate::reverse::reverse_map;
use crate::strategy::create_optimized_color_mapping;

/// Number of channels in one DMX universe.
pub const DMX_CHANNELS: usize = 512;

const DMX_ADDRESSES: RangeInclusive<usize> = 1..=DMX_CHANNELS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Invalid start channel: {0}. Must be between 1 and 512")]
    InvalidStartChannel(usize),
    #[error("Fixture at {start} with {footprint} channels does not fit in the universe")]
    Overflow { start: usize, footprint: usize },
    #[error("Profile {profile} has no mode {mode}")]
    UnknownMode { profile: String, mode: usize },
}

/// One channel within a fixture mode.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChannelDef {
    pub role: ChannelRole,
    /// Offset from the fixture's start channel (0-based)
    pub offset: u16,
    pub name: String,
}

impl ChannelDef {
    pub fn new(role: ChannelRole, offset: u16) -> Self {
        Self {
            name: role.name().to_string(),
            role,
            offset,
        }
    }
}

/// A channel layout for a profile. Modes of the same fixture differ in
/// footprint, e.g. with and without a dimmer channel.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct FixtureMode {
    pub name: String,
    pub channels: Vec<ChannelDef>,
}

impl FixtureMode {
    pub fn new(name: &str, channels: Vec<ChannelDef>) -> Self {
        Self {
            name: name.to_string(),
            channels,
        }
    }

    /// Builds a mode whose channels sit at consecutive offsets in `roles` order.
    pub fn sequential(name: &str, roles: &[ChannelRole]) -> Self {
        let channels = roles
            .iter()
            .zip(0u16..)
            .map(|(role, offset)| ChannelDef::new(*role, offset))
            .collect();
        Self::new(name, channels)
    }

    /// Number of DMX addresses this mode occupies.
    pub fn footprint(&self) -> usize {
        self.channels
            .iter()
            .map(|c| c.offset as usize + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A type of fixture, independent of where it is patched.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct FixtureProfile {
    pub id: u32,
    pub name: String,
    pub manufacturer: String,
    pub modes: Vec<FixtureMode>,
    pub is_user_defined: bool,
}

impl FixtureProfile {
    pub fn new(id: u32, name: &str, manufacturer: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            modes: Vec::new(),
            is_user_defined: false,
        }
    }

    pub fn with_mode(mut self, mode: FixtureMode) -> Self {
        self.modes.push(mode);
        self
    }

    pub fn mode(&self, index: usize) -> Result<&FixtureMode, PatchError> {
        self.modes.get(index).ok_or_else(|| PatchError::UnknownMode {
            profile: self.name.clone(),
            mode: index,
        })
    }
}

/// Built-in profiles plus whatever the user adds.
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct ProfileLibrary {
    pub profiles: Vec<FixtureProfile>,
    pub next_id: u32,
}

impl ProfileLibrary {
    pub fn new() -> Self {
        let mut library = Self {
            profiles: Vec::new(),
            next_id: 1,
        };
        library.load_predefined_profiles();
        library
    }

    pub fn add_user_profile(&mut self, mut profile: FixtureProfile) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        profile.id = id;
        profile.is_user_defined = true;
        self.profiles.push(profile);
        id
    }

    pub fn get(&self, id: u32) -> Option<&FixtureProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FixtureProfile> {
        self.profiles.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn user_profiles(&self) -> impl Iterator<Item = &FixtureProfile> {
        self.profiles.iter().filter(|p| p.is_user_defined)
    }

    fn push_predefined(&mut self, name: &str, manufacturer: &str, modes: Vec<FixtureMode>) {
        let mut profile = FixtureProfile::new(self.next_id, name, manufacturer);
        profile.modes = modes;
        self.next_id += 1;
        self.profiles.push(profile);
    }

    fn load_predefined_profiles(&mut self) {
        use ChannelRole::*;

        self.push_predefined(
            "Generic Dimmer",
            "Generic",
            vec![FixtureMode::sequential("1ch", &[Intensity])],
        );
        self.push_predefined(
            "Generic RGB Par",
            "Generic",
            vec![
                FixtureMode::sequential("4ch (Dimmer)", &[Intensity, Red, Green, Blue]),
                FixtureMode::sequential("3ch (RGB)", &[Red, Green, Blue]),
            ],
        );
        self.push_predefined(
            "Generic RGBW Par",
            "Generic",
            vec![
                FixtureMode::sequential("5ch (Dimmer)", &[Intensity, Red, Green, Blue, White]),
                FixtureMode::sequential("4ch (RGBW)", &[Red, Green, Blue, White]),
            ],
        );
        self.push_predefined(
            "Generic RGBA Par",
            "Generic",
            vec![
                FixtureMode::sequential("5ch (Dimmer)", &[Intensity, Red, Green, Blue, Amber]),
                FixtureMode::sequential("4ch (RGBA)", &[Red, Green, Blue, Amber]),
            ],
        );
        self.push_predefined(
            "Generic RGBWAU Par",
            "Generic",
            vec![
                FixtureMode::sequential(
                    "7ch (Dimmer)",
                    &[Intensity, Red, Green, Blue, White, Amber, UV],
                ),
                FixtureMode::sequential("6ch", &[Red, Green, Blue, White, Amber, UV]),
            ],
        );
        self.push_predefined(
            "Generic Moving Head",
            "Generic",
            vec![FixtureMode::sequential(
                "12ch",
                &[
                    Pan, PanFine, Tilt, TiltFine, Speed, Intensity, Shutter, Red, Green, Blue,
                    White, GoboWheel,
                ],
            )],
        );
        self.push_predefined(
            "Generic Hex Par",
            "Generic",
            vec![FixtureMode::sequential(
                "10ch",
                &[
                    Intensity, Red, Green, Blue, Lime, Amber, Cyan, Indigo, WarmWhite, ColdWhite,
                ],
            )],
        );
        self.push_predefined(
            "Generic CMY Wash",
            "Generic",
            vec![FixtureMode::sequential(
                "6ch",
                &[Intensity, Cyan, Magenta, Yellow, White, Strobe],
            )],
        );
        self.push_predefined(
            "Generic LED Bar",
            "Generic",
            vec![FixtureMode::sequential(
                "8ch (2 cells)",
                &[Red, Green, Blue, Intensity, Red, Green, Blue, Intensity],
            )],
        );
    }
}

/// One DMX universe of output values.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Universe {
    values: [u8; DMX_CHANNELS],
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            values: [0; DMX_CHANNELS],
        }
    }
}

impl Universe {
    /// Value at a 1-based DMX address. Addresses outside the universe read as 0.
    pub fn get(&self, address: usize) -> u8 {
        if DMX_ADDRESSES.contains(&address) {
            self.values[address - 1]
        } else {
            0
        }
    }

    pub fn set(&mut self, address: usize, value: u8) {
        if DMX_ADDRESSES.contains(&address) {
            self.values[address - 1] = value;
        }
    }

    /// Writes a mapping keyed by 1-based DMX address; other addresses keep
    /// their value.
    pub fn apply(&mut self, mapping: &ChannelMapping<usize>) {
        for (address, value) in mapping {
            self.set(*address, *value);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }
}

/// A profile in a chosen mode, placed at a start address.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PatchedFixture {
    pub id: u32,
    pub name: String,
    pub profile_id: u32,
    pub mode_index: usize,
    /// Starting DMX address (1-based)
    pub start_channel: usize,
}

impl PatchedFixture {
    pub fn new(id: u32, name: &str, profile_id: u32, mode_index: usize, start_channel: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            profile_id,
            mode_index,
            start_channel,
        }
    }

    fn mode<'a>(&self, profile: &'a FixtureProfile) -> Result<&'a FixtureMode, PatchError> {
        if !DMX_ADDRESSES.contains(&self.start_channel) {
            return Err(PatchError::InvalidStartChannel(self.start_channel));
        }
        let mode = profile.mode(self.mode_index)?;
        let footprint = mode.footprint();
        if self.start_channel + footprint - 1 > DMX_CHANNELS {
            return Err(PatchError::Overflow {
                start: self.start_channel,
                footprint,
            });
        }
        Ok(mode)
    }

    /// The fixture's channels with absolute DMX addresses as ids and the
    /// universe's current values.
    pub fn channels(
        &self,
        profile: &FixtureProfile,
        universe: &Universe,
    ) -> Result<Vec<Channel<usize>>, PatchError> {
        let mode = self.mode(profile)?;
        Ok(mode
            .channels
            .iter()
            .map(|def| {
                let address = self.start_channel + def.offset as usize;
                Channel::new(address, def.role, universe.get(address))
            })
            .collect())
    }

    /// Mixes `color` for this fixture and writes it into the universe.
    pub fn set_color(
        &self,
        profile: &FixtureProfile,
        universe: &mut Universe,
        color: Color,
        intensity: Option<f32>,
    ) -> Result<ChannelMapping<usize>, PatchError> {
        let channels = self.channels(profile, universe)?;
        let mapping = create_optimized_color_mapping(color, &channels, intensity);
        universe.apply(&mapping);
        tracing::debug!(
            fixture = %self.name,
            color = %color.to_hex(),
            channels = mapping.len(),
            "fixture color set"
        );
        Ok(mapping)
    }

    /// The color this fixture currently shows in `universe`.
    pub fn color(
        &self,
        profile: &FixtureProfile,
        universe: &Universe,
    ) -> Result<ColorWithIntensity, PatchError> {
        Ok(reverse_map(&self.channels(profile, universe)?))
    }
}
