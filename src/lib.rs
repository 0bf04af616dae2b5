//! Color mixing for stage-lighting fixtures.
//!
//! Turns an RGB color intent into DMX values for whatever color emitters a
//! fixture has, and reads the shown color back from channel values.
//!
//! ```
//! use q_color::{Channel, ChannelRole, Color, create_optimized_color_mapping, reverse_map};
//!
//! let channels = vec![
//!     Channel::new(1, ChannelRole::Intensity, 0),
//!     Channel::new(2, ChannelRole::Red, 0),
//!     Channel::new(3, ChannelRole::Green, 0),
//!     Channel::new(4, ChannelRole::Blue, 0),
//! ];
//! let mapping = create_optimized_color_mapping(Color::new(255, 128, 0), &channels, Some(0.5));
//! assert_eq!(mapping[&1], 128);
//! assert_eq!(mapping[&2], 255);
//!
//! let shown: Vec<_> = channels
//!     .iter()
//!     .map(|c| Channel::new(c.id, c.role, mapping[&c.id]))
//!     .collect();
//! assert_eq!(reverse_map(&shown).color, Color::new(255, 128, 0));
//! ```
//!
//! ## Modules
//! - [`classify`] - mixing capability of a fixture
//! - [`derivation`] - thresholds and amber/UV helpers shared by the mappers
//! - [`basic`], [`advanced`], [`intelligent`] - the three forward mappers
//! - [`reverse`] - channel values back to color
//! - [`strategy`] - mapper selection and the brightness policy
//! - [`fixture`] - profiles, patching and DMX universe output
//!
//! Every mapper is a pure function of its arguments and safe to call from
//! any number of threads at once.

pub mod advanced;
pub mod basic;
pub mod channel;
pub mod classify;
pub mod color;
pub mod derivation;
pub mod fixture;
pub mod intelligent;
pub mod reverse;
pub mod strategy;

pub use advanced::map_advanced;
pub use basic::map_basic;
pub use channel::{Channel, ChannelMapping, ChannelRole, RoleSet};
pub use classify::{MixingClass, classify};
pub use color::{Color, ColorParseError, ColorWithIntensity};
pub use fixture::{
    ChannelDef, DMX_CHANNELS, FixtureMode, FixtureProfile, PatchError, PatchedFixture,
    ProfileLibrary, Universe,
};
pub use intelligent::map_intelligent;
pub use reverse::reverse_map;
pub use strategy::{Strategy, create_optimized_color_mapping};
