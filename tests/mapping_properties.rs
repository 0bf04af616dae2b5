//! Behavioral guarantees of the mixing engine, exercised through the public API.

use q_color::{
    Channel, ChannelMapping, ChannelRole, Color, ColorWithIntensity, create_optimized_color_mapping,
    map_advanced, map_basic, map_intelligent, reverse_map,
};
use ChannelRole::*;

fn fixture(roles: &[ChannelRole]) -> Vec<Channel<usize>> {
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| Channel::new(i, *role, 0))
        .collect()
}

fn value_of(mapping: &ChannelMapping<usize>, channels: &[Channel<usize>], role: ChannelRole) -> u8 {
    let channel = channels
        .iter()
        .find(|c| c.role == role)
        .unwrap_or_else(|| panic!("fixture has no {role} channel"));
    mapping[&channel.id]
}

fn layouts() -> Vec<Vec<Channel<usize>>> {
    let roles: [&[ChannelRole]; 11] = [
        &[Red, Green, Blue],
        &[Intensity, Red, Green, Blue],
        &[Red, Green, Blue, White],
        &[Red, Green, Blue, Amber, UV],
        &[Intensity, Red, Green, Blue, White, Amber],
        &[Red, Green, Blue, White, Amber, UV, Pan, Tilt],
        &[Intensity, Red, Green, Blue, Lime, Amber, Cyan, Indigo, WarmWhite, ColdWhite],
        &[Cyan, Magenta, Yellow, White],
        &[Red, Green, Indigo, Cyan, UV],
        &[Intensity],
        &[Pan, Tilt, GoboWheel],
    ];
    roles.iter().map(|roles| fixture(roles)).collect()
}

fn sample_colors() -> Vec<Color> {
    let steps = [0u8, 26, 77, 128, 200, 255];
    let mut colors = Vec::new();
    for r in steps {
        for g in steps {
            for b in steps {
                colors.push(Color::new(r, g, b));
            }
        }
    }
    colors
}

#[test]
fn mappings_only_drive_known_channels() {
    for channels in layouts() {
        for color in sample_colors() {
            for intensity in [None, Some(0.0), Some(0.33), Some(1.0)] {
                let mapping = create_optimized_color_mapping(color, &channels, intensity);
                for id in mapping.keys() {
                    let channel = channels.iter().find(|c| c.id == *id).unwrap();
                    assert!(
                        channel.role.is_color() || channel.role == Intensity,
                        "{} written for {color:?}",
                        channel.role
                    );
                }
            }
        }
    }
}

#[test]
fn mapping_is_pure() {
    for channels in layouts() {
        for color in sample_colors().into_iter().step_by(7) {
            let first = create_optimized_color_mapping(color, &channels, Some(0.6));
            let second = create_optimized_color_mapping(color, &channels, Some(0.6));
            assert_eq!(first, second);
            assert_eq!(reverse_map(&channels), reverse_map(&channels));
        }
    }
}

#[test]
fn rgb_fixture_round_trips() {
    let channels = fixture(&[Red, Green, Blue]);
    for color in [
        Color::new(0, 0, 0),
        Color::new(255, 0, 0),
        Color::new(0, 255, 0),
        Color::new(0, 0, 255),
        Color::new(255, 255, 255),
        Color::new(128, 64, 32),
    ] {
        let mapping = create_optimized_color_mapping(color, &channels, None);
        let shown: Vec<_> = channels
            .iter()
            .map(|c| Channel::new(c.id, c.role, mapping[&c.id]))
            .collect();
        assert_eq!(reverse_map(&shown), ColorWithIntensity::new(color, 1.0));
        assert_eq!(map_basic(color, &channels, false), mapping);
    }
}

#[test]
fn pure_white_is_carried_by_white_channel() {
    let channels = fixture(&[Red, Green, Blue, White]);
    let mapping = map_advanced(Color::WHITE, &channels);
    assert_eq!(value_of(&mapping, &channels, White), 255);
    for primary in [Red, Green, Blue] {
        assert_eq!(value_of(&mapping, &channels, primary), 0);
    }

    let channels = fixture(&[Red, Green, Blue, White, Amber]);
    let mapping = create_optimized_color_mapping(Color::WHITE, &channels, None);
    assert_eq!(value_of(&mapping, &channels, White), 255);
    assert_eq!(value_of(&mapping, &channels, Red), 0);
    assert_eq!(value_of(&mapping, &channels, Amber), 0);
}

#[test]
fn yellow_activates_amber() {
    let cases: [&[ChannelRole]; 4] = [
        &[Red, Green, Blue, Amber],
        &[Red, Green, Blue, White, Amber],
        &[Red, Green, Blue, White, Amber, UV],
        &[Red, Green, Blue, Amber, Lime],
    ];
    for roles in cases {
        let channels = fixture(roles);
        let mapping = create_optimized_color_mapping(Color::new(255, 255, 0), &channels, None);
        assert!(value_of(&mapping, &channels, Amber) > 0, "{roles:?}");
        assert_eq!(value_of(&mapping, &channels, Blue), 0, "{roles:?}");
    }
}

#[test]
fn pure_red_never_triggers_uv() {
    let cases: [&[ChannelRole]; 3] = [
        &[Red, Green, Blue, UV],
        &[Red, Green, Blue, White, Amber, UV],
        &[Red, Green, Blue, UV, Cyan],
    ];
    for roles in cases {
        let channels = fixture(roles);
        let mapping = create_optimized_color_mapping(Color::new(255, 0, 0), &channels, None);
        assert_eq!(value_of(&mapping, &channels, UV), 0, "{roles:?}");
    }
}

#[test]
fn brightness_is_applied_once() {
    let color = Color::new(200, 100, 50);

    let with_dimmer = fixture(&[Intensity, Red, Green, Blue]);
    let mapping = create_optimized_color_mapping(color, &with_dimmer, Some(0.5));
    assert_eq!(value_of(&mapping, &with_dimmer, Intensity), 128);
    assert_eq!(value_of(&mapping, &with_dimmer, Red), 200);
    assert_eq!(value_of(&mapping, &with_dimmer, Green), 100);
    assert_eq!(value_of(&mapping, &with_dimmer, Blue), 50);

    let without = fixture(&[Red, Green, Blue]);
    let mapping = create_optimized_color_mapping(color, &without, Some(0.5));
    assert_eq!(value_of(&mapping, &without, Red), 100);
    assert_eq!(value_of(&mapping, &without, Green), 50);
    assert_eq!(value_of(&mapping, &without, Blue), 25);
}

#[test]
fn cyan_allocation_is_not_double_counted() {
    let channels = fixture(&[Red, Green, Blue, Cyan]);
    for g in (0..=255u8).step_by(15) {
        for b in (0..=255u8).step_by(15) {
            let color = Color::new(0, g, b);
            let mapping = map_intelligent(color, &channels, None);
            let cyan = value_of(&mapping, &channels, Cyan) as u16;
            let green = value_of(&mapping, &channels, Green) as u16;
            let blue = value_of(&mapping, &channels, Blue) as u16;
            // One DMX step of slack for rounding each side separately.
            assert!(green + cyan <= g as u16 + 1, "{color:?}: {green} + {cyan}");
            assert!(blue + cyan <= b as u16 + 1, "{color:?}: {blue} + {cyan}");
        }
    }
}

#[test]
fn empty_fixture() {
    let empty: Vec<Channel<usize>> = Vec::new();
    for color in [Color::BLACK, Color::WHITE, Color::new(12, 200, 99)] {
        assert!(create_optimized_color_mapping(color, &empty, Some(0.5)).is_empty());
        assert!(map_basic(color, &empty, true).is_empty());
        assert!(map_advanced(color, &empty).is_empty());
        assert!(map_intelligent(color, &empty, Some(0.5)).is_empty());
    }
    assert_eq!(reverse_map(&empty), ColorWithIntensity::new(Color::BLACK, 1.0));
}

#[test]
fn mixing_is_shareable_across_threads() {
    let channels = fixture(&[Intensity, Red, Green, Blue, Lime, Amber, Cyan, WarmWhite]);
    let expected = create_optimized_color_mapping(Color::new(10, 220, 90), &channels, Some(0.8));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    create_optimized_color_mapping(Color::new(10, 220, 90), &channels, Some(0.8))
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
