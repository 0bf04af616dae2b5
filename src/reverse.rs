//! Reconstructs the color a fixture is showing from its channel values.

use crate::channel::{Channel, ChannelRole};
use crate::color::{Color, ColorWithIntensity, clamp01, unit};
use crate::derivation::emitter_rgb;

/// Returns the fixture's unscaled color and its intensity.
///
/// Primaries take the strongest channel of their role, so two red emitters
/// do not double-brighten; every other color role adds its emitted light on
/// top. Channel order does not matter. A dedicated INTENSITY channel becomes
/// the returned intensity and never tints the color. Fixtures without any
/// color channel read as black at full intensity.
pub fn reverse_map<I>(channels: &[Channel<I>]) -> ColorWithIntensity {
    let mut primary = [0.0f32; 3];
    let mut added = [0.0f32; 3];
    let mut intensity = None;
    let mut has_color = false;

    for channel in channels {
        let level = unit(channel.value);
        if channel.role == ChannelRole::Intensity {
            intensity = Some(level);
            continue;
        }
        let Some((r, g, b)) = emitter_rgb(channel.role) else {
            continue;
        };
        has_color = true;
        if channel.role.is_primary() {
            for (slot, emitted) in primary.iter_mut().zip([r, g, b]) {
                *slot = slot.max(emitted * level);
            }
        } else {
            for (slot, emitted) in added.iter_mut().zip([r, g, b]) {
                *slot += emitted * level;
            }
        }
    }

    if !has_color {
        return ColorWithIntensity::default();
    }

    let [r, g, b] = [0usize, 1, 2].map(|i| clamp01(primary[i] + added[i]));
    let color = Color::from_normalized(r, g, b);
    tracing::trace!(color = %color.to_hex(), ?intensity, "reconstructed fixture color");
    ColorWithIntensity::new(color, intensity.unwrap_or(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChannelRole::*;

    fn fixture(channels: &[(ChannelRole, u8)]) -> Vec<Channel<usize>> {
        channels
            .iter()
            .enumerate()
            .map(|(i, (role, value))| Channel::new(i, *role, *value))
            .collect()
    }

    #[test]
    fn primaries_read_back_exactly() {
        let result = reverse_map(&fixture(&[(Red, 128), (Green, 64), (Blue, 32)]));
        assert_eq!(result.color, Color::new(128, 64, 32));
        assert_eq!(result.intensity, 1.0);
    }

    #[test]
    fn intensity_channel_is_kept_apart() {
        let result = reverse_map(&fixture(&[(Intensity, 51), (Red, 255)]));
        assert_eq!(result.color, Color::new(255, 0, 0));
        assert!((result.intensity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn duplicate_primaries_do_not_double_brighten() {
        let result = reverse_map(&fixture(&[(Red, 100), (Red, 200), (Green, 0), (Blue, 0)]));
        assert_eq!(result.color, Color::new(200, 0, 0));
    }

    #[test]
    fn extended_roles_add_their_light() {
        let result = reverse_map(&fixture(&[(White, 255)]));
        assert_eq!(result.color, Color::new(242, 242, 242));

        let result = reverse_map(&fixture(&[(Amber, 255)]));
        assert_eq!(result.color, Color::new(255, 191, 0));

        let result = reverse_map(&fixture(&[(Cyan, 255), (Red, 0)]));
        assert_eq!(result.color, Color::new(0, 255, 255));

        let result = reverse_map(&fixture(&[(WarmWhite, 255)]));
        assert_eq!(result.color, Color::new(242, 206, 170));
    }

    #[test]
    fn accumulation_clamps_and_ignores_order() {
        let a = reverse_map(&fixture(&[(Red, 200), (White, 255), (Amber, 255)]));
        let b = reverse_map(&fixture(&[(Amber, 255), (White, 255), (Red, 200)]));
        assert_eq!(a, b);
        assert_eq!(a.color.r, 255);
    }

    #[test]
    fn non_color_roles_are_ignored() {
        let result = reverse_map(&fixture(&[(Pan, 255), (Tilt, 40), (Intensity, 100)]));
        assert_eq!(result, ColorWithIntensity::new(Color::BLACK, 1.0));
        assert_eq!(reverse_map::<usize>(&[]), ColorWithIntensity::default());
    }
}
