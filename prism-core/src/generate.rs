//! Harmonious palette generation using golden-angle hue spacing.
//!
//! A random base hue is drawn, then each further color is rotated by the
//! configured step (137.5 degrees by default) so consecutive hues land far
//! apart on the wheel. Saturation and lightness are jittered independently
//! per color inside their configured ranges. Every call draws fresh random
//! values; there is no seed and no reproducibility guarantee.

use rand::Rng;

use crate::color::Color;
use crate::config::GenerationConfig;

/// Generate a fresh set of colors from the thread RNG
pub fn generate_palette_colors(config: &GenerationConfig) -> Vec<Color> {
    generate_with(config, &mut rand::thread_rng())
}

/// Generate colors from any RNG
pub fn generate_with<R: Rng>(config: &GenerationConfig, rng: &mut R) -> Vec<Color> {
    let base_hue: f32 = rng.gen_range(0.0..360.0);
    log::debug!("Generating {} colors from base hue {:.1}", config.count, base_hue);

    (0..config.count)
        .map(|i| {
            let hue = (base_hue + i as f32 * config.hue_step).rem_euclid(360.0);
            let saturation = rng.gen_range(config.saturation.min..=config.saturation.max);
            let lightness = rng.gen_range(config.lightness.min..=config.lightness.max);
            Color::from_hsl(hue, saturation, lightness)
        })
        .collect()
}
