//! Console output shared by the example binaries.
use std::collections::BTreeMap;

use sprite_gen::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// One-line description of a sprite.
pub fn format_sprite(sprite: &Sprite) -> String {
    format!(
        "{:<9} x={:.3} y={:.3} scale={:.3} hsv=({:.3}, {:.2}, {:.2})",
        sprite.shape().name(),
        sprite.x(),
        sprite.y(),
        sprite.scale(),
        sprite.hue(),
        sprite.saturation(),
        sprite.value(),
    )
}

/// Print a scene back to front, one sprite per line.
pub fn print_scene(title: &str, sprites: &[Sprite]) {
    println!("{title} ({} sprites, back to front)", sprites.len());
    for (layer, sprite) in sprites.iter().enumerate() {
        println!("  [{layer}] {}", format_sprite(sprite));
    }
}

/// Count sprites per shape across many scenes.
pub fn shape_histogram<'a, I>(scenes: I) -> BTreeMap<Shape, usize>
where
    I: IntoIterator<Item = &'a Vec<Sprite>>,
{
    let mut counts = BTreeMap::new();
    for scene in scenes {
        for sprite in scene {
            *counts.entry(sprite.shape()).or_insert(0) += 1;
        }
    }
    counts
}
