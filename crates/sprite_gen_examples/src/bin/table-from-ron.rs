use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sprite_gen::prelude::*;
use sprite_gen_examples::{init_tracing, print_scene};
use tracing::info;

const DEFAULT_TABLE: &str = include_str!("../../assets/shape_params.ron");

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional path to a RON table; falls back to the bundled one.
    let text = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DEFAULT_TABLE.to_owned(),
    };
    let table: ShapeParamTable = ron::from_str(&text).context("parsing shape table")?;
    table.validate()?;
    info!("loaded table with {} shapes: {:?}", table.len(), table.shapes());

    let shapes = table.shapes();
    let base = Product::new(vec![
        Box::new(Continuous::new("x", 0.0, 1.0)?),
        Box::new(Continuous::new("y", 0.0, 1.0)?),
        Box::new(Discrete::new("shape", shapes.iter().copied())?),
        Box::new(Continuous::new("scale", 0.0, 1.0)?),
        Box::new(Continuous::new("c0", 0.0, 1.0)?),
        Box::new(Continuous::constant("c1", 1.0)?),
        Box::new(Continuous::constant("c2", 1.0)?),
    ])?;
    let generator = generate_with(
        base,
        shapes.len(),
        Arc::new(table),
        GenerateConfig::default(),
    )?;

    let mut rng = StdRng::seed_from_u64(1);
    print_scene("scene from RON table", &generator.generate(&mut rng)?);

    // The built-in presets can be exported as a starting point for tuning.
    let exported = ron::ser::to_string_pretty(
        &ShapeParamTable::corner_biased(),
        ron::ser::PrettyConfig::default(),
    )?;
    println!("corner-biased preset has {} bytes of RON", exported.len());

    Ok(())
}
