use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sprite_gen::prelude::*;
use sprite_gen_examples::{init_tracing, shape_histogram};

fn base(shapes: &[Shape]) -> Result<Product> {
    Product::new(vec![
        Box::new(Continuous::new("x", 0.0, 1.0)?),
        Box::new(Continuous::new("y", 0.0, 1.0)?),
        Box::new(Discrete::new("shape", shapes.iter().copied())?),
        Box::new(Continuous::new("scale", 0.1, 0.3)?),
        Box::new(Continuous::new("c0", 0.0, 1.0)?),
        Box::new(Continuous::constant("c1", 1.0)?),
        Box::new(Continuous::constant("c2", 1.0)?),
    ])
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let table = Arc::new(ShapeParamTable::corner_biased());
    let config = GenerateConfig::default();
    let stars = &[Shape::Star4, Shape::Star5, Shape::Star6];
    let spokes = &[Shape::Spoke4, Shape::Spoke5, Shape::Spoke6];

    // Either a full set of stars or a full set of spokes, never a mix.
    let scene = sample_one_of(
        vec![
            generate_with(base(stars)?, 3usize, table.clone(), config.clone())?.boxed(),
            generate_with(base(spokes)?, 3usize, table, config)?.boxed(),
        ],
        Some(vec![0.7, 0.3]),
    )?;

    let mut rng = StdRng::seed_from_u64(99);
    let scenes = (0..1_000)
        .map(|_| scene.generate(&mut rng))
        .collect::<Result<Vec<_>>>()?;

    let mixed = scenes
        .iter()
        .filter(|s| {
            let star = s.iter().any(|p| stars.contains(&p.shape()));
            let spoke = s.iter().any(|p| spokes.contains(&p.shape()));
            star && spoke
        })
        .count();
    println!("scenes mixing stars and spokes: {mixed}");

    for (shape, count) in shape_histogram(&scenes) {
        println!("{:<8} {count}", shape.name());
    }

    Ok(())
}
