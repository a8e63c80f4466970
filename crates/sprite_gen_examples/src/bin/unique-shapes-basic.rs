use rand::SeedableRng;
use rand::rngs::StdRng;
use sprite_gen::prelude::*;
use sprite_gen_examples::{init_tracing, print_scene};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Square and triangle with equal probability; two sprites per scene, distinct shapes.
    let base = Product::new(vec![
        Box::new(Continuous::new("x", 0.1, 0.9)?),
        Box::new(Continuous::new("y", 0.1, 0.9)?),
        Box::new(Discrete::weighted(
            "shape",
            [Shape::Square, Shape::Triangle],
            vec![0.5, 0.5],
        )?),
        Box::new(Continuous::new("scale", 0.1, 0.3)?),
        Box::new(Continuous::new("c0", 0.0, 1.0)?),
        Box::new(Continuous::constant("c1", 1.0)?),
        Box::new(Continuous::constant("c2", 1.0)?),
    ])?;
    let generator = generate(base, 2usize)?;

    let mut rng = StdRng::seed_from_u64(2025);
    for scene in 0..3 {
        let sprites = generator.generate(&mut rng)?;
        print_scene(&format!("scene {scene}"), &sprites);
    }

    // A third sprite cannot have a new shape; this is rejected instead of looping forever.
    let base = Discrete::new("shape", [Shape::Square, Shape::Triangle])?;
    match generate(base, 3usize) {
        Err(err) => println!("three unique sprites from two shapes: {err}"),
        Ok(_) => anyhow::bail!("expected a capacity error"),
    }

    Ok(())
}
