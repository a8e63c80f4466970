use rand::SeedableRng;
use rand::rngs::StdRng;
use sprite_gen::prelude::*;
use sprite_gen_examples::{init_tracing, print_scene};

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

    let polygons = generate(
        base(&[Shape::Triangle, Shape::Pentagon, Shape::Hexagon])?,
        SpriteCount::uniform(1, 3),
    )?;
    let spokes = generate(base(&[Shape::Spoke4, Shape::Spoke5, Shape::Spoke6])?, 2usize)?;

    // Obstacles in random paint order, agent always in front.
    let obstacles = shuffle_order(chain(vec![polygons.boxed(), spokes.boxed()]));
    let agent = generate(base(&[Shape::Square])?, 1usize)?;
    let scene = chain(vec![obstacles.boxed(), agent.boxed()]);

    for branch in 0..3u64 {
        let mut rng = StdRng::seed_from_u64(seed_for_branch(7, branch));
        let sprites = scene.generate(&mut rng)?;
        print_scene(&format!("scene {branch}"), &sprites);
    }

    Ok(())
}
