use std::time::Duration;

use criterion::{Criterion, Throughput};
use sprite_gen::prelude::*;

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn sprites_throughput(sprites: usize) -> Throughput {
    Throughput::Elements(sprites.max(1) as u64)
}

/// Base distribution over `shapes` with uniform position, scale and hue.
#[allow(dead_code)]
pub fn base_distribution(shapes: &[Shape]) -> Product {
    Product::new(vec![
        Box::new(Continuous::new("x", 0.0, 1.0).unwrap()),
        Box::new(Continuous::new("y", 0.0, 1.0).unwrap()),
        Box::new(Discrete::new("shape", shapes.iter().copied()).unwrap()),
        Box::new(Continuous::new("scale", 0.1, 0.3).unwrap()),
        Box::new(Continuous::new("c0", 0.0, 1.0).unwrap()),
        Box::new(Continuous::constant("c1", 1.0).unwrap()),
        Box::new(Continuous::constant("c2", 1.0).unwrap()),
    ])
    .unwrap()
}
