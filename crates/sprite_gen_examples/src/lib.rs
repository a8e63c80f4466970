#![forbid(unsafe_code)]

mod report;

pub use report::{format_sprite, init_tracing, print_scene, shape_histogram};
