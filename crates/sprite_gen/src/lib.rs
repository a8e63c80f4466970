#![forbid(unsafe_code)]
//! sprite_gen: Composable sprite generators over factor distributions.
//!
//! Modules:
//! - factor: factor distributions (continuous, discrete, beta, product, mixture)
//! - sprite: sprite value objects and the factory that builds them from factor mappings
//! - shape_params: per-shape Beta parameters for shape-conditioned resampling
//! - generator: the generator trait plus `generate`, `chain`, `sample_one_of`, `shuffle_order`
//!
//! For examples, see the `sprite_gen_examples` crate.
pub mod error;
pub mod factor;
pub mod generator;
pub mod rng;
pub mod shape_params;
pub mod sprite;

/// Convenient re-exports for common types. Import with `use sprite_gen::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::factor::{
        shape_support, Beta, Continuous, Discrete, FactorDistribution, FactorKey, FactorMapping,
        FactorValue, Mixture, Product,
    };
    pub use crate::generator::{
        chain, generate, generate_with, sample_one_of, shuffle_order, Chain,
        ConditionedGenerator, FnGenerator, GenerateConfig, OneOf, ShapePolicy, Shuffle,
        SpriteCount, SpriteGenerator,
    };
    pub use crate::rng::seed_for_branch;
    pub use crate::shape_params::{BetaParams, ShapeParamTable, ShapeParams};
    pub use crate::sprite::{Shape, Sprite};
}
