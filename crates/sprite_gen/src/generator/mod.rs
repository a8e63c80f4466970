//! Sprite generators and the combinators that compose them.
//!
//! A generator is anything implementing [`SpriteGenerator`]: a repeatable operation that
//! returns an ordered batch of sprites, drawing all randomness from the RNG it is given.
//! Batch order is paint order, back to front.
//!
//! Building blocks:
//! - [`generate`] / [`generate_with`]: sample sprites from a factor distribution with
//!   shape-conditioned resampling ([`ConditionedGenerator`]).
//! - [`chain`]: concatenate the outputs of several generators ("AND").
//! - [`sample_one_of`]: run exactly one generator, picked by weight ("OR").
//! - [`shuffle_order`]: randomize the paint order of a generator's output.
use std::sync::Arc;

use rand::RngCore;

use crate::error::Result;
use crate::factor::FactorDistribution;
use crate::shape_params::ShapeParamTable;
use crate::sprite::Sprite;

pub mod chain;
pub mod conditioned;
pub mod count;
pub mod one_of;
pub mod shuffle;

pub use chain::Chain;
pub use conditioned::{ConditionedGenerator, GenerateConfig, ShapePolicy};
pub use count::SpriteCount;
pub use one_of::OneOf;
pub use shuffle::Shuffle;

/// Trait for sprite generators.
pub trait SpriteGenerator: Send + Sync {
    /// Produce one batch of sprites.
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>>;

    /// Box this generator for use in heterogeneous combinators.
    fn boxed(self) -> Box<dyn SpriteGenerator>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<G: SpriteGenerator + ?Sized> SpriteGenerator for Box<G> {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        (**self).generate(rng)
    }
}

impl<G: SpriteGenerator + ?Sized> SpriteGenerator for Arc<G> {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        (**self).generate(rng)
    }
}

/// A generator that forwards to a user-provided closure.
pub struct FnGenerator<F>
where
    F: Fn(&mut dyn RngCore) -> Result<Vec<Sprite>> + Send + Sync,
{
    f: F,
}

impl<F> FnGenerator<F>
where
    F: Fn(&mut dyn RngCore) -> Result<Vec<Sprite>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> SpriteGenerator for FnGenerator<F>
where
    F: Fn(&mut dyn RngCore) -> Result<Vec<Sprite>> + Send + Sync,
{
    #[inline]
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        (self.f)(rng)
    }
}

/// Generator over `distribution` with the default table ([`ShapeParamTable::fitted`]) and
/// default config (unique shapes per batch).
pub fn generate<D>(distribution: D, count: impl Into<SpriteCount>) -> Result<ConditionedGenerator>
where
    D: FactorDistribution + 'static,
{
    ConditionedGenerator::new(
        Box::new(distribution),
        count.into(),
        Arc::new(ShapeParamTable::fitted()),
        GenerateConfig::default(),
    )
}

/// Generator over `distribution` with an explicit table and config.
pub fn generate_with<D>(
    distribution: D,
    count: impl Into<SpriteCount>,
    table: Arc<ShapeParamTable>,
    config: GenerateConfig,
) -> Result<ConditionedGenerator>
where
    D: FactorDistribution + 'static,
{
    ConditionedGenerator::new(Box::new(distribution), count.into(), table, config)
}

/// Concatenate the outputs of `generators`, in order.
pub fn chain(generators: Vec<Box<dyn SpriteGenerator>>) -> Chain {
    Chain::new(generators)
}

/// Run exactly one of `generators`, chosen with probability `weights` (uniform if `None`).
pub fn sample_one_of(
    generators: Vec<Box<dyn SpriteGenerator>>,
    weights: Option<Vec<f64>>,
) -> Result<OneOf> {
    OneOf::new(generators, weights)
}

/// Return `generator`'s output in uniformly random order.
pub fn shuffle_order<G: SpriteGenerator + 'static>(generator: G) -> Shuffle {
    Shuffle::new(Box::new(generator))
}
