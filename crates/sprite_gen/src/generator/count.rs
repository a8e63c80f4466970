//! Batch sizes for [`crate::generator::ConditionedGenerator`].
use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::rng::rand_index;

type CountFn = dyn Fn(&mut dyn RngCore) -> usize + Send + Sync;

/// Number of sprites produced per call: fixed, or re-evaluated on every call.
#[derive(Clone)]
pub enum SpriteCount {
    Fixed(usize),
    Dynamic(Arc<CountFn>),
}

impl SpriteCount {
    /// Count computed by `f` on every call.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> usize + Send + Sync + 'static,
    {
        SpriteCount::Dynamic(Arc::new(f))
    }

    /// Count drawn uniformly from `min..=max` on every call.
    ///
    /// Bounds are swapped if given in the wrong order.
    pub fn uniform(min: usize, max: usize) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo == hi {
            return SpriteCount::Fixed(lo);
        }
        Self::from_fn(move |rng| lo + rand_index(rng, hi - lo + 1))
    }

    /// Resolve the count for one call.
    pub fn resolve(&self, rng: &mut dyn RngCore) -> usize {
        match self {
            SpriteCount::Fixed(n) => *n,
            SpriteCount::Dynamic(f) => f(rng),
        }
    }

    /// The count if it is known without sampling.
    pub fn fixed(&self) -> Option<usize> {
        match self {
            SpriteCount::Fixed(n) => Some(*n),
            SpriteCount::Dynamic(_) => None,
        }
    }
}

impl Default for SpriteCount {
    fn default() -> Self {
        SpriteCount::Fixed(1)
    }
}

impl From<usize> for SpriteCount {
    fn from(value: usize) -> Self {
        SpriteCount::Fixed(value)
    }
}

impl fmt::Debug for SpriteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteCount::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            SpriteCount::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
