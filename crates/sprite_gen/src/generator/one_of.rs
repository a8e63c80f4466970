//! Weighted choice between whole generators.
use std::fmt;

use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::generator::SpriteGenerator;
use crate::rng::pick_categorical;
use crate::sprite::Sprite;

/// Allowed deviation of the weight sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Runs exactly one generator per call, chosen with categorical probability `weights`.
///
/// This picks once per batch, so a mode can produce several correlated sprites; a
/// [`crate::factor::Mixture`] picks once per sprite.
pub struct OneOf {
    generators: Vec<Box<dyn SpriteGenerator>>,
    weights: Vec<f64>,
}

impl OneOf {
    /// Create the alternation. `weights` defaults to uniform and is validated here,
    /// before any sampling.
    pub fn new(generators: Vec<Box<dyn SpriteGenerator>>, weights: Option<Vec<f64>>) -> Result<Self> {
        if generators.is_empty() {
            return Err(Error::InvalidWeights(
                "at least one generator is required".into(),
            ));
        }

        let weights = match weights {
            Some(w) => {
                validate_weights(&w, generators.len())?;
                w
            }
            None => vec![1.0 / generators.len() as f64; generators.len()],
        };

        Ok(Self {
            generators,
            weights,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of alternatives; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.generators.len()
    }
}

fn validate_weights(weights: &[f64], expected_len: usize) -> Result<()> {
    if weights.len() != expected_len {
        return Err(Error::InvalidWeights(format!(
            "expected {expected_len} weights, got {}",
            weights.len()
        )));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidWeights(format!(
            "weights must be finite and >= 0, got {w}"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(Error::InvalidWeights(format!(
            "weights must sum to 1, got {sum}"
        )));
    }

    Ok(())
}

impl fmt::Debug for OneOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf")
            .field("generators", &self.generators.len())
            .field("weights", &self.weights)
            .finish()
    }
}

impl SpriteGenerator for OneOf {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        let index = pick_categorical(&self.weights, rng);
        debug!(index, "sampled generator");
        self.generators[index].generate(rng)
    }
}
