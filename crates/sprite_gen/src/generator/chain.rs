//! Concatenation of generator outputs.
use std::fmt;

use rand::RngCore;
use tracing::{debug, warn};

use crate::error::Result;
use crate::generator::SpriteGenerator;
use crate::sprite::Sprite;

/// Runs every generator in order and concatenates their batches.
///
/// Use this instead of a [`crate::factor::Mixture`] when each mode of a multi-modal
/// scene must contribute at least one sprite.
pub struct Chain {
    generators: Vec<Box<dyn SpriteGenerator>>,
}

impl Chain {
    pub fn new(generators: Vec<Box<dyn SpriteGenerator>>) -> Self {
        if generators.is_empty() {
            warn!("Chain has no generators; it will always produce an empty batch.");
        }
        Self { generators }
    }

    /// Append a generator (builder-style).
    pub fn with<G: SpriteGenerator + 'static>(mut self, generator: G) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("generators", &self.generators.len())
            .finish()
    }
}

impl SpriteGenerator for Chain {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        let mut out = Vec::new();
        for generator in &self.generators {
            out.extend(generator.generate(rng)?);
        }
        debug!(
            generators = self.generators.len(),
            sprites = out.len(),
            "chained batch"
        );
        Ok(out)
    }
}
