//! Random paint order.
//!
//! Sprites are layered in batch order, so a [`crate::generator::Chain`] always paints
//! later generators on top. Wrapping the chain in [`Shuffle`] decouples which sprites
//! exist from which occludes which; generators kept outside the shuffle keep a fixed
//! layer (e.g. an always-foreground agent chained after the shuffled rest).
use std::fmt;

use rand::RngCore;

use crate::error::Result;
use crate::generator::SpriteGenerator;
use crate::rng::shuffle_in_place;
use crate::sprite::Sprite;

/// Returns the inner generator's batch as a uniformly random permutation.
pub struct Shuffle {
    inner: Box<dyn SpriteGenerator>,
}

impl Shuffle {
    pub fn new(inner: Box<dyn SpriteGenerator>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Shuffle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffle").finish_non_exhaustive()
    }
}

impl SpriteGenerator for Shuffle {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        let mut sprites = self.inner.generate(rng)?;
        shuffle_in_place(&mut sprites, rng);
        Ok(sprites)
    }
}
