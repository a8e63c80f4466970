//! Factor distributions: samplers that produce one named-factor mapping per draw.
//!
//! A [`FactorDistribution`] is the leaf capability of the generator algebra. Each draw
//! returns a fresh [`FactorMapping`] which is then consumed by
//! [`crate::sprite::Sprite::from_factors`]. Composite distributions ([`Product`],
//! [`Mixture`]) combine leaves into a full sprite description.
use std::collections::BTreeMap;
use std::fmt;

use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sprite::Shape;

pub mod beta;
pub mod continuous;
pub mod discrete;
pub mod mixture;
pub mod product;

pub use beta::Beta;
pub use continuous::Continuous;
pub use discrete::Discrete;
pub use mixture::Mixture;
pub use product::Product;

/// Name of a factor (`"x"`, `"shape"`, `"c0"`, ...).
pub type FactorKey = String;

/// Mapping from factor name to sampled value. Ordered so that debug output is stable.
pub type FactorMapping = BTreeMap<FactorKey, FactorValue>;

/// A single sampled factor value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum FactorValue {
    Number(f64),
    Category(String),
}

impl FactorValue {
    /// Numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FactorValue::Number(v) => Some(*v),
            FactorValue::Category(_) => None,
        }
    }

    /// Categorical payload, if this is a category.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            FactorValue::Number(_) => None,
            FactorValue::Category(c) => Some(c),
        }
    }
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorValue::Number(v) => write!(f, "{v}"),
            FactorValue::Category(c) => f.write_str(c),
        }
    }
}

impl From<f64> for FactorValue {
    fn from(value: f64) -> Self {
        FactorValue::Number(value)
    }
}

impl From<&str> for FactorValue {
    fn from(value: &str) -> Self {
        FactorValue::Category(value.to_owned())
    }
}

impl From<String> for FactorValue {
    fn from(value: String) -> Self {
        FactorValue::Category(value)
    }
}

impl From<Shape> for FactorValue {
    fn from(value: Shape) -> Self {
        FactorValue::Category(value.name().to_owned())
    }
}

/// Trait for factor distributions.
pub trait FactorDistribution: Send + Sync {
    /// Draw one factor mapping.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping>;

    /// Factor names produced by every draw.
    fn keys(&self) -> Vec<FactorKey>;

    /// Finite support of factor `key`, if this distribution can enumerate it.
    ///
    /// Returns `None` for continuous factors, for keys this distribution does not
    /// produce, and when the support cannot be determined.
    fn categories(&self, _key: &str) -> Option<Vec<FactorValue>> {
        None
    }
}

impl<D: FactorDistribution + ?Sized> FactorDistribution for Box<D> {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        (**self).sample(rng)
    }

    fn keys(&self) -> Vec<FactorKey> {
        (**self).keys()
    }

    fn categories(&self, key: &str) -> Option<Vec<FactorValue>> {
        (**self).categories(key)
    }
}

impl<D: FactorDistribution + ?Sized> FactorDistribution for std::sync::Arc<D> {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        (**self).sample(rng)
    }

    fn keys(&self) -> Vec<FactorKey> {
        (**self).keys()
    }

    fn categories(&self, key: &str) -> Option<Vec<FactorValue>> {
        (**self).categories(key)
    }
}

/// Distinct shapes a distribution can emit for the `shape` factor, if enumerable.
///
/// Category names that are not valid shapes are ignored here; they fail later in
/// the sprite factory.
pub fn shape_support(distribution: &dyn FactorDistribution) -> Option<Vec<Shape>> {
    let values = distribution.categories(crate::sprite::keys::SHAPE)?;
    let mut shapes: Vec<Shape> = values
        .iter()
        .filter_map(|v| v.as_category())
        .filter_map(|name| name.parse().ok())
        .collect();
    shapes.sort();
    shapes.dedup();
    Some(shapes)
}

pub(crate) fn validate_probs(probs: &[f64], expected_len: usize, what: &str) -> Result<()> {
    if probs.len() != expected_len {
        return Err(Error::InvalidConfig(format!(
            "{what}: expected {expected_len} probabilities, got {}",
            probs.len()
        )));
    }
    if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(Error::InvalidConfig(format!(
            "{what}: probabilities must be finite and >= 0"
        )));
    }
    if probs.iter().sum::<f64>() <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{what}: probabilities must not all be zero"
        )));
    }

    Ok(())
}
