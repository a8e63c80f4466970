//! Uniform continuous factor.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::factor::{FactorDistribution, FactorKey, FactorMapping, FactorValue};
use crate::rng::rand01;

/// Uniform distribution over `[min, max)`. `min == max` yields a constant.
#[derive(Debug, Clone)]
pub struct Continuous {
    key: FactorKey,
    min: f64,
    max: f64,
}

impl Continuous {
    pub fn new(key: impl Into<FactorKey>, min: f64, max: f64) -> Result<Self> {
        let key = key.into();
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "continuous '{key}': bounds must be finite"
            )));
        }
        if min > max {
            return Err(Error::InvalidConfig(format!(
                "continuous '{key}': min {min} exceeds max {max}"
            )));
        }

        Ok(Self { key, min, max })
    }

    /// A factor that always takes `value`.
    pub fn constant(key: impl Into<FactorKey>, value: f64) -> Result<Self> {
        Self::new(key, value, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Exclusive upper bound (inclusive when equal to `min`).
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl FactorDistribution for Continuous {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        let v = if self.min == self.max {
            self.min
        } else {
            self.min + rand01(rng) * (self.max - self.min)
        };

        let mut out = FactorMapping::new();
        out.insert(self.key.clone(), FactorValue::Number(v));
        Ok(out)
    }

    fn keys(&self) -> Vec<FactorKey> {
        vec![self.key.clone()]
    }
}
