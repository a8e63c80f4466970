//! Beta-distributed factor on `[0, 1]`.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::factor::{FactorDistribution, FactorKey, FactorMapping, FactorValue};
use crate::rng::rand01;

/// Beta(`alpha`, `beta`) distribution.
#[derive(Debug, Clone)]
pub struct Beta {
    key: FactorKey,
    alpha: f64,
    beta: f64,
}

impl Beta {
    pub fn new(key: impl Into<FactorKey>, alpha: f64, beta: f64) -> Result<Self> {
        let key = key.into();
        if !(alpha.is_finite() && alpha > 0.0 && beta.is_finite() && beta > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "beta '{key}': parameters must be finite and > 0 (got {alpha}, {beta})"
            )));
        }

        Ok(Self { key, alpha, beta })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// First shape parameter, > 0.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Second shape parameter, > 0.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

impl FactorDistribution for Beta {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        let mut out = FactorMapping::new();
        out.insert(
            self.key.clone(),
            FactorValue::Number(sample_beta(self.alpha, self.beta, rng)),
        );
        Ok(out)
    }

    fn keys(&self) -> Vec<FactorKey> {
        vec![self.key.clone()]
    }
}

/// Beta variate as `X / (X + Y)` with `X ~ Gamma(alpha)`, `Y ~ Gamma(beta)`.
pub(crate) fn sample_beta(alpha: f64, beta: f64, rng: &mut dyn RngCore) -> f64 {
    let x = sample_gamma(alpha, rng);
    let y = sample_gamma(beta, rng);
    let sum = x + y;
    if sum <= 0.0 || !sum.is_finite() {
        // Both draws underflowed; fall back to the mean.
        return alpha / (alpha + beta);
    }
    (x / sum).clamp(0.0, 1.0)
}

/// Gamma(shape, 1) variate (Marsaglia–Tsang).
fn sample_gamma(shape: f64, rng: &mut dyn RngCore) -> f64 {
    if shape < 1.0 {
        // Boost: Gamma(a) = Gamma(a + 1) * U^(1/a).
        let u = (1.0 - rand01(rng)).max(f64::MIN_POSITIVE);
        return sample_gamma(shape + 1.0, rng) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let (z, _) = box_muller_pair(rng);
        let v = 1.0 + c * z;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = rand01(rng);
        if u < 1.0 - 0.0331 * z * z * z * z {
            return d * v;
        }
        if u.max(f64::MIN_POSITIVE).ln() < 0.5 * z * z + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

fn box_muller_pair(rng: &mut dyn RngCore) -> (f64, f64) {
    let u1 = (1.0 - rand01(rng)).clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * core::f64::consts::PI * u2;

    (r * theta.cos(), r * theta.sin())
}
