//! Categorical factor over a finite candidate list.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::factor::{validate_probs, FactorDistribution, FactorKey, FactorMapping, FactorValue};
use crate::rng::{pick_categorical, rand_index};

/// Discrete distribution over `candidates`, uniform unless `probs` is given.
#[derive(Debug, Clone)]
pub struct Discrete {
    key: FactorKey,
    candidates: Vec<FactorValue>,
    /// Normalized on use.
    probs: Option<Vec<f64>>,
}

impl Discrete {
    /// Uniform choice among `candidates`.
    pub fn new<I, V>(key: impl Into<FactorKey>, candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<FactorValue>,
    {
        let key = key.into();
        let candidates: Vec<FactorValue> = candidates.into_iter().map(Into::into).collect();
        if candidates.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "discrete '{key}': candidates must not be empty"
            )));
        }

        Ok(Self {
            key,
            candidates,
            probs: None,
        })
    }

    /// Weighted choice among `candidates`.
    pub fn weighted<I, V>(key: impl Into<FactorKey>, candidates: I, probs: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<FactorValue>,
    {
        let mut d = Self::new(key, candidates)?;
        validate_probs(&probs, d.candidates.len(), &format!("discrete '{}'", d.key))?;
        d.probs = Some(probs);
        Ok(d)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Possible values, in construction order.
    pub fn candidates(&self) -> &[FactorValue] {
        &self.candidates
    }

    /// Per-candidate weights, or `None` for uniform.
    pub fn probs(&self) -> Option<&[f64]> {
        self.probs.as_deref()
    }
}

impl FactorDistribution for Discrete {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        let idx = match &self.probs {
            Some(probs) => pick_categorical(probs, rng),
            None => rand_index(rng, self.candidates.len()),
        };

        let mut out = FactorMapping::new();
        out.insert(self.key.clone(), self.candidates[idx].clone());
        Ok(out)
    }

    fn keys(&self) -> Vec<FactorKey> {
        vec![self.key.clone()]
    }

    fn categories(&self, key: &str) -> Option<Vec<FactorValue>> {
        if key != self.key {
            return None;
        }

        let values = match &self.probs {
            Some(probs) => self
                .candidates
                .iter()
                .zip(probs)
                .filter(|(_, p)| **p > 0.0)
                .map(|(c, _)| c.clone())
                .collect(),
            None => self.candidates.clone(),
        };
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_candidates_are_rejected() {
        let empty: [&str; 0] = [];
        assert!(Discrete::new("shape", empty).is_err());
    }

    #[test]
    fn weighted_validates_probabilities() {
        assert!(Discrete::weighted("shape", ["a", "b"], vec![1.0]).is_err());
        assert!(Discrete::weighted("shape", ["a", "b"], vec![-1.0, 2.0]).is_err());
        assert!(Discrete::weighted("shape", ["a", "b"], vec![0.3, 0.7]).is_ok());
    }

    #[test]
    fn draws_only_candidates() {
        let d = Discrete::new("shape", ["square", "triangle"]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let m = d.sample(&mut rng).unwrap();
            seen.insert(m["shape"].as_category().unwrap().to_owned());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn zero_weight_candidates_are_never_drawn_or_reported() {
        let d = Discrete::weighted("shape", ["square", "circle"], vec![1.0, 0.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let m = d.sample(&mut rng).unwrap();
            assert_eq!(m["shape"].as_category(), Some("square"));
        }
        assert_eq!(
            d.categories("shape"),
            Some(vec![FactorValue::from("square")])
        );
        assert!(d.categories("x").is_none());
    }

    #[test]
    fn accessors_expose_validated_state() {
        let d = Discrete::weighted("shape", ["square", "star_4"], vec![0.25, 0.75]).unwrap();
        assert_eq!(d.key(), "shape");
        assert_eq!(d.candidates().len(), 2);
        assert_eq!(d.probs(), Some(&[0.25, 0.75][..]));
        assert!(Discrete::new("shape", ["square"]).unwrap().probs().is_none());
    }

    #[test]
    fn numeric_candidates_are_supported() {
        let d = Discrete::new("scale", [0.1, 0.2]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let v = d.sample(&mut rng).unwrap()["scale"].as_number().unwrap();
        assert!(v == 0.1 || v == 0.2);
    }
}
