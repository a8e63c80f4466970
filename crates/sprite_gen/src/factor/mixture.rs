//! Per-draw mixture of factor distributions.
//!
//! Unlike [`crate::generator::sample_one_of`], which picks one generator per batch, a
//! mixture picks a component independently for every single draw.
use std::collections::BTreeSet;
use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::factor::{validate_probs, FactorDistribution, FactorKey, FactorMapping, FactorValue};
use crate::rng::{pick_categorical, rand_index};

/// Weighted mixture. All components must produce the same factor keys.
pub struct Mixture {
    components: Vec<Box<dyn FactorDistribution>>,
    probs: Option<Vec<f64>>,
}

impl Mixture {
    /// Create a mixture. `probs` defaults to uniform.
    pub fn new(components: Vec<Box<dyn FactorDistribution>>, probs: Option<Vec<f64>>) -> Result<Self> {
        let Some(first) = components.first() else {
            return Err(Error::InvalidConfig(
                "mixture: components must not be empty".into(),
            ));
        };

        let expected: BTreeSet<FactorKey> = first.keys().into_iter().collect();
        for (i, component) in components.iter().enumerate().skip(1) {
            let keys: BTreeSet<FactorKey> = component.keys().into_iter().collect();
            if keys != expected {
                return Err(Error::InvalidConfig(format!(
                    "mixture: component {i} has keys {keys:?}, expected {expected:?}"
                )));
            }
        }

        if let Some(p) = &probs {
            validate_probs(p, components.len(), "mixture")?;
        }

        Ok(Self { components, probs })
    }

    fn is_active(&self, index: usize) -> bool {
        self.probs.as_ref().is_none_or(|p| p[index] > 0.0)
    }
}

impl fmt::Debug for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixture")
            .field("components", &self.components.len())
            .field("probs", &self.probs)
            .finish()
    }
}

impl FactorDistribution for Mixture {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        let idx = match &self.probs {
            Some(p) => pick_categorical(p, rng),
            None => rand_index(rng, self.components.len()),
        };
        self.components[idx].sample(rng)
    }

    fn keys(&self) -> Vec<FactorKey> {
        self.components[0].keys()
    }

    fn categories(&self, key: &str) -> Option<Vec<FactorValue>> {
        let mut out = Vec::new();
        for (i, component) in self.components.iter().enumerate() {
            if !self.is_active(i) {
                continue;
            }
            for value in component.categories(key)? {
                if !out.contains(&value) {
                    out.push(value);
                }
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::factor::{Continuous, Discrete};

    fn shape_only(names: &[&str]) -> Box<dyn FactorDistribution> {
        Box::new(Discrete::new("shape", names.iter().copied()).unwrap())
    }

    #[test]
    fn rejects_empty_and_mismatched_components() {
        assert!(Mixture::new(Vec::new(), None).is_err());

        let result = Mixture::new(
            vec![
                shape_only(&["square"]),
                Box::new(Continuous::new("x", 0.0, 1.0).unwrap()),
            ],
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn categories_union_active_components() {
        let m = Mixture::new(
            vec![
                shape_only(&["square", "triangle"]),
                shape_only(&["triangle", "star_4"]),
                shape_only(&["circle"]),
            ],
            Some(vec![0.5, 0.5, 0.0]),
        )
        .unwrap();

        let cats = m.categories("shape").unwrap();
        assert_eq!(
            cats,
            vec![
                FactorValue::from("square"),
                FactorValue::from("triangle"),
                FactorValue::from("star_4"),
            ]
        );
    }

    #[test]
    fn zero_weight_component_is_never_sampled() {
        let m = Mixture::new(
            vec![shape_only(&["square"]), shape_only(&["circle"])],
            Some(vec![1.0, 0.0]),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let s = m.sample(&mut rng).unwrap();
            assert_eq!(s["shape"].as_category(), Some("square"));
        }
    }
}
