//! Product of independent factor distributions.
use std::collections::BTreeSet;
use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::factor::{FactorDistribution, FactorKey, FactorMapping, FactorValue};

/// Samples every component independently and unions the resulting mappings.
///
/// Component key sets must be disjoint.
pub struct Product {
    components: Vec<Box<dyn FactorDistribution>>,
}

impl Product {
    /// Create a product from boxed components.
    pub fn new(components: Vec<Box<dyn FactorDistribution>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for component in &components {
            for key in component.keys() {
                if !seen.insert(key.clone()) {
                    return Err(Error::InvalidConfig(format!(
                        "product: factor '{key}' is produced by more than one component"
                    )));
                }
            }
        }

        Ok(Self { components })
    }

    /// Append a component (builder-style).
    pub fn with<D: FactorDistribution + 'static>(self, component: D) -> Result<Self> {
        let mut components = self.components;
        components.push(Box::new(component));
        Self::new(components)
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the product has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Product")
            .field("keys", &self.keys())
            .finish()
    }
}

impl FactorDistribution for Product {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
        let mut out = FactorMapping::new();
        for component in &self.components {
            out.extend(component.sample(rng)?);
        }
        Ok(out)
    }

    fn keys(&self) -> Vec<FactorKey> {
        self.components.iter().flat_map(|c| c.keys()).collect()
    }

    fn categories(&self, key: &str) -> Option<Vec<FactorValue>> {
        self.components
            .iter()
            .find(|c| c.keys().iter().any(|k| k == key))
            .and_then(|c| c.categories(key))
    }
}
