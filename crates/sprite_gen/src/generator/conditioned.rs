//! Two-stage sprite sampling: pick a shape from the base distribution, then redraw the
//! continuous factors from a distribution specialized for that shape.
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::factor::{shape_support, FactorDistribution};
use crate::generator::{SpriteCount, SpriteGenerator};
use crate::shape_params::ShapeParamTable;
use crate::sprite::{Shape, Sprite};

/// Whether a batch may contain the same shape more than once.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapePolicy {
    /// Redraw until every sprite in the batch has a distinct shape.
    #[default]
    Unique,
    /// Accept the first shape drawn.
    AllowDuplicates,
}

/// Configuration for [`ConditionedGenerator`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Shape uniqueness within one batch.
    pub policy: ShapePolicy,
    /// Upper bound on consecutive rejected draws for one sprite. Covers shapes whose
    /// support is unknown as well as shapes listed with a weight too small to ever be
    /// drawn.
    pub max_rejections: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            policy: ShapePolicy::Unique,
            max_rejections: 10_000,
        }
    }
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shape policy.
    pub fn with_policy(mut self, policy: ShapePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the rejection bound.
    pub fn with_max_rejections(mut self, max_rejections: usize) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_rejections == 0 {
            return Err(Error::InvalidConfig("max_rejections must be > 0".into()));
        }
        Ok(())
    }
}

/// Generator built by [`crate::generator::generate`].
///
/// Each call produces exactly `count` sprites. For every sprite a factor mapping is
/// drawn from the base distribution only to decide the shape; with
/// [`ShapePolicy::Unique`] shapes already used in the batch are redrawn. The final
/// sprite comes from [`ShapeParamTable::conditioned_distribution`] for that shape.
pub struct ConditionedGenerator {
    distribution: Box<dyn FactorDistribution>,
    count: SpriteCount,
    table: Arc<ShapeParamTable>,
    config: GenerateConfig,
    /// Shapes the base distribution can emit, when enumerable.
    support: Option<Vec<Shape>>,
}

impl ConditionedGenerator {
    /// Create a generator, checking everything that can be checked before sampling.
    pub fn new(
        distribution: Box<dyn FactorDistribution>,
        count: SpriteCount,
        table: Arc<ShapeParamTable>,
        config: GenerateConfig,
    ) -> Result<Self> {
        config.validate()?;
        table.validate()?;

        let support = shape_support(distribution.as_ref());
        let generator = Self {
            distribution,
            count,
            table,
            config,
            support,
        };
        generator.check_table_coverage()?;
        if let Some(n) = generator.count.fixed() {
            generator.check_capacity(n)?;
        }

        Ok(generator)
    }

    /// Replace the shape parameter table.
    pub fn with_table(mut self, table: Arc<ShapeParamTable>) -> Result<Self> {
        table.validate()?;
        self.table = table;
        self.check_table_coverage()?;
        Ok(self)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: GenerateConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        if let Some(n) = self.count.fixed() {
            self.check_capacity(n)?;
        }
        Ok(self)
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    pub fn table(&self) -> &ShapeParamTable {
        &self.table
    }

    /// Shapes the base distribution can emit, if known.
    pub fn support(&self) -> Option<&[Shape]> {
        self.support.as_deref()
    }

    fn check_table_coverage(&self) -> Result<()> {
        if let Some(support) = &self.support {
            if let Some(&shape) = support.iter().find(|s| !self.table.contains(**s)) {
                return Err(Error::MissingShapeParams { shape });
            }
        }
        Ok(())
    }

    fn check_capacity(&self, requested: usize) -> Result<()> {
        if self.config.policy != ShapePolicy::Unique {
            return Ok(());
        }
        match &self.support {
            Some(support) if requested > support.len() => Err(Error::Capacity {
                requested,
                available: support.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Stage one: draw from the base distribution until the shape is acceptable.
    fn draw_shape(&self, used: &[Shape], rng: &mut dyn RngCore) -> Result<Shape> {
        let mut rejections = 0usize;
        loop {
            let provisional = Sprite::from_factors(&self.distribution.sample(rng)?)?;
            let shape = provisional.shape();
            if self.config.policy == ShapePolicy::AllowDuplicates || !used.contains(&shape) {
                return Ok(shape);
            }

            rejections += 1;
            trace!(%shape, rejections, "shape already used in batch; redrawing");
            if rejections >= self.config.max_rejections {
                return Err(Error::RejectionLimit {
                    attempts: rejections,
                });
            }
        }
    }
}

impl fmt::Debug for ConditionedGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionedGenerator")
            .field("keys", &self.distribution.keys())
            .field("count", &self.count)
            .field("config", &self.config)
            .field("support", &self.support)
            .finish()
    }
}

impl SpriteGenerator for ConditionedGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<Sprite>> {
        let n = self.count.resolve(rng);
        self.check_capacity(n)?;
        debug!(count = n, policy = ?self.config.policy, "generating sprites");

        let mut used: Vec<Shape> = Vec::with_capacity(n);
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let shape = self.draw_shape(&used, rng)?;
            used.push(shape);

            // Stage two: the stage-one factors are discarded.
            let conditioned = self.table.conditioned_distribution(shape)?;
            out.push(Sprite::from_factors(&conditioned.sample(rng)?)?);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::factor::{Beta, Continuous, Discrete, FactorKey, FactorMapping, FactorValue, Product};
    use crate::shape_params::{BetaParams, ShapeParams};

    fn base(shapes: &[&str]) -> Product {
        Product::new(vec![
            Box::new(Continuous::new("x", 0.1, 0.9).unwrap()),
            Box::new(Continuous::new("y", 0.1, 0.9).unwrap()),
            Box::new(Discrete::new("shape", shapes.iter().copied()).unwrap()),
            Box::new(Continuous::new("scale", 0.1, 0.2).unwrap()),
            Box::new(Beta::new("c0", 2.0, 2.0).unwrap()),
            Box::new(Continuous::new("c1", 0.5, 1.0).unwrap()),
            Box::new(Continuous::new("c2", 0.5, 1.0).unwrap()),
        ])
        .unwrap()
    }

    fn make(shapes: &[&str], count: SpriteCount, policy: ShapePolicy) -> Result<ConditionedGenerator> {
        ConditionedGenerator::new(
            Box::new(base(shapes)),
            count,
            Arc::new(ShapeParamTable::fitted()),
            GenerateConfig::default().with_policy(policy),
        )
    }

    /// Hides the categorical support of the shape factor.
    struct Opaque(Product);

    impl FactorDistribution for Opaque {
        fn sample(&self, rng: &mut dyn RngCore) -> Result<FactorMapping> {
            self.0.sample(rng)
        }

        fn keys(&self) -> Vec<FactorKey> {
            self.0.keys()
        }
    }

    #[test]
    fn produces_exact_count_with_distinct_shapes() {
        let g = make(
            &["square", "triangle", "star_4", "spoke_5", "hexagon"],
            SpriteCount::Fixed(4),
            ShapePolicy::Unique,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let batch = g.generate(&mut rng).unwrap();
            assert_eq!(batch.len(), 4);
            let shapes: HashSet<Shape> = batch.iter().map(|s| s.shape()).collect();
            assert_eq!(shapes.len(), 4);
        }
    }

    #[test]
    fn zero_count_yields_empty_batch() {
        let g = make(&["square"], SpriteCount::Fixed(0), ShapePolicy::Unique).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(g.generate(&mut rng).unwrap().is_empty());
    }

    #[test]
    fn duplicates_allowed_when_requested() {
        let g = make(&["square"], SpriteCount::Fixed(5), ShapePolicy::AllowDuplicates).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let batch = g.generate(&mut rng).unwrap();
        assert_eq!(batch.len(), 5);
        assert!(batch.iter().all(|s| s.shape() == Shape::Square));
    }

    #[test]
    fn fixed_count_over_capacity_fails_at_construction() {
        let err = make(&["square", "triangle"], SpriteCount::Fixed(3), ShapePolicy::Unique).unwrap_err();
        assert!(matches!(
            err,
            Error::Capacity {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn dynamic_count_over_capacity_fails_per_call() {
        let g = make(
            &["square", "triangle"],
            SpriteCount::from_fn(|_| 3),
            ShapePolicy::Unique,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            g.generate(&mut rng),
            Err(Error::Capacity { .. })
        ));
    }

    #[test]
    fn unknown_support_is_bounded_by_rejection_limit() {
        let g = ConditionedGenerator::new(
            Box::new(Opaque(base(&["square"]))),
            SpriteCount::Fixed(2),
            Arc::new(ShapeParamTable::fitted()),
            GenerateConfig::default().with_max_rejections(25),
        )
        .unwrap();
        assert!(g.support().is_none());

        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            g.generate(&mut rng),
            Err(Error::RejectionLimit { attempts: 25 })
        ));
    }

    #[test]
    fn unreachable_listed_shape_is_bounded_by_rejection_limit() {
        // The second weight passes the support check but is below the sampler's resolution.
        let shape = Discrete::weighted("shape", [Shape::Square, Shape::Triangle], vec![1.0, 1e-20])
            .unwrap();
        let mut components: Vec<Box<dyn FactorDistribution>> = vec![Box::new(shape)];
        for (key, lo, hi) in [("x", 0.1, 0.9), ("y", 0.1, 0.9), ("scale", 0.1, 0.2)] {
            components.push(Box::new(Continuous::new(key, lo, hi).unwrap()));
        }
        for key in ["c0", "c1", "c2"] {
            components.push(Box::new(Continuous::constant(key, 1.0).unwrap()));
        }

        let g = ConditionedGenerator::new(
            Box::new(Product::new(components).unwrap()),
            SpriteCount::Fixed(2),
            Arc::new(ShapeParamTable::fitted()),
            GenerateConfig::default().with_max_rejections(500),
        )
        .unwrap();
        assert_eq!(g.support(), Some(&[Shape::Square, Shape::Triangle][..]));

        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            g.generate(&mut rng),
            Err(Error::RejectionLimit { attempts: 500 })
        ));
    }

    #[test]
    fn shape_without_table_entry_fails_fast() {
        let err = make(&["square", "circle"], SpriteCount::Fixed(1), ShapePolicy::Unique).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingShapeParams {
                shape: Shape::Circle
            }
        ));

        let g = ConditionedGenerator::new(
            Box::new(Opaque(base(&["circle"]))),
            SpriteCount::Fixed(1),
            Arc::new(ShapeParamTable::fitted()),
            GenerateConfig::default(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            g.generate(&mut rng),
            Err(Error::MissingShapeParams { .. })
        ));
    }

    #[test]
    fn custom_table_drives_conditioned_factors() {
        let near_one = BetaParams::new(200.0, 1.0);
        let near_zero = BetaParams::new(1.0, 200.0);
        let table = ShapeParamTable::new().with_entry(
            Shape::Circle,
            ShapeParams::new(near_one, near_zero, near_zero, near_one),
        );

        let g = ConditionedGenerator::new(
            Box::new(base(&["circle"])),
            SpriteCount::Fixed(1),
            Arc::new(table),
            GenerateConfig::default(),
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let sprite = &g.generate(&mut rng).unwrap()[0];
        assert_eq!(sprite.shape(), Shape::Circle);
        assert!(sprite.x() > 0.9);
        assert!(sprite.y() < 0.1);
        assert!(sprite.scale() < 0.1);
        assert!(sprite.hue() > 0.9);
        assert_eq!((sprite.saturation(), sprite.value()), (1.0, 1.0));
    }

    #[test]
    fn stage_one_factors_are_discarded() {
        // Base colors are within [0.5, 1]; the conditioned stage forces saturation and value to 1.
        let g = make(&["square", "triangle"], SpriteCount::Fixed(2), ShapePolicy::Unique).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        for sprite in g.generate(&mut rng).unwrap() {
            assert_eq!(sprite.saturation(), 1.0);
            assert_eq!(sprite.value(), 1.0);
        }
    }

    #[test]
    fn invalid_base_mapping_propagates_factory_error() {
        let bad = Discrete::new("shape", [FactorValue::from("square")]).unwrap();
        let g = ConditionedGenerator::new(
            Box::new(bad),
            SpriteCount::Fixed(1),
            Arc::new(ShapeParamTable::fitted()),
            GenerateConfig::default(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            g.generate(&mut rng),
            Err(Error::MissingFactor { .. })
        ));
    }

    #[test]
    fn zero_rejection_bound_is_invalid() {
        assert!(GenerateConfig::default()
            .with_max_rejections(0)
            .validate()
            .is_err());
    }
}
