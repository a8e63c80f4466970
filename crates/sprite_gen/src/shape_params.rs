//! Shape-conditioned resampling parameters.
//!
//! Once a sprite's shape is fixed, its position, scale and hue are redrawn from Beta
//! distributions specific to that shape. [`ShapeParamTable`] holds those parameters, one
//! [`ShapeParams`] entry (eight positive reals) per shape, and builds the secondary
//! distribution used by [`crate::generator::ConditionedGenerator`].
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factor::{Beta, Continuous, Discrete, Product};
use crate::sprite::{keys, Shape};

/// Parameters of one Beta distribution.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    fn validate(&self, what: &str) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.alpha) && ok(self.beta) {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "{what}: Beta parameters must be finite and > 0 (got {}, {})",
                self.alpha, self.beta
            )))
        }
    }
}

/// Per-shape Beta parameters for x, y, scale and hue.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    pub x: BetaParams,
    pub y: BetaParams,
    pub scale: BetaParams,
    pub hue: BetaParams,
}

impl ShapeParams {
    pub const fn new(x: BetaParams, y: BetaParams, scale: BetaParams, hue: BetaParams) -> Self {
        Self { x, y, scale, hue }
    }

    /// Check that all eight parameters are finite and positive.
    pub fn validate(&self, shape: Shape) -> Result<()> {
        self.x.validate(&format!("{shape}.x"))?;
        self.y.validate(&format!("{shape}.y"))?;
        self.scale.validate(&format!("{shape}.scale"))?;
        self.hue.validate(&format!("{shape}.hue"))
    }
}

/// Lookup table from shape to its resampling parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeParamTable {
    entries: HashMap<Shape, ShapeParams>,
}

impl ShapeParamTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the entry for `shape` (builder-style).
    pub fn with_entry(mut self, shape: Shape, params: ShapeParams) -> Self {
        self.entries.insert(shape, params);
        self
    }

    /// Add or replace the entry for `shape`, returning the previous one.
    pub fn insert(&mut self, shape: Shape, params: ShapeParams) -> Option<ShapeParams> {
        self.entries.insert(shape, params)
    }

    /// Parameters for `shape`.
    pub fn get(&self, shape: Shape) -> Result<&ShapeParams> {
        self.entries
            .get(&shape)
            .ok_or(Error::MissingShapeParams { shape })
    }

    pub fn contains(&self, shape: Shape) -> bool {
        self.entries.contains_key(&shape)
    }

    /// Shapes with an entry, in enumeration order.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self.entries.keys().copied().collect();
        shapes.sort();
        shapes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validates every entry, returning an error if any parameter is invalid.
    pub fn validate(&self) -> Result<()> {
        for shape in self.shapes() {
            self.entries[&shape].validate(shape)?;
        }
        Ok(())
    }

    /// Secondary distribution for `shape`: Beta x/y/scale/hue, shape pinned, saturation
    /// and value held at 1.
    pub fn conditioned_distribution(&self, shape: Shape) -> Result<Product> {
        let p = self.get(shape)?;
        Product::new(vec![
            Box::new(Beta::new(keys::X, p.x.alpha, p.x.beta)?),
            Box::new(Beta::new(keys::Y, p.y.alpha, p.y.beta)?),
            Box::new(Discrete::new(keys::SHAPE, [shape])?),
            Box::new(Beta::new(keys::SCALE, p.scale.alpha, p.scale.beta)?),
            Box::new(Beta::new(keys::C0, p.hue.alpha, p.hue.beta)?),
            Box::new(Continuous::constant(keys::C1, 1.0)?),
            Box::new(Continuous::constant(keys::C2, 1.0)?),
        ])
    }

    /// Position parameters that push each shape toward its own screen region
    /// (integer-valued, strongly skewed).
    pub fn corner_biased() -> Self {
        Self::from_rows(&[
            (Shape::Square, [25.0, 2.0], [25.0, 2.0]),
            (Shape::Triangle, [25.0, 2.0], [25.0, 22.0]),
            (Shape::Pentagon, [21.0, 6.0], [21.0, 6.0]),
            (Shape::Hexagon, [19.0, 8.0], [19.0, 8.0]),
            (Shape::Spoke4, [2.0, 25.0], [25.0, 2.0]),
            (Shape::Spoke5, [25.0, 2.0], [2.0, 25.0]),
            (Shape::Spoke6, [2.0, 25.0], [2.0, 25.0]),
            (Shape::Star4, [11.0, 16.0], [11.0, 16.0]),
            (Shape::Star5, [23.0, 4.0], [9.0, 18.0]),
            (Shape::Star6, [7.0, 20.0], [7.0, 20.0]),
        ])
    }

    /// Position parameters fitted per shape (softer, overlapping regions).
    pub fn fitted() -> Self {
        Self::from_rows(&[
            (
                Shape::Square,
                [10.23245679643229, 3.0928442981097133],
                [20.495181258545415, 21.281283533153676],
            ),
            (
                Shape::Triangle,
                [4.834302546465699, 9.109414385787378],
                [6.734115828769332, 10.623775195489053],
            ),
            (
                Shape::Pentagon,
                [2.5283306085768826, 13.37857404643091],
                [15.662147422996169, 13.676905991754056],
            ),
            (
                Shape::Hexagon,
                [22.39339816543392, 21.268933430450854],
                [15.4426245650715, 23.541179853521466],
            ),
            (
                Shape::Spoke4,
                [13.456411110280614, 22.391767509044413],
                [4.111114984741711, 8.832948313668181],
            ),
            (
                Shape::Spoke5,
                [6.317495984173592, 14.42695863585005],
                [14.392050785533002, 23.794986731719288],
            ),
            (
                Shape::Spoke6,
                [15.41214880790467, 18.003492016871608],
                [17.44700259100445, 16.948723697275597],
            ),
            (
                Shape::Star4,
                [6.794448885245786, 12.364891466499806],
                [19.994745864858775, 22.82343780355094],
            ),
            (
                Shape::Star5,
                [21.963199992980194, 24.38383725086071],
                [24.964822957405055, 16.398682135890102],
            ),
            (
                Shape::Star6,
                [16.929802261362223, 11.581933601608984],
                [23.171125447416305, 15.368603378028528],
            ),
        ])
    }

    fn from_rows(rows: &[(Shape, [f64; 2], [f64; 2]); 10]) -> Self {
        let mut table = Self::new();
        for (&(shape, [x1, x2], [y1, y2]), &(shared_shape, scale, hue)) in
            rows.iter().zip(SCALE_AND_HUE.iter())
        {
            debug_assert_eq!(shape, shared_shape, "preset rows out of order");
            table.insert(
                shape,
                ShapeParams::new(BetaParams::new(x1, x2), BetaParams::new(y1, y2), scale, hue),
            );
        }
        table
    }
}

/// Scale and hue parameters shared by both presets, in preset row order.
const SCALE_AND_HUE: [(Shape, BetaParams, BetaParams); 10] = [
    (
        Shape::Square,
        BetaParams::new(19.089783913500117, 2.9445437594982042),
        BetaParams::new(16.08196323063433, 2.1070937529079767),
    ),
    (
        Shape::Triangle,
        BetaParams::new(17.702226349877975, 22.955766633205197),
        BetaParams::new(11.815705623267306, 23.2806752586176),
    ),
    (
        Shape::Pentagon,
        BetaParams::new(17.565014615262086, 13.508529849526141),
        BetaParams::new(11.934008307559518, 10.2405234460427),
    ),
    (
        Shape::Hexagon,
        BetaParams::new(8.482968396689424, 21.976821208427644),
        BetaParams::new(5.267669658723397, 20.600361827332314),
    ),
    (
        Shape::Spoke4,
        BetaParams::new(13.763110818048586, 2.51798500580912),
        BetaParams::new(9.487345285873175, 14.85934849805914),
    ),
    (
        Shape::Spoke5,
        BetaParams::new(12.357798701299764, 17.152799524019557),
        BetaParams::new(9.327202992582688, 9.226934147141376),
    ),
    (
        Shape::Spoke6,
        BetaParams::new(22.34867970899941, 17.613695936551235),
        BetaParams::new(12.857871878835631, 9.410023222672462),
    ),
    (
        Shape::Star4,
        BetaParams::new(9.061912292390144, 11.375690804235813),
        BetaParams::new(10.088677412554267, 18.624525742581024),
    ),
    (
        Shape::Star5,
        BetaParams::new(4.223489127851181, 13.478902714779057),
        BetaParams::new(22.59618525644741, 10.012697617533178),
    ),
    (
        Shape::Star6,
        BetaParams::new(17.51702940194395, 10.43361003805039),
        BetaParams::new(10.98218742901024, 13.678590535311319),
    ),
];
