//! Sprite value objects and the factory that builds them from factor mappings.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factor::{FactorMapping, FactorValue};

/// Factor names recognized by [`Sprite::from_factors`].
pub mod keys {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const SHAPE: &str = "shape";
    pub const SCALE: &str = "scale";
    /// Hue.
    pub const C0: &str = "c0";
    /// Saturation.
    pub const C1: &str = "c1";
    /// Value.
    pub const C2: &str = "c2";

    pub const ALL: [&str; 7] = [X, Y, SHAPE, SCALE, C0, C1, C2];
}

/// Sprite outline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    #[cfg_attr(feature = "serde", serde(rename = "circle"))]
    Circle,
    #[cfg_attr(feature = "serde", serde(rename = "square"))]
    Square,
    #[cfg_attr(feature = "serde", serde(rename = "triangle"))]
    Triangle,
    #[cfg_attr(feature = "serde", serde(rename = "pentagon"))]
    Pentagon,
    #[cfg_attr(feature = "serde", serde(rename = "hexagon"))]
    Hexagon,
    #[cfg_attr(feature = "serde", serde(rename = "spoke_4"))]
    Spoke4,
    #[cfg_attr(feature = "serde", serde(rename = "spoke_5"))]
    Spoke5,
    #[cfg_attr(feature = "serde", serde(rename = "spoke_6"))]
    Spoke6,
    #[cfg_attr(feature = "serde", serde(rename = "star_4"))]
    Star4,
    #[cfg_attr(feature = "serde", serde(rename = "star_5"))]
    Star5,
    #[cfg_attr(feature = "serde", serde(rename = "star_6"))]
    Star6,
}

impl Shape {
    pub const ALL: [Shape; 11] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Pentagon,
        Shape::Hexagon,
        Shape::Spoke4,
        Shape::Spoke5,
        Shape::Spoke6,
        Shape::Star4,
        Shape::Star5,
        Shape::Star6,
    ];

    /// Canonical lowercase name, as used in factor mappings.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Pentagon => "pentagon",
            Shape::Hexagon => "hexagon",
            Shape::Spoke4 => "spoke_4",
            Shape::Spoke5 => "spoke_5",
            Shape::Spoke6 => "spoke_6",
            Shape::Star4 => "star_4",
            Shape::Star5 => "star_5",
            Shape::Star6 => "star_6",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| Error::InvalidFactor {
                key: keys::SHAPE.into(),
                reason: format!("unknown shape '{s}'"),
            })
    }
}

/// An immutable sprite description. Colors are HSV with every channel in `[0, 1]`.
///
/// Deserialization goes through [`Sprite::new`] and rejects out-of-range fields.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSprite"))]
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    x: f64,
    y: f64,
    shape: Shape,
    scale: f64,
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Sprite {
    /// Create a sprite, validating ranges like [`Sprite::from_factors`] does.
    pub fn new(
        x: f64,
        y: f64,
        shape: Shape,
        scale: f64,
        hue: f64,
        saturation: f64,
        value: f64,
    ) -> Result<Self> {
        check_unit(keys::X, x)?;
        check_unit(keys::Y, y)?;
        check_unit(keys::C0, hue)?;
        check_unit(keys::C1, saturation)?;
        check_unit(keys::C2, value)?;
        if !scale.is_finite() || scale < 0.0 {
            return Err(Error::InvalidFactor {
                key: keys::SCALE.into(),
                reason: format!("must be finite and >= 0, got {scale}"),
            });
        }

        Ok(Self {
            x,
            y,
            shape,
            scale,
            hue,
            saturation,
            value,
        })
    }

    /// Build a sprite from a factor mapping.
    ///
    /// Every key in [`keys::ALL`] is required; any other key is rejected.
    pub fn from_factors(factors: &FactorMapping) -> Result<Self> {
        if let Some(key) = factors.keys().find(|k| !keys::ALL.contains(&k.as_str())) {
            return Err(Error::UnknownFactor { key: key.clone() });
        }

        let shape = match required(factors, keys::SHAPE)? {
            FactorValue::Category(name) => name.parse()?,
            FactorValue::Number(v) => {
                return Err(Error::InvalidFactor {
                    key: keys::SHAPE.into(),
                    reason: format!("expected a shape name, got number {v}"),
                })
            }
        };

        Self::new(
            number(factors, keys::X)?,
            number(factors, keys::Y)?,
            shape,
            number(factors, keys::SCALE)?,
            number(factors, keys::C0)?,
            number(factors, keys::C1)?,
            number(factors, keys::C2)?,
        )
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Unvalidated wire form of [`Sprite`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSprite {
    x: f64,
    y: f64,
    shape: Shape,
    scale: f64,
    hue: f64,
    saturation: f64,
    value: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSprite> for Sprite {
    type Error = Error;

    fn try_from(raw: RawSprite) -> Result<Self> {
        Sprite::new(
            raw.x,
            raw.y,
            raw.shape,
            raw.scale,
            raw.hue,
            raw.saturation,
            raw.value,
        )
    }
}

fn required<'a>(factors: &'a FactorMapping, key: &str) -> Result<&'a FactorValue> {
    factors.get(key).ok_or_else(|| Error::MissingFactor { key: key.into() })
}

fn number(factors: &FactorMapping, key: &str) -> Result<f64> {
    match required(factors, key)? {
        FactorValue::Number(v) => Ok(*v),
        FactorValue::Category(c) => Err(Error::InvalidFactor {
            key: key.into(),
            reason: format!("expected a number, got '{c}'"),
        }),
    }
}

fn check_unit(key: &str, v: f64) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(Error::InvalidFactor {
            key: key.into(),
            reason: format!("must be within [0, 1], got {v}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(shape: &str) -> FactorMapping {
        let mut m = FactorMapping::new();
        m.insert("x".into(), 0.25.into());
        m.insert("y".into(), 0.75.into());
        m.insert("shape".into(), shape.into());
        m.insert("scale".into(), 0.1.into());
        m.insert("c0".into(), 0.5.into());
        m.insert("c1".into(), 1.0.into());
        m.insert("c2".into(), 1.0.into());
        m
    }

    #[test]
    fn shape_names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>().unwrap(), shape);
        }
        assert!("octagon".parse::<Shape>().is_err());
    }

    #[test]
    fn builds_sprite_from_complete_mapping() {
        let s = Sprite::from_factors(&factors("star_6")).unwrap();
        assert_eq!(s.shape(), Shape::Star6);
        assert_eq!(s.x(), 0.25);
        assert_eq!(s.y(), 0.75);
        assert_eq!(s.scale(), 0.1);
        assert_eq!((s.hue(), s.saturation(), s.value()), (0.5, 1.0, 1.0));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut m = factors("square");
        m.insert("angle".into(), 0.0.into());
        assert!(matches!(
            Sprite::from_factors(&m),
            Err(Error::UnknownFactor { key }) if key == "angle"
        ));
    }

    #[test]
    fn missing_key_is_rejected() {
        let mut m = factors("square");
        m.remove("c2");
        assert!(matches!(
            Sprite::from_factors(&m),
            Err(Error::MissingFactor { key }) if key == "c2"
        ));
    }

    #[test]
    fn wrong_types_and_ranges_are_rejected() {
        let mut m = factors("square");
        m.insert("x".into(), "left".into());
        assert!(matches!(
            Sprite::from_factors(&m),
            Err(Error::InvalidFactor { .. })
        ));

        let mut m = factors("square");
        m.insert("shape".into(), 3.0.into());
        assert!(Sprite::from_factors(&m).is_err());

        let mut m = factors("square");
        m.insert("y".into(), 1.5.into());
        assert!(Sprite::from_factors(&m).is_err());

        assert!(Sprite::from_factors(&factors("blob")).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_ranges() {
        let valid = "(x: 0.25, y: 0.75, shape: star_6, scale: 0.1, hue: 0.5, saturation: 1.0, value: 1.0)";
        let s: Sprite = ron::from_str(valid).unwrap();
        assert_eq!(s, Sprite::from_factors(&factors("star_6")).unwrap());

        let out_of_range =
            "(x: 5.0, y: -3.0, shape: square, scale: -1.0, hue: 9.0, saturation: 1.0, value: 1.0)";
        assert!(ron::from_str::<Sprite>(out_of_range).is_err());

        let round_trip = ron::to_string(&s).unwrap();
        assert_eq!(ron::from_str::<Sprite>(&round_trip).unwrap(), s);
    }
}
