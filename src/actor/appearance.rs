//! Appearance values: graphic effects and rotation styles.

use crate::error::StageError;
use std::fmt;
use std::str::FromStr;

const EFFECT_COUNT: usize = 7;

/// A graphic effect a sprite can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Effect {
    /// Hue shift.
    Color,
    /// Bulge distortion.
    Fisheye,
    /// Swirl distortion.
    Whirl,
    /// Coarse pixelation.
    Pixelate,
    /// Tiled copies.
    Mosaic,
    /// Lightness shift, -100 to 100.
    Brightness,
    /// Transparency, 0 (opaque) to 100 (invisible).
    Ghost,
}

impl Effect {
    /// Every effect, in storage order.
    pub const ALL: [Self; EFFECT_COUNT] = [
        Self::Color,
        Self::Fisheye,
        Self::Whirl,
        Self::Pixelate,
        Self::Mosaic,
        Self::Brightness,
        Self::Ghost,
    ];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Fisheye => "fisheye",
            Self::Whirl => "whirl",
            Self::Pixelate => "pixelate",
            Self::Mosaic => "mosaic",
            Self::Brightness => "brightness",
            Self::Ghost => "ghost",
        }
    }

    /// Bring a value into the effect's valid range.
    pub fn clamp(self, value: f64) -> f64 {
        match self {
            Self::Ghost => value.clamp(0.0, 100.0),
            Self::Brightness => value.clamp(-100.0, 100.0),
            _ => value,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Effect {
    type Err = StageError;

    /// Accepts the canonical names plus the `colour` and `pixalate`
    /// spellings older projects use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let effect = match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Self::Color,
            "fisheye" => Self::Fisheye,
            "whirl" => Self::Whirl,
            "pixelate" | "pixalate" => Self::Pixelate,
            "mosaic" => Self::Mosaic,
            "brightness" => Self::Brightness,
            "ghost" => Self::Ghost,
            _ => return Err(StageError::InvalidEffectName(s.to_string())),
        };
        Ok(effect)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current value of every graphic effect. All zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Effects {
    values: [f64; EFFECT_COUNT],
}

impl Effects {
    /// Value of one effect.
    #[inline]
    pub const fn get(&self, effect: Effect) -> f64 {
        self.values[effect.index()]
    }

    /// Set an effect, clamped to its range.
    pub fn set(&mut self, effect: Effect, value: f64) {
        self.values[effect.index()] = effect.clamp(value);
    }

    /// Add to an effect, clamped to its range.
    pub fn change(&mut self, effect: Effect, delta: f64) {
        self.set(effect, self.get(effect) + delta);
    }

    /// Reset every effect to zero.
    pub fn clear(&mut self) {
        self.values = [0.0; EFFECT_COUNT];
    }

    /// Check whether every effect is zero.
    pub fn is_clear(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Iterate over `(effect, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        Effect::ALL.iter().map(move |e| (*e, self.get(*e)))
    }
}

/// How a sprite's heading is applied to its costume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationStyle {
    /// Rotate freely.
    #[default]
    AllAround,
    /// Only mirror between facing left and right.
    LeftRight,
    /// Never rotate the costume.
    DontRotate,
}

impl FromStr for RotationStyle {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let style = match s.trim().to_ascii_lowercase().as_str() {
            "all around" | "all-around" => Self::AllAround,
            "left-right" | "left right" => Self::LeftRight,
            "don't rotate" | "dont-rotate" | "do not rotate" => Self::DontRotate,
            _ => return Err(StageError::InvalidRotationStyle(s.to_string())),
        };
        Ok(style)
    }
}

impl fmt::Display for RotationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AllAround => "all around",
            Self::LeftRight => "left-right",
            Self::DontRotate => "don't rotate",
        })
    }
}
