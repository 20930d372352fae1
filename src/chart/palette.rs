//! Category to color mapping.

use crate::model::USER_CATEGORY;
use anyhow::{bail, Context};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An sRGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Relative luminance, used to pick a readable text color.
    pub fn is_dark(&self) -> bool {
        let [r, g, b] = self.unit();
        0.2126 * r + 0.7152 * g + 0.0722 * b < 0.5
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let Some(digits) = hex.strip_prefix('#') else {
            bail!("Color '{s}' must start with '#'");
        };
        if digits.len() != 6 || !digits.is_ascii() {
            bail!("Color '{s}' must have the form #RRGGBB");
        }
        let channel = |ix: usize| {
            u8::from_str_radix(&digits[ix..ix + 2], 16)
                .with_context(|| format!("Color '{s}' has an invalid hex digit"))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgb::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub const USER_COLOR: Rgb = Rgb::new(0xCD, 0x5C, 0x08);
pub const REFERENCE_COLOR: Rgb = Rgb::new(0xC1, 0xD8, 0xC3);
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xA0, 0xA0, 0xA0);

/// Maps category tags to tile colors. Unknown categories get [`FALLBACK_COLOR`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: BTreeMap<String, Rgb>,
    fallback: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert(USER_CATEGORY.to_string(), USER_COLOR);
        colors.insert("reference".to_string(), REFERENCE_COLOR);
        Self {
            colors,
            fallback: FALLBACK_COLOR,
        }
    }
}

impl Palette {
    /// The default palette with `overrides` added on top.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a Rgb)>) -> Self {
        let mut palette = Self::default();
        for (category, color) in overrides {
            palette.colors.insert(category.clone(), *color);
        }
        palette
    }

    pub fn color(&self, category: &str) -> Rgb {
        self.colors.get(category).copied().unwrap_or(self.fallback)
    }
}
