//! Palette generation.
//!
//! A [`Palette`] is an ordered list of fill colors. Generated palettes sample
//! each color independently in HSV, with per-[`PaletteMode`] bounds on hue,
//! saturation and value; the `external` mode returns a caller-supplied
//! [`ColorTable`] verbatim instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{hsv_to_srgb, Hsv, Srgb};
use crate::color_table::ColorTable;
use crate::prng::Xorshift64;

/// Default fixed hue for [`PaletteMode::Mono`].
pub const DEFAULT_BASE_HUE: f64 = 0.6;

/// All mode names, in the order they are offered to users.
const MODE_NAMES: &[&str] = &["pastel", "vivid", "mono", "random", "external"];

/// How palette colors are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaletteMode {
    /// Light, desaturated colors of any hue.
    #[default]
    Pastel,
    /// Saturated, bright colors of any hue.
    Vivid,
    /// Shades of a single fixed hue.
    Mono,
    /// Broad saturation and value ranges of any hue.
    Random,
    /// Colors read from an external color table.
    External,
}

impl PaletteMode {
    /// Resolves a mode by exact, case-sensitive name.
    ///
    /// Unrecognized names resolve to [`PaletteMode::Random`], whose sampling
    /// policy is the catch-all.
    pub fn from_name(name: &str) -> Self {
        match name {
            "pastel" => PaletteMode::Pastel,
            "vivid" => PaletteMode::Vivid,
            "mono" => PaletteMode::Mono,
            "external" => PaletteMode::External,
            _ => PaletteMode::Random,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteMode::Pastel => "pastel",
            PaletteMode::Vivid => "vivid",
            PaletteMode::Mono => "mono",
            PaletteMode::Random => "random",
            PaletteMode::External => "external",
        }
    }

    /// Returns a slice of all recognized mode names.
    pub fn list_names() -> &'static [&'static str] {
        MODE_NAMES
    }

    /// Samples one color with this mode's HSV bounds.
    ///
    /// Draws hue (unless fixed), then saturation, then value.
    fn sample(self, base_hue: f64, rng: &mut Xorshift64) -> Srgb {
        let (h, s, v) = match self {
            PaletteMode::Pastel => (rng.next_f64(), (0.15, 0.35), (0.9, 1.0)),
            PaletteMode::Vivid => (rng.next_f64(), (0.8, 1.0), (0.8, 1.0)),
            PaletteMode::Mono => (base_hue, (0.2, 0.6), (0.5, 1.0)),
            PaletteMode::Random | PaletteMode::External => {
                (rng.next_f64(), (0.3, 1.0), (0.5, 1.0))
            }
        };
        let s = rng.next_range(s.0, s.1);
        let v = rng.next_range(v.0, v.1);
        hsv_to_srgb(Hsv { h, s, v })
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Serialize for PaletteMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PaletteMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name(&s))
    }
}

/// An ordered list of colors. May be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    pub fn new(colors: Vec<Srgb>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Picks a color uniformly by index, or `None` for an empty palette.
    pub fn pick(&self, rng: &mut Xorshift64) -> Option<Srgb> {
        rng.pick(&self.colors).copied()
    }
}

/// Generates a palette of `count` colors for `mode`.
///
/// For [`PaletteMode::External`], `count`, `base_hue` and `rng` are ignored
/// and the table's colors are returned in stored order; with no table the
/// result is empty. The table's length wins over `count` either way.
pub fn generate_palette(
    count: usize,
    mode: PaletteMode,
    base_hue: f64,
    rng: &mut Xorshift64,
    external: Option<&ColorTable>,
) -> Palette {
    if mode == PaletteMode::External {
        let Some(table) = external else {
            tracing::warn!("external palette mode without a color table; palette is empty");
            return Palette::default();
        };
        return Palette::new(table.colors());
    }
    Palette::new((0..count).map(|_| mode.sample(base_hue, rng)).collect())
}
