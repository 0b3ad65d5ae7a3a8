//! Built-in look presets offered by the editor.

use std::fmt;
use std::str::FromStr;

/// A named colour-grading preset. Applying one appends its id to a track's
/// filter list; rendering interprets the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPreset {
    Normal,
    Warm,
    Cool,
    Dramatic,
    Vintage,
    BlackWhite,
    Cinematic,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 7] = [
        FilterPreset::Normal,
        FilterPreset::Warm,
        FilterPreset::Cool,
        FilterPreset::Dramatic,
        FilterPreset::Vintage,
        FilterPreset::BlackWhite,
        FilterPreset::Cinematic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "normal",
            FilterPreset::Warm => "warm",
            FilterPreset::Cool => "cool",
            FilterPreset::Dramatic => "dramatic",
            FilterPreset::Vintage => "vintage",
            FilterPreset::BlackWhite => "blackwhite",
            FilterPreset::Cinematic => "cinematic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "Normal",
            FilterPreset::Warm => "Warm",
            FilterPreset::Cool => "Cool",
            FilterPreset::Dramatic => "Dramatic",
            FilterPreset::Vintage => "Vintage",
            FilterPreset::BlackWhite => "Black & White",
            FilterPreset::Cinematic => "Cinematic",
        }
    }

    /// CSS filter expression for preview rendering.
    pub fn css(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "none",
            FilterPreset::Warm => "sepia(0.3) hue-rotate(30deg)",
            FilterPreset::Cool => "hue-rotate(180deg) saturate(1.2)",
            FilterPreset::Dramatic => "contrast(1.3) brightness(0.8)",
            FilterPreset::Vintage => "sepia(0.5) contrast(1.1)",
            FilterPreset::BlackWhite => "grayscale(1)",
            FilterPreset::Cinematic => "contrast(1.2) saturate(0.8)",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        FilterPreset::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("unknown filter preset: {}", s))
    }
}
