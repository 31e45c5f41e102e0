//! Liquid colors and difficulty tiers.
//!
//! ## Color
//!
//! Opaque tag drawn from a fixed 16-value palette. Only equality matters to
//! the rules; the declaration order is the palette order used for display.
//!
//! ## Difficulty
//!
//! A named tier selecting the palette slice and tube count of a level.
//! The tier table is the only externally visible "schema" of the engine:
//!
//! | Tier | Tubes | Colors | Base score |
//! |------|-------|--------|------------|
//! | Easy | 4 | 2 | 1000 |
//! | Medium | 10 | 8 | 1500 |
//! | Hard | 12 | 10 | 2000 |
//! | ExtraHard | 14 | 12 | 3000 |

use serde::{Deserialize, Serialize};

/// A liquid color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    HotPink,
    Blue,
    Cyan,
    Green,
    Lime,
    Yellow,
    Orange,
    Purple,
    NeonSky,
    NeonPurple,
    Indigo,
    Pink,
    Teal,
    Amber,
    Emerald,
}

impl Color {
    /// Every palette color, in palette order.
    pub const ALL: [Color; 16] = [
        Color::Red,
        Color::HotPink,
        Color::Blue,
        Color::Cyan,
        Color::Green,
        Color::Lime,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
        Color::NeonSky,
        Color::NeonPurple,
        Color::Indigo,
        Color::Pink,
        Color::Teal,
        Color::Amber,
        Color::Emerald,
    ];

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::HotPink => "hotpink",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Green => "green",
            Color::Lime => "lime",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::NeonSky => "neonsky",
            Color::NeonPurple => "neonpurple",
            Color::Indigo => "indigo",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Amber => "amber",
            Color::Emerald => "emerald",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const EASY_PALETTE: [Color; 2] = [Color::Lime, Color::Purple];

const MEDIUM_PALETTE: [Color; 10] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::HotPink,
    Color::Orange,
    Color::Purple,
    Color::Cyan,
    Color::Lime,
    Color::NeonSky,
];

const HARD_PALETTE: [Color; 12] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::HotPink,
    Color::Orange,
    Color::Purple,
    Color::Cyan,
    Color::Lime,
    Color::NeonSky,
    Color::NeonPurple,
    Color::Indigo,
];

const EXTRA_HARD_PALETTE: [Color; 14] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::HotPink,
    Color::Orange,
    Color::Purple,
    Color::Cyan,
    Color::Lime,
    Color::NeonSky,
    Color::NeonPurple,
    Color::Indigo,
    Color::Pink,
    Color::Teal,
];

/// Number of tubes every tier leaves empty at the start of a level.
pub const EMPTY_TUBES: usize = 2;

/// Difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    ExtraHard,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::ExtraHard,
    ];

    /// Tier used for a numbered level when the player did not pick one.
    ///
    /// ```
    /// use water_sort::core::Difficulty;
    ///
    /// assert_eq!(Difficulty::for_level(1), Difficulty::Easy);
    /// assert_eq!(Difficulty::for_level(4), Difficulty::Medium);
    /// assert_eq!(Difficulty::for_level(6), Difficulty::Hard);
    /// assert_eq!(Difficulty::for_level(7), Difficulty::ExtraHard);
    /// ```
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        match level {
            0..=2 => Difficulty::Easy,
            3..=4 => Difficulty::Medium,
            5..=6 => Difficulty::Hard,
            _ => Difficulty::ExtraHard,
        }
    }

    /// Total tubes on the board, including the empty ones.
    #[must_use]
    pub const fn tube_count(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 10,
            Difficulty::Hard => 12,
            Difficulty::ExtraHard => 14,
        }
    }

    /// The tier's full palette. Only the first [`color_count`](Self::color_count)
    /// entries are dealt.
    #[must_use]
    pub const fn palette(self) -> &'static [Color] {
        match self {
            Difficulty::Easy => &EASY_PALETTE,
            Difficulty::Medium => &MEDIUM_PALETTE,
            Difficulty::Hard => &HARD_PALETTE,
            Difficulty::ExtraHard => &EXTRA_HARD_PALETTE,
        }
    }

    /// Colors dealt into a level: one per filled tube.
    #[must_use]
    pub fn color_count(self) -> usize {
        (self.tube_count() - EMPTY_TUBES).min(self.palette().len())
    }

    /// The colors actually dealt, in palette order.
    #[must_use]
    pub fn colors(self) -> &'static [Color] {
        &self.palette()[..self.color_count()]
    }

    /// Score before move, time and hint adjustments.
    #[must_use]
    pub const fn base_score(self) -> u32 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 1500,
            Difficulty::Hard => 2000,
            Difficulty::ExtraHard => 3000,
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::ExtraHard => "extrahard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let mut all = Color::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn test_tier_table() {
        let table: Vec<_> = Difficulty::ALL
            .iter()
            .map(|d| (d.tube_count(), d.color_count()))
            .collect();
        assert_eq!(table, vec![(4, 2), (10, 8), (12, 10), (14, 12)]);
    }

    #[test]
    fn test_colors_are_palette_prefix() {
        assert_eq!(Difficulty::Easy.colors(), &[Color::Lime, Color::Purple]);
        assert_eq!(Difficulty::Medium.colors(), &MEDIUM_PALETTE[..8]);
        assert_eq!(Difficulty::ExtraHard.colors()[11], Color::Indigo);
    }

    #[test]
    fn test_base_scores() {
        assert_eq!(Difficulty::Easy.base_score(), 1000);
        assert_eq!(Difficulty::Medium.base_score(), 1500);
        assert_eq!(Difficulty::Hard.base_score(), 2000);
        assert_eq!(Difficulty::ExtraHard.base_score(), 3000);
    }

    #[test]
    fn test_for_level_boundaries() {
        assert_eq!(Difficulty::for_level(0), Difficulty::Easy);
        assert_eq!(Difficulty::for_level(2), Difficulty::Easy);
        assert_eq!(Difficulty::for_level(3), Difficulty::Medium);
        assert_eq!(Difficulty::for_level(5), Difficulty::Hard);
        assert_eq!(Difficulty::for_level(100), Difficulty::ExtraHard);
    }

    #[test]
    fn test_difficulty_serde_names() {
        let json = serde_json::to_string(&Difficulty::ExtraHard).unwrap();
        assert_eq!(json, "\"extrahard\"");
        let back: Difficulty = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Difficulty::Medium);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::NeonSky.to_string(), "neonsky");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
