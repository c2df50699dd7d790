//! Theme resolution: hour-to-category mapping and random background choice.
//!
//! The pizza theme buckets assets by piece count ("0p".."12p") and maps
//! each hour to a bucket; the second half of the day reuses the same
//! assets horizontally mirrored (the `flip` flag). The circular theme is
//! a single pool with no hour mapping.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Piece-count category labels, ascending. 13 entries: an empty dish
/// through a full 12-slice pizza.
pub const CATEGORIES: [&str; 13] = [
    "0p", "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", "10p", "11p", "12p",
];

/// Direction of the piece-count progression over the day.
///
/// `IncreaseDecrease`: pieces accumulate through AM (0–11) and are eaten
/// through PM (12–23). `DecreaseIncrease` is the reverse. Fixed per theme
/// instance; not exposed in the settings schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourMappingMode {
    IncreaseDecrease,
    DecreaseIncrease,
}

/// One categorized asset from a theme manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFile {
    pub category: String,
    pub path: String,
}

/// A theme manifest: the tagged union fetched as `<theme>.json`.
///
/// Loaded once per theme selection and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ThemeDefinition {
    Pizza { files: Vec<ThemeFile> },
    Circular { files: Vec<ThemeFile> },
}

/// A resolved background pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub path: String,
    pub category: String,
    /// Horizontal mirror: true only on the "decreasing" half of the day.
    pub flip: bool,
}

/// Map an hour of day (0–23) to a piece-count category and mirror flag.
///
/// Deterministic: the same (hour, mode) always yields the same result,
/// and the two modes return complementary flip values for every hour.
pub fn hour_to_category(hour: u32, mode: HourMappingMode) -> (&'static str, bool) {
    let ind = (hour % 12) as usize;
    let increasing = (CATEGORIES[ind], false);
    let decreasing = (CATEGORIES[12 - ind], true);
    let is_am = hour % 24 < 12;

    match mode {
        HourMappingMode::IncreaseDecrease => {
            if is_am { increasing } else { decreasing }
        }
        HourMappingMode::DecreaseIncrease => {
            if is_am { decreasing } else { increasing }
        }
    }
}

impl ThemeDefinition {
    pub fn files(&self) -> &[ThemeFile] {
        match self {
            ThemeDefinition::Pizza { files } | ThemeDefinition::Circular { files } => files,
        }
    }

    /// Pick a background for the given hour.
    ///
    /// Pizza: uniform over the files matching the resolved category.
    /// Circular: uniform over the whole pool, never flipped.
    /// Returns `None` when the filtered set is empty — the caller treats
    /// that as "no background change", not a failure. Repeated calls may
    /// repeat or vary; no previous-pick state is kept.
    pub fn choose_background<R: Rng + ?Sized>(
        &self,
        hour: u32,
        mode: HourMappingMode,
        rng: &mut R,
    ) -> Option<Background> {
        match self {
            ThemeDefinition::Pizza { files } => {
                let (category, flip) = hour_to_category(hour, mode);
                let pool: Vec<&ThemeFile> =
                    files.iter().filter(|f| f.category == category).collect();
                pool.choose(rng).map(|f| Background {
                    path: f.path.clone(),
                    category: f.category.clone(),
                    flip,
                })
            }
            ThemeDefinition::Circular { files } => files.choose(rng).map(|f| Background {
                path: f.path.clone(),
                category: f.category.clone(),
                flip: false,
            }),
        }
    }
}
