//! Recipe completeness scoring.
//!
//! A deterministic 0-100 metric built from independent capped bonuses, used
//! standalone and as a component of the popularity score. Recomputable at
//! any time from the record's current fields.

use myfridge_types::Recipe;

const DESCRIPTION_BONUS: u32 = 15;
const TAGS_BONUS: u32 = 15;
const IMAGE_BONUS: u32 = 20;
const INSTRUCTIONS_BONUS: u32 = 25;
const TIMING_BONUS: u32 = 15;
const INGREDIENT_BAND_BONUS: u32 = 10;

/// Non-trivial descriptions must be longer than this many characters.
const MIN_DESCRIPTION_LEN: usize = 20;
const MIN_INSTRUCTION_STEPS: usize = 3;

/// Ideal ingredient-count band; counts inside get the full bonus.
const INGREDIENT_BAND: std::ops::RangeInclusive<usize> = 3..=15;
/// Within this distance of the band, half credit instead of none.
const INGREDIENT_TAPER: usize = 3;

/// Compute the completeness score for a recipe, clamped to 0-100.
pub fn quality_score(recipe: &Recipe) -> u8 {
    let mut score: u32 = 0;

    if recipe.description.len() > MIN_DESCRIPTION_LEN {
        score += DESCRIPTION_BONUS;
    }
    if !recipe.tags.is_empty() {
        score += TAGS_BONUS;
    }
    if recipe.image.as_deref().is_some_and(|url| !url.is_empty()) {
        score += IMAGE_BONUS;
    }
    if recipe.instructions.len() >= MIN_INSTRUCTION_STEPS {
        score += INSTRUCTIONS_BONUS;
    }
    if recipe.has_timing() {
        score += TIMING_BONUS;
    }
    score += ingredient_band_bonus(recipe.ingredients.len());

    score.min(100) as u8
}

fn ingredient_band_bonus(count: usize) -> u32 {
    if INGREDIENT_BAND.contains(&count) {
        return INGREDIENT_BAND_BONUS;
    }
    let distance = if count < *INGREDIENT_BAND.start() {
        *INGREDIENT_BAND.start() - count
    } else {
        count - *INGREDIENT_BAND.end()
    };
    if distance <= INGREDIENT_TAPER {
        INGREDIENT_BAND_BONUS / 2
    } else {
        0
    }
}
