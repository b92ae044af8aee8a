//! Pure text normalizers.
//!
//! Two transforms live here: [`normalize_ingredient`] strips quantity/unit
//! noise from an ingredient line, and [`canonical_key`] produces the
//! comparison key used to group near-duplicate recipe names. Both are
//! deterministic and side-effect free.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Normalized ingredient strings shorter than this are unusable and are
/// excluded from any matching set.
pub const MIN_USABLE_LEN: usize = 2;

/// Canonical name keys shorter than this are too ambiguous to merge on.
const MIN_KEY_LEN: usize = 3;

static LEADING_MEASURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\d+(\.\d+)?\s*(cup|cups|tablespoon|tablespoons|teaspoon|teaspoons|tbsp|tsp|oz|g|kg|lb|ml|l)s?\s+",
    )
    .expect("leading measure pattern")
});
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?\s+").expect("leading number pattern"));
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern"));
static TRAILING_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),?\s*(to taste|optional|if needed|or more)$").expect("qualifier pattern")
});
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern"));
static REPEATED_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("repeated space pattern"));

/// Strip quantity, unit and qualifier noise from a raw ingredient line.
///
/// `"2 cups all-purpose flour (sifted), or more"` becomes
/// `"all-purpose flour"`. Callers should drop results shorter than
/// [`MIN_USABLE_LEN`].
pub fn normalize_ingredient(raw: &str) -> String {
    let stripped = LEADING_MEASURE.replace(raw, "");
    let stripped = LEADING_NUMBER.replace(&stripped, "");
    let stripped = PARENTHETICAL.replace_all(&stripped, "");
    let lowered = stripped.to_lowercase();
    let lowered = lowered.trim();
    let stripped = TRAILING_QUALIFIER.replace(lowered, "");
    stripped.trim().to_string()
}

/// True when a normalized ingredient is long enough to participate in
/// matching.
pub fn is_usable_ingredient(normalized: &str) -> bool {
    normalized.len() >= MIN_USABLE_LEN
}

/// Stop-word/marketing-adjective table stripped from recipe names before
/// comparison. Swappable configuration data; the default set is tuned for
/// English recipe titles.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct StopWords(pub Vec<String>);

impl Default for StopWords {
    fn default() -> Self {
        Self(
            [
                "the",
                "a",
                "an",
                "perfect",
                "classic",
                "easy",
                "simple",
                "best",
                "homemade",
                "ultimate",
                "authentic",
                "traditional",
                "quick",
                "delicious",
                "amazing",
                "favorite",
                "moms",
                "mom's",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        )
    }
}

impl StopWords {
    fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|stop| stop == word)
    }
}

/// Canonical comparison key derived from a recipe name.
///
/// A key that ends up shorter than 3 characters is too generic to merge on;
/// such names yield [`NameKey::Unmergeable`] and the resolver keeps them as
/// true singletons, never grouped with anything (including each other).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameKey {
    Mergeable(String),
    Unmergeable,
}

impl NameKey {
    pub fn is_mergeable(&self) -> bool {
        matches!(self, NameKey::Mergeable(_))
    }
}

/// Produce the canonical grouping key for a recipe name.
///
/// Lowercases, drops stop words, strips punctuation and collapses
/// whitespace, so `"The Best Chicken Soup"` and `"Chicken Soup"` compare
/// equal. Substring-generic names can still collide (two distinct recipes
/// sharing a short name fragment); that looseness is inherited behavior and
/// an accepted product trade-off, not something this function tries to
/// outsmart.
pub fn canonical_key(name: &str, stop_words: &StopWords) -> NameKey {
    let lowered = name.to_lowercase();
    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| !stop_words.contains(word))
        .collect();
    let joined = kept.join(" ");
    let no_punct = PUNCTUATION.replace_all(&joined, "");
    let collapsed = REPEATED_SPACE.replace_all(no_punct.trim(), " ");
    let key = collapsed.trim().to_string();

    if key.len() < MIN_KEY_LEN {
        NameKey::Unmergeable
    } else {
        NameKey::Mergeable(key)
    }
}
