use crate::segment::PhraseSegmenter;

/// Whether ingredient text is carried through verbatim or reduced to its
/// core phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientMode {
    Raw,
    Cleaned,
}

impl IngredientMode {
    pub fn from_clean_flag(clean_ingredients: bool) -> Self {
        if clean_ingredients {
            IngredientMode::Cleaned
        } else {
            IngredientMode::Raw
        }
    }
}

/// Preparation descriptors and connectors removed from a selected phrase.
///
/// Removal is plain substring replacement, so a vocabulary word embedded in
/// a longer token is stripped as well. No entry is a substring of another in
/// a way that changes the outcome, so removal order is irrelevant.
const FILLER_WORDS: &[&str] = &[
    "and",
    "minced",
    "peeled",
    "diced",
    "chopped",
    "pitted",
    "grated",
    "shredded",
    "sliced",
    "crushed",
    "mashed",
    "julienned",
    "zested",
    "de-seeded",
    "deveined",
    "cubed",
    "halved",
    "quartered",
    "trimmed",
    "husked",
    "whole",
    "dried",
];

/// Remove every filler vocabulary occurrence from `s` and trim the result.
pub fn strip_fillers(s: &str) -> String {
    let mut s = s.to_string();
    for word in FILLER_WORDS {
        if s.contains(word) {
            s = s.replace(word, "");
        }
    }
    s.trim().to_string()
}

/// Reduces a raw ingredient string per the active [`IngredientMode`].
pub struct PhraseNormalizer<'a> {
    mode: IngredientMode,
    segmenter: &'a dyn PhraseSegmenter,
}

impl<'a> PhraseNormalizer<'a> {
    pub fn new(mode: IngredientMode, segmenter: &'a dyn PhraseSegmenter) -> Self {
        Self { mode, segmenter }
    }

    pub fn mode(&self) -> IngredientMode {
        self.mode
    }

    /// Normalize one ingredient entry.
    ///
    /// `Raw` mode passes the text through as a single entry. `Cleaned` mode
    /// keeps only the first noun phrase, stripped of filler vocabulary and
    /// trimmed; when segmentation finds no phrase the entry vanishes, so the
    /// returned sequence is empty and the caller contributes nothing to the
    /// ingredients list for it.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        match self.mode {
            IngredientMode::Raw => vec![raw.to_string()],
            IngredientMode::Cleaned => self
                .segmenter
                .noun_phrases(raw)
                .into_iter()
                .next()
                .map(|phrase| strip_fillers(&phrase))
                .into_iter()
                .collect(),
        }
    }
}
