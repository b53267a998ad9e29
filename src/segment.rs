use std::sync::LazyLock;

use regex::Regex;

/// Word-like tokens: words, quantities, fractions, hyphenated forms.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9/'-]*").expect("Invalid token regex"));

/// Noun-phrase segmentation over a natural-language sentence.
///
/// The normalizer only ever consumes the first phrase, but implementations
/// must return all phrases in order of appearance so callers can make that
/// choice themselves.
pub trait PhraseSegmenter {
    fn noun_phrases(&self, text: &str) -> Vec<String>;
}

/// Rule-based segmenter: a noun phrase is a maximal run of tokens delimited
/// by punctuation and boundary tokens.
///
/// Boundary tokens are connector words (conjunctions, prepositions),
/// preparation verbs as they appear in ingredient lines, and `-ly` adverbs.
/// A run with no alphabetic token (a bare quantity) is not a phrase.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChunkSegmenter;

/// Conjunctions, prepositions and other closed-class words that never sit
/// inside a noun phrase.
const CONNECTOR_WORDS: &[&str] = &[
    "and", "or", "nor", "of", "with", "without", "for", "to", "into", "in", "on", "at", "from",
    "plus", "per", "as", "if", "about", "until", "over", "under",
];

/// Verb forms that show up mid-sentence in ingredient lines and terminate
/// the phrase they follow.
const PREPARATION_VERBS: &[&str] = &[
    "chopped",
    "diced",
    "minced",
    "sliced",
    "grated",
    "peeled",
    "crushed",
    "mashed",
    "shredded",
    "pitted",
    "cubed",
    "halved",
    "quartered",
    "trimmed",
    "husked",
    "zested",
    "julienned",
    "deveined",
    "softened",
    "melted",
    "beaten",
    "divided",
    "drained",
    "rinsed",
    "packed",
    "sifted",
    "cut",
    "torn",
];

/// Nouns the `-ly` adverb rule would otherwise misclassify.
const LY_NOUNS: &[&str] = &["jelly", "belly", "lily"];

impl ChunkSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn is_boundary(token: &str) -> bool {
        let lower = token.to_ascii_lowercase();
        if CONNECTOR_WORDS.contains(&lower.as_str()) || PREPARATION_VERBS.contains(&lower.as_str())
        {
            return true;
        }
        lower.len() > 3 && lower.ends_with("ly") && !LY_NOUNS.contains(&lower.as_str())
    }
}

impl PhraseSegmenter for ChunkSegmenter {
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        for span in text.split(['.', ',', ';', ':', '(', ')', '!', '?']) {
            let mut run: Vec<&str> = Vec::new();
            for token in TOKEN_RE.find_iter(span).map(|m| m.as_str()) {
                if Self::is_boundary(token) {
                    flush_run(&mut run, &mut phrases);
                } else {
                    run.push(token);
                }
            }
            flush_run(&mut run, &mut phrases);
        }
        phrases
    }
}

fn flush_run(run: &mut Vec<&str>, phrases: &mut Vec<String>) {
    // A phrase needs at least one word; a lone quantity is discarded
    if run
        .iter()
        .any(|t| t.chars().any(|c| c.is_ascii_alphabetic()))
    {
        phrases.push(run.join(" "));
    }
    run.clear();
}
