//! Text Normalizer: raw text to an ordered sequence of lemma tokens.
//!
//! `AppState` holds an `Arc<dyn TextNormalizer>`; tests swap in a stub.

use serde::Serialize;

use crate::analysis::catalog::SkillCatalog;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::stopwords::StopWords;

/// Ordered, normalized, lowercase alphabetic tokens. Not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens joined by single spaces, in order. Used for phrase containment.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl From<Vec<&str>> for TokenSequence {
    fn from(tokens: Vec<&str>) -> Self {
        Self(tokens.into_iter().map(String::from).collect())
    }
}

pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> TokenSequence;
}

/// Lowercases and replaces every character outside `a-z` and whitespace with a space,
/// so words never fuse across a removed separator ("node.js" -> "node js").
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Default normalizer: cleaning, stopword filtering and rule-based lemmatization.
#[derive(Debug, Clone, Default)]
pub struct LexicalNormalizer {
    stopwords: StopWords,
    lemmatizer: Lemmatizer,
}

impl LexicalNormalizer {
    pub fn new(stopwords: StopWords, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// English normalizer whose lemmatizer leaves catalog words alone
    /// ("learning" stays "learning"). Stopwords are still dropped.
    pub fn for_catalogs(catalogs: &[&SkillCatalog]) -> Self {
        Self {
            stopwords: StopWords::english(),
            lemmatizer: Lemmatizer::english()
                .protecting(catalogs.iter().flat_map(|c| c.words())),
        }
    }
}

impl TextNormalizer for LexicalNormalizer {
    fn normalize(&self, text: &str) -> TokenSequence {
        let cleaned = clean_text(text);
        let tokens = cleaned
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            .filter(|lemma| !lemma.trim().is_empty() && !self.stopwords.contains(lemma))
            .collect();
        TokenSequence(tokens)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deterministic stand-in: cleans and splits, no stopwords or lemmas.
    pub(crate) struct WhitespaceNormalizer;

    impl TextNormalizer for WhitespaceNormalizer {
        fn normalize(&self, text: &str) -> TokenSequence {
            TokenSequence(
                clean_text(text)
                    .split_whitespace()
                    .map(String::from)
                    .collect(),
            )
        }
    }

    #[test]
    fn test_clean_text_replaces_symbols_with_spaces() {
        assert_eq!(clean_text("Node.js, C++ & SQL2"), "node js  c     sql ");
    }

    #[test]
    fn test_resume_sentence_normalizes() {
        let normalizer = LexicalNormalizer::default();
        let tokens =
            normalizer.normalize("I know Python and SQL, and I have strong communication skills.");
        assert_eq!(
            tokens.as_slice(),
            &["know", "python", "sql", "communication", "skill"]
        );
    }

    #[test]
    fn test_empty_and_non_alphabetic_input_yield_no_tokens() {
        let normalizer = LexicalNormalizer::default();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("123 -- 4.56 !!").is_empty());
        assert!(normalizer.normalize("the and of").is_empty());
    }

    #[test]
    fn test_source_order_and_repeats_are_kept() {
        let normalizer = LexicalNormalizer::default();
        let tokens = normalizer.normalize("rust python rust");
        assert_eq!(tokens.as_slice(), &["rust", "python", "rust"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = LexicalNormalizer::default();
        let text = "Led cross-functional teams building distributed systems; \
                    managed deployments, mentored engineers and wrote 3 technical reports.";
        let once = normalizer.normalize(text);
        let twice = normalizer.normalize(&once.joined());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_catalog_words_survive_normalization() {
        let catalog = SkillCatalog::from_phrases(["machine learning", "problem solving"]);
        let normalizer = LexicalNormalizer::for_catalogs(&[&catalog]);
        let tokens = normalizer.normalize("Developer into Machine Learning and problem solving");
        assert_eq!(
            tokens.as_slice(),
            &["developer", "machine", "learning", "problem", "solving"]
        );
    }

    #[test]
    fn test_catalog_words_that_are_stopwords_are_still_dropped() {
        let catalog = SkillCatalog::from_phrases(["go", "golang"]);
        let normalizer = LexicalNormalizer::for_catalogs(&[&catalog]);
        let tokens = normalizer.normalize("Happy to go the extra mile with Golang");
        assert_eq!(tokens.as_slice(), &["happy", "extra", "mile", "golang"]);
    }

    #[test]
    fn test_custom_stopwords_are_filtered() {
        let normalizer = LexicalNormalizer::new(
            StopWords::english().with_extra(["synergy"]),
            Lemmatizer::english(),
        );
        let tokens = normalizer.normalize("Synergy across SQL pipelines");
        assert_eq!(tokens.as_slice(), &["sql", "pipeline"]);
    }

    #[test]
    fn test_stub_normalizer_is_deterministic() {
        let tokens = WhitespaceNormalizer.normalize("Deep Learning!");
        assert_eq!(tokens.as_slice(), &["deep", "learning"]);
    }
}
