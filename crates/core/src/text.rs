//! Lorem-ipsum style filler text.
//!
//! A [`TextGenerator`] owns a pseudorandom generator seeded from OS entropy at construction,
//! so every instance (and every process) produces a different stream. Uniformity matters here,
//! unpredictability does not; secrets are produced elsewhere from the OS RNG directly.

use crate::error::{ensure_range, ToolboxError, ToolboxResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

const MAX_WORDS: usize = 1000;
const MAX_SENTENCE_WORDS: usize = 50;
const MAX_SENTENCES: usize = 100;
const MAX_PARAGRAPH_SENTENCES: usize = 20;
const MAX_PARAGRAPHS: usize = 50;

/// The unit of text requested from [`TextGenerator::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Word,
    Sentence,
    Paragraph,
}

impl TextKind {
    pub const NAMES: &'static [&'static str] = &["word", "sentence", "paragraph"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextKind::Word => "word",
            TextKind::Sentence => "sentence",
            TextKind::Paragraph => "paragraph",
        }
    }
}

impl FromStr for TextKind {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(TextKind::Word),
            "sentence" => Ok(TextKind::Sentence),
            "paragraph" => Ok(TextKind::Paragraph),
            _ => Err(ToolboxError::InvalidType {
                provided: s.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

/// Output of [`TextGenerator::generate`].
///
/// Always a sequence; `is_array` tells a boundary layer whether the caller asked for more
/// than one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedText {
    pub items: Vec<String>,
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub count: usize,
    pub is_array: bool,
}

/// Filler-text generator over a fixed vocabulary.
pub struct TextGenerator {
    rng: StdRng,
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGenerator {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    fn word(&mut self) -> &'static str {
        LOREM_WORDS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(LOREM_WORDS[0])
    }

    /// Returns `count` words drawn uniformly (with repetition) from the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::OutOfRange`] unless `1 <= count <= 1000`.
    pub fn words(&mut self, count: usize) -> ToolboxResult<Vec<String>> {
        ensure_range("count", count, 1, MAX_WORDS)?;
        Ok((0..count).map(|_| self.word().to_string()).collect())
    }

    /// Returns one capitalised sentence ending in a period.
    ///
    /// When `word_count` is `None` the length is chosen uniformly from 8 to 15 words.
    pub fn sentence(&mut self, word_count: Option<usize>) -> ToolboxResult<String> {
        let word_count = match word_count {
            Some(n) => {
                ensure_range("word_count", n, 1, MAX_SENTENCE_WORDS)?;
                n
            }
            None => self.rng.gen_range(8..=15),
        };

        let joined = self.words(word_count)?.join(" ");
        let mut chars = joined.chars();
        let mut sentence = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        sentence.push('.');
        Ok(sentence)
    }

    /// Returns `count` independently generated sentences.
    pub fn sentences(&mut self, count: usize) -> ToolboxResult<Vec<String>> {
        ensure_range("count", count, 1, MAX_SENTENCES)?;
        (0..count).map(|_| self.sentence(None)).collect()
    }

    /// Returns one paragraph of sentences joined by single spaces.
    ///
    /// When `sentence_count` is `None` it is chosen uniformly from 4 to 8.
    pub fn paragraph(&mut self, sentence_count: Option<usize>) -> ToolboxResult<String> {
        let sentence_count = match sentence_count {
            Some(n) => {
                ensure_range("sentence_count", n, 1, MAX_PARAGRAPH_SENTENCES)?;
                n
            }
            None => self.rng.gen_range(4..=8),
        };

        Ok(self.sentences(sentence_count)?.join(" "))
    }

    /// Returns `count` independently generated paragraphs.
    pub fn paragraphs(&mut self, count: usize) -> ToolboxResult<Vec<String>> {
        ensure_range("count", count, 1, MAX_PARAGRAPHS)?;
        (0..count).map(|_| self.paragraph(None)).collect()
    }

    /// Dispatches to the word/sentence/paragraph variant for `kind`.
    pub fn generate(&mut self, kind: TextKind, count: usize) -> ToolboxResult<GeneratedText> {
        tracing::debug!(kind = kind.as_str(), count, "generating text");

        let items = match kind {
            TextKind::Word => self.words(count)?,
            TextKind::Sentence => self.sentences(count)?,
            TextKind::Paragraph => self.paragraphs(count)?,
        };

        Ok(GeneratedText {
            items,
            kind,
            count,
            is_array: count > 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_come_from_vocabulary() {
        let mut generator = TextGenerator::new();
        let words = generator.words(50).unwrap();

        assert_eq!(words.len(), 50);
        assert!(words.iter().all(|w| LOREM_WORDS.contains(&w.as_str())));
    }

    #[test]
    fn words_rejects_out_of_range_counts() {
        let mut generator = TextGenerator::new();
        assert!(matches!(
            generator.words(0),
            Err(ToolboxError::OutOfRange { .. })
        ));
        assert!(generator.words(1001).is_err());
        assert!(generator.words(1000).is_ok());
    }

    #[test]
    fn sentence_is_capitalised_and_terminated() {
        let mut generator = TextGenerator::new();
        let sentence = generator.sentence(Some(5)).unwrap();

        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_uppercase());
        assert_eq!(sentence.trim_end_matches('.').split(' ').count(), 5);
    }

    #[test]
    fn default_sentence_length_is_between_8_and_15_words() {
        let mut generator = TextGenerator::new();
        for _ in 0..20 {
            let sentence = generator.sentence(None).unwrap();
            let n = sentence.split(' ').count();
            assert!((8..=15).contains(&n), "unexpected word count {n}");
        }
    }

    #[test]
    fn sentence_word_count_is_bounded() {
        let mut generator = TextGenerator::new();
        assert!(generator.sentence(Some(0)).is_err());
        assert!(generator.sentence(Some(51)).is_err());
    }

    #[test]
    fn paragraph_joins_requested_sentences() {
        let mut generator = TextGenerator::new();
        let paragraph = generator.paragraph(Some(3)).unwrap();

        assert_eq!(paragraph.matches('.').count(), 3);
        assert!(generator.paragraph(Some(21)).is_err());
    }

    #[test]
    fn paragraphs_and_sentences_are_bounded() {
        let mut generator = TextGenerator::new();
        assert!(generator.paragraphs(51).is_err());
        assert!(generator.sentences(101).is_err());
        assert_eq!(generator.paragraphs(2).unwrap().len(), 2);
    }

    #[test]
    fn generate_reports_single_versus_array() {
        let mut generator = TextGenerator::new();

        let single = generator.generate(TextKind::Word, 1).unwrap();
        assert_eq!(single.items.len(), 1);
        assert!(!single.is_array);

        let many = generator.generate(TextKind::Sentence, 3).unwrap();
        assert_eq!(many.items.len(), 3);
        assert!(many.is_array);
    }

    #[test]
    fn generate_bounds_depend_on_kind() {
        let mut generator = TextGenerator::new();

        assert!(generator.generate(TextKind::Paragraph, 51).is_err());
        assert!(generator.generate(TextKind::Word, 1001).is_err());
        assert_eq!(
            generator.generate(TextKind::Paragraph, 50).unwrap().items.len(),
            50
        );
    }

    #[test]
    fn kind_parsing_normalises_and_rejects_unknown() {
        assert_eq!(" Paragraph ".parse::<TextKind>().unwrap(), TextKind::Paragraph);

        let err = "poem".parse::<TextKind>().unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InvalidType);
    }
}
