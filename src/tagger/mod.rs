//! Tagger adapter: the boundary to part-of-speech tagging.
//!
//! Any tagger that maps one sentence to `(text, POS)` pairs can drive the
//! pipeline. [`LexiconTagger`] is the built-in deterministic implementation.

pub mod lexicon;
pub mod tokenizer;

pub use lexicon::*;
pub use tokenizer::*;

/// Tagger output for one sentence-like span
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedSentence {
    /// `(token text, POS tag)` pairs in order
    pub tokens: Vec<(String, String)>,
    /// False when the span could not be analyzed; such spans contribute no tokens
    pub analyzed: bool,
}

impl TaggedSentence {
    pub fn analyzed(tokens: Vec<(String, String)>) -> Self {
        Self {
            tokens,
            analyzed: true,
        }
    }

    pub fn unanalyzed() -> Self {
        Self::default()
    }
}

/// Part-of-speech tagging capability, constructed once per run
pub trait Tagger {
    fn tag(&self, sentence: &str) -> TaggedSentence;
}

impl<F> Tagger for F
where
    F: Fn(&str) -> TaggedSentence,
{
    fn tag(&self, sentence: &str) -> TaggedSentence {
        self(sentence)
    }
}
