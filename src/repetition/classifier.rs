use tracing::debug;

use crate::error::{PipelineResult, RepetitionError};
use crate::models::{ClassifiedNGrams, NGram, Token, INTERJECTION_TAG};
use crate::tagger::{split_sentences, Tagger};

/// Tokens forced to the interjection tag regardless of the tagger's opinion
#[derive(Debug, Clone)]
pub struct TokenOverrides {
    /// Whole-token laughter markers
    pub laughter_markers: Vec<String>,
    /// Prefixes marking hesitations ("mhm", "hmm", "uhm...")
    pub hesitation_prefixes: Vec<String>,
}

impl Default for TokenOverrides {
    fn default() -> Self {
        Self {
            laughter_markers: vec!["laugh".to_string()],
            hesitation_prefixes: vec!["mh".to_string(), "hm".to_string(), "uhm".to_string()],
        }
    }
}

impl TokenOverrides {
    pub fn is_forced_interjection(&self, text: &str) -> bool {
        self.laughter_markers.iter().any(|m| text == m)
            || self.hesitation_prefixes.iter().any(|p| text.starts_with(p.as_str()))
    }

    /// Build a token, applying the overrides before classification
    pub fn token(&self, text: String, pos_tag: String) -> Token {
        if self.is_forced_interjection(&text) {
            Token::new(text, INTERJECTION_TAG)
        } else {
            Token::new(text, pos_tag)
        }
    }
}

/// Tokens of one turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnTokens {
    pub tokens: Vec<Token>,
    /// Non-empty spans the tagger could not analyze
    pub skipped_spans: usize,
}

/// Turns raw turn text into classified n-grams with an explicit tagger
#[derive(Debug, Clone)]
pub struct TurnAnalyzer<T> {
    tagger: T,
    overrides: TokenOverrides,
}

impl<T: Tagger> TurnAnalyzer<T> {
    pub fn new(tagger: T, overrides: TokenOverrides) -> Self {
        Self { tagger, overrides }
    }

    /// Split into sentences, tag each, and concatenate the tokens.
    ///
    /// Sentence boundaries do not break the token sequence.
    pub fn tokenize(&self, text: &str) -> TurnTokens {
        let mut turn = TurnTokens::default();

        for span in split_sentences(text) {
            if span.trim().is_empty() {
                continue;
            }
            let tagged = self.tagger.tag(span);
            if !tagged.analyzed {
                debug!("Skipping unanalyzable span {:?}", span);
                turn.skipped_spans += 1;
                continue;
            }
            turn.tokens.extend(
                tagged
                    .tokens
                    .into_iter()
                    .map(|(text, pos)| self.overrides.token(text, pos)),
            );
        }

        turn
    }

    /// Tokenize a turn and slide an n-wide window over it
    pub fn classify(&self, text: &str, n: usize) -> PipelineResult<ClassifiedNGrams> {
        build_ngrams(&self.tokenize(text).tokens, n)
    }
}

/// Slide a window of width `n` across the tokens.
///
/// Fewer than `n` tokens yields three empty lists.
pub fn build_ngrams(tokens: &[Token], n: usize) -> PipelineResult<ClassifiedNGrams> {
    if n == 0 {
        return Err(RepetitionError::InvalidNGramSize(n));
    }

    let mut grams = ClassifiedNGrams::default();
    for window in tokens.windows(n) {
        grams.push(NGram::new(window.to_vec()));
    }
    Ok(grams)
}
