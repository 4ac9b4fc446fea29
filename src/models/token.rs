use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RepetitionError;

/// POS tags that make a token open-class (content word)
pub const OPEN_CLASS_TAGS: [&str; 5] = ["NOUN", "VERB", "ADJ", "ADV", "PROPN"];

/// Tag forced onto laughter and hesitation tokens
pub const INTERJECTION_TAG: &str = "INTJ";

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    /// Content word: noun, verb, adjective, adverb, proper noun
    Open,
    /// Function word, interjection, punctuation and everything else
    Closed,
}

impl WordClass {
    /// Classify a part-of-speech tag
    pub fn from_pos(pos_tag: &str) -> Self {
        if OPEN_CLASS_TAGS.contains(&pos_tag) {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(other.to_string()),
        }
    }
}

/// A tagged word of a turn: surface form, POS tag and derived word class.
///
/// Serialized as a `[text, pos_tag, word_class]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "(String, String, WordClass)", try_from = "(String, String, String)")]
pub struct Token {
    /// Lowercased surface form
    pub text: String,
    /// Part-of-speech tag (Universal POS)
    pub pos_tag: String,
    /// Open/closed class, always consistent with `pos_tag`
    pub word_class: WordClass,
}

impl Token {
    /// Create a token, deriving the word class from the tag
    pub fn new(text: impl Into<String>, pos_tag: impl Into<String>) -> Self {
        let pos_tag = pos_tag.into();
        let word_class = WordClass::from_pos(&pos_tag);
        Self {
            text: text.into(),
            pos_tag,
            word_class,
        }
    }

    /// Rebuild a token from a stored `(text, pos, class)` triple.
    ///
    /// Fails with `SchemaViolation` when the class label is not open/closed.
    pub fn from_triple(text: &str, pos_tag: &str, class: &str) -> Result<Self, RepetitionError> {
        let word_class = class
            .parse::<WordClass>()
            .map_err(|class| RepetitionError::SchemaViolation {
                token: text.to_string(),
                class,
            })?;
        Ok(Self {
            text: text.to_string(),
            pos_tag: pos_tag.to_string(),
            word_class,
        })
    }

    pub fn is_open(&self) -> bool {
        self.word_class == WordClass::Open
    }
}

impl From<Token> for (String, String, WordClass) {
    fn from(token: Token) -> Self {
        (token.text, token.pos_tag, token.word_class)
    }
}

impl TryFrom<(String, String, String)> for Token {
    type Error = RepetitionError;

    fn try_from((text, pos, class): (String, String, String)) -> Result<Self, Self::Error> {
        Token::from_triple(&text, &pos, &class)
    }
}
