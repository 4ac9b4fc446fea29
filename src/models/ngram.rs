use std::fmt;

use serde::{Deserialize, Serialize};

use super::Token;

/// An ordered, fixed-width run of tokens, compared by value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NGram(Vec<Token>);

impl NGram {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// Width of the n-gram
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Open-class iff any constituent token is open
    pub fn class(&self) -> NGramClass {
        if self.0.iter().any(Token::is_open) {
            NGramClass::OpenClass
        } else {
            NGramClass::ClosedClass
        }
    }
}

impl fmt::Display for NGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.0.iter().map(|t| t.text.as_str()).collect();
        write!(f, "{}", words.join(" "))
    }
}

/// N-gram category: every n-gram is in `All` and in exactly one of the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NGramClass {
    All,
    OpenClass,
    ClosedClass,
}

impl NGramClass {
    pub const ALL: [NGramClass; 3] = [Self::All, Self::OpenClass, Self::ClosedClass];

    /// Tag used in output column names
    pub fn column_tag(&self) -> &'static str {
        match self {
            Self::All => "",
            Self::OpenClass => "OC",
            Self::ClosedClass => "CC",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::All => 0,
            Self::OpenClass => 1,
            Self::ClosedClass => 2,
        }
    }
}

/// A turn's n-grams split into the three parallel category lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedNGrams {
    /// Every n-gram in turn order
    pub all: Vec<NGram>,
    /// N-grams with at least one open-class token
    pub open_class: Vec<NGram>,
    /// N-grams made only of closed-class tokens
    pub closed_class: Vec<NGram>,
}

impl ClassifiedNGrams {
    /// Append an n-gram to `all` and to its open/closed list
    pub fn push(&mut self, ngram: NGram) {
        match ngram.class() {
            NGramClass::OpenClass => self.open_class.push(ngram.clone()),
            _ => self.closed_class.push(ngram.clone()),
        }
        self.all.push(ngram);
    }

    pub fn get(&self, class: NGramClass) -> &[NGram] {
        match class {
            NGramClass::All => &self.all,
            NGramClass::OpenClass => &self.open_class,
            NGramClass::ClosedClass => &self.closed_class,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
