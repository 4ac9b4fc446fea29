use serde::Serialize;

use super::{NGram, NGramClass};

/// Whose previous turn a repetition is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Perspective {
    /// The speaker's own previous turn
    SelfRepetition,
    /// The other speakers' previous turns
    OtherRepetition,
}

impl Perspective {
    pub const ALL: [Perspective; 2] = [Self::SelfRepetition, Self::OtherRepetition];

    pub fn column_tag(&self) -> &'static str {
        match self {
            Self::SelfRepetition => "self",
            Self::OtherRepetition => "other",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::SelfRepetition => 0,
            Self::OtherRepetition => 1,
        }
    }
}

/// Output metrics, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    Repeated,
    Nonrepeated,
    Length,
    JaccardIndex,
    /// The matched n-grams themselves
    Repetition,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Self::Repeated,
        Self::Nonrepeated,
        Self::Length,
        Self::JaccardIndex,
        Self::Repetition,
    ];

    pub fn column_tag(&self) -> &'static str {
        match self {
            Self::Repeated => "repeated",
            Self::Nonrepeated => "nonrepeated",
            Self::Length => "length",
            Self::JaccardIndex => "jaccard_index",
            Self::Repetition => "repetition",
        }
    }

    /// Whether Middle/End lines inherit this metric from the line above
    pub fn is_forward_filled(&self) -> bool {
        !matches!(self, Self::Repetition)
    }
}

/// Counts for one (perspective, class) pair of one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepetitionCounts {
    /// Turn n-grams found in the register, with multiplicity
    pub repeated_count: usize,
    /// Distinct register n-grams the turn did not repeat
    pub nonrepeated_count: usize,
    pub jaccard_index: f64,
    /// Number of turn n-grams in this class
    pub turn_ngram_count: usize,
    /// Turn n-grams counted as repeated, in turn order
    pub matched_ngrams: Vec<NGram>,
}

/// Repetition counts of one turn for one n, by perspective and class
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepetitionResult {
    cells: [[RepetitionCounts; 3]; 2],
}

impl RepetitionResult {
    pub fn get(&self, perspective: Perspective, class: NGramClass) -> &RepetitionCounts {
        &self.cells[perspective.index()][class.index()]
    }

    pub fn get_mut(&mut self, perspective: Perspective, class: NGramClass) -> &mut RepetitionCounts {
        &mut self.cells[perspective.index()][class.index()]
    }
}
