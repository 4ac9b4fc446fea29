use std::collections::HashSet;

use crate::error::{PipelineResult, RepetitionError};
use crate::models::{ClassifiedNGrams, NGram, NGramClass, Perspective, RepetitionResult, Speaker};

use super::Register;

/// Register n-grams available for repetition, by perspective and class
#[derive(Debug, Default)]
struct Available<'a> {
    sets: [[HashSet<&'a NGram>; 3]; 2],
}

impl<'a> Available<'a> {
    /// Partition the register relative to `speaker`, classifying at lookup time
    fn from_register(speaker: Speaker, register: &'a Register, n: usize) -> PipelineResult<Self> {
        let mut available = Self::default();

        for (owner, ngrams) in register.iter() {
            let perspective = if owner == speaker {
                Perspective::SelfRepetition
            } else {
                Perspective::OtherRepetition
            };
            for ngram in ngrams {
                check_width(ngram, n)?;
                let bucket = &mut available.sets[perspective.index()];
                bucket[NGramClass::All.index()].insert(ngram);
                bucket[ngram.class().index()].insert(ngram);
            }
        }

        Ok(available)
    }

    fn get(&self, perspective: Perspective, class: NGramClass) -> &HashSet<&'a NGram> {
        &self.sets[perspective.index()][class.index()]
    }
}

fn check_width(ngram: &NGram, n: usize) -> PipelineResult<()> {
    if ngram.len() != n {
        return Err(RepetitionError::NGramLengthMismatch {
            expected: n,
            found: ngram.len(),
        });
    }
    Ok(())
}

/// Count a turn's self- and other-repetitions against the register.
///
/// Pure: the register is only read. Turn n-grams count with multiplicity,
/// register n-grams as a set. The Jaccard index keeps the historical
/// formula `repeated / (distinct_available + turn_len - repeated)`, which
/// can exceed 1 when a turn repeats the same n-gram several times.
pub fn count_repetitions(
    speaker: Speaker,
    turn: &ClassifiedNGrams,
    register: &Register,
    n: usize,
) -> PipelineResult<RepetitionResult> {
    for ngram in &turn.all {
        check_width(ngram, n)?;
    }
    let available = Available::from_register(speaker, register, n)?;

    let mut result = RepetitionResult::default();
    for class in NGramClass::ALL {
        let turn_ngrams = turn.get(class);
        for perspective in Perspective::ALL {
            let pool = available.get(perspective, class);

            let matched: Vec<NGram> = turn_ngrams
                .iter()
                .filter(|ngram| pool.contains(ngram))
                .cloned()
                .collect();
            let matched_distinct: HashSet<&NGram> = matched.iter().collect();

            let repeated = matched.len();
            let nonrepeated = pool
                .iter()
                .filter(|ngram| !matched_distinct.contains(*ngram))
                .count();
            let denominator = pool.len() + turn_ngrams.len() - repeated;
            let jaccard_index = if denominator == 0 {
                0.0
            } else {
                repeated as f64 / denominator as f64
            };

            let counts = result.get_mut(perspective, class);
            counts.repeated_count = repeated;
            counts.nonrepeated_count = nonrepeated;
            counts.jaccard_index = jaccard_index;
            counts.turn_ngram_count = turn_ngrams.len();
            counts.matched_ngrams = matched;
        }
    }

    Ok(result)
}
