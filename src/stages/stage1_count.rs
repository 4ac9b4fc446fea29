use tracing::{debug, info};

use crate::error::PipelineResult;
use crate::models::{NGram, RepetitionResult, Speaker, TurnTable};
use crate::repetition::{build_ngrams, count_repetitions, Register};

use super::TaggedTable;

/// Per-line results of one n-gram pass
#[derive(Debug, Clone)]
pub struct CountPass {
    /// N-gram size of this pass
    pub n: usize,
    /// Per line, per speaker; `None` when the speaker has no BEGIN turn
    pub results: Vec<[Option<RepetitionResult>; 3]>,
    /// Times the register was cleared at a conversation boundary
    pub register_resets: usize,
}

/// Execute Stage 1: run the register state machine over the table for one n.
///
/// All speakers beginning a turn on the same line are counted against the
/// register as it stood after the previous line; their updates are applied
/// only once every count for the line is done.
pub fn execute_stage1(table: &TurnTable, tagged: &TaggedTable, n: usize) -> PipelineResult<CountPass> {
    let mut register = Register::new();
    let mut conversation: Option<&str> = None;
    let mut register_resets = 0;
    let mut results = Vec::with_capacity(table.len());

    for (row, record) in table.records.iter().enumerate() {
        if conversation != Some(record.conversation.as_str()) {
            debug!("n={}: conversation {:?} starts at row {}", n, record.conversation, row);
            register.reset();
            register_resets += 1;
            conversation = Some(record.conversation.as_str());
        }

        let mut line: [Option<RepetitionResult>; 3] = Default::default();
        let mut updates: Vec<(Speaker, Vec<NGram>)> = Vec::new();

        for speaker in Speaker::ALL {
            let Some(tokens) = tagged.tokens(row, speaker) else {
                continue;
            };
            let ngrams = build_ngrams(tokens, n).map_err(|e| e.at(row, speaker, n))?;
            let result = count_repetitions(speaker, &ngrams, &register, n)
                .map_err(|e| e.at(row, speaker, n))?;

            line[speaker.index()] = Some(result);
            updates.push((speaker, ngrams.all));
        }

        for (speaker, ngrams) in updates {
            register.update(speaker, &ngrams);
        }
        results.push(line);
    }

    info!(
        "n={}: counted {} lines across {} conversations",
        n,
        results.len(),
        register_resets
    );

    Ok(CountPass {
        n,
        results,
        register_resets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepetitionError;
    use crate::models::{BmeCode, NGramClass, Perspective, SpeakerCell, TurnRecord};
    use crate::repetition::{TokenOverrides, TurnAnalyzer};
    use crate::stages::execute_stage0;
    use crate::tagger::LexiconTagger;

    fn line(conversation: &str, turns: [Option<&str>; 3]) -> TurnRecord {
        TurnRecord {
            conversation: conversation.to_string(),
            speakers: turns.map(|text| match text {
                Some(text) => SpeakerCell {
                    bme: Some(BmeCode::BeginSpoken),
                    text: text.to_string(),
                },
                None => SpeakerCell::default(),
            }),
        }
    }

    fn run(records: Vec<TurnRecord>, n: usize) -> PipelineResult<CountPass> {
        let table = TurnTable {
            headers: vec![],
            raw_rows: vec![],
            records,
        };
        let analyzer = TurnAnalyzer::new(LexiconTagger::new(), TokenOverrides::default());
        let tagged = execute_stage0(&table, &analyzer);
        execute_stage1(&table, &tagged, n)
    }

    fn repeated(pass: &CountPass, row: usize, speaker: Speaker, perspective: Perspective) -> usize {
        pass.results[row][speaker.index()]
            .as_ref()
            .unwrap()
            .get(perspective, NGramClass::All)
            .repeated_count
    }

    #[test]
    fn test_cat_sat_cat_ran() {
        let pass = run(
            vec![
                line("c1", [None, Some("the cat sat"), None]),
                line("c1", [None, None, Some("the cat ran")]),
            ],
            1,
        )
        .unwrap();

        assert_eq!(repeated(&pass, 1, Speaker::Participant2, Perspective::OtherRepetition), 2);
        assert_eq!(repeated(&pass, 1, Speaker::Participant2, Perspective::SelfRepetition), 0);
        assert!(pass.results[1][Speaker::Participant1.index()].is_none());
    }

    #[test]
    fn test_register_isolated_between_conversations() {
        let pass = run(
            vec![
                line("x", [None, Some("hi"), None]),
                line("y", [None, Some("hi"), None]),
            ],
            1,
        )
        .unwrap();

        assert_eq!(repeated(&pass, 1, Speaker::Participant1, Perspective::SelfRepetition), 0);
        assert_eq!(pass.register_resets, 2);
    }

    #[test]
    fn test_same_conversation_self_repetition() {
        let pass = run(
            vec![
                line("x", [None, Some("hi"), None]),
                line("x", [None, Some("hi"), None]),
            ],
            1,
        )
        .unwrap();

        assert_eq!(repeated(&pass, 1, Speaker::Participant1, Perspective::SelfRepetition), 1);
    }

    #[test]
    fn test_replace_not_merge() {
        let pass = run(
            vec![
                line("x", [Some("cat"), None, None]),
                line("x", [Some("dog"), None, None]),
                line("x", [Some("cat"), None, None]),
            ],
            1,
        )
        .unwrap();

        assert_eq!(repeated(&pass, 2, Speaker::Moderator, Perspective::SelfRepetition), 0);
    }

    #[test]
    fn test_turn_shorter_than_n_still_replaces_entry() {
        let pass = run(
            vec![
                line("x", [None, Some("cat sat"), None]),
                line("x", [None, Some("hi"), None]),
                line("x", [None, Some("cat sat"), None]),
            ],
            2,
        )
        .unwrap();

        assert_eq!(repeated(&pass, 2, Speaker::Participant1, Perspective::SelfRepetition), 0);
    }

    #[test]
    fn test_same_line_speakers_see_previous_line_only() {
        let pass = run(
            vec![
                line("x", [Some("hello"), None, None]),
                line("x", [Some("apples"), Some("apples hello"), Some("apples")]),
            ],
            1,
        )
        .unwrap();

        for speaker in [Speaker::Participant1, Speaker::Participant2] {
            let result = pass.results[1][speaker.index()].as_ref().unwrap();
            let other = result.get(Perspective::OtherRepetition, NGramClass::All);
            let matched: Vec<String> = other.matched_ngrams.iter().map(|g| g.to_string()).collect();
            assert!(!matched.contains(&"apples".to_string()));
        }
        assert_eq!(repeated(&pass, 1, Speaker::Participant1, Perspective::OtherRepetition), 1);
    }

    #[test]
    fn test_passes_are_independent() {
        let records = vec![
            line("x", [Some("the big cat"), None, None]),
            line("x", [None, Some("the big dog"), None]),
        ];
        let unigrams = run(records.clone(), 1).unwrap();
        let bigrams = run(records, 2).unwrap();

        assert_eq!(repeated(&unigrams, 1, Speaker::Participant1, Perspective::OtherRepetition), 2);
        assert_eq!(repeated(&bigrams, 1, Speaker::Participant1, Perspective::OtherRepetition), 1);
    }

    #[test]
    fn test_zero_width_reports_location() {
        let err = run(vec![line("x", [None, Some("hi"), None])], 0).unwrap_err();
        match err {
            RepetitionError::Turn { row, speaker, n, .. } => {
                assert_eq!(row, 0);
                assert_eq!(speaker, Speaker::Participant1);
                assert_eq!(n, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
