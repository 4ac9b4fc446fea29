use tracing::debug;

use crate::models::{Speaker, Token, TurnTable};
use crate::repetition::TurnAnalyzer;
use crate::tagger::Tagger;

/// Tokens of every BEGIN turn, tagged once and shared by all n-gram passes
#[derive(Debug, Clone, Default)]
pub struct TaggedTable {
    /// Per line, per speaker (`Speaker::index`); `None` when no turn begins
    pub turns: Vec<[Option<Vec<Token>>; 3]>,
    /// Number of BEGIN turns tagged
    pub begin_turns: usize,
    /// Sentence spans the tagger could not analyze
    pub skipped_spans: usize,
}

impl TaggedTable {
    pub fn tokens(&self, row: usize, speaker: Speaker) -> Option<&[Token]> {
        self.turns
            .get(row)
            .and_then(|line| line[speaker.index()].as_deref())
    }
}

/// Execute Stage 0: tag the text of every BEGIN turn.
///
/// Tagging failures are absorbed here; an unanalyzable turn simply has no
/// tokens.
pub fn execute_stage0<T: Tagger>(table: &TurnTable, analyzer: &TurnAnalyzer<T>) -> TaggedTable {
    let mut tagged = TaggedTable::default();

    for (row, record) in table.records.iter().enumerate() {
        let line = Speaker::ALL.map(|speaker| {
            let text = record.cell(speaker).begin_text()?;
            let turn = analyzer.tokenize(text);
            if turn.tokens.is_empty() {
                debug!("Row {} {}: turn has no analyzable tokens", row, speaker);
            }
            tagged.begin_turns += 1;
            tagged.skipped_spans += turn.skipped_spans;
            Some(turn.tokens)
        });
        tagged.turns.push(line);
    }

    tagged
}
