pub mod error;
pub mod io;
pub mod models;
pub mod repetition;
pub mod stages;
pub mod tagger;

pub use error::{PipelineResult, RepetitionError};
pub use io::{parse_turn_table, read_turn_table, write_output, write_output_file, MetricTable, TableSchema};
pub use models::{
    BmeCode, ClassifiedNGrams, NGram, NGramClass, Perspective, RepetitionResult, Speaker, Token,
    TurnRecord, TurnTable, WordClass,
};
pub use repetition::{build_ngrams, count_repetitions, Register, TokenOverrides, TurnAnalyzer};
pub use stages::{
    execute_stage0, execute_stage1, execute_stage2, execute_stage3, plan_fill, run_pipeline,
    BatchStats, FillReport, PipelineConfig, PipelineOutput,
};
pub use tagger::{LexiconTagger, TaggedSentence, Tagger};
