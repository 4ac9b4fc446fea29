pub mod stage0_tag;
pub mod stage1_count;
pub mod stage2_fill;
pub mod stage3_render;

pub use stage0_tag::*;
pub use stage1_count::*;
pub use stage2_fill::*;
pub use stage3_render::*;

use tracing::info;

use crate::error::PipelineResult;
use crate::io::MetricTable;
use crate::models::TurnTable;
use crate::repetition::TurnAnalyzer;
use crate::tagger::Tagger;

/// Configuration for a whole batch run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// N-gram sizes, each run as an independent pass
    pub ngram_sizes: Vec<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ngram_sizes: vec![1, 2, 3],
        }
    }
}

/// Counters collected over a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Input lines
    pub rows: usize,
    /// Conversations, counted as consecutive runs of one id
    pub conversations: usize,
    /// BEGIN turns tagged (once, shared by every pass)
    pub begin_turns: usize,
    /// Sentence spans the tagger could not analyze
    pub skipped_spans: usize,
    /// Register resets per n-gram size
    pub register_resets: Vec<(usize, usize)>,
}

/// Everything a batch run produces before rendering
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub metrics: MetricTable,
    pub stats: BatchStats,
    pub fill_report: FillReport,
}

/// Run stages 0-2: tag, count for every n, then forward-fill
pub fn run_pipeline<T: Tagger>(
    table: &TurnTable,
    analyzer: &TurnAnalyzer<T>,
    config: &PipelineConfig,
) -> PipelineResult<PipelineOutput> {
    info!("Stage 0: Tagging {} rows...", table.len());
    let tagged = execute_stage0(table, analyzer);

    let mut stats = BatchStats {
        rows: table.len(),
        conversations: table.conversation_count(),
        begin_turns: tagged.begin_turns,
        skipped_spans: tagged.skipped_spans,
        register_resets: Vec::new(),
    };

    let mut metrics = MetricTable::new(table.len());
    for &n in &config.ngram_sizes {
        info!("Stage 1: Counting repetitions for n={}...", n);
        let pass = execute_stage1(table, &tagged, n)?;
        stats.register_resets.push((pass.n, pass.register_resets));
        metrics.insert_pass(pass.n, &pass.results);
    }

    info!("Stage 2: Forward-filling Middle/End lines...");
    let fill_report = execute_stage2(table, &mut metrics);

    Ok(PipelineOutput {
        metrics,
        stats,
        fill_report,
    })
}
