use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{write_output_file, MetricTable};
use crate::models::TurnTable;

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Path of the written table
    pub output_path: PathBuf,
    /// Number of metric columns appended to the input columns
    pub metric_columns: usize,
}

/// Execute Stage 3: write the input table augmented with every metric column
pub fn execute_stage3(table: &TurnTable, metrics: &MetricTable, output: &Path) -> Result<Stage3Result> {
    info!(
        "Writing {} rows with {} metric columns to {:?}",
        table.len(),
        metrics.column_count(),
        output
    );
    write_output_file(output, table, metrics)?;

    Ok(Stage3Result {
        output_path: output.to_path_buf(),
        metric_columns: metrics.column_count(),
    })
}
