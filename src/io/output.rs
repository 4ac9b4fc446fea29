use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PipelineResult;
use crate::models::{Metric, NGram, NGramClass, Perspective, RepetitionResult, Speaker, TurnTable};

/// Rendering of an unfillable Middle/End cell (read as missing by pandas and R)
pub const UNFILLABLE: &str = "NA";

/// One output cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No turn for this speaker on this line
    Empty,
    /// Repeated, nonrepeated or length count
    Count(usize),
    /// Jaccard index
    Index(f64),
    /// Matched n-grams, written as JSON
    NGrams(Vec<NGram>),
    /// Middle/End line with no Beginning line to inherit from
    Unfillable,
}

impl Cell {
    /// Text written to the CSV
    pub fn render(&self) -> PipelineResult<String> {
        Ok(match self {
            Self::Empty => String::new(),
            Self::Count(count) => count.to_string(),
            Self::Index(value) => value.to_string(),
            Self::NGrams(ngrams) => serde_json::to_string(ngrams)?,
            Self::Unfillable => UNFILLABLE.to_string(),
        })
    }
}

/// Identifies a metric column; ordering is the output column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub n: usize,
    pub speaker: Speaker,
    pub class: NGramClass,
    pub perspective: Perspective,
    pub metric: Metric,
}

impl ColumnKey {
    /// `<speaker>_<class>_<perspective>_<metric>_<n>n`
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}n",
            self.speaker.column_tag(),
            self.class.column_tag(),
            self.perspective.column_tag(),
            self.metric.column_tag(),
            self.n
        )
    }
}

/// Every metric column of the run, aligned with the input rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    rows: usize,
    columns: BTreeMap<ColumnKey, Vec<Cell>>,
}

impl MetricTable {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Store one pass's per-line results for the given n
    pub fn insert_pass(&mut self, n: usize, results: &[[Option<RepetitionResult>; 3]]) {
        for speaker in Speaker::ALL {
            for class in NGramClass::ALL {
                for perspective in Perspective::ALL {
                    for metric in Metric::ALL {
                        let key = ColumnKey {
                            n,
                            speaker,
                            class,
                            perspective,
                            metric,
                        };
                        let cells = results
                            .iter()
                            .map(|line| {
                                line_cell(line[speaker.index()].as_ref(), class, perspective, metric)
                            })
                            .collect();
                        self.columns.insert(key, cells);
                    }
                }
            }
        }
    }

    pub fn column(&self, key: &ColumnKey) -> Option<&[Cell]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Look up a column by its rendered name
    pub fn column_by_name(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|(key, _)| key.name() == name)
            .map(|(_, cells)| cells.as_slice())
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = (&ColumnKey, &mut Vec<Cell>)> {
        self.columns.iter_mut()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().map(ColumnKey::name).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Cell for one speaker on one line; lines without a turn have zero length
fn line_cell(
    result: Option<&RepetitionResult>,
    class: NGramClass,
    perspective: Perspective,
    metric: Metric,
) -> Cell {
    let Some(result) = result else {
        return match metric {
            Metric::Length => Cell::Count(0),
            _ => Cell::Empty,
        };
    };
    let counts = result.get(perspective, class);
    match metric {
        Metric::Repeated => Cell::Count(counts.repeated_count),
        Metric::Nonrepeated => Cell::Count(counts.nonrepeated_count),
        Metric::Length => Cell::Count(counts.turn_ngram_count),
        Metric::JaccardIndex => Cell::Index(counts.jaccard_index),
        Metric::Repetition => Cell::NGrams(counts.matched_ngrams.clone()),
    }
}

/// Write the input columns followed by every metric column
pub fn write_output<W: Write>(writer: W, table: &TurnTable, metrics: &MetricTable) -> PipelineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = table.headers.clone();
    header.extend(metrics.column_names());
    csv_writer.write_record(&header)?;

    for (row, raw) in table.raw_rows.iter().enumerate() {
        let mut record = raw.clone();
        for cells in metrics.columns.values() {
            record.push(cells[row].render()?);
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the output table to a CSV file
pub fn write_output_file(path: &Path, table: &TurnTable, metrics: &MetricTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    write_output(file, table, metrics).context("Failed to write output table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    #[test]
    fn test_column_names() {
        let key = ColumnKey {
            n: 1,
            speaker: Speaker::Participant1,
            class: NGramClass::All,
            perspective: Perspective::SelfRepetition,
            metric: Metric::Repeated,
        };
        assert_eq!(key.name(), "P1__self_repeated_1n");

        let key = ColumnKey {
            n: 2,
            speaker: Speaker::Moderator,
            class: NGramClass::OpenClass,
            perspective: Perspective::OtherRepetition,
            metric: Metric::JaccardIndex,
        };
        assert_eq!(key.name(), "MOD_OC_other_jaccard_index_2n");
    }

    #[test]
    fn test_render_cells() {
        assert_eq!(Cell::Empty.render().unwrap(), "");
        assert_eq!(Cell::Count(3).render().unwrap(), "3");
        assert_eq!(Cell::Index(0.5).render().unwrap(), "0.5");
        assert_eq!(Cell::Unfillable.render().unwrap(), "NA");

        let ngrams = vec![NGram::new(vec![Token::new("the", "DET"), Token::new("cat", "NOUN")])];
        assert_eq!(
            Cell::NGrams(ngrams).render().unwrap(),
            r#"[[["the","DET","closed"],["cat","NOUN","open"]]]"#
        );
    }

    #[test]
    fn test_column_order() {
        let mut metrics = MetricTable::new(1);
        metrics.insert_pass(2, &[[None, None, None]]);
        metrics.insert_pass(1, &[[None, None, None]]);

        let names = metrics.column_names();
        assert_eq!(names.len(), 2 * 3 * 3 * 2 * 5);
        assert_eq!(names[0], "MOD__self_repeated_1n");
        assert_eq!(names[1], "MOD__self_nonrepeated_1n");
        assert_eq!(names[4], "MOD__self_repetition_1n");
        assert_eq!(names[5], "MOD__other_repeated_1n");
        assert_eq!(names[10], "MOD_OC_self_repeated_1n");
        assert_eq!(names[90], "MOD__self_repeated_2n");
    }

    #[test]
    fn test_lines_without_turn() {
        let mut metrics = MetricTable::new(1);
        metrics.insert_pass(1, &[[None, None, None]]);

        assert_eq!(metrics.column_by_name("P2_CC_other_length_1n").unwrap(), &[Cell::Count(0)]);
        assert_eq!(metrics.column_by_name("P2_CC_other_repeated_1n").unwrap(), &[Cell::Empty]);
    }
}
