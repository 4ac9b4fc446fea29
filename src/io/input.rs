use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{PipelineResult, RepetitionError};
use crate::models::{BmeCode, Speaker, SpeakerCell, TurnRecord, TurnTable};

/// Column layout of the input table
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Conversation identifier column
    pub conversation_column: String,
    /// Prefix of the per-speaker BME code columns (suffixed with the speaker tag)
    pub bme_prefix: String,
    /// Prefix of the per-speaker turn text columns
    pub text_prefix: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            conversation_column: "Conv_MOD_P1_P2".to_string(),
            bme_prefix: "BME_Turn_".to_string(),
            text_prefix: "Tag_Turn_".to_string(),
        }
    }
}

impl TableSchema {
    pub fn bme_column(&self, speaker: Speaker) -> String {
        format!("{}{}", self.bme_prefix, speaker.column_tag())
    }

    pub fn text_column(&self, speaker: Speaker) -> String {
        format!("{}{}", self.text_prefix, speaker.column_tag())
    }
}

/// Column positions resolved against a header row
struct ColumnIndex {
    conversation: usize,
    bme: [usize; 3],
    text: [usize; 3],
}

impl ColumnIndex {
    fn resolve(headers: &[String], schema: &TableSchema) -> PipelineResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| RepetitionError::MissingColumn(name.to_string()))
        };

        let mut bme = [0; 3];
        let mut text = [0; 3];
        for speaker in Speaker::ALL {
            bme[speaker.index()] = find(&schema.bme_column(speaker))?;
            text[speaker.index()] = find(&schema.text_column(speaker))?;
        }

        Ok(Self {
            conversation: find(&schema.conversation_column)?,
            bme,
            text,
        })
    }
}

/// Read an input CSV file into a TurnTable
pub fn read_turn_table(path: &Path, schema: &TableSchema) -> Result<TurnTable> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_turn_table(file, schema).with_context(|| format!("Failed to parse input table {:?}", path))
}

/// Parse CSV data with a header row into a TurnTable
pub fn parse_turn_table<R: Read>(reader: R, schema: &TableSchema) -> PipelineResult<TurnTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let index = ColumnIndex::resolve(&headers, schema)?;

    let mut raw_rows = Vec::new();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or_default();

        let speakers = Speaker::ALL.map(|speaker| SpeakerCell {
            bme: BmeCode::parse(cell(index.bme[speaker.index()])),
            text: cell(index.text[speaker.index()]).to_string(),
        });
        records.push(TurnRecord {
            conversation: cell(index.conversation).to_string(),
            speakers,
        });
        raw_rows.push(row.iter().map(str::to_string).collect());
    }

    Ok(TurnTable {
        headers,
        raw_rows,
        records,
    })
}
