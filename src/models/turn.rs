use std::fmt;

use serde::{Deserialize, Serialize};

/// The three conversation roles, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Speaker {
    Moderator,
    Participant1,
    Participant2,
}

impl Speaker {
    pub const ALL: [Speaker; 3] = [Self::Moderator, Self::Participant1, Self::Participant2];

    /// Suffix of the speaker's input columns and prefix of its output columns
    pub fn column_tag(&self) -> &'static str {
        match self {
            Self::Moderator => "MOD",
            Self::Participant1 => "P1",
            Self::Participant2 => "P2",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Moderator => 0,
            Self::Participant1 => 1,
            Self::Participant2 => 2,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_tag())
    }
}

/// BME segmentation code of one speaker on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmeCode {
    BeginSpoken,
    BeginWritten,
    Middle,
    EndSpoken,
    EndWritten,
}

impl BmeCode {
    /// Parse a cell of a BME column; unknown or blank values mean "no code"
    pub fn parse(cell: &str) -> Option<Self> {
        match cell.trim() {
            "B_M" => Some(Self::BeginSpoken),
            "B_W" => Some(Self::BeginWritten),
            "M" => Some(Self::Middle),
            "E_M" => Some(Self::EndSpoken),
            "E_W" => Some(Self::EndWritten),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeginSpoken => "B_M",
            Self::BeginWritten => "B_W",
            Self::Middle => "M",
            Self::EndSpoken => "E_M",
            Self::EndWritten => "E_W",
        }
    }

    /// Beginning lines carry new analyzable text
    pub fn is_begin(&self) -> bool {
        matches!(self, Self::BeginSpoken | Self::BeginWritten)
    }

    /// Middle/End lines inherit their metrics from the line above
    pub fn is_continuation(&self) -> bool {
        !self.is_begin()
    }
}

/// One speaker's slot on an input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerCell {
    /// Segmentation code; `None` when the cell is blank or unrecognised
    pub bme: Option<BmeCode>,
    /// Raw turn text; only meaningful when `bme` is a BEGIN code
    pub text: String,
}

impl SpeakerCell {
    /// Text of a new turn, if this cell opens one
    pub fn begin_text(&self) -> Option<&str> {
        match self.bme {
            Some(code) if code.is_begin() => Some(&self.text),
            _ => None,
        }
    }
}

/// One input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// Conversation id; a change of id resets the register
    pub conversation: String,
    /// Indexed by `Speaker::index`
    pub speakers: [SpeakerCell; 3],
}

impl TurnRecord {
    pub fn cell(&self, speaker: Speaker) -> &SpeakerCell {
        &self.speakers[speaker.index()]
    }

    pub fn bme(&self, speaker: Speaker) -> Option<BmeCode> {
        self.cell(speaker).bme
    }
}

/// Parsed input: the raw CSV rows plus their typed view
#[derive(Debug, Clone)]
pub struct TurnTable {
    /// Input header, copied unchanged into the output
    pub headers: Vec<String>,
    /// Raw input cells per row
    pub raw_rows: Vec<Vec<String>>,
    /// Typed records, one per raw row
    pub records: Vec<TurnRecord>,
}

impl TurnTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of conversations (changes of conversation id between rows)
    pub fn conversation_count(&self) -> usize {
        let mut count = 0;
        let mut current: Option<&str> = None;
        for record in &self.records {
            if current != Some(record.conversation.as_str()) {
                count += 1;
                current = Some(record.conversation.as_str());
            }
        }
        count
    }

    /// Number of BEGIN turns produced by a speaker
    pub fn begin_turns(&self, speaker: Speaker) -> usize {
        self.records
            .iter()
            .filter(|r| r.bme(speaker).is_some_and(|c| c.is_begin()))
            .count()
    }
}
