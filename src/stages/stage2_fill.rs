use tracing::{info, warn};

use crate::io::{Cell, MetricTable};
use crate::models::{Speaker, TurnTable};

/// What the forward fill does with one speaker's cell on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillAction {
    /// Beginning line or no code: keep the computed value
    Keep,
    /// Middle/End line: take the value of the line above
    CopyPrevious,
    /// Middle/End line with nothing to inherit from
    Unfillable,
}

/// Fill actions per line and speaker
#[derive(Debug, Clone, Default)]
pub struct FillPlan {
    /// Indexed by row, then `Speaker::index`
    pub actions: Vec<[FillAction; 3]>,
}

/// Summary of the forward fill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Speaker cells copied from the line above
    pub filled: usize,
    /// `(row, speaker)` of Middle/End cells with no Beginning line to inherit
    pub unfillable: Vec<(usize, Speaker)>,
}

impl FillPlan {
    pub fn report(&self) -> FillReport {
        let mut report = FillReport::default();
        for (row, line) in self.actions.iter().enumerate() {
            for speaker in Speaker::ALL {
                match line[speaker.index()] {
                    FillAction::Keep => {}
                    FillAction::CopyPrevious => report.filled += 1,
                    FillAction::Unfillable => report.unfillable.push((row, speaker)),
                }
            }
        }
        report
    }
}

/// Decide, per line and speaker, how Middle/End cells are filled.
///
/// A Middle/End cell copies the line above unless it is the first row or
/// its speaker has no Beginning line earlier in the same conversation.
pub fn plan_fill(table: &TurnTable) -> FillPlan {
    let mut actions = Vec::with_capacity(table.len());
    let mut conversation: Option<&str> = None;
    let mut seen_begin = [false; 3];

    for (row, record) in table.records.iter().enumerate() {
        if conversation != Some(record.conversation.as_str()) {
            conversation = Some(record.conversation.as_str());
            seen_begin = [false; 3];
        }

        let line = Speaker::ALL.map(|speaker| match record.bme(speaker) {
            Some(code) if code.is_begin() => {
                seen_begin[speaker.index()] = true;
                FillAction::Keep
            }
            Some(code) if code.is_continuation() => {
                if row == 0 || !seen_begin[speaker.index()] {
                    FillAction::Unfillable
                } else {
                    FillAction::CopyPrevious
                }
            }
            _ => FillAction::Keep,
        });
        actions.push(line);
    }

    FillPlan { actions }
}

/// Execute Stage 2: propagate Beginning-line metrics to Middle/End lines.
///
/// Runs top to bottom so chains of Middle lines read the already-filled
/// value above them. The matched n-gram lists are not propagated.
pub fn execute_stage2(table: &TurnTable, metrics: &mut MetricTable) -> FillReport {
    let plan = plan_fill(table);

    for (key, cells) in metrics.columns_mut() {
        if !key.metric.is_forward_filled() {
            continue;
        }
        for (row, line) in plan.actions.iter().enumerate() {
            match line[key.speaker.index()] {
                FillAction::Keep => {}
                FillAction::CopyPrevious => cells[row] = cells[row - 1].clone(),
                FillAction::Unfillable => cells[row] = Cell::Unfillable,
            }
        }
    }

    let report = plan.report();
    for (row, speaker) in &report.unfillable {
        warn!(
            "Row {} {}: {:?} line has no Beginning line to inherit from",
            row,
            speaker,
            table.records[*row].bme(*speaker)
        );
    }
    info!(
        "Forward fill: {} cells filled, {} unfillable",
        report.filled,
        report.unfillable.len()
    );

    report
}
