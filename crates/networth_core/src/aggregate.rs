//! Assembly of the final projection document

use crate::model::{Diagnostic, ProjectionResult, YearRecord};
use crate::simulation_state::{CommittedYear, RunningTotals};

/// Collects year records as the simulator commits them
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    records: Vec<YearRecord>,
}

impl ResultAggregator {
    #[must_use]
    pub fn with_capacity(years: usize) -> Self {
        Self {
            records: Vec::with_capacity(years),
        }
    }

    /// Turn a committed year into a record
    pub fn push(
        &mut self,
        year: u32,
        starting_value: f64,
        committed: CommittedYear,
        totals: RunningTotals,
    ) {
        self.records.push(YearRecord {
            year,
            starting_value,
            values: committed.values,
            contributions: committed.contributions,
            growth: committed.growth,
            total_contribution: totals.contribution,
            total_growth: totals.growth,
            total_value: committed.total_value,
        });
    }

    /// `final_value` is the last year's `total_value`, or zero for an empty run
    #[must_use]
    pub fn finish(self, totals: RunningTotals, diagnostics: Vec<Diagnostic>) -> ProjectionResult {
        let final_value = self.records.last().map_or(0.0, |r| r.total_value);
        ProjectionResult {
            final_value,
            total_contributed: totals.contribution,
            total_growth: totals.growth,
            year_records: self.records,
            diagnostics,
        }
    }
}
