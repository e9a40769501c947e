// Display rows for the summary tables.
//
// Aggregates keep full precision; rounding to two decimals happens only when
// a row is built for display.

use serde::Serialize;

use crate::analytics::aggregate::PositionalAggregate;
use crate::analytics::charts::mean_label;
use crate::selection::Selection;

/// Round to two decimal places for display. Exact ties go to the even
/// neighbour, so 21.125 shows as 21.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// One line of the matches-and-goals summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub matches_played: f64,
    pub goals: f64,
}

/// Matches played and goals for the selected players, followed by the
/// positional mean when one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub rows: Vec<SummaryRow>,
    /// Position of the mean row, `None` when no mean could be computed.
    pub mean_position: Option<String>,
}

impl MatchSummary {
    /// Returns `None` for an empty selection.
    pub fn build(selection: &Selection<'_>, mean: Option<&PositionalAggregate>) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        let mut rows: Vec<SummaryRow> = selection
            .players()
            .iter()
            .map(|p| SummaryRow {
                name: p.name.clone(),
                matches_played: p.matches_played,
                goals: p.goals,
            })
            .collect();

        if let Some(agg) = mean {
            rows.push(SummaryRow {
                name: mean_label(&agg.position),
                matches_played: round2(agg.matches_played),
                goals: round2(agg.goals),
            });
        }

        Some(MatchSummary {
            rows,
            mean_position: mean.map(|agg| agg.position.clone()),
        })
    }
}

/// A positional aggregate rounded for the means table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanRow {
    pub position: String,
    pub players: usize,
    pub goals_per_match: f64,
    pub rc: f64,
    pub idr: f64,
    pub total_impact: f64,
    pub matches_played: f64,
    pub goals: f64,
}

impl From<&PositionalAggregate> for MeanRow {
    fn from(agg: &PositionalAggregate) -> Self {
        MeanRow {
            position: agg.position.clone(),
            players: agg.sample_size,
            goals_per_match: round2(agg.goals_per_match),
            rc: round2(agg.rc),
            idr: round2(agg.idr),
            total_impact: round2(agg.total_impact),
            matches_played: round2(agg.matches_played),
            goals: round2(agg.goals),
        }
    }
}
