// Positional means over a filtered view.
//
// A positional aggregate is the arithmetic mean of the comparison metrics for
// every player of one position in the current view. An empty group has no
// mean at all: callers get `None`, never a row of zeros.

use serde::Serialize;

use crate::analytics::filter::FilteredView;
use crate::dataset::{self, distinct, Player};

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A numeric column that takes part in positional comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    GoalsPerMatch,
    Rc,
    Idr,
    TotalImpact,
    MatchesPlayed,
    Goals,
}

impl Metric {
    /// Every averaged metric.
    pub const ALL: [Metric; 6] = [
        Metric::GoalsPerMatch,
        Metric::Rc,
        Metric::Idr,
        Metric::TotalImpact,
        Metric::MatchesPlayed,
        Metric::Goals,
    ];

    /// Source column header, also used as the chart category label.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::GoalsPerMatch => dataset::COL_GOALS_PER_MATCH,
            Metric::Rc => dataset::COL_RC,
            Metric::Idr => dataset::COL_IDR,
            Metric::TotalImpact => dataset::COL_TOTAL_IMPACT,
            Metric::MatchesPlayed => dataset::COL_MATCHES_PLAYED,
            Metric::Goals => dataset::COL_GOALS,
        }
    }

    pub fn value(&self, player: &Player) -> f64 {
        match self {
            Metric::GoalsPerMatch => player.goals_per_match,
            Metric::Rc => player.rc,
            Metric::Idr => player.idr,
            Metric::TotalImpact => player.total_impact,
            Metric::MatchesPlayed => player.matches_played,
            Metric::Goals => player.goals,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Mean statistics for one position. Values are stored unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionalAggregate {
    pub position: String,
    /// Number of players averaged.
    pub sample_size: usize,
    pub goals_per_match: f64,
    pub rc: f64,
    pub idr: f64,
    pub total_impact: f64,
    pub matches_played: f64,
    pub goals: f64,
}

impl PositionalAggregate {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GoalsPerMatch => self.goals_per_match,
            Metric::Rc => self.rc,
            Metric::Idr => self.idr,
            Metric::TotalImpact => self.total_impact,
            Metric::MatchesPlayed => self.matches_played,
            Metric::Goals => self.goals,
        }
    }
}

fn mean_of<'a, I>(players: I, metric: Metric) -> f64
where
    I: Iterator<Item = &'a Player>,
{
    let (sum, n) = players.fold((0.0, 0usize), |(s, n), p| (s + metric.value(p), n + 1));
    sum / n as f64
}

/// Mean of every metric over the players of `position` in `view`.
///
/// Returns `None` when the view holds no player of that position.
pub fn positional_mean(view: &FilteredView<'_>, position: &str) -> Option<PositionalAggregate> {
    let group: Vec<&Player> = view.iter().filter(|p| p.position == position).collect();
    if group.is_empty() {
        return None;
    }
    let mean = |metric| mean_of(group.iter().copied(), metric);
    Some(PositionalAggregate {
        position: position.to_string(),
        sample_size: group.len(),
        goals_per_match: mean(Metric::GoalsPerMatch),
        rc: mean(Metric::Rc),
        idr: mean(Metric::Idr),
        total_impact: mean(Metric::TotalImpact),
        matches_played: mean(Metric::MatchesPlayed),
        goals: mean(Metric::Goals),
    })
}

/// One aggregate per position present in the view, in first-appearance order.
pub fn positional_means(view: &FilteredView<'_>) -> Vec<PositionalAggregate> {
    distinct(view.iter().map(|p| p.position.as_str()))
        .into_iter()
        .filter_map(|pos| positional_mean(view, pos))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::filter::{filter_players, PlayerFilter};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[allow(clippy::too_many_arguments)]
    fn player(
        name: &str,
        position: &str,
        team: &str,
        matches: f64,
        goals: f64,
        gpm: f64,
        rc: f64,
        idr: f64,
        impact: f64,
    ) -> Player {
        Player {
            name: name.into(),
            position: position.into(),
            team: team.into(),
            matches_played: matches,
            goals,
            goals_per_match: gpm,
            goal_contribution: 0.0,
            rc,
            idr,
            total_impact: impact,
        }
    }

    fn two_forwards() -> Vec<Player> {
        vec![
            player("Ana", "DEL", "A", 10.0, 5.0, 0.5, 3.0, 2.0, 8.0),
            player("Luis", "DEL", "B", 10.0, 2.0, 0.2, 1.0, 1.0, 4.0),
        ]
    }

    #[test]
    fn mean_of_two_forwards() {
        let players = two_forwards();
        let view = filter_players(&players, &PlayerFilter::new(["DEL"], ["A", "B"]));
        assert_eq!(view.len(), 2);

        let agg = positional_mean(&view, "DEL").expect("DEL present");
        assert_eq!(agg.sample_size, 2);
        assert!(approx_eq(agg.total_impact, 6.0, 1e-12));
        assert!(approx_eq(agg.goals_per_match, 0.35, 1e-12));
        assert!(approx_eq(agg.rc, 2.0, 1e-12));
        assert!(approx_eq(agg.idr, 1.5, 1e-12));
        assert!(approx_eq(agg.matches_played, 10.0, 1e-12));
        assert!(approx_eq(agg.goals, 3.5, 1e-12));
    }

    #[test]
    fn empty_group_is_absent_not_zero() {
        let players = two_forwards();
        let view = filter_players(&players, &PlayerFilter::new(["DEL"], ["A", "B"]));
        assert!(positional_mean(&view, "POR").is_none());

        let empty = filter_players(&players, &PlayerFilter::default());
        assert!(positional_mean(&empty, "DEL").is_none());
    }

    #[test]
    fn only_players_in_view_are_averaged() {
        let players = two_forwards();
        let view = filter_players(&players, &PlayerFilter::new(["DEL"], ["A"]));
        let agg = positional_mean(&view, "DEL").unwrap();
        assert_eq!(agg.sample_size, 1);
        assert!(approx_eq(agg.total_impact, 8.0, 1e-12));
    }

    #[test]
    fn matches_played_mean_matches_manual_mean() {
        let players = vec![
            player("A", "MED", "X", 3.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            player("B", "MED", "X", 7.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            player("C", "MED", "X", 11.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            player("D", "DEF", "X", 100.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        ];
        let view = filter_players(&players, &PlayerFilter::new(["MED", "DEF"], ["X"]));
        let agg = positional_mean(&view, "MED").unwrap();
        assert_eq!(agg.sample_size, 3);
        assert!(approx_eq(agg.matches_played, 7.0, 1e-12));
        assert!(approx_eq(agg.get(Metric::MatchesPlayed), agg.matches_played, 1e-12));
    }

    #[test]
    fn means_for_every_position_in_view_order() {
        let mut players = two_forwards();
        players.insert(1, player("Eva", "DEF", "A", 9.0, 0.0, 0.0, 1.0, 3.0, 2.0));
        let view = filter_players(&players, &PlayerFilter::new(["DEL", "DEF"], ["A", "B"]));
        let means = positional_means(&view);
        let positions: Vec<&str> = means.iter().map(|m| m.position.as_str()).collect();
        assert_eq!(positions, vec!["DEL", "DEF"]);
        assert_eq!(means[1].sample_size, 1);
    }

    #[test]
    fn metric_columns_match_source_headers() {
        let labels: Vec<&str> = Metric::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(
            labels,
            vec!["Goles_por_partido", "RC", "IDR", "Impacto_Total", "Partidos_jugados", "Goles"]
        );
    }
}
