// Dashboard assembly: one configured interaction in, one report out.
//
// Every call recomputes all derived views from the cached dataset. The report
// borrows from the dataset and serializes straight to JSON for whatever front
// end draws it.

use honor_core::analytics::aggregate::{positional_mean, positional_means};
use honor_core::analytics::charts::{build_radar, build_scatter, RadarChart, ScatterChart};
use honor_core::analytics::color::ColorMapper;
use honor_core::analytics::filter::{filter_players, FilteredView};
use honor_core::analytics::ranking::top_by_impact;
use honor_core::dataset::{Dataset, Player, REQUIRED_COLUMNS};
use honor_core::selection::Selection;
use honor_core::summary::{MatchSummary, MeanRow};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;

/// Values offered by the position and team pickers.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions<'a> {
    pub positions: Vec<&'a str>,
    pub teams: Vec<&'a str>,
}

/// A requested player that was left out of the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct IgnoredPick {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport<'a> {
    pub filter_options: FilterOptions<'a>,
    /// Column order of the full table.
    pub table_columns: [&'static str; 10],
    pub table: FilteredView<'a>,
    pub player_options: Vec<&'a str>,
    pub selected: Vec<&'a str>,
    pub ignored_picks: Vec<IgnoredPick>,
    pub comparison_position: Option<&'a str>,
    pub radar: Option<RadarChart>,
    pub radar_with_mean: Option<RadarChart>,
    pub summary: Option<MatchSummary>,
    pub positional_means: Vec<MeanRow>,
    pub scatter: ScatterChart,
    pub top_players: Vec<&'a Player>,
}

/// Build every view of the dashboard for the given configuration.
pub fn build_report<'a>(dataset: &'a Dataset, config: &Config) -> DashboardReport<'a> {
    let mapper = ColorMapper::new(dataset.impact_range(), config.color.scale);

    let view = filter_players(dataset.players(), &config.filters.to_filter(dataset));
    debug!("main filter kept {} of {} players", view.len(), dataset.len());

    let selection = Selection::resolve(&config.comparison.players, &view);
    let mean = selection
        .comparison_position()
        .and_then(|pos| positional_mean(&view, pos));

    let radar = build_radar(&selection, None, &mapper);
    let radar_with_mean = if config.comparison.with_mean {
        build_radar(&selection, mean.as_ref(), &mapper)
    } else {
        None
    };
    let summary = MatchSummary::build(&selection, mean.as_ref());

    let scatter_view = filter_players(dataset.players(), &config.scatter.to_filter(dataset));
    debug!("scatter filter kept {} players", scatter_view.len());
    let scatter = build_scatter(&scatter_view, &mapper);

    DashboardReport {
        filter_options: FilterOptions {
            positions: dataset.positions(),
            teams: dataset.teams(),
        },
        table_columns: REQUIRED_COLUMNS,
        player_options: view.names(),
        selected: selection.players().iter().map(|p| p.name.as_str()).collect(),
        ignored_picks: selection
            .ignored()
            .iter()
            .map(|(name, reason)| IgnoredPick {
                name: name.clone(),
                reason: format!("{reason:?}"),
            })
            .collect(),
        comparison_position: selection.comparison_position(),
        radar,
        radar_with_mean,
        summary,
        positional_means: positional_means(&view).iter().map(MeanRow::from).collect(),
        scatter,
        top_players: top_by_impact(dataset.players(), config.ranking.top_n),
        table: view,
    }
}
