// Chart input structures for the radar and scatter views.
//
// Nothing here draws: the builders only shape domain records into labelled
// series and colored points that a plotting front-end can consume directly.

use serde::Serialize;

use crate::analytics::aggregate::{Metric, PositionalAggregate};
use crate::analytics::color::{ColorMapper, ColorScale, Rgb};
use crate::analytics::filter::FilteredView;
use crate::dataset::{self, Player};
use crate::selection::Selection;

/// Axes of the radar chart, in drawing order.
pub const RADAR_CATEGORIES: [Metric; 4] =
    [Metric::GoalsPerMatch, Metric::Rc, Metric::Idr, Metric::TotalImpact];

pub const RADAR_TITLE: &str = "Comparativa de Jugadores";
pub const RADAR_WITH_MEAN_TITLE: &str = "Comparativa con Media de Posición";
pub const SCATTER_TITLE: &str = "Impacto Total vs RC (Colores por Impacto)";

/// Neutral color of the positional-mean series.
pub const BASELINE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// Label used for a positional mean, in series names and summary rows.
pub fn mean_label(position: &str) -> String {
    format!("Media {position}")
}

// ---------------------------------------------------------------------------
// Radar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Dot,
}

/// How a series is drawn. Player series are data-colored and filled; the
/// positional mean is a neutral dotted outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SeriesStyle {
    Filled,
    Baseline { dash: LineDash },
}

/// One closed polygon on the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    /// Category labels; the first label is repeated at the end.
    pub categories: Vec<&'static str>,
    /// Values aligned with `categories`; the first value is repeated at the end.
    pub values: Vec<f64>,
    pub color: Rgb,
    pub style: SeriesStyle,
}

impl RadarSeries {
    fn closed(name: String, values: [f64; 4], color: Rgb, style: SeriesStyle) -> Self {
        let mut categories: Vec<&'static str> = RADAR_CATEGORIES.iter().map(|m| m.column()).collect();
        categories.push(RADAR_CATEGORIES[0].column());
        let mut values = values.to_vec();
        values.push(values[0]);
        RadarSeries {
            name,
            categories,
            values,
            color,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: &'static str,
    pub series: Vec<RadarSeries>,
}

/// One series per selected player, plus an optional positional-mean series.
///
/// Returns `None` for an empty selection: there is nothing to compare.
pub fn build_radar<S: ColorScale>(
    selection: &Selection<'_>,
    mean: Option<&PositionalAggregate>,
    mapper: &ColorMapper<S>,
) -> Option<RadarChart> {
    if selection.is_empty() {
        return None;
    }

    let mut series: Vec<RadarSeries> = selection
        .players()
        .iter()
        .map(|p| {
            RadarSeries::closed(
                p.name.clone(),
                RADAR_CATEGORIES.map(|m| m.value(p)),
                mapper.color_for(p.total_impact),
                SeriesStyle::Filled,
            )
        })
        .collect();

    if let Some(agg) = mean {
        series.push(RadarSeries::closed(
            mean_label(&agg.position),
            RADAR_CATEGORIES.map(|m| agg.get(m)),
            BASELINE_COLOR,
            SeriesStyle::Baseline {
                dash: LineDash::Dot,
            },
        ));
    }

    Some(RadarChart {
        title: if mean.is_some() {
            RADAR_WITH_MEAN_TITLE
        } else {
            RADAR_TITLE
        },
        series,
    })
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    /// Impacto_Total.
    pub x: f64,
    /// RC.
    pub y: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

/// Impacto_Total against RC for every player in the view, colored as one
/// batch against the mapper's dataset-wide range.
pub fn build_scatter<S: ColorScale>(view: &FilteredView<'_>, mapper: &ColorMapper<S>) -> ScatterChart {
    let colors = mapper.colors_for(view.iter().map(|p| p.total_impact));
    let points = view
        .iter()
        .zip(colors)
        .map(|(p, color): (&Player, Rgb)| ScatterPoint {
            name: p.name.clone(),
            x: p.total_impact,
            y: p.rc,
            color,
        })
        .collect();

    ScatterChart {
        title: SCATTER_TITLE,
        x_label: "Impacto Total",
        y_label: dataset::COL_RC,
        points,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate::positional_mean;
    use crate::analytics::color::NamedScale;
    use crate::analytics::filter::{filter_players, PlayerFilter};
    use crate::dataset::ImpactRange;

    #[allow(clippy::too_many_arguments)]
    fn player(name: &str, position: &str, team: &str, gpm: f64, rc: f64, idr: f64, impact: f64) -> Player {
        Player {
            name: name.into(),
            position: position.into(),
            team: team.into(),
            matches_played: 10.0,
            goals: gpm * 10.0,
            goals_per_match: gpm,
            goal_contribution: 0.0,
            rc,
            idr,
            total_impact: impact,
        }
    }

    fn roster() -> Vec<Player> {
        vec![
            player("Ana", "DEL", "A", 0.5, 3.0, 2.0, 8.0),
            player("Luis", "DEL", "B", 0.2, 1.0, 1.0, 4.0),
            player("Eva", "DEF", "A", 0.0, 1.5, 3.0, 2.0),
        ]
    }

    fn mapper() -> ColorMapper<NamedScale> {
        ColorMapper::new(ImpactRange { min: 2.0, max: 8.0 }, NamedScale::Turbo)
    }

    fn everyone(players: &[Player]) -> FilteredView<'_> {
        filter_players(players, &PlayerFilter::new(["DEL", "DEF"], ["A", "B"]))
    }

    #[test]
    fn empty_selection_builds_no_radar() {
        let players = roster();
        let view = everyone(&players);
        let sel = Selection::resolve::<&str>(&[], &view);
        assert!(build_radar(&sel, None, &mapper()).is_none());
    }

    #[test]
    fn radar_series_are_closed() {
        let players = roster();
        let view = everyone(&players);
        let sel = Selection::resolve(&["Luis", "Ana", "Eva"], &view);
        let chart = build_radar(&sel, None, &mapper()).unwrap();

        assert_eq!(chart.title, RADAR_TITLE);
        assert_eq!(chart.series.len(), 3);
        for s in &chart.series {
            assert_eq!(s.values.len(), RADAR_CATEGORIES.len() + 1);
            assert_eq!(s.categories.len(), s.values.len());
            assert_eq!(s.values.first(), s.values.last());
            assert_eq!(s.categories.first(), s.categories.last());
            assert_eq!(s.style, SeriesStyle::Filled);
        }
        assert_eq!(
            chart.series[0].categories,
            vec!["Goles_por_partido", "RC", "IDR", "Impacto_Total", "Goles_por_partido"]
        );
        assert_eq!(chart.series[0].name, "Luis");
        assert_eq!(chart.series[0].values, vec![0.2, 1.0, 1.0, 4.0, 0.2]);
    }

    #[test]
    fn radar_colors_follow_impact() {
        let players = roster();
        let view = everyone(&players);
        let m = mapper();
        let sel = Selection::resolve(&["Ana", "Eva"], &view);
        let chart = build_radar(&sel, None, &m).unwrap();
        assert_eq!(chart.series[0].color, m.color_for(8.0));
        assert_eq!(chart.series[1].color, m.color_for(2.0));
        assert_ne!(chart.series[0].color, chart.series[1].color);
    }

    #[test]
    fn mean_series_is_appended_with_baseline_style() {
        let players = roster();
        let view = everyone(&players);
        let sel = Selection::resolve(&["Ana"], &view);
        let mean = positional_mean(&view, sel.comparison_position().unwrap());
        let chart = build_radar(&sel, mean.as_ref(), &mapper()).unwrap();

        assert_eq!(chart.title, RADAR_WITH_MEAN_TITLE);
        assert_eq!(chart.series.len(), 2);
        let baseline = &chart.series[1];
        assert_eq!(baseline.name, "Media DEL");
        assert_eq!(baseline.color, BASELINE_COLOR);
        assert_eq!(baseline.style, SeriesStyle::Baseline { dash: LineDash::Dot });
        assert!((baseline.values[0] - 0.35).abs() < 1e-12);
        assert!((baseline.values[3] - 6.0).abs() < 1e-12);
        assert_eq!(baseline.values.first(), baseline.values.last());
    }

    #[test]
    fn scatter_has_one_point_per_player() {
        let players = roster();
        let view = filter_players(&players, &PlayerFilter::new(["DEL"], ["A", "B"]));
        let m = mapper();
        let chart = build_scatter(&view, &m);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].name, "Ana");
        assert_eq!((chart.points[0].x, chart.points[0].y), (8.0, 3.0));
        assert_eq!(chart.y_label, "RC");
        // Colors use the global range even though Eva (the minimum) is filtered out.
        assert_eq!(chart.points[1].color, m.color_for(4.0));
        let view_local = ColorMapper::new(ImpactRange { min: 4.0, max: 8.0 }, NamedScale::Turbo);
        assert_ne!(chart.points[1].color, view_local.color_for(4.0));
    }

    #[test]
    fn scatter_of_empty_view_is_empty() {
        let players = roster();
        let view = filter_players(&players, &PlayerFilter::default());
        assert!(build_scatter(&view, &mapper()).points.is_empty());
    }

    #[test]
    fn radar_chart_serializes_style_tag() {
        let players = roster();
        let view = everyone(&players);
        let sel = Selection::resolve(&["Ana"], &view);
        let mean = positional_mean(&view, "DEL");
        let chart = build_radar(&sel, mean.as_ref(), &mapper()).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["series"][0]["style"]["kind"], "filled");
        assert_eq!(json["series"][1]["style"]["kind"], "baseline");
        assert_eq!(json["series"][1]["style"]["dash"], "dot");
        assert_eq!(json["series"][1]["color"], "rgb(128, 128, 128)");
    }
}
