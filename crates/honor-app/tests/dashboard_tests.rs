// Integration tests for the dashboard.
//
// These load the shipped default config and sample player table and check
// that a full report is assembled and serialized the way the front end
// expects it.

use std::path::PathBuf;

use honor_app::config::{self, Config, CONFIG_FILE};
use honor_app::dashboard::build_report;
use honor_core::dataset::{load_players, REQUIRED_COLUMNS};

fn package_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Default config with the data path made absolute.
fn default_config() -> Config {
    let text = std::fs::read_to_string(package_root().join("defaults").join(CONFIG_FILE))
        .expect("defaults/dashboard.toml should exist");
    let mut config: Config = toml::from_str(&text).expect("default config should parse");
    config.data.players = package_root()
        .join(&config.data.players)
        .display()
        .to_string();
    config
}

#[test]
fn default_config_is_valid_toml() {
    let content = std::fs::read_to_string(package_root().join("defaults").join(CONFIG_FILE)).unwrap();
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/dashboard.toml is not valid TOML: {:?}", parsed.err());
}

#[test]
fn sample_data_has_required_headers() {
    let content = std::fs::read_to_string(package_root().join("data/G5_DH_Players.csv")).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(header, REQUIRED_COLUMNS.join(","));
}

#[test]
fn default_dashboard_report() {
    let config = default_config();
    let ds = load_players(std::path::Path::new(&config.data.players)).unwrap();
    let report = build_report(&ds, &config);

    assert_eq!(report.table.len(), ds.len());
    assert_eq!(report.filter_options.positions, vec!["DEL", "MED", "DEF", "POR"]);
    assert!(report.radar.is_none());
    assert_eq!(report.scatter.points.len(), ds.len());
    assert_eq!(report.top_players.len(), 10);
    assert_eq!(report.top_players[0].name, "Adrián Molina");
    for pair in report.top_players.windows(2) {
        assert!(pair[0].total_impact >= pair[1].total_impact);
    }
}

#[test]
fn midfield_comparison_report_serializes() {
    let mut config = default_config();
    config.filters.positions = Some(vec!["MED".into()]);
    config.comparison.players = vec!["Fermín Vidal".into(), "Daniel Ortega".into()];
    let ds = load_players(std::path::Path::new(&config.data.players)).unwrap();
    let report = build_report(&ds, &config);

    assert_eq!(report.comparison_position, Some("MED"));
    let json = serde_json::to_value(&report).unwrap();

    let series = json["radar_with_mean"]["series"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[2]["name"], "Media MED");
    assert_eq!(series[0]["values"].as_array().unwrap().len(), 5);

    let rows = json["summary"]["rows"].as_array().unwrap();
    assert_eq!(rows.last().unwrap()["name"], "Media MED");
    // (24 + 21 + 23 + 19) / 4 = 21.75
    assert_eq!(rows.last().unwrap()["matches_played"], 21.75);

    assert!(json["radar"]["series"][0]["color"]
        .as_str()
        .unwrap()
        .starts_with("rgb("));
    assert_eq!(json["table"].as_array().unwrap().len(), 4);
}

#[test]
fn empty_team_filter_reports_null_charts() {
    let mut config = default_config();
    config.filters.teams = Some(vec![]);
    config.comparison.players = vec!["Adrián Molina".into()];
    let ds = load_players(std::path::Path::new(&config.data.players)).unwrap();
    let report = build_report(&ds, &config);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["radar"].is_null());
    assert!(json["summary"].is_null());
    assert!(json["table"].as_array().unwrap().is_empty());
    // Scatter keeps its own (default) filters.
    assert_eq!(json["scatter"]["points"].as_array().unwrap().len(), ds.len());
}

#[test]
fn ensure_config_files_copies_shipped_defaults() {
    let tmp = std::env::temp_dir().join("honor_app_it_defaults");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("defaults")).unwrap();
    std::fs::copy(
        package_root().join("defaults").join(CONFIG_FILE),
        tmp.join("defaults").join(CONFIG_FILE),
    )
    .unwrap();
    std::fs::write(tmp.join("defaults/notes.toml.example"), "x = 1\n").unwrap();

    let copied = config::ensure_config_files(&tmp).unwrap();
    assert_eq!(copied, vec![tmp.join("config").join(CONFIG_FILE)]);
    assert!(!tmp.join("config/notes.toml.example").exists());

    let loaded = config::load_config_from(&tmp).unwrap();
    assert_eq!(loaded.ranking.top_n, 10);

    let _ = std::fs::remove_dir_all(&tmp);
}
