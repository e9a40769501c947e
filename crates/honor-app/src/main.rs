// Dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout carries the report)
// 2. Load config
// 3. Load the player table once
// 4. Build the dashboard report
// 5. Write it to stdout as JSON

use honor_app::config;
use honor_app::dashboard;
use honor_core::dataset;

use anyhow::Context;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("División de Honor dashboard starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: players={}, top_n={}, scale={:?}",
        config.data.players, config.ranking.top_n, config.color.scale
    );

    // 3. Load the player table (cached for the rest of the process)
    let players = dataset::shared(Path::new(&config.data.players))
        .with_context(|| format!("failed to load player table {}", config.data.players))?;

    // 4. Build the report
    let report = dashboard::build_report(players, &config);
    info!(
        "Report built: {} players in view, {} selected, {} scatter points",
        report.table.len(),
        report.selected.len(),
        report.scatter.points.len()
    );

    // 5. Emit
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("failed to serialize report")?;
    writeln!(out)?;

    info!("Dashboard report written");
    Ok(())
}

/// Initialize tracing to log to a file (stdout is reserved for the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("honor.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("honor_app=info,honor_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
