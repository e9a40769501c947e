// Player table loading and the load-once dataset cache.
//
// Reads the league CSV export (one row per player, Spanish column headers),
// validates the header row up front and converts every row into a typed
// `Player`. The loaded table is immutable for the rest of the process.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Nombre";
pub const COL_POSITION: &str = "Posicion";
pub const COL_TEAM: &str = "Equipo";
pub const COL_MATCHES_PLAYED: &str = "Partidos_jugados";
pub const COL_GOALS: &str = "Goles";
pub const COL_GOALS_PER_MATCH: &str = "Goles_por_partido";
pub const COL_GOAL_CONTRIBUTION: &str = "Aporte_Goles";
pub const COL_RC: &str = "RC";
pub const COL_IDR: &str = "IDR";
pub const COL_TOTAL_IMPACT: &str = "Impacto_Total";

/// Every column the source must carry, in the order the full table is shown.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_NAME,
    COL_POSITION,
    COL_TEAM,
    COL_MATCHES_PLAYED,
    COL_GOALS,
    COL_GOALS_PER_MATCH,
    COL_GOAL_CONTRIBUTION,
    COL_RC,
    COL_IDR,
    COL_TOTAL_IMPACT,
];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One player of the division.
///
/// `rc`, `idr` and `total_impact` are composite indices computed upstream and
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub position: String,
    pub team: String,
    pub matches_played: f64,
    pub goals: f64,
    pub goals_per_match: f64,
    pub goal_contribution: f64,
    pub rc: f64,
    pub idr: f64,
    pub total_impact: f64,
}

/// Minimum and maximum Impacto_Total over the whole (unfiltered) dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactRange {
    pub min: f64,
    pub max: f64,
}

impl ImpactRange {
    /// Range over an iterator of values. Returns `None` when it is empty.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(ImpactRange { min: v, max: v }),
            Some(r) => Some(ImpactRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// True when every value in the dataset shares the same Impacto_Total.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// The immutable player table plus the statistics that must be computed over
/// all of it rather than over a filtered view.
#[derive(Debug, Clone)]
pub struct Dataset {
    players: Vec<Player>,
    impact_range: ImpactRange,
}

impl Dataset {
    /// Build a dataset from already-typed records. Fails on an empty table
    /// because the global impact range would be undefined.
    pub fn new(players: Vec<Player>) -> Result<Self, DatasetError> {
        let impact_range = ImpactRange::from_values(players.iter().map(|p| p.total_impact))
            .ok_or(DatasetError::Empty)?;
        Ok(Dataset {
            players,
            impact_range,
        })
    }

    /// All players in source order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn impact_range(&self) -> ImpactRange {
        self.impact_range
    }

    /// Distinct positions in first-appearance order.
    pub fn positions(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.position.as_str()))
    }

    /// Distinct teams in first-appearance order.
    pub fn teams(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.team.as_str()))
    }
}

/// Distinct values in first-appearance order.
pub(crate) fn distinct<'a, I: Iterator<Item = &'a str>>(values: I) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("required column `{column}` is missing from the player table")]
    MissingColumn { column: String },

    #[error("player table produced zero valid rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// One CSV row as exported by the league. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerRow {
    Nombre: String,
    Posicion: String,
    Equipo: String,
    Partidos_jugados: f64,
    Goles: f64,
    Goles_por_partido: f64,
    Aporte_Goles: f64,
    RC: f64,
    IDR: f64,
    Impacto_Total: f64,
}

impl RawPlayerRow {
    fn numeric_fields(&self) -> [f64; 7] {
        [
            self.Partidos_jugados,
            self.Goles,
            self.Goles_por_partido,
            self.Aporte_Goles,
            self.RC,
            self.IDR,
            self.Impacto_Total,
        ]
    }

    fn into_player(self) -> Player {
        Player {
            name: self.Nombre,
            position: self.Posicion,
            team: self.Equipo,
            matches_played: self.Partidos_jugados,
            goals: self.Goles,
            goals_per_match: self.Goles_por_partido,
            goal_contribution: self.Aporte_Goles,
            rc: self.RC,
            idr: self.IDR,
            total_impact: self.Impacto_Total,
        }
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Internal failure while reading from an arbitrary reader; the path-based
/// loader attaches the file name.
#[derive(Debug)]
enum ReadError {
    Csv(csv::Error),
    MissingColumn(String),
}

fn check_headers(headers: &csv::StringRecord) -> Result<(), ReadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReadError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader.headers().map_err(ReadError::Csv)?.clone();
    check_headers(&headers)?;

    let mut players = Vec::new();
    for (idx, result) in reader.deserialize::<RawPlayerRow>().enumerate() {
        match result {
            Ok(raw) => {
                if !raw.numeric_fields().iter().all(|v| v.is_finite()) {
                    warn!("skipping player '{}': non-finite numeric value", raw.Nombre);
                    continue;
                }
                players.push(raw.into_player());
            }
            Err(e) => {
                warn!("skipping malformed player row {}: {}", idx + 1, e);
            }
        }
    }
    Ok(players)
}

/// Load the player table from a CSV file.
///
/// A missing required column is fatal; malformed individual rows are skipped
/// with a warning.
pub fn load_players(path: &Path) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| match e {
        ReadError::Csv(source) => DatasetError::Csv {
            path: path.display().to_string(),
            source,
        },
        ReadError::MissingColumn(column) => DatasetError::MissingColumn { column },
    })?;
    let dataset = Dataset::new(players)?;
    info!(
        "Loaded {} players from {} (impact range {:.2}..{:.2})",
        dataset.len(),
        path.display(),
        dataset.impact_range.min,
        dataset.impact_range.max
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Load-once cache
// ---------------------------------------------------------------------------

/// Lazily loads the player table on first access and then serves the same
/// immutable copy for the rest of its lifetime. There is no way back to the
/// unloaded state.
#[derive(Debug)]
pub struct DatasetAccessor {
    path: PathBuf,
    cell: OnceLock<Dataset>,
}

impl DatasetAccessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetAccessor {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached dataset, loading it from disk on the first call.
    pub fn get(&self) -> Result<&Dataset, DatasetError> {
        if let Some(dataset) = self.cell.get() {
            debug!("serving cached player table");
            return Ok(dataset);
        }
        let dataset = load_players(&self.path)?;
        Ok(self.cell.get_or_init(|| dataset))
    }
}

static SHARED: OnceLock<DatasetAccessor> = OnceLock::new();

/// Process-wide dataset. The path given on the first call wins; later calls
/// return the table loaded then.
pub fn shared(path: &Path) -> Result<&'static Dataset, DatasetError> {
    SHARED.get_or_init(|| DatasetAccessor::new(path)).get()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
