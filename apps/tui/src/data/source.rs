use super::BluebirdDataset;
use crate::domain::{Month, Week};
use csv::{ReaderBuilder, Trim};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rows preceding the resort rows: a month banner and a week banner.
pub const HEADER_ROWS: usize = 2;
pub const WEEKS_PER_MONTH: usize = 4;

const BUILTIN_CSV: &str = include_str!("../../assets/bluebird.csv");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has {found} header row(s), expected {}", HEADER_ROWS)]
    MissingHeader { found: usize },
    #[error("dataset contains no resort rows")]
    NoRows,
    #[error("cannot synthesise dataset: {0}")]
    Synthetic(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetOrigin {
    Parsed,
    Embedded,
    Synthetic,
    Empty,
}

impl DatasetOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parsed => "CSV file",
            Self::Embedded => "built-in table",
            Self::Synthetic => "synthetic data",
            Self::Empty => "no data",
        }
    }
}

impl fmt::Display for DatasetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strategy for producing a dataset.
pub trait DatasetSource {
    fn origin(&self) -> DatasetOrigin;

    fn load(&self) -> Result<BluebirdDataset, DatasetError>;
}

#[derive(Debug, Clone)]
enum ParsedInput {
    File(PathBuf),
    Text(String),
}

/// Delimited text: header rows, then one row per resort with the name in
/// the first column and four week columns per month in season order.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    input: ParsedInput,
}

impl ParsedSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: ParsedInput::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: ParsedInput::Text(text.into()),
        }
    }
}

impl DatasetSource for ParsedSource {
    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Parsed
    }

    fn load(&self) -> Result<BluebirdDataset, DatasetError> {
        match &self.input {
            ParsedInput::File(path) => {
                log::info!("Loading bluebird data from {}", path.display());
                let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_delimited(&text)
            }
            ParsedInput::Text(text) => parse_delimited(text),
        }
    }
}

/// The table compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DatasetSource for EmbeddedSource {
    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Embedded
    }

    fn load(&self) -> Result<BluebirdDataset, DatasetError> {
        parse_delimited(BUILTIN_CSV)
    }
}

/// Random values over the full month/week grid, reproducible per seed.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    resort_names: Vec<String>,
}

impl SyntheticSource {
    pub fn new(seed: u64, resort_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            seed,
            resort_names: resort_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DatasetSource for SyntheticSource {
    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Synthetic
    }

    fn load(&self) -> Result<BluebirdDataset, DatasetError> {
        if self.resort_names.is_empty() {
            return Err(DatasetError::Synthetic("no resort names".to_string()));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut dataset = BluebirdDataset::default();
        for month in Month::ALL {
            for week in Week::ALL {
                for name in &self.resort_names {
                    let tenths: u8 = rng.gen_range(0..=70);
                    dataset.insert(month, week, name, f64::from(tenths) / 10.0);
                }
            }
        }
        Ok(dataset)
    }
}

#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: BluebirdDataset,
    pub origin: DatasetOrigin,
    /// Why the primary source was not used, if it failed.
    pub error: Option<DatasetError>,
}

/// Loads `primary`, falling back to `fallback` and finally to an empty
/// dataset. Never fails.
pub fn load_with_fallback(
    primary: &dyn DatasetSource,
    fallback: &dyn DatasetSource,
) -> LoadedDataset {
    match primary.load() {
        Ok(dataset) => LoadedDataset {
            dataset,
            origin: primary.origin(),
            error: None,
        },
        Err(primary_error) => {
            log::warn!(
                "Bluebird source ({}) failed: {primary_error}; using {}",
                primary.origin(),
                fallback.origin()
            );
            match fallback.load() {
                Ok(dataset) => LoadedDataset {
                    dataset,
                    origin: fallback.origin(),
                    error: Some(primary_error),
                },
                Err(fallback_error) => {
                    log::error!("Fallback bluebird source failed: {fallback_error}");
                    LoadedDataset {
                        dataset: BluebirdDataset::default(),
                        origin: DatasetOrigin::Empty,
                        error: Some(primary_error),
                    }
                }
            }
        }
    }
}

fn parse_delimited(text: &str) -> Result<BluebirdDataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    for found in 0..HEADER_ROWS {
        match records.next() {
            Some(record) => {
                record?;
            }
            None => return Err(DatasetError::MissingHeader { found }),
        }
    }

    let mut dataset = BluebirdDataset::default();
    let mut rows = 0_usize;
    for record in records {
        let record = record?;
        let Some(name) = record.get(0).filter(|name| !name.is_empty()) else {
            continue;
        };

        for month in Month::ALL {
            for week in Week::ALL {
                let column = 1 + month.index() * WEEKS_PER_MONTH + week.index();
                let value = record.get(column).map_or(0.0, parse_cell);
                dataset.insert(month, week, name, value);
            }
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(DatasetError::NoRows);
    }

    log::debug!("Parsed bluebird data for {rows} resorts");
    Ok(dataset)
}

fn parse_cell(cell: &str) -> f64 {
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
