//! Bluebird-day dataset: month -> week -> resort name -> clear-sky days.

pub mod source;

pub use source::{
    load_with_fallback, DatasetError, DatasetOrigin, DatasetSource, EmbeddedSource,
    LoadedDataset, ParsedSource, SyntheticSource,
};

use crate::domain::{Month, Week};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

const STRAIGHT: char = '\'';
const CURLY: char = '\u{2019}';
const CURLY_OPEN: char = '\u{2018}';

/// Spellings of `name` that differ only in apostrophe style, `name` first.
pub fn apostrophe_variants(name: &str) -> Vec<String> {
    let mut variants = vec![name.to_string()];
    let candidates = [
        name.replace([CURLY, CURLY_OPEN], &STRAIGHT.to_string()),
        name.replace([STRAIGHT, CURLY_OPEN], &CURLY.to_string()),
    ];
    for candidate in candidates {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

pub type BoxedSource = Box<dyn DatasetSource + Send>;

/// Primary and fallback sources: the CSV at `data_path` (or the built-in
/// table) backed by seeded synthetic values for `resort_names`.
pub fn default_sources(
    data_path: Option<&Path>,
    seed: u64,
    resort_names: Vec<String>,
) -> (BoxedSource, BoxedSource) {
    let primary: BoxedSource = match data_path {
        Some(path) => Box::new(ParsedSource::from_path(path)),
        None => Box::new(EmbeddedSource),
    };
    (primary, Box::new(SyntheticSource::new(seed, resort_names)))
}

/// Runs [`load_with_fallback`] on the blocking pool.
pub async fn load_in_background(primary: BoxedSource, fallback: BoxedSource) -> LoadedDataset {
    let task =
        tokio::task::spawn_blocking(move || load_with_fallback(primary.as_ref(), fallback.as_ref()));
    match task.await {
        Ok(loaded) => loaded,
        Err(err) => {
            log::error!("Dataset loader task failed: {err}");
            LoadedDataset {
                dataset: BluebirdDataset::default(),
                origin: DatasetOrigin::Empty,
                error: None,
            }
        }
    }
}

/// Immutable for the session once loaded. Values nominally lie in [0, 7]
/// but are passed through unchecked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BluebirdDataset {
    weeks: HashMap<(Month, Week), HashMap<String, f64>>,
}

impl BluebirdDataset {
    pub fn insert(&mut self, month: Month, week: Week, resort: &str, value: f64) {
        self.weeks
            .entry((month, week))
            .or_default()
            .insert(resort.to_string(), value);
    }

    /// Value for a resort display name. Misses resolve to 0.
    pub fn value(&self, month: Month, week: Week, resort: &str) -> f64 {
        let Some(week_data) = self.weeks.get(&(month, week)) else {
            return 0.0;
        };

        for variant in apostrophe_variants(resort) {
            if let Some(value) = week_data.get(&variant) {
                return *value;
            }
        }

        log::debug!("No bluebird value for \"{resort}\" in {month} {week}");
        0.0
    }

    pub fn contains_resort(&self, resort: &str) -> bool {
        let variants = apostrophe_variants(resort);
        self.weeks
            .values()
            .any(|week_data| variants.iter().any(|variant| week_data.contains_key(variant)))
    }

    pub fn resort_names(&self) -> Vec<String> {
        self.weeks
            .values()
            .flat_map(|week_data| week_data.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.values().all(HashMap::is_empty)
    }

    pub fn monthly_average(&self, resort: &str, month: Month) -> f64 {
        let total: f64 = Week::ALL
            .iter()
            .map(|week| self.value(month, *week, resort))
            .sum();
        total / Week::ALL.len() as f64
    }

    /// One point per week across the season, in display order.
    pub fn season_series(&self, resort: &str) -> Vec<(f64, f64)> {
        Month::ALL
            .iter()
            .flat_map(|month| Week::ALL.iter().map(move |week| (*month, *week)))
            .enumerate()
            .map(|(index, (month, week))| (index as f64, self.value(month, week, resort)))
            .collect()
    }
}
