use std::fmt;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::embedded;
use crate::error::{LoadError, LoadResult};
use crate::models::Dataset;

/// Where the dashboard document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
    Embedded,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("embedded dataset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    File,
    Embedded,
}

#[derive(Debug)]
pub struct Loaded {
    pub dataset: Dataset,
    pub origin: Origin,
}

/// Loads the dataset once. Any failure of the configured source falls back
/// to the embedded dataset after a single attempt; `seed` fixes the
/// synthetic record list of that fallback.
pub async fn load(source: &DataSource, seed: Option<u64>) -> Loaded {
    let attempt = match source {
        DataSource::Url(url) => fetch(url).await.map(|d| (d, Origin::Remote)),
        DataSource::File(path) => read_file(path).map(|d| (d, Origin::File)),
        DataSource::Embedded => return fallback(seed),
    };

    match attempt {
        Ok((dataset, origin)) => {
            info!(
                source = %source,
                records = dataset.alumni_data.len(),
                "loaded alumni records"
            );
            debug!(stats = ?dataset.summary_stats, "summary stats");
            Loaded { dataset, origin }
        }
        Err(err) => {
            warn!(source = %source, error = %err, "error loading external data, using embedded");
            fallback(seed)
        }
    }
}

fn fallback(seed: Option<u64>) -> Loaded {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dataset = embedded::dataset(&mut rng);
    info!(
        records = dataset.alumni_data.len(),
        seed = ?seed,
        "using embedded dataset"
    );
    Loaded {
        dataset,
        origin: Origin::Embedded,
    }
}

pub async fn fetch(url: &str) -> LoadResult<Dataset> {
    let http = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(http)?;
    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }

    let body = response.bytes().await.map_err(http)?;
    parse(&body)
}

pub fn read_file(path: &Path) -> LoadResult<Dataset> {
    let body = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&body)
}

/// Parses a dashboard document, rejecting one without alumni records.
pub fn parse(body: &[u8]) -> LoadResult<Dataset> {
    let dataset: Dataset = serde_json::from_slice(body)?;
    if dataset.alumni_data.is_empty() {
        return Err(LoadError::EmptyPayload);
    }
    Ok(dataset)
}
