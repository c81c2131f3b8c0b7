//! Startup loading of the static JSON datasets.
//!
//! The serving process reads four files from the data directory, once,
//! before accepting any request:
//!
//! | File | Wrapper shape |
//! |------|---------------|
//! | `cities.json` | `{ "cities": [...] }` |
//! | `resource-hubs.json` | `{ "hubs": [...] }` |
//! | `active-disasters.json` | `{ "disasters": [...] }` |
//! | `allocation-history.json` | `{ "allocations": [...] }` |
//!
//! Any missing file, parse failure, duplicate identifier, or unbalanced
//! hub stock is fatal: the process must refuse to serve rather than run
//! with partial or inconsistent data. Mutations after load are memory
//! only and are lost on restart; nothing is ever written back.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use relief_engine::ReliefStore;
use relief_types::{AllocationRecord, City, Disaster, HubId, ResourceHub};

/// Errors that can occur while loading the static datasets.
///
/// All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A dataset file could not be read from disk.
    #[error("failed to read dataset {name}: {source}")]
    Io {
        /// The dataset file name.
        name: &'static str,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON of the expected shape.
    #[error("failed to parse dataset {name}: {source}")]
    Parse {
        /// The dataset file name.
        name: &'static str,
        /// The underlying JSON parse error.
        source: serde_json::Error,
    },

    /// Two records in one dataset share an identifier.
    #[error("duplicate id {id} in dataset {name}")]
    DuplicateId {
        /// The dataset file name.
        name: &'static str,
        /// The duplicated identifier.
        id: String,
    },

    /// A hub record violates `available + allocated == total_capacity`.
    #[error("hub {0} has unbalanced stock at load")]
    UnbalancedStock(HubId),

    /// The engine rejected a history record while seeding the ledger.
    #[error("failed to seed allocation history: {0}")]
    Seed(#[from] relief_engine::EngineError),
}

/// `cities.json` wrapper.
#[derive(Debug, Deserialize)]
struct CitiesFile {
    cities: Vec<City>,
}

/// `resource-hubs.json` wrapper.
#[derive(Debug, Deserialize)]
struct HubsFile {
    hubs: Vec<ResourceHub>,
}

/// `active-disasters.json` wrapper.
#[derive(Debug, Deserialize)]
struct DisastersFile {
    disasters: Vec<Disaster>,
}

/// `allocation-history.json` wrapper.
#[derive(Debug, Deserialize)]
struct AllocationsFile {
    allocations: Vec<AllocationRecord>,
}

/// Load all four datasets from `dir` into a fresh [`ReliefStore`].
///
/// # Errors
///
/// Returns [`DataError`] on any read, parse, duplicate-id, or
/// stock-balance failure. Callers must treat this as fatal.
pub fn load_store(dir: &Path) -> Result<ReliefStore, DataError> {
    let cities: CitiesFile = read_dataset(dir, "cities.json")?;
    let hubs: HubsFile = read_dataset(dir, "resource-hubs.json")?;
    let disasters: DisastersFile = read_dataset(dir, "active-disasters.json")?;
    let history: AllocationsFile = read_dataset(dir, "allocation-history.json")?;

    let mut store = ReliefStore::new();

    for city in cities.cities {
        if store.cities.insert(city.id.clone(), city.clone()).is_some() {
            return Err(DataError::DuplicateId {
                name: "cities.json",
                id: city.id.to_string(),
            });
        }
    }
    for hub in hubs.hubs {
        if store.hubs.insert(hub.id.clone(), hub.clone()).is_some() {
            return Err(DataError::DuplicateId {
                name: "resource-hubs.json",
                id: hub.id.to_string(),
            });
        }
    }
    for disaster in disasters.disasters {
        if store
            .disasters
            .insert(disaster.id.clone(), disaster.clone())
            .is_some()
        {
            return Err(DataError::DuplicateId {
                name: "active-disasters.json",
                id: disaster.id.to_string(),
            });
        }
    }
    for record in history.allocations {
        store.append_allocation(record)?;
    }

    if let Some(hub_id) = store.unbalanced_hubs().into_iter().next() {
        return Err(DataError::UnbalancedStock(hub_id));
    }

    info!(
        cities = store.cities.len(),
        hubs = store.hubs.len(),
        disasters = store.disasters.len(),
        allocations = store.allocations().len(),
        "datasets loaded"
    );

    Ok(store)
}

/// Read and parse one dataset file.
fn read_dataset<T: serde::de::DeserializeOwned>(
    dir: &Path,
    name: &'static str,
) -> Result<T, DataError> {
    let path = dir.join(name);
    let contents =
        std::fs::read_to_string(&path).map_err(|source| DataError::Io { name, source })?;
    serde_json::from_str(&contents).map_err(|source| DataError::Parse { name, source })
}
