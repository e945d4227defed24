use std::collections::HashMap;

use serde::Deserialize;

use crate::api::error::OrreryError;
use crate::assets::catalog::{PlanetDetail, StarSystem};

/// Accepts both a list of records and a name-keyed map.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordList<T> {
    List(Vec<T>),
    Map(HashMap<String, T>),
}

impl<T> RecordList<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            RecordList::List(v) => v,
            RecordList::Map(m) => m.into_values().collect(),
        }
    }
}

/// Name-keyed planet detail lookup.
/// A missing entry is a normal outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct DetailCatalog {
    details: HashMap<String, PlanetDetail>,
}

impl DetailCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON array of details or a `{ name: detail }` object.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        let records: RecordList<PlanetDetail> = serde_json::from_str(json)?;
        Ok(records.into_vec().into_iter().collect())
    }

    /// Insert or replace the detail for `detail.name`.
    pub fn insert(&mut self, detail: PlanetDetail) {
        self.details.insert(detail.name.clone(), detail);
    }

    pub fn with(mut self, detail: PlanetDetail) -> Self {
        self.insert(detail);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PlanetDetail> {
        self.details.get(name)
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

impl FromIterator<PlanetDetail> for DetailCatalog {
    fn from_iter<I: IntoIterator<Item = PlanetDetail>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for detail in iter {
            catalog.insert(detail);
        }
        catalog
    }
}

/// All known star systems, keyed by host star name.
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    systems: HashMap<String, StarSystem>,
}

impl StarCatalog {
    /// Parse from a JSON array of systems or a `{ name: system }` object.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        let records: RecordList<StarSystem> = serde_json::from_str(json)?;
        let systems = records
            .into_vec()
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Ok(Self { systems })
    }

    pub fn get(&self, name: &str) -> Option<&StarSystem> {
        self.systems.get(name)
    }

    /// Host star names, sorted for stable presentation.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.systems.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
