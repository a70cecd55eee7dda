use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Built-in dataset used when the metadata fetch fails. Covers a known subset
/// of regions.
const FALLBACK_REGIONS_JSON: &str = include_str!("../data/fallback_regions.json");

/// Region metadata keyed by region key, as served from `counties.json`.
pub type RegionCatalog = HashMap<String, RegionMetadata>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMetadata {
    pub name: String,
    #[serde(default)]
    pub english: String,
    /// Group label as displayed, e.g. `北部`.
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub population: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub dialect: String,
    #[serde(default)]
    pub phrases: Vec<Phrase>,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default)]
    pub attractions: Vec<Card>,
    #[serde(default)]
    pub food: Vec<Card>,
}

/// An attraction or a cuisine entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase: String,
    #[serde(default)]
    pub meaning: String,
}

/// Parse a catalog payload.
pub fn parse_catalog(payload: &str) -> Result<RegionCatalog, serde_json::Error> {
    serde_json::from_str(payload)
}

/// The compiled-in fallback catalog.
pub fn fallback_catalog() -> RegionCatalog {
    parse_catalog(FALLBACK_REGIONS_JSON).unwrap_or_default()
}
