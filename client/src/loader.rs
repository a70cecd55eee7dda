use explorer_shared::geometry::parse_feature_collection;
use explorer_shared::metadata::{fallback_catalog, parse_catalog};
use explorer_shared::{GeoFeature, RegionCatalog};

use crate::config::{CATALOG_PATH, GEOMETRY_PATH};

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    BuiltIn,
}

async fn fetch_text(path: &str) -> Result<String, String> {
    let resp = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.text().await.map_err(|e| format!("fetch error: {e}"))
}

/// Fetch the region metadata dataset.
pub async fn fetch_catalog() -> Result<RegionCatalog, String> {
    let body = fetch_text(CATALOG_PATH).await?;
    parse_catalog(&body).map_err(|e| format!("parse error: {e}"))
}

/// Fetch the geographic feature collection.
pub async fn fetch_geometry() -> Result<Vec<GeoFeature>, String> {
    let body = fetch_text(GEOMETRY_PATH).await?;
    parse_feature_collection(&body).map_err(|e| format!("parse error: {e}"))
}

/// Metadata, falling back to the built-in dataset on any failure.
pub async fn load_catalog() -> (RegionCatalog, LoadSource) {
    match fetch_catalog().await {
        Ok(catalog) => (catalog, LoadSource::Remote),
        Err(e) => {
            web_sys::console::warn_1(&format!("region metadata load failed: {e}").into());
            web_sys::console::info_1(&"using built-in region metadata".into());
            (fallback_catalog(), LoadSource::BuiltIn)
        }
    }
}

/// Geographic shapes, or `None` when the hand-drawn map should be used.
pub async fn load_geometry() -> Option<Vec<GeoFeature>> {
    match fetch_geometry().await {
        Ok(features) => Some(features),
        Err(e) => {
            web_sys::console::warn_1(&format!("geometry load failed: {e}").into());
            web_sys::console::info_1(&"drawing the schematic fallback map".into());
            None
        }
    }
}
