pub const GEOMETRY_PATH: &str = "assets/data/taiwan.geojson";
pub const CATALOG_PATH: &str = "assets/data/counties.json";

// Mount points
pub const MAP_CONTAINER_ID: &str = "map-container";
pub const MAP_WRAPPER_ID: &str = "taiwan-map-wrapper";
pub const SVG_ID: &str = "taiwan-map";

// Controls
pub const ZOOM_IN_ID: &str = "zoom-in";
pub const ZOOM_OUT_ID: &str = "zoom-out";
pub const RESET_ID: &str = "reset-map";

// Detail panel slots
pub const INSTRUCTIONS_ID: &str = "map-instructions";
pub const DETAILS_ID: &str = "county-details";
pub const NAME_ID: &str = "county-name";
pub const ENGLISH_ID: &str = "county-english";
pub const REGION_ID: &str = "county-region";
pub const DESCRIPTION_ID: &str = "county-description";
pub const POPULATION_ID: &str = "county-population";
pub const AREA_ID: &str = "county-area";
pub const IMAGE_ID: &str = "county-image";
pub const IMAGE_CONTAINER_ID: &str = "county-image-container";
pub const SLOGAN_ID: &str = "county-slogan";
pub const ATTRACTIONS_ID: &str = "county-attractions";
pub const FOOD_ID: &str = "county-food";
pub const DIALECT_ID: &str = "county-dialect";
pub const PHRASES_ID: &str = "county-phrases";
pub const FUN_FACT_ID: &str = "county-fun-fact";
/// Children of these containers join the staggered fade-in.
pub const TAB_CONTENT_SELECTOR: &str = ".county-tab-content > div > *";

// Loading overlay
pub const LOADER_SELECTOR: &str = ".map-loader";
pub const LOADER_HIDE_DELAY_MS: u32 = 1_000;
pub const LOADER_REMOVE_DELAY_MS: u32 = 500;

/// Viewport used when the wrapper has no layout size yet.
pub const DEFAULT_MAP_SIZE: (f64, f64) = (800.0, 600.0);
