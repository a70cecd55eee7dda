use serde::{Deserialize, Serialize};

use crate::colors;

/// Coarse geographic grouping. Only used to pick a region's default fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionGroup {
    North,
    Central,
    South,
    East,
    Islands,
    #[serde(other)]
    Unknown,
}

impl RegionGroup {
    /// Parse a classifier string. Accepts the English keys used by the
    /// geometry properties and the Chinese labels used by the metadata.
    pub fn from_classifier(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "north" | "北部" => Self::North,
            "central" | "中部" => Self::Central,
            "south" | "南部" => Self::South,
            "east" | "東部" => Self::East,
            "islands" | "離島" => Self::Islands,
            _ => Self::Unknown,
        }
    }

    pub const fn fill(self) -> &'static str {
        match self {
            Self::North => colors::NORTH,
            Self::Central => colors::CENTRAL,
            Self::South => colors::SOUTH,
            Self::East => colors::EAST,
            Self::Islands => colors::ISLANDS,
            Self::Unknown => colors::DEFAULT_FILL,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Central => "central",
            Self::South => "south",
            Self::East => "east",
            Self::Islands => "islands",
            Self::Unknown => "unknown",
        }
    }
}

/// Screen-space outline of one drawn region.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// SVG path data (`M… L… Z`).
    Path(String),
    /// Island territories on the hand-drawn map.
    Circle { cx: f64, cy: f64, r: f64 },
}

/// Text label anchored inside a region, in the same space as its outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One selectable region as drawn in the scene. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub key: String,
    pub name: String,
    pub group: RegionGroup,
    pub outline: Outline,
    pub label: Option<Label>,
}

#[cfg(test)]
mod tests {
    use super::RegionGroup;

    #[test]
    fn classifier_accepts_english_and_chinese_labels() {
        assert_eq!(RegionGroup::from_classifier("north"), RegionGroup::North);
        assert_eq!(RegionGroup::from_classifier(" Islands "), RegionGroup::Islands);
        assert_eq!(RegionGroup::from_classifier("南部"), RegionGroup::South);
        assert_eq!(RegionGroup::from_classifier("東部"), RegionGroup::East);
    }

    #[test]
    fn unknown_classifier_maps_to_default_fill() {
        let group = RegionGroup::from_classifier("atlantis");
        assert_eq!(group, RegionGroup::Unknown);
        assert_eq!(group.fill(), "#6c757d");
    }

    #[test]
    fn five_groups_have_distinct_palette_entries() {
        assert_eq!(RegionGroup::North.fill(), "#1a82ff");
        assert_eq!(RegionGroup::Central.fill(), "#f97707");
        assert_eq!(RegionGroup::South.fill(), "#17ad65");
        assert_eq!(RegionGroup::East.fill(), "#6c757d");
        assert_eq!(RegionGroup::Islands.fill(), "#9333ea");
    }

    #[test]
    fn group_deserializes_unknown_variant() {
        let group: RegionGroup = serde_json::from_str("\"mountains\"").unwrap();
        assert_eq!(group, RegionGroup::Unknown);
    }
}
