//! Hand-drawn schematic map used when the geographic feature collection
//! cannot be loaded. Coordinates are in a fixed 800×1000 view box.

use crate::metadata::RegionCatalog;
use crate::region::RegionGroup::{Central, East, North, South};
use crate::region::{Label, Outline, Region, RegionGroup};
use crate::scene::{SceneKind, SceneLayout};

pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 1000.0;
const ISLAND_RADIUS: f64 = 15.0;

const MAINLAND: &[(&str, RegionGroup, &str)] = &[
    ("taipei", North, "M423,180 L450,165 L470,180 L460,200 L430,205 L415,195 Z"),
    (
        "new-taipei",
        North,
        "M380,160 L425,145 L470,160 L485,195 L465,225 L430,240 L400,235 L385,210 L370,190 Z",
    ),
    ("keelung", North, "M450,130 L470,140 L465,160 L445,155 Z"),
    (
        "taoyuan",
        North,
        "M350,180 L390,175 L420,195 L425,220 L410,240 L380,245 L355,230 L340,210 Z",
    ),
    ("hsinchu-city", North, "M330,230 L350,225 L360,245 L340,255 Z"),
    (
        "hsinchu-county",
        North,
        "M310,220 L345,215 L370,235 L375,260 L350,280 L320,270 L300,245 Z",
    ),
    (
        "yilan",
        North,
        "M430,220 L460,215 L490,230 L505,255 L495,280 L465,290 L440,275 L425,250 Z",
    ),
    (
        "miaoli",
        Central,
        "M290,255 L320,250 L345,265 L355,290 L340,315 L315,320 L295,305 L280,280 Z",
    ),
    (
        "taichung",
        Central,
        "M265,295 L300,285 L335,295 L360,315 L370,345 L350,370 L325,380 L295,370 L270,345 L255,320 Z",
    ),
    (
        "changhua",
        Central,
        "M240,330 L270,325 L290,345 L295,370 L275,385 L250,380 L235,360 Z",
    ),
    (
        "nantou",
        Central,
        "M300,345 L335,335 L365,350 L380,380 L375,410 L350,435 L320,440 L300,420 L285,390 L290,365 Z",
    ),
    (
        "yunlin",
        Central,
        "M220,370 L255,365 L280,375 L295,395 L285,415 L260,425 L235,420 L220,400 Z",
    ),
    ("chiayi-city", South, "M230,425 L250,420 L245,435 L225,440 Z"),
    (
        "chiayi-county",
        South,
        "M210,410 L240,400 L265,410 L285,430 L280,455 L255,470 L230,465 L210,445 Z",
    ),
    (
        "tainan",
        South,
        "M200,445 L230,440 L255,450 L270,475 L265,500 L240,515 L215,510 L195,490 Z",
    ),
    (
        "kaohsiung",
        South,
        "M190,490 L225,485 L250,495 L270,520 L275,550 L260,575 L235,585 L210,570 L190,540 L180,510 Z",
    ),
    (
        "pingtung",
        South,
        "M220,560 L245,555 L265,570 L280,600 L270,630 L250,655 L235,650 L220,620 L215,590 Z",
    ),
    (
        "hualien",
        East,
        "M365,310 L395,300 L420,320 L430,350 L425,385 L400,415 L370,425 L350,410 L340,380 L345,345 Z",
    ),
    (
        "taitung",
        East,
        "M320,430 L350,420 L380,435 L395,465 L390,495 L365,520 L340,525 L320,505 L310,475 L315,450 Z",
    ),
];

const ISLANDS: &[(&str, f64, f64)] = &[
    ("penghu", 150.0, 470.0),
    ("kinmen", 100.0, 300.0),
    ("lienchiang", 100.0, 120.0),
];

const LABELS: &[(&str, f64, f64, &str)] = &[
    ("taipei", 430.0, 185.0, "台北"),
    ("new-taipei", 405.0, 200.0, "新北"),
    ("keelung", 455.0, 145.0, "基隆"),
    ("taoyuan", 375.0, 210.0, "桃園"),
    ("hsinchu-city", 345.0, 240.0, "新竹"),
    ("yilan", 465.0, 250.0, "宜蘭"),
    ("miaoli", 320.0, 280.0, "苗栗"),
    ("taichung", 310.0, 330.0, "台中"),
    ("changhua", 260.0, 355.0, "彰化"),
    ("nantou", 330.0, 385.0, "南投"),
    ("yunlin", 250.0, 390.0, "雲林"),
    ("chiayi-city", 235.0, 435.0, "嘉義"),
    ("tainan", 230.0, 475.0, "台南"),
    ("kaohsiung", 225.0, 535.0, "高雄"),
    ("pingtung", 250.0, 605.0, "屏東"),
    ("hualien", 395.0, 360.0, "花蓮"),
    ("taitung", 350.0, 480.0, "台東"),
    ("penghu", 150.0, 475.0, "澎湖"),
    ("kinmen", 100.0, 305.0, "金門"),
    ("lienchiang", 100.0, 125.0, "馬祖"),
];

fn label_for(key: &str) -> Option<Label> {
    LABELS
        .iter()
        .find(|(k, ..)| *k == key)
        .map(|&(_, x, y, text)| Label {
            x,
            y,
            text: text.to_string(),
        })
}

fn display_name(key: &str, catalog: &RegionCatalog) -> String {
    catalog
        .get(key)
        .map(|meta| meta.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(key)
        .to_string()
}

/// Build the schematic scene: mainland paths first, then island circles, in
/// a fixed order. Names come from the catalog where it has them.
pub fn layout(catalog: &RegionCatalog) -> SceneLayout {
    let mainland = MAINLAND.iter().map(|&(key, group, d)| Region {
        key: key.to_string(),
        name: display_name(key, catalog),
        group,
        outline: Outline::Path(d.to_string()),
        label: label_for(key),
    });
    let islands = ISLANDS.iter().map(|&(key, cx, cy)| Region {
        key: key.to_string(),
        name: display_name(key, catalog),
        group: RegionGroup::Islands,
        outline: Outline::Circle {
            cx,
            cy,
            r: ISLAND_RADIUS,
        },
        label: label_for(key),
    });

    SceneLayout {
        kind: SceneKind::Fallback,
        width: VIEW_WIDTH,
        height: VIEW_HEIGHT,
        regions: mainland.chain(islands).collect(),
    }
}
