use crate::metadata::{Card, Phrase, RegionMetadata};

/// Appended to the group label, e.g. `北部` → `北部地區`.
pub const REGION_SUFFIX: &str = "地區";
/// Delay between consecutive elements of the panel's fade-in.
pub const STAGGER_STEP_MS: u32 = 50;

/// Everything the detail panel shows for one region, already formatted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelContent {
    pub key: String,
    pub name: String,
    pub english: String,
    pub region_label: String,
    pub description: String,
    pub population: String,
    pub area: String,
    pub image: String,
    pub slogan: String,
    pub dialect: String,
    pub attractions: Vec<Card>,
    pub food: Vec<Card>,
    pub phrases: Vec<Phrase>,
    pub fun_fact: String,
}

impl PanelContent {
    pub fn from_metadata(key: &str, meta: &RegionMetadata) -> Self {
        Self {
            key: key.to_string(),
            name: meta.name.clone(),
            english: meta.english.clone(),
            region_label: format!("{}{REGION_SUFFIX}", meta.region),
            description: meta.description.clone(),
            population: meta.population.clone(),
            area: meta.area.clone(),
            image: meta.image.clone(),
            slogan: meta.slogan.clone(),
            dialect: meta.dialect.clone(),
            attractions: meta.attractions.clone(),
            food: meta.food.clone(),
            phrases: meta.phrases.clone(),
            fun_fact: meta.fun_fact.clone(),
        }
    }
}

/// Receives rendered panel content. Implemented by the DOM panel.
pub trait DetailSink {
    fn render(&mut self, content: &PanelContent);
}

/// Tracks the one-time switch from the instructional placeholder to the
/// visible panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealOnce {
    revealed: bool,
}

impl RevealOnce {
    /// Returns `true` only on the first call.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }
}

/// Fade-in start delay for each of `count` elements, in milliseconds.
pub fn stagger_delays(count: usize) -> impl Iterator<Item = u32> {
    (0..count as u32).map(|i| i * STAGGER_STEP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fallback_catalog;

    #[test]
    fn region_label_gets_suffix() {
        let catalog = fallback_catalog();
        let content = PanelContent::from_metadata("tainan", &catalog["tainan"]);
        assert_eq!(content.name, "台南市");
        assert_eq!(content.region_label, "南部地區");
        assert_eq!(content.population, "187萬人");
        assert_eq!(content.area, "2,192平方公里");
        assert_eq!(content.key, "tainan");
    }

    #[test]
    fn lists_are_copied_in_order() {
        let catalog = fallback_catalog();
        let meta = &catalog["taipei"];
        let content = PanelContent::from_metadata("taipei", meta);
        let names: Vec<&str> = content.attractions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["台北101", "故宮博物院", "士林夜市"]);
        assert_eq!(content.food.len(), meta.food.len());
        assert_eq!(content.phrases[0].phrase, "哩賀");
        assert_eq!(content.phrases[0].meaning, "你好");
    }

    #[test]
    fn reveal_fires_exactly_once() {
        let mut reveal = RevealOnce::default();
        assert!(reveal.reveal());
        assert!(!reveal.reveal());
    }

    #[test]
    fn stagger_steps_by_fifty_ms() {
        let delays: Vec<u32> = stagger_delays(4).collect();
        assert_eq!(delays, vec![0, 50, 100, 150]);
        assert_eq!(stagger_delays(0).count(), 0);
    }
}
