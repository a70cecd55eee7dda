use crate::metadata::RegionCatalog;
use crate::panel::{DetailSink, PanelContent};
use crate::scene::{Highlight, Scene};

/// Result of a selection attempt, for the caller to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Highlight moved to `key` and the panel was rendered.
    Selected { key: String, previous: Option<String> },
    /// `key` was already active; nothing changed.
    Unchanged,
    /// Highlight moved to `key`, but there is no metadata so the panel kept
    /// its previous content.
    MissingMetadata { key: String, previous: Option<String> },
    /// The scene has no shape for `key`; nothing changed.
    UnknownRegion { key: String },
}

/// Owns the single optional active region.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    active: Option<String>,
}

impl SelectionController {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.as_deref() == Some(key)
    }

    /// Make `key` the active region: restore the old one to its group style,
    /// highlight the new one, then render its details.
    pub fn select(
        &mut self,
        key: &str,
        scene: &mut dyn Scene,
        catalog: &RegionCatalog,
        panel: &mut dyn DetailSink,
    ) -> SelectOutcome {
        if scene.region(key).is_none() {
            return SelectOutcome::UnknownRegion {
                key: key.to_string(),
            };
        }
        if self.is_active(key) {
            return SelectOutcome::Unchanged;
        }

        let previous = self.active.take();
        if let Some(prev) = previous.as_deref() {
            scene.set_highlight(prev, Highlight::Base);
        }
        scene.set_highlight(key, Highlight::Active);
        self.active = Some(key.to_string());

        match catalog.get(key) {
            Some(meta) => {
                panel.render(&PanelContent::from_metadata(key, meta));
                SelectOutcome::Selected {
                    key: key.to_string(),
                    previous,
                }
            }
            None => SelectOutcome::MissingMetadata {
                key: key.to_string(),
                previous,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::fallback_catalog;
    use crate::testing::{RecordingPanel, RecordingScene};

    #[test]
    fn at_most_one_active_shape_after_every_click() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, _renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        let clicks = [
            "taipei", "tainan", "tainan", "penghu", "hualien", "taipei", "kinmen", "kinmen",
            "new-taipei", "taichung",
        ];
        for key in clicks {
            selection.select(key, &mut scene, &catalog, &mut panel);
            assert_eq!(scene.active_keys(), vec![key]);
            assert_eq!(selection.active(), Some(key));
        }
    }

    #[test]
    fn reclick_is_idempotent() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        selection.select("taichung", &mut scene, &catalog, &mut panel);
        let outcome = selection.select("taichung", &mut scene, &catalog, &mut panel);

        assert_eq!(outcome, SelectOutcome::Unchanged);
        assert_eq!(selection.active(), Some("taichung"));
        assert_eq!(scene.highlight("taichung"), Some(Highlight::Active));
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn clicking_taipei_then_tainan_moves_highlight() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        selection.select("taipei", &mut scene, &catalog, &mut panel);
        let outcome = selection.select("tainan", &mut scene, &catalog, &mut panel);

        assert_eq!(
            outcome,
            SelectOutcome::Selected {
                key: "tainan".to_string(),
                previous: Some("taipei".to_string()),
            }
        );
        assert_eq!(scene.fill("taipei"), Some("#1a82ff"));
        assert_eq!(scene.fill("tainan"), Some("#f97707"));
        assert_eq!(renders.borrow().last().map(|c| c.name.as_str()), Some("台南市"));
    }

    #[test]
    fn de_highlight_precedes_highlight() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, _renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        selection.select("taipei", &mut scene, &catalog, &mut panel);
        scene.clear_log();
        selection.select("kaohsiung", &mut scene, &catalog, &mut panel);

        assert_eq!(
            scene.style_log(),
            vec![
                ("taipei".to_string(), Highlight::Base),
                ("kaohsiung".to_string(), Highlight::Active),
            ]
        );
    }

    #[test]
    fn missing_metadata_keeps_previous_panel_content() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        selection.select("hualien", &mut scene, &catalog, &mut panel);
        let outcome = selection.select("kinmen", &mut scene, &catalog, &mut panel);

        assert_eq!(
            outcome,
            SelectOutcome::MissingMetadata {
                key: "kinmen".to_string(),
                previous: Some("hualien".to_string()),
            }
        );
        assert_eq!(scene.highlight("kinmen"), Some(Highlight::Active));
        assert_eq!(scene.highlight("hualien"), Some(Highlight::Base));
        let renders = renders.borrow();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].name, "花蓮縣");
    }

    #[test]
    fn unknown_region_is_a_no_op() {
        let mut scene = RecordingScene::fallback();
        let (mut panel, renders) = RecordingPanel::new();
        let catalog = fallback_catalog();
        let mut selection = SelectionController::default();

        selection.select("tainan", &mut scene, &catalog, &mut panel);
        let outcome = selection.select("atlantis", &mut scene, &catalog, &mut panel);

        assert_eq!(
            outcome,
            SelectOutcome::UnknownRegion {
                key: "atlantis".to_string()
            }
        );
        assert_eq!(selection.active(), Some("tainan"));
        assert_eq!(scene.active_keys(), vec!["tainan"]);
        assert_eq!(renders.borrow().len(), 1);
    }
}
