/// View-model core: keeps the collection, the list model, the render
/// handles and the flag store consistent across every UI event.
///
/// All handlers run on the UI thread. Each one mutates `ViewState`, restyles
/// the registry and asks the redraw scheduler for a repaint; a repaint
/// rebuilds the `PlotScene` snapshot the canvas draws from.

pub mod flags;
pub mod redraw;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod state;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::ViewerConfig;
use crate::data::curve::{Aggregate, CurveCollection};
use crate::error::Result;
use crate::log::journal::Journal;

use flags::FlagStore;
use hit_test::DataRect;
use redraw::{RedrawDecision, RedrawScheduler};
use registry::{Focus, HandleRegistry};
use scene::{Overlay, PlotScene, SceneCurve};
use selection::SpectraList;
use state::{ViewMode, ViewState};

/// Commands the toolbar and list tools dispatch to the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    ToggleMode,
    ToggleShowFlagged,
    ToggleFlag,
    UnflagAll,
    SaveFlags,
    SaveFlagsAs(PathBuf),
    LoadFlags(PathBuf),
    Stitch,
    JumpCorrect,
    ToggleOverlay(Aggregate),
    NextSpectrum,
    PreviousSpectrum,
    MoveSelectedToTop,
    SelectAll,
    ClearSelection,
    InvertSelection,
}

pub struct Viewer {
    config: ViewerConfig,
    collection: Option<Box<dyn CurveCollection>>,
    state: ViewState,
    flags: FlagStore,
    registry: HandleRegistry,
    list: SpectraList,
    overlays: Vec<Overlay>,
    redraw: RedrawScheduler,
    scene: PlotScene,
    journal: Journal,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let flags = FlagStore::new(config.flag_file.clone(), &config.flag_extension);
        let redraw = RedrawScheduler::new(config.redraw_interval(), config.redraw_flush);
        Self {
            config,
            collection: None,
            state: ViewState::default(),
            flags,
            registry: HandleRegistry::new(),
            list: SpectraList::new(),
            overlays: Vec::new(),
            redraw,
            scene: PlotScene::default(),
            journal: Journal::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn collection(&self) -> Option<&dyn CurveCollection> {
        self.collection.as_deref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn list(&self) -> &SpectraList {
        &self.list
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// What the canvas showed at the last repaint
    pub fn scene(&self) -> &PlotScene {
        &self.scene
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Replace the collection.
    ///
    /// Prunes flags of names that left, rebuilds the list and every render
    /// handle, clears the selection and resets the head.
    pub fn set_collection(&mut self, collection: Box<dyn CurveCollection>) {
        let names = collection.member_names();
        let pruned = self.flags.set_members(names.iter().cloned());
        if pruned > 0 {
            log::info!("Dropped {} flags for spectra no longer loaded", pruned);
        }

        self.state.selection.clear();
        self.state.reset_head();
        let flags = &self.flags;
        self.list
            .populate(names.iter().map(String::as_str), |n| flags.is_flagged(n));

        self.journal.set_collection(collection.name());
        self.journal.record(
            "Load",
            &format!("{} ({} spectra)", collection.name(), collection.len()),
        );
        self.collection = Some(collection);

        let focus = self.focus();
        if let Some(c) = self.collection.as_deref() {
            self.registry.rebuild(
                c,
                &self.flags,
                self.state.show_flagged,
                &focus,
                &self.state.selection,
            );
        }
        assert!(
            self.registry.matches_members(&names),
            "render handles out of sync with the collection after rebuild"
        );
        self.refresh_overlays();
        self.request_redraw();
    }

    /// Curves the current mode draws at all
    fn focus(&self) -> Focus {
        match self.state.mode {
            ViewMode::Collection => Focus::All,
            ViewMode::Spectrum if !self.state.selection.is_empty() => {
                Focus::Only(self.state.selection.iter().cloned().collect())
            }
            ViewMode::Spectrum => {
                let head = self
                    .collection
                    .as_deref()
                    .and_then(|c| c.curve(self.state.head()))
                    .map(|c| c.name.clone());
                Focus::Only(head.into_iter().collect())
            }
        }
    }

    fn restyle(&mut self) {
        let focus = self.focus();
        self.registry
            .restyle_by_flags(&self.flags, self.state.show_flagged, &focus);
        self.registry.restyle_by_selection(&self.state.selection);
    }

    /// Recompute every enabled overlay; disabled ones are removed
    fn refresh_overlays(&mut self) {
        self.overlays.clear();
        let Some(c) = self.collection.as_deref() else {
            return;
        };
        for kind in self.state.overlays.enabled() {
            if let Some(mut curve) = c.aggregate(kind) {
                curve.name = format!("{}_{}", c.name(), kind);
                self.overlays.push(Overlay { kind, curve });
            }
        }
    }

    /// Re-derive the whole visual state and request a repaint
    fn update(&mut self) {
        if self.collection.is_none() {
            return;
        }
        self.restyle();
        self.refresh_overlays();
        self.request_redraw();
    }

    fn apply_selection(&mut self, selection: BTreeSet<String>) {
        if let Some(name) = selection.iter().find(|n| self.registry.get(n).is_none()) {
            panic!("selection references curve `{}` outside the collection", name);
        }
        self.state.selection = selection;
        self.restyle();
        self.request_redraw();
    }

    /// List widget reported a new set of selected rows (display order).
    ///
    /// The head follows the first selected row.
    pub fn on_list_selection_changed(&mut self, rows: &[usize]) {
        if self.collection.is_none() {
            return;
        }
        let selection = self.list.apply_widget_rows(rows);
        let head = self
            .list
            .selected_names()
            .first()
            .map(|name| self.registry.handle(name).index)
            .unwrap_or(0);
        let len = self.collection.as_deref().map_or(0, |c| c.len());
        self.state.set_head(head, len);
        log::debug!("List selection: {} spectra", selection.len());
        self.apply_selection(selection);
    }

    /// A rectangle was dragged on the canvas, corners in data coordinates.
    ///
    /// Replaces the selection with the curves the rectangle touches and
    /// marks the same rows in the list. Returns the number of hits.
    pub fn on_rectangle_selected(&mut self, a: [f64; 2], b: [f64; 2]) -> usize {
        let Some(c) = self.collection.as_deref() else {
            return 0;
        };
        let Some(rect) = DataRect::from_corners(a, b) else {
            log::debug!("Ignoring degenerate selection rectangle");
            return 0;
        };
        let selection: BTreeSet<String> = hit_test::hit_test(c.curves(), &rect).into_iter().collect();
        let hits = selection.len();
        log::debug!("Rectangle {:?} hit {} spectra", rect, hits);
        self.list.mark_names(&selection);
        self.apply_selection(selection);
        hits
    }

    /// Point the head at `value` (wrapped); ignored without a collection
    pub fn set_head(&mut self, value: usize) {
        let len = self.collection.as_deref().map_or(0, |c| c.len());
        if self.state.set_head(value, len) {
            self.update();
        }
    }

    fn step_head(&mut self, delta: isize) {
        if self.state.mode != ViewMode::Spectrum {
            return;
        }
        let len = self.collection.as_deref().map_or(0, |c| c.len());
        if self.state.step_head(delta, len) {
            self.update();
        }
    }

    /// Run one toolbar or list-tool command.
    ///
    /// Returns a status line for the user when the command has something to
    /// report. Only flag-file I/O can fail.
    pub fn dispatch(&mut self, action: ViewerAction) -> Result<Option<String>> {
        log::debug!("Dispatch {:?}", action);
        match action {
            ViewerAction::ToggleMode => {
                self.state.mode = self.state.mode.toggled();
                log::info!("{} view", self.state.mode.label());
                self.update();
            }
            ViewerAction::ToggleShowFlagged => {
                self.state.show_flagged = !self.state.show_flagged;
                self.update();
            }
            ViewerAction::ToggleFlag => return Ok(self.toggle_flags()),
            ViewerAction::UnflagAll => {
                let n = self.flags.unflag_all();
                self.list.refresh_flags(|_| false);
                if n > 0 {
                    self.journal.record("Unflag all", &format!("{} flags cleared", n));
                }
                self.update();
            }
            ViewerAction::SaveFlags | ViewerAction::SaveFlagsAs(_) | ViewerAction::LoadFlags(_)
                if self.collection.is_none() =>
            {
                log::debug!("No collection loaded, flag file left alone");
            }
            ViewerAction::SaveFlags => return self.save_flags().map(Some),
            ViewerAction::SaveFlagsAs(path) => {
                self.flags.set_path(path);
                return self.save_flags().map(Some);
            }
            ViewerAction::LoadFlags(path) => {
                let (added, unknown) = self.flags.load(&path)?;
                let flags = &self.flags;
                self.list.refresh_flags(|n| flags.is_flagged(n));
                let detail = format!(
                    "{} flagged from {} ({} unknown names ignored)",
                    added,
                    path.display(),
                    unknown
                );
                self.journal.record("Load flags", &detail);
                self.update();
                return Ok(Some(detail));
            }
            ViewerAction::Stitch => {
                let Some(c) = self.collection.as_deref_mut() else {
                    return Ok(None);
                };
                c.stitch();
                let detail = format!("{} spectra", c.len());
                self.journal.record("Stitch", &detail);
                self.update();
            }
            ViewerAction::JumpCorrect => {
                let Some(c) = self.collection.as_deref_mut() else {
                    return Ok(None);
                };
                c.jump_correct(&self.config.jump_splices, self.config.jump_reference);
                let detail = format!(
                    "splices {:?}, reference segment {}",
                    self.config.jump_splices, self.config.jump_reference
                );
                self.journal.record("Jump correct", &detail);
                self.update();
            }
            ViewerAction::ToggleOverlay(kind) => {
                let on = self.state.overlays.toggle(kind);
                log::info!("{} overlay {}", kind, if on { "on" } else { "off" });
                self.update();
            }
            ViewerAction::NextSpectrum => self.step_head(1),
            ViewerAction::PreviousSpectrum => self.step_head(-1),
            ViewerAction::MoveSelectedToTop => {
                self.list.move_selected_to_top();
            }
            ViewerAction::SelectAll => {
                self.list.select_all();
                self.resync_from_list();
            }
            ViewerAction::ClearSelection => {
                self.list.clear_selection();
                self.resync_from_list();
            }
            ViewerAction::InvertSelection => {
                self.list.invert_selection();
                self.resync_from_list();
            }
        }
        Ok(None)
    }

    /// Feed the list's current marks back through the widget path
    fn resync_from_list(&mut self) {
        let rows = self.list.selected_rows();
        self.on_list_selection_changed(&rows);
    }

    fn toggle_flags(&mut self) -> Option<String> {
        if self.collection.is_none() || self.state.selection.is_empty() {
            return None;
        }
        let mut flagged = 0;
        let mut unflagged = 0;
        for name in &self.state.selection {
            match self.flags.toggle(name) {
                Some(true) => flagged += 1,
                Some(false) => unflagged += 1,
                None => continue,
            }
            self.list.set_flagged(name, self.flags.is_flagged(name));
        }
        let names: Vec<&str> = self.state.selection.iter().map(String::as_str).collect();
        self.journal.record("Toggle flag", &names.join(", "));
        self.update();
        Some(format!("{} flagged, {} unflagged", flagged, unflagged))
    }

    fn save_flags(&mut self) -> Result<String> {
        let n = self.flags.save()?;
        let detail = format!("{} flags to {}", n, self.flags.path().display());
        self.journal.record("Save flags", &detail);
        Ok(format!("Saved {}", detail))
    }

    fn request_redraw(&mut self) {
        match self.redraw.request(Instant::now()) {
            RedrawDecision::Now => self.repaint(),
            RedrawDecision::Deferred(wait) => log::debug!("Redraw deferred by {:?}", wait),
            RedrawDecision::Dropped => log::debug!("Redraw dropped"),
        }
    }

    /// Flush a deferred repaint if its window has closed
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.redraw.poll(now) {
            self.repaint();
            return true;
        }
        false
    }

    /// How long until a deferred repaint is due
    pub fn time_to_flush(&self, now: Instant) -> Option<Duration> {
        self.redraw.time_to_flush(now)
    }

    fn repaint(&mut self) {
        let generation = self.scene.generation + 1;
        self.scene = self.build_scene();
        self.scene.generation = generation;
    }

    fn build_scene(&self) -> PlotScene {
        let Some(c) = self.collection.as_deref() else {
            return PlotScene::default();
        };
        let curves = c
            .curves()
            .iter()
            .filter_map(|curve| {
                let style = self.registry.handle(&curve.name).style;
                style.visible.then(|| SceneCurve {
                    label: curve.name.clone(),
                    points: curve.samples.clone(),
                    color: style.color,
                    dash: style.dash,
                })
            })
            .collect();
        let spectrum = self.state.mode == ViewMode::Spectrum;
        PlotScene {
            generation: 0,
            title: if spectrum {
                "selection".to_string()
            } else {
                c.name().to_string()
            },
            y_label: c.measure_type().to_string(),
            show_legend: spectrum,
            curves,
            overlays: self.overlays.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::collection::SpectrumCollection;
    use crate::data::curve::Curve;
    use crate::viewer::registry::{CurveColor, LineDash};

    fn viewer_with(curves: Vec<Curve>) -> Viewer {
        let mut v = Viewer::new(ViewerConfig::default());
        let c = SpectrumCollection::new("field", "pct_reflect", curves).unwrap();
        v.set_collection(Box::new(c));
        v
    }

    fn two_curves() -> Viewer {
        viewer_with(vec![
            Curve::new("a", vec![[1.0, 1.0], [2.0, 5.0]]),
            Curve::new("b", vec![[1.0, 9.0], [2.0, 1.0]]),
        ])
    }

    fn five_curves() -> Viewer {
        viewer_with(
            (0..5)
                .map(|i| Curve::new(format!("s{}", i), vec![[0.0, i as f64], [1.0, i as f64]]))
                .collect(),
        )
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Flush whatever repaint is owed. Each flush records its instant as the
    /// last draw, so later calls must look further ahead.
    fn settle(v: &mut Viewer) {
        let ahead = Duration::from_secs(5 * (v.scene().generation + 1));
        v.tick(Instant::now() + ahead);
    }

    fn assert_dash_matches_selection(v: &Viewer) {
        for name in v.collection().unwrap().member_names() {
            let dashed = v.registry().handle(&name).style.dash == LineDash::Dashed;
            assert_eq!(dashed, v.state().selection.contains(&name), "{}", name);
        }
    }

    #[test]
    fn test_load_builds_matching_handles_and_rows() {
        let v = two_curves();
        let members = v.collection().unwrap().member_names();
        assert!(v.registry().matches_members(&members));
        assert_eq!(v.list().rows().len(), 2);
        assert_eq!(v.scene().generation, 1);
        assert_eq!(v.scene().title, "field");
        assert_eq!(v.scene().y_label, "pct_reflect");
    }

    #[test]
    fn test_rectangle_selects_and_marks_list() {
        let mut v = two_curves();
        assert_eq!(v.on_rectangle_selected([0.5, 0.0], [1.5, 6.0]), 1);
        assert_eq!(v.state().selection, names(&["a"]));
        assert_eq!(v.list().selected_names(), vec!["a".to_string()]);
        assert_dash_matches_selection(&v);
    }

    #[test]
    fn test_rectangle_replaces_previous_list_selection() {
        let mut v = two_curves();
        v.on_list_selection_changed(&[1]);
        assert_eq!(v.state().selection, names(&["b"]));
        v.on_rectangle_selected([1.5, 0.0], [0.5, 6.0]);
        assert_eq!(v.state().selection, names(&["a"]));
        assert_eq!(v.list().selected_rows(), vec![0]);
        assert_dash_matches_selection(&v);
    }

    #[test]
    fn test_degenerate_rectangle_keeps_selection() {
        let mut v = two_curves();
        v.on_list_selection_changed(&[1]);
        assert_eq!(v.on_rectangle_selected([1.0, 0.0], [1.0, 6.0]), 0);
        assert_eq!(v.state().selection, names(&["b"]));
    }

    #[test]
    fn test_flagged_curve_hidden_then_shown_red() {
        let mut v = two_curves();
        v.on_list_selection_changed(&[0]);
        v.dispatch(ViewerAction::ToggleFlag).unwrap();
        assert!(v.flags().is_flagged("a"));
        assert!(v.list().rows()[0].flagged);

        v.dispatch(ViewerAction::ToggleShowFlagged).unwrap();
        assert!(!v.registry().handle("a").style.visible);
        settle(&mut v);
        assert!(v.scene().curve("a").is_none());

        v.dispatch(ViewerAction::ToggleShowFlagged).unwrap();
        let style = v.registry().handle("a").style;
        assert!(style.visible);
        assert_eq!(style.color, CurveColor::Red);
        settle(&mut v);
        assert_eq!(v.scene().curve("a").unwrap().color, CurveColor::Red);
    }

    #[test]
    fn test_unflag_all_restores_black() {
        let mut v = two_curves();
        v.dispatch(ViewerAction::SelectAll).unwrap();
        v.dispatch(ViewerAction::ToggleFlag).unwrap();
        assert_eq!(v.flags().len(), 2);
        v.dispatch(ViewerAction::UnflagAll).unwrap();
        assert!(v.flags().is_empty());
        assert!(v.list().rows().iter().all(|r| !r.flagged));
        assert_eq!(v.registry().handle("b").style.color, CurveColor::Black);
    }

    #[test]
    fn test_head_wraps_on_five_members() {
        let mut v = five_curves();
        v.set_head(5);
        assert_eq!(v.state().head(), 0);
        v.set_head(8);
        assert_eq!(v.state().head(), 3);
    }

    #[test]
    fn test_spectrum_view_shows_head_without_selection() {
        let mut v = five_curves();
        v.set_head(2);
        v.dispatch(ViewerAction::ToggleMode).unwrap();
        let visible: Vec<String> = v
            .collection()
            .unwrap()
            .member_names()
            .into_iter()
            .filter(|n| v.registry().handle(n).style.visible)
            .collect();
        assert_eq!(visible, vec!["s2".to_string()]);

        v.dispatch(ViewerAction::NextSpectrum).unwrap();
        assert_eq!(v.state().head(), 3);
        assert!(v.registry().handle("s3").style.visible);
        assert!(!v.registry().handle("s2").style.visible);

        settle(&mut v);
        assert!(v.scene().show_legend);
        assert_eq!(v.scene().title, "selection");
    }

    #[test]
    fn test_spectrum_view_shows_selection() {
        let mut v = five_curves();
        v.dispatch(ViewerAction::ToggleMode).unwrap();
        v.on_list_selection_changed(&[1, 4]);
        assert_eq!(v.state().head(), 1);
        for (name, shown) in [("s0", false), ("s1", true), ("s2", false), ("s4", true)] {
            assert_eq!(v.registry().handle(name).style.visible, shown, "{}", name);
        }
    }

    #[test]
    fn test_next_spectrum_ignored_in_collection_view() {
        let mut v = five_curves();
        v.dispatch(ViewerAction::NextSpectrum).unwrap();
        assert_eq!(v.state().head(), 0);
    }

    #[test]
    fn test_move_to_top_then_select_maps_by_display_order() {
        let mut v = five_curves();
        v.on_list_selection_changed(&[2, 4]);
        v.dispatch(ViewerAction::MoveSelectedToTop).unwrap();
        let order: Vec<&str> = v.list().rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["s2", "s4", "s0", "s1", "s3"]);
        assert_eq!(v.list().selected_rows(), vec![0, 1]);
        assert_eq!(v.collection().unwrap().member_names()[2], "s2");

        v.on_list_selection_changed(&[1]);
        assert_eq!(v.state().selection, names(&["s4"]));
        assert_eq!(v.state().head(), 4);
        assert_dash_matches_selection(&v);
    }

    #[test]
    fn test_invert_and_clear_funnel_through_list() {
        let mut v = five_curves();
        v.on_list_selection_changed(&[0, 1]);
        v.dispatch(ViewerAction::InvertSelection).unwrap();
        assert_eq!(v.state().selection, names(&["s2", "s3", "s4"]));
        assert_dash_matches_selection(&v);
        v.dispatch(ViewerAction::ClearSelection).unwrap();
        assert!(v.state().selection.is_empty());
        assert_dash_matches_selection(&v);
    }

    #[test]
    fn test_overlays_added_and_removed() {
        let mut v = two_curves();
        v.dispatch(ViewerAction::ToggleOverlay(Aggregate::Mean)).unwrap();
        v.dispatch(ViewerAction::ToggleOverlay(Aggregate::Max)).unwrap();
        let labels: Vec<&str> = v.overlays().iter().map(|o| o.curve.name.as_str()).collect();
        assert_eq!(labels, vec!["field_mean", "field_max"]);

        v.dispatch(ViewerAction::ToggleOverlay(Aggregate::Mean)).unwrap();
        assert_eq!(v.overlays().len(), 1);
        assert_eq!(v.overlays()[0].kind, Aggregate::Max);
        settle(&mut v);
        assert_eq!(v.scene().overlays.len(), 1);
        // overlays are not members and get no handle
        assert!(v.registry().get("field_max").is_none());
    }

    #[test]
    fn test_replacing_collection_prunes_flags_and_resets() {
        let mut v = five_curves();
        v.on_list_selection_changed(&[1, 3]);
        v.dispatch(ViewerAction::ToggleFlag).unwrap();
        v.set_head(3);

        let c = SpectrumCollection::new(
            "next",
            "",
            vec![Curve::new("s3", vec![[0.0, 0.0]]), Curve::new("z", vec![[0.0, 1.0]])],
        )
        .unwrap();
        v.set_collection(Box::new(c));
        assert_eq!(v.flags().names().collect::<Vec<_>>(), vec!["s3"]);
        assert!(v.state().selection.is_empty());
        assert_eq!(v.state().head(), 0);
        assert!(v.list().rows()[0].flagged);
        assert!(v.registry().matches_members(&["s3".to_string(), "z".to_string()]));
    }

    #[test]
    fn test_stitch_keeps_handles() {
        let mut v = viewer_with(vec![Curve::new(
            "a",
            vec![[1.0, 1.0], [2.0, 2.0], [2.0, 4.0]],
        )]);
        v.dispatch(ViewerAction::ToggleOverlay(Aggregate::Mean)).unwrap();
        v.dispatch(ViewerAction::Stitch).unwrap();
        assert!(v.registry().matches_members(&["a".to_string()]));
        assert_eq!(v.collection().unwrap().curves()[0].samples.len(), 2);
        assert_eq!(v.overlays()[0].curve.samples, vec![[1.0, 1.0], [2.0, 3.0]]);
    }

    #[test]
    fn test_redraws_are_throttled() {
        let mut v = two_curves();
        assert_eq!(v.scene().generation, 1);
        v.dispatch(ViewerAction::ToggleMode).unwrap();
        v.dispatch(ViewerAction::ToggleMode).unwrap();
        assert_eq!(v.scene().generation, 1);
        assert!(v.time_to_flush(Instant::now()).is_some());
        settle(&mut v);
        assert_eq!(v.scene().generation, 2);
        assert!(!v.tick(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn test_operations_without_collection_are_noops() {
        let mut v = Viewer::new(ViewerConfig::default());
        v.set_head(3);
        v.on_list_selection_changed(&[0]);
        assert_eq!(v.on_rectangle_selected([0.0, 0.0], [1.0, 1.0]), 0);
        for action in [
            ViewerAction::ToggleMode,
            ViewerAction::ToggleFlag,
            ViewerAction::Stitch,
            ViewerAction::JumpCorrect,
            ViewerAction::ToggleOverlay(Aggregate::Std),
            ViewerAction::SelectAll,
            ViewerAction::SaveFlags,
        ] {
            assert_eq!(v.dispatch(action).unwrap(), None);
        }
        assert_eq!(v.state().head(), 0);
        assert!(v.scene().is_empty());
        assert_eq!(v.scene().generation, 0);
    }

    #[test]
    fn test_flag_file_untouched_without_collection() {
        let dir = std::env::temp_dir().join(format!("spectral_viewer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("flagged_spectra.txt");
        std::fs::write(&path, "keep_me\nand_me\n").unwrap();

        let config = ViewerConfig {
            flag_file: path.clone(),
            ..ViewerConfig::default()
        };
        let mut v = Viewer::new(config);
        for action in [
            ViewerAction::SaveFlags,
            ViewerAction::SaveFlagsAs(dir.join("other.txt")),
            ViewerAction::LoadFlags(path.clone()),
        ] {
            assert_eq!(v.dispatch(action).unwrap(), None);
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep_me\nand_me\n");
        assert!(!dir.join("other.txt").exists());
        assert_eq!(v.flags().path(), path.as_path());
        assert!(v.flags().is_empty());
        assert!(v.journal().is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_flags_as_writes_file() {
        let dir = std::env::temp_dir().join(format!("spectral_viewer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut v = two_curves();
        v.on_list_selection_changed(&[1]);
        v.dispatch(ViewerAction::ToggleFlag).unwrap();

        let status = v
            .dispatch(ViewerAction::SaveFlagsAs(dir.join("picked")))
            .unwrap()
            .unwrap();
        assert!(status.starts_with("Saved 1 flags"));
        assert_eq!(v.flags().path(), dir.join("picked.txt"));
        assert_eq!(std::fs::read_to_string(dir.join("picked.txt")).unwrap(), "b\n");

        v.dispatch(ViewerAction::UnflagAll).unwrap();
        v.dispatch(ViewerAction::LoadFlags(dir.join("picked.txt"))).unwrap();
        assert!(v.flags().is_flagged("b"));
        assert!(v.list().rows()[1].flagged);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_failure_leaves_flags() {
        let mut v = two_curves();
        v.on_list_selection_changed(&[0]);
        v.dispatch(ViewerAction::ToggleFlag).unwrap();
        let bad = std::env::temp_dir()
            .join(format!("missing_{}", uuid::Uuid::new_v4()))
            .join("flags.txt");
        assert!(v.dispatch(ViewerAction::SaveFlagsAs(bad)).is_err());
        assert!(v.flags().is_flagged("a"));
    }

    #[test]
    fn test_journal_records_mutations() {
        let mut v = two_curves();
        v.on_list_selection_changed(&[0]);
        v.dispatch(ViewerAction::ToggleFlag).unwrap();
        v.dispatch(ViewerAction::JumpCorrect).unwrap();
        let actions: Vec<&str> = v.journal().entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["Load", "Toggle flag", "Jump correct"]);
    }
}
