/// Render-handle registry: one drawable style record per member curve
///
/// The registry key set equals the collection's name set after every
/// `rebuild`. Restyling mutates handles in place and never adds or removes
/// keys, so a missing handle is a synchronization bug and panics.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::data::curve::CurveCollection;
use crate::viewer::flags::FlagStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveColor {
    #[default]
    Black,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleStyle {
    pub color: CurveColor,
    pub dash: LineDash,
    pub visible: bool,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            color: CurveColor::Black,
            dash: LineDash::Solid,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderHandle {
    /// Position of the curve in the collection
    pub index: usize,
    pub style: HandleStyle,
}

/// Which curves the current view mode draws at all.
///
/// `All` in collection view; `Only` the selected (or head) curves in
/// spectrum view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    All,
    Only(HashSet<String>),
}

impl Focus {
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Focus::All => true,
            Focus::Only(names) => names.contains(name),
        }
    }
}

#[derive(Debug, Default)]
pub struct HandleRegistry {
    handles: HashMap<String, RenderHandle>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every handle and create one per member curve, styled from
    /// the current flags, focus and selection.
    pub fn rebuild(
        &mut self,
        collection: &dyn CurveCollection,
        flags: &FlagStore,
        show_flagged: bool,
        focus: &Focus,
        selection: &BTreeSet<String>,
    ) {
        self.handles.clear();
        self.handles.reserve(collection.len());
        for (index, curve) in collection.curves().iter().enumerate() {
            self.handles.insert(
                curve.name.clone(),
                RenderHandle {
                    index,
                    style: HandleStyle::default(),
                },
            );
        }
        self.restyle_by_flags(flags, show_flagged, focus);
        self.restyle_by_selection(selection);
        log::debug!("Rebuilt {} render handles", self.handles.len());
    }

    /// Recompute color and visibility of every handle in place.
    ///
    /// Flagged curves are red and hidden when `show_flagged` is off; curves
    /// outside the focus are hidden.
    pub fn restyle_by_flags(&mut self, flags: &FlagStore, show_flagged: bool, focus: &Focus) {
        for (name, handle) in self.handles.iter_mut() {
            let flagged = flags.is_flagged(name);
            handle.style.color = if flagged {
                CurveColor::Red
            } else {
                CurveColor::Black
            };
            handle.style.visible = focus.contains(name) && (!flagged || show_flagged);
        }
    }

    /// Dash exactly the selected curves; every other handle goes solid
    pub fn restyle_by_selection(&mut self, selection: &BTreeSet<String>) {
        for (name, handle) in self.handles.iter_mut() {
            handle.style.dash = if selection.contains(name) {
                LineDash::Dashed
            } else {
                LineDash::Solid
            };
        }
    }

    /// # Panics
    ///
    /// If `name` has no handle, which means the registry fell out of sync
    /// with the collection.
    pub fn handle(&self, name: &str) -> &RenderHandle {
        match self.handles.get(name) {
            Some(handle) => handle,
            None => panic!("no render handle for curve `{}`", name),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RenderHandle> {
        self.handles.get(name)
    }

    /// True when the key set equals `names` exactly
    pub fn matches_members(&self, names: &[String]) -> bool {
        names.len() == self.handles.len() && names.iter().all(|n| self.handles.contains_key(n))
    }
}
