/// Process-local view state threaded through every viewer handler

use std::collections::BTreeSet;

use crate::data::curve::Aggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every member curve, styled by flag state
    #[default]
    Collection,
    /// Only the selected curves, or the head curve, with a legend
    Spectrum,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Collection => ViewMode::Spectrum,
            ViewMode::Spectrum => ViewMode::Collection,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Collection => "Collection",
            ViewMode::Spectrum => "Spectrum",
        }
    }
}

/// Independent on/off switches for the aggregate overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayToggles {
    pub mean: bool,
    pub median: bool,
    pub max: bool,
    pub min: bool,
    pub std: bool,
}

impl OverlayToggles {
    pub fn is_on(&self, kind: Aggregate) -> bool {
        match kind {
            Aggregate::Mean => self.mean,
            Aggregate::Median => self.median,
            Aggregate::Max => self.max,
            Aggregate::Min => self.min,
            Aggregate::Std => self.std,
        }
    }

    pub fn toggle(&mut self, kind: Aggregate) -> bool {
        let slot = match kind {
            Aggregate::Mean => &mut self.mean,
            Aggregate::Median => &mut self.median,
            Aggregate::Max => &mut self.max,
            Aggregate::Min => &mut self.min,
            Aggregate::Std => &mut self.std,
        };
        *slot = !*slot;
        *slot
    }

    pub fn enabled(&self) -> impl Iterator<Item = Aggregate> + '_ {
        Aggregate::ALL.into_iter().filter(|k| self.is_on(*k))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Draw flagged curves in red; hide them when off
    pub show_flagged: bool,
    pub overlays: OverlayToggles,
    /// Always a subset of the current collection's names
    pub selection: BTreeSet<String>,
    head: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Collection,
            show_flagged: true,
            overlays: OverlayToggles::default(),
            selection: BTreeSet::new(),
            head: 0,
        }
    }
}

impl ViewState {
    pub fn head(&self) -> usize {
        self.head
    }

    /// Point the head at `value` modulo `len`.
    ///
    /// Returns false and leaves the head untouched when `len` is zero.
    pub fn set_head(&mut self, value: usize, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.head = value % len;
        true
    }

    /// Move the head by `delta` positions, wrapping in both directions
    pub fn step_head(&mut self, delta: isize, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let len = len as isize;
        let next = (self.head as isize + delta).rem_euclid(len);
        self.head = next as usize;
        true
    }

    pub fn reset_head(&mut self) {
        self.head = 0;
    }
}
