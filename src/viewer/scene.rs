/// Snapshot of what the canvas shows, rebuilt only when a repaint fires

use crate::data::curve::{Aggregate, Curve};
use crate::viewer::registry::{CurveColor, LineDash};

/// Aggregate curve drawn on top of the members; never selectable
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: Aggregate,
    /// Labelled `<collection>_<statistic>`
    pub curve: Curve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneCurve {
    pub label: String,
    pub points: Vec<[f64; 2]>,
    pub color: CurveColor,
    pub dash: LineDash,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotScene {
    /// Incremented on every repaint
    pub generation: u64,
    pub title: String,
    pub y_label: String,
    pub show_legend: bool,
    /// Visible member curves in collection order
    pub curves: Vec<SceneCurve>,
    pub overlays: Vec<Overlay>,
}

impl PlotScene {
    pub fn curve(&self, label: &str) -> Option<&SceneCurve> {
        self.curves.iter().find(|c| c.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.overlays.is_empty()
    }
}
