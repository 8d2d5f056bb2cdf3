/// Spectra canvas: draws the current plot scene and reports rectangle drags
///
/// Primary-button drag draws a selection rectangle; secondary-button drag
/// keeps egui_plot's boxed zoom. The canvas only reads `PlotScene`, so what
/// is on screen changes only when the viewer repaints.

use egui_plot::{Line, LineStyle, Plot, PlotPoints, PlotUi, Polygon};

use crate::gui::theme::ThemeColors;
use crate::viewer::registry::LineDash;
use crate::viewer::scene::PlotScene;

#[derive(Debug, Clone, Default)]
pub struct PlotViewState {
    /// Incremented on reset-zoom to give the plot a fresh ID
    pub plot_generation: u32,
    /// Rectangle corners in data coordinates while a drag is in progress
    pub drag_start: Option<[f64; 2]>,
    pub drag_current: Option<[f64; 2]>,
}

impl PlotViewState {
    pub fn reset_zoom(&mut self) {
        self.plot_generation = self.plot_generation.wrapping_add(1);
    }

    fn draft(&self) -> Option<([f64; 2], [f64; 2])> {
        Some((self.drag_start?, self.drag_current?))
    }
}

/// Render the scene; returns the two corners of a finished selection drag
pub fn show_plot(
    ui: &mut egui::Ui,
    scene: &PlotScene,
    state: &mut PlotViewState,
    colors: &ThemeColors,
) -> Option<([f64; 2], [f64; 2])> {
    if !scene.title.is_empty() {
        ui.vertical_centered(|ui| {
            ui.strong(&scene.title);
        });
    }

    let mut plot = Plot::new(format!("spectra_plot_{}", state.plot_generation))
        .height(ui.available_height() - 4.0)
        .x_axis_label("wavelength")
        .y_axis_label(scene.y_label.clone())
        .allow_drag(false)
        .allow_zoom(true)
        .allow_scroll(true)
        .allow_boxed_zoom(true)
        .boxed_zoom_pointer_button(egui::PointerButton::Secondary);
    if scene.show_legend {
        plot = plot.legend(
            egui_plot::Legend::default()
                .position(egui_plot::Corner::RightTop)
                .background_alpha(0.6),
        );
    }

    let draft = state.draft();
    let plot_resp = plot.show(ui, |plot_ui: &mut PlotUi| {
        draw_scene(plot_ui, scene, colors);
        if let Some((a, b)) = draft {
            let corners = vec![[a[0], a[1]], [b[0], a[1]], [b[0], b[1]], [a[0], b[1]]];
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(corners))
                    .stroke(egui::Stroke::new(1.0, colors.drag_rect))
                    .fill_color(colors.drag_rect.gamma_multiply(0.15)),
            );
        }
    });

    let response = &plot_resp.response;
    let pointer_value = response
        .interact_pointer_pos()
        .map(|pos| plot_resp.transform.value_from_position(pos))
        .map(|p| [p.x, p.y]);

    if response.drag_started_by(egui::PointerButton::Primary) {
        state.drag_start = pointer_value;
        state.drag_current = pointer_value;
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer_value {
            state.drag_current = Some(p);
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer_value {
            state.drag_current = Some(p);
        }
        let finished = state.draft();
        state.drag_start = None;
        state.drag_current = None;
        return finished;
    }
    None
}

/// egui_plot takes owned points, so every frame copies the scene's samples.
/// The redraw throttle bounds how often the scene changes, not this copy.
fn draw_scene(plot_ui: &mut PlotUi, scene: &PlotScene, colors: &ThemeColors) {
    for curve in &scene.curves {
        let mut line = Line::new(PlotPoints::from(curve.points.clone()))
            .name(&curve.label)
            .color(colors.curve(curve.color))
            .width(1.0);
        if curve.dash == LineDash::Dashed {
            line = line.style(LineStyle::dashed_loose());
        }
        plot_ui.line(line);
    }
    for overlay in &scene.overlays {
        plot_ui.line(
            Line::new(PlotPoints::from(overlay.curve.samples.clone()))
                .name(&overlay.curve.name)
                .color(colors.overlay(overlay.kind))
                .width(2.0),
        );
    }
}
