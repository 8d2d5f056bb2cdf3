/// Main application state and eframe::App implementation
///
/// Ties together the view model, the widgets and the redraw throttle.

use std::path::{Path, PathBuf};
use std::time::Instant;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::curve::CurveCollection;
use crate::data::loader;
use crate::gui::plot_view::{self, PlotViewState};
use crate::gui::spectra_list::{self, ListEvent, SpectraListState};
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction, ToolbarView};
use crate::viewer::state::ViewMode;
use crate::viewer::{Viewer, ViewerAction};

pub struct SpectralViewerApp {
    viewer: Viewer,
    list_state: SpectraListState,
    plot_state: PlotViewState,
    status_message: String,
    current_theme: AppTheme,
    theme_colors: ThemeColors,
    show_about: bool,
    /// Paths dropped onto the window, loaded one per frame
    dropped_files: Vec<PathBuf>,
}

impl SpectralViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let default_theme = AppTheme::Light;
        theme::apply_theme(&cc.egui_ctx, default_theme);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        Self {
            viewer: Viewer::new(config),
            list_state: SpectraListState::default(),
            plot_state: PlotViewState::default(),
            status_message: "Ready: read a directory of spectra to begin".to_string(),
            current_theme: default_theme,
            theme_colors: ThemeColors::from_theme(default_theme),
            show_about: false,
            dropped_files: Vec::new(),
        }
    }

    /// Read every spectrum file in `dir` into a new collection
    fn load_directory(&mut self, dir: &Path) {
        let name = self.viewer.config().collection_name.clone();
        let measure_type = self.viewer.config().measure_type.clone();
        match loader::read_dir(dir, &name, &measure_type) {
            Ok(collection) => {
                let n = collection.len();
                self.viewer.set_collection(Box::new(collection));
                self.list_state = SpectraListState::default();
                self.plot_state.drag_start = None;
                self.plot_state.drag_current = None;
                self.plot_state.reset_zoom();
                self.status_message = format!("Loaded {} spectra from {}", n, dir.display());
                log::info!("Loaded {} spectra from {}", n, dir.display());
            }
            Err(e) => {
                self.status_message = format!("Error reading {}: {}", dir.display(), e);
                log::error!("Failed to read {}: {}", dir.display(), e);
            }
        }
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::None => {}
            ToolbarAction::ReadDirectory => {
                if let Some(dir) = toolbar::open_folder_dialog() {
                    self.load_directory(&dir);
                }
            }
            ToolbarAction::SaveFlagsAs => {
                if let Some(path) = toolbar::save_flags_dialog() {
                    self.handle_viewer_action(ViewerAction::SaveFlagsAs(path));
                }
            }
            ToolbarAction::LoadFlags => {
                if let Some(path) = toolbar::open_flags_dialog() {
                    self.handle_viewer_action(ViewerAction::LoadFlags(path));
                }
            }
            ToolbarAction::ExportJournal => {
                if let Some(path) = toolbar::save_journal_dialog() {
                    match self.viewer.journal().save(&path) {
                        Ok(()) => {
                            self.status_message = format!("Journal exported: {}", path.display());
                        }
                        Err(e) => {
                            self.status_message = format!("Journal export failed: {}", e);
                            log::error!("Journal export failed: {}", e);
                        }
                    }
                }
            }
            ToolbarAction::ResetZoom => self.plot_state.reset_zoom(),
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
            }
            ToolbarAction::ShowAbout => self.show_about = true,
            ToolbarAction::Viewer(action) => self.handle_viewer_action(action),
        }
    }

    fn handle_viewer_action(&mut self, action: ViewerAction) {
        match self.viewer.dispatch(action) {
            Ok(Some(message)) => self.status_message = message,
            Ok(None) => {}
            Err(e) => {
                self.status_message = format!("Error: {}", e);
                log::error!("{}", e);
            }
        }
    }

    fn status_counts(&self) -> String {
        let Some(c) = self.viewer.collection() else {
            return "No collection".to_string();
        };
        let mut text = format!(
            "{}  |  {} spectra  |  {} selected  |  {} flagged  |  {} view",
            c.name(),
            c.len(),
            self.viewer.state().selection.len(),
            self.viewer.flags().len(),
            self.viewer.state().mode.label()
        );
        if self.viewer.state().mode == ViewMode::Spectrum && self.viewer.state().selection.is_empty() {
            if let Some(head) = c.curve(self.viewer.state().head()) {
                text.push_str(&format!("  |  {}", head.name));
            }
        }
        text
    }
}

impl eframe::App for SpectralViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_theme(ctx, self.current_theme);

        // Handle drag-and-drop
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(path.clone());
                }
            }
        });
        if let Some(path) = self.dropped_files.pop() {
            if path.is_dir() {
                self.load_directory(&path);
            } else {
                self.status_message = format!("Drop a directory of spectra, not {}", path.display());
            }
        }

        let view = ToolbarView {
            has_data: self.viewer.collection().is_some(),
            mode: self.viewer.state().mode,
            show_flagged: self.viewer.state().show_flagged,
            overlays: self.viewer.state().overlays,
            theme_label: self.current_theme.label(),
        };
        let action = toolbar::show_toolbar(ctx, &view);
        self.handle_toolbar_action(action);

        let status = self.status_counts();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status_message).size(11.5));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(status)
                            .size(11.0)
                            .color(self.theme_colors.text_muted),
                    );
                });
            });
        });

        let event = spectra_list::show_spectra_list(
            ctx,
            self.viewer.list().rows(),
            &mut self.list_state,
            &self.theme_colors,
        );
        match event {
            ListEvent::None => {}
            ListEvent::SelectionChanged(rows) => self.viewer.on_list_selection_changed(&rows),
            ListEvent::Tool(action) => self.handle_viewer_action(action),
        }

        let mut finished_rect = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.viewer.collection().is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Read a directory or drop one here")
                            .color(self.theme_colors.text_muted),
                    );
                });
                return;
            }
            finished_rect = plot_view::show_plot(
                ui,
                self.viewer.scene(),
                &mut self.plot_state,
                &self.theme_colors,
            );
        });
        if let Some((a, b)) = finished_rect {
            let hits = self.viewer.on_rectangle_selected(a, b);
            self.status_message = format!("{} spectra selected", hits);
        }

        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("Spectral Viewer");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(10.0);
                    ui.label("Built with Rust + egui");
                    ui.add_space(10.0);
                    ui.label("• Left-drag on the plot to select spectra");
                    ui.label("• Right-drag to zoom");
                    ui.label("• ← / → step through spectra in Spectrum view");
                });
        }

        // Keyboard shortcuts
        let (next, previous) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if !ctx.wants_keyboard_input() {
            if next {
                self.handle_viewer_action(ViewerAction::NextSpectrum);
            }
            if previous {
                self.handle_viewer_action(ViewerAction::PreviousSpectrum);
            }
        }

        // Deferred repaints land on a later frame
        let now = Instant::now();
        if self.viewer.tick(now) {
            ctx.request_repaint();
        }
        if let Some(wait) = self.viewer.time_to_flush(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
