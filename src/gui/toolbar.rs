/// Toolbar: menu bar plus the quick-action strip, and the native dialogs

use std::path::PathBuf;

use crate::data::curve::Aggregate;
use crate::viewer::state::{OverlayToggles, ViewMode};
use crate::viewer::ViewerAction;

/// Actions that can be triggered from the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    ReadDirectory,
    /// Needs a file chooser before it becomes a viewer command
    SaveFlagsAs,
    LoadFlags,
    ExportJournal,
    ResetZoom,
    ThemeToggle,
    ShowAbout,
    Viewer(ViewerAction),
}

/// Read-only view of the state the toolbar reflects
pub struct ToolbarView<'a> {
    pub has_data: bool,
    pub mode: ViewMode,
    pub show_flagged: bool,
    pub overlays: OverlayToggles,
    pub theme_label: &'a str,
}

/// Render the toolbar and return any triggered action
pub fn show_toolbar(ctx: &egui::Context, view: &ToolbarView<'_>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Read Directory…").clicked() {
                    action = ToolbarAction::ReadDirectory;
                    ui.close_menu();
                }
                ui.separator();
                ui.add_enabled_ui(view.has_data, |ui| {
                    if ui.button("💾 Save Flags").clicked() {
                        action = ToolbarAction::Viewer(ViewerAction::SaveFlags);
                        ui.close_menu();
                    }
                    if ui.button("💾 Save Flags As…").clicked() {
                        action = ToolbarAction::SaveFlagsAs;
                        ui.close_menu();
                    }
                    if ui.button("📂 Load Flags…").clicked() {
                        action = ToolbarAction::LoadFlags;
                        ui.close_menu();
                    }
                });
                ui.separator();
                if ui.button("📋 Export Journal…").clicked() {
                    action = ToolbarAction::ExportJournal;
                    ui.close_menu();
                }
            });

            ui.menu_button("🔍 View", |ui| {
                if ui.button("🔄 Reset Zoom").clicked() {
                    action = ToolbarAction::ResetZoom;
                    ui.close_menu();
                }
                if ui.button(format!("🎨 Theme: {}", view.theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            ui.menu_button("❓ Help", |ui| {
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });
        });
    });

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Read").clicked() {
                action = ToolbarAction::ReadDirectory;
            }
            ui.separator();

            ui.add_enabled_ui(view.has_data, |ui| {
                let mode_label = format!("Mode: {}", view.mode.label());
                if ui.button(mode_label).clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::ToggleMode);
                }
                if ui
                    .selectable_label(view.show_flagged, "Show Flagged")
                    .clicked()
                {
                    action = ToolbarAction::Viewer(ViewerAction::ToggleShowFlagged);
                }
                if ui.button("Flag/Unflag").clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::ToggleFlag);
                }
                if ui.button("Unflag All").clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::UnflagAll);
                }
                if ui.button("Save Flag").clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::SaveFlags);
                }
                if ui.button("Save Flag As").clicked() {
                    action = ToolbarAction::SaveFlagsAs;
                }
                ui.separator();
                if ui.button("Stitch").clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::Stitch);
                }
                if ui.button("Jump Correct").clicked() {
                    action = ToolbarAction::Viewer(ViewerAction::JumpCorrect);
                }
                ui.separator();
                for kind in Aggregate::ALL {
                    if ui
                        .selectable_label(view.overlays.is_on(kind), kind.label())
                        .clicked()
                    {
                        action = ToolbarAction::Viewer(ViewerAction::ToggleOverlay(kind));
                    }
                }
                if view.mode == ViewMode::Spectrum {
                    ui.separator();
                    if ui.button("◀").on_hover_text("Previous spectrum").clicked() {
                        action = ToolbarAction::Viewer(ViewerAction::PreviousSpectrum);
                    }
                    if ui.button("▶").on_hover_text("Next spectrum").clicked() {
                        action = ToolbarAction::Viewer(ViewerAction::NextSpectrum);
                    }
                }
            });
        });
    });

    action
}

/// Show folder picker for a directory of spectra
pub fn open_folder_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Read Spectra Directory")
        .pick_folder()
}

/// Show save dialog for the flag list
pub fn save_flags_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Flagged Spectra")
        .set_file_name("flagged_spectra.txt")
        .add_filter("Text File", &["txt"])
        .save_file()
}

/// Show open dialog for a previously saved flag list
pub fn open_flags_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Load Flagged Spectra")
        .add_filter("Text File", &["txt"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Show save dialog for the session journal
pub fn save_journal_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export Session Journal")
        .add_filter("Text File", &["txt"])
        .add_filter("JSON", &["json"])
        .save_file()
}
