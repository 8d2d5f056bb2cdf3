/// Theme system: light and dark palettes for panels and curves
///
/// Curve styles in the view model are abstract (black / red); the theme
/// decides what those look like on screen.

use crate::data::curve::Aggregate;
use crate::viewer::registry::CurveColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTheme {
    Light,
    Dark,
}

impl AppTheme {
    pub fn label(&self) -> &'static str {
        match self {
            AppTheme::Light => "☀ Light",
            AppTheme::Dark => "🌙 Dark",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub is_dark: bool,
    pub panel_fill: egui::Color32,
    pub selection_bg: egui::Color32,
    pub text_muted: egui::Color32,
    /// Unflagged curves
    pub curve_plain: egui::Color32,
    /// Flagged curves and flagged list rows
    pub curve_flagged: egui::Color32,
    pub drag_rect: egui::Color32,
}

impl ThemeColors {
    pub fn from_theme(theme: AppTheme) -> Self {
        match theme {
            AppTheme::Light => Self {
                is_dark: false,
                panel_fill: egui::Color32::from_rgb(0xF7, 0xF8, 0xFA),
                selection_bg: egui::Color32::from_rgb(0xC8, 0xDC, 0xF5),
                text_muted: egui::Color32::from_rgb(0x70, 0x75, 0x80),
                curve_plain: egui::Color32::BLACK,
                curve_flagged: egui::Color32::from_rgb(0xD0, 0x1C, 0x1C),
                drag_rect: egui::Color32::from_rgb(0x1E, 0x64, 0xC8),
            },
            AppTheme::Dark => Self {
                is_dark: true,
                panel_fill: egui::Color32::from_rgb(0x1B, 0x1D, 0x22),
                selection_bg: egui::Color32::from_rgb(0x2D, 0x4A, 0x70),
                text_muted: egui::Color32::from_rgb(0x8A, 0x90, 0x9C),
                curve_plain: egui::Color32::from_rgb(0xE4, 0xE6, 0xEB),
                curve_flagged: egui::Color32::from_rgb(0xFF, 0x55, 0x55),
                drag_rect: egui::Color32::from_rgb(0x6C, 0xB4, 0xFF),
            },
        }
    }

    pub fn curve(&self, color: CurveColor) -> egui::Color32 {
        match color {
            CurveColor::Black => self.curve_plain,
            CurveColor::Red => self.curve_flagged,
        }
    }

    /// Fixed hue per statistic: blue, green, yellow, magenta, cyan
    pub fn overlay(&self, kind: Aggregate) -> egui::Color32 {
        match kind {
            Aggregate::Mean => egui::Color32::from_rgb(0x1F, 0x4E, 0xD8),
            Aggregate::Median => egui::Color32::from_rgb(0x1A, 0x9A, 0x3A),
            Aggregate::Max => egui::Color32::from_rgb(0xC8, 0xA0, 0x00),
            Aggregate::Min => egui::Color32::from_rgb(0xB0, 0x2A, 0xB0),
            Aggregate::Std => egui::Color32::from_rgb(0x00, 0xA8, 0xB8),
        }
    }
}

/// Apply a theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: AppTheme) {
    let c = ThemeColors::from_theme(theme);

    let mut visuals = if c.is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.panel_fill = c.panel_fill;
    visuals.selection.bg_fill = c.selection_bg;

    ctx.set_visuals(visuals);
}
