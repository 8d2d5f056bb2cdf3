/// Spectra list panel: one row per curve, flagged rows drawn in red
///
/// The panel never mutates the view model. It reports the rows the user
/// wants selected and the viewer decides what that means.

use crate::gui::theme::ThemeColors;
use crate::viewer::selection::ListRow;
use crate::viewer::ViewerAction;

#[derive(Debug, Clone, Default)]
pub struct SpectraListState {
    /// Row that a shift-click extends from
    pub anchor: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    None,
    /// Full set of rows that should now be selected
    SelectionChanged(Vec<usize>),
    Tool(ViewerAction),
}

pub fn show_spectra_list(
    ctx: &egui::Context,
    rows: &[ListRow],
    state: &mut SpectraListState,
    colors: &ThemeColors,
) -> ListEvent {
    let mut event = ListEvent::None;

    egui::SidePanel::right("spectra_list")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Spectra");
            ui.label(
                egui::RichText::new(format!(
                    "{} spectra, {} selected",
                    rows.len(),
                    rows.iter().filter(|r| r.selected).count()
                ))
                .small()
                .color(colors.text_muted),
            );

            ui.horizontal_wrapped(|ui| {
                if ui.small_button("To Top").clicked() {
                    event = ListEvent::Tool(ViewerAction::MoveSelectedToTop);
                }
                if ui.small_button("Select All").clicked() {
                    event = ListEvent::Tool(ViewerAction::SelectAll);
                }
                if ui.small_button("Clear").clicked() {
                    event = ListEvent::Tool(ViewerAction::ClearSelection);
                }
                if ui.small_button("Invert").clicked() {
                    event = ListEvent::Tool(ViewerAction::InvertSelection);
                }
            });
            ui.separator();

            let row_height = ui.text_style_height(&egui::TextStyle::Button);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show_rows(ui, row_height, rows.len(), |ui, range| {
                    for index in range {
                        let row = &rows[index];
                        let mut text = egui::RichText::new(&row.name);
                        if row.flagged {
                            text = text.color(colors.curve_flagged);
                        }
                        if ui.selectable_label(row.selected, text).clicked() {
                            let modifiers = ui.input(|i| i.modifiers);
                            let rows_now = click_rows(rows, index, state.anchor, modifiers);
                            if !modifiers.shift {
                                state.anchor = Some(index);
                            }
                            event = ListEvent::SelectionChanged(rows_now);
                        }
                    }
                });
        });

    event
}

/// Extended-selection rules: command toggles, shift selects a range from
/// the anchor, a plain click selects only the clicked row
fn click_rows(
    rows: &[ListRow],
    clicked: usize,
    anchor: Option<usize>,
    modifiers: egui::Modifiers,
) -> Vec<usize> {
    if modifiers.shift {
        let from = anchor.unwrap_or(clicked);
        let (lo, hi) = if from <= clicked { (from, clicked) } else { (clicked, from) };
        let mut selected: Vec<usize> = if modifiers.command {
            rows.iter()
                .enumerate()
                .filter(|(_, r)| r.selected)
                .map(|(i, _)| i)
                .filter(|i| *i < lo || *i > hi)
                .collect()
        } else {
            Vec::new()
        };
        selected.extend(lo..=hi);
        selected.sort_unstable();
        return selected;
    }
    if modifiers.command {
        return rows
            .iter()
            .enumerate()
            .filter(|(i, r)| if *i == clicked { !r.selected } else { r.selected })
            .map(|(i, _)| i)
            .collect();
    }
    vec![clicked]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(selected: &[bool]) -> Vec<ListRow> {
        selected
            .iter()
            .enumerate()
            .map(|(i, s)| ListRow {
                name: format!("s{}", i),
                selected: *s,
                flagged: false,
            })
            .collect()
    }

    #[test]
    fn test_plain_click_selects_one() {
        let r = rows(&[true, false, true, false]);
        assert_eq!(click_rows(&r, 1, None, egui::Modifiers::NONE), vec![1]);
    }

    #[test]
    fn test_command_click_toggles() {
        let r = rows(&[true, false, true, false]);
        assert_eq!(click_rows(&r, 1, None, egui::Modifiers::COMMAND), vec![0, 1, 2]);
        assert_eq!(click_rows(&r, 2, None, egui::Modifiers::COMMAND), vec![0]);
    }

    #[test]
    fn test_shift_click_selects_range_from_anchor() {
        let r = rows(&[false, false, false, false, false]);
        assert_eq!(click_rows(&r, 1, Some(3), egui::Modifiers::SHIFT), vec![1, 2, 3]);
        assert_eq!(click_rows(&r, 4, None, egui::Modifiers::SHIFT), vec![4]);
    }
}
