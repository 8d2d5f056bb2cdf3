/// List-widget model: displayed row order, selection marks, flag colors
///
/// The viewer keeps this model and the selection set in sync in two
/// one-directional passes: a widget event (`apply_widget_rows`) produces a
/// new selection, and `mark_names` pushes a selection back into the rows.
/// Neither calls the other, so a canvas selection can never echo back as a
/// widget event.

use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub name: String,
    pub selected: bool,
    /// Mirrors the flag state; drawn as red foreground
    pub flagged: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SpectraList {
    rows: Vec<ListRow>,
    /// name → displayed row, rebuilt whenever rows are inserted or reordered
    row_of: HashMap<String, usize>,
}

impl SpectraList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row with `names` in collection order, unselected
    pub fn populate<'a, I>(&mut self, names: I, is_flagged: impl Fn(&str) -> bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.rows = names
            .into_iter()
            .map(|name| ListRow {
                name: name.to_string(),
                selected: false,
                flagged: is_flagged(name),
            })
            .collect();
        self.reindex();
    }

    fn reindex(&mut self) {
        self.row_of = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.name.clone(), i))
            .collect();
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn row_of(&self, name: &str) -> Option<usize> {
        self.row_of.get(name).copied()
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Names of the marked rows, in displayed order
    pub fn selected_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Widget → model: take the widget's reported row indices as the marks
    /// and return the selected names. Out-of-range rows are ignored.
    pub fn apply_widget_rows(&mut self, rows: &[usize]) -> BTreeSet<String> {
        for row in &mut self.rows {
            row.selected = false;
        }
        for &i in rows {
            if let Some(row) = self.rows.get_mut(i) {
                row.selected = true;
            }
        }
        self.selected_names().into_iter().collect()
    }

    /// Model → widget: mark exactly the rows whose names are in `names`.
    ///
    /// # Panics
    ///
    /// If a name has no row; the selection must be a subset of the list.
    pub fn mark_names(&mut self, names: &BTreeSet<String>) {
        for row in &mut self.rows {
            row.selected = false;
        }
        for name in names {
            let Some(i) = self.row_of(name) else {
                panic!("selected curve `{}` is not in the list", name);
            };
            self.rows[i].selected = true;
        }
    }

    pub fn select_all(&mut self) {
        for row in &mut self.rows {
            row.selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for row in &mut self.rows {
            row.selected = false;
        }
    }

    pub fn invert_selection(&mut self) {
        for row in &mut self.rows {
            row.selected = !row.selected;
        }
    }

    /// Move the marked rows to the top, keeping their relative order; they
    /// stay marked. Only the displayed order changes.
    pub fn move_selected_to_top(&mut self) -> usize {
        let (mut top, rest): (Vec<ListRow>, Vec<ListRow>) =
            std::mem::take(&mut self.rows).into_iter().partition(|r| r.selected);
        let moved = top.len();
        top.extend(rest);
        self.rows = top;
        self.reindex();
        moved
    }

    pub fn set_flagged(&mut self, name: &str, flagged: bool) {
        if let Some(i) = self.row_of(name) {
            self.rows[i].flagged = flagged;
        }
    }

    /// Refresh every row's flag color
    pub fn refresh_flags(&mut self, is_flagged: impl Fn(&str) -> bool) {
        for row in &mut self.rows {
            row.flagged = is_flagged(&row.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> SpectraList {
        let names: Vec<String> = (0..n).map(|i| format!("s{}", i)).collect();
        let mut l = SpectraList::new();
        l.populate(names.iter().map(String::as_str), |_| false);
        l
    }

    fn displayed(l: &SpectraList) -> Vec<&str> {
        l.rows().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_widget_rows_map_through_display_order() {
        let mut l = list(5);
        l.apply_widget_rows(&[3]);
        l.move_selected_to_top();
        let selected = l.apply_widget_rows(&[0, 1]);
        let expected: BTreeSet<String> = ["s3", "s0"].iter().map(|s| s.to_string()).collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_move_selected_to_top_keeps_order_and_marks() {
        let mut l = list(5);
        l.apply_widget_rows(&[2, 4]);
        assert_eq!(l.move_selected_to_top(), 2);
        assert_eq!(displayed(&l), vec!["s2", "s4", "s0", "s1", "s3"]);
        assert_eq!(l.selected_rows(), vec![0, 1]);
        assert_eq!(l.row_of("s3"), Some(4));
    }

    #[test]
    fn test_mark_names_replaces_marks() {
        let mut l = list(4);
        l.apply_widget_rows(&[0, 1]);
        let names: BTreeSet<String> = ["s3"].iter().map(|s| s.to_string()).collect();
        l.mark_names(&names);
        assert_eq!(l.selected_rows(), vec![3]);
    }

    #[test]
    #[should_panic(expected = "not in the list")]
    fn test_mark_unknown_name_panics() {
        let mut l = list(2);
        let names: BTreeSet<String> = ["ghost"].iter().map(|s| s.to_string()).collect();
        l.mark_names(&names);
    }

    #[test]
    fn test_select_clear_invert() {
        let mut l = list(3);
        l.select_all();
        assert_eq!(l.selected_rows(), vec![0, 1, 2]);
        l.apply_widget_rows(&[1]);
        l.invert_selection();
        assert_eq!(l.selected_rows(), vec![0, 2]);
        l.clear_selection();
        assert!(l.selected_rows().is_empty());
    }

    #[test]
    fn test_out_of_range_rows_ignored() {
        let mut l = list(2);
        let selected = l.apply_widget_rows(&[1, 9]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_flag_colors() {
        let mut l = list(3);
        l.set_flagged("s1", true);
        assert!(l.rows()[1].flagged);
        l.refresh_flags(|n| n == "s2");
        assert!(!l.rows()[1].flagged);
        assert!(l.rows()[2].flagged);
    }
}
