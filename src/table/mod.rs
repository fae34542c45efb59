//! Grid projection of a cached collection: a select column, the data columns
//! and a trailing detail action.

mod columns;

use std::collections::HashSet;

use crate::models::Keyed;

pub const DETAIL_HEADER: &str = "Detail";

pub trait TableRow: Keyed + Clone + Send + Sync + 'static {
    fn headers() -> &'static [&'static str];

    /// Display text for each data column, in `headers()` order.
    fn cells(&self) -> Vec<String>;

    /// Every field as a label/value pair for the read-only detail view.
    fn detail(&self) -> Vec<(&'static str, String)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Display,
    CheckState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Checked(bool),
}

pub struct TableAdapter<T: TableRow> {
    rows: Vec<T>,
    selected: HashSet<T::Key>,
    renamed: Vec<(&'static str, &'static str)>,
}

impl<T: TableRow> Default for TableAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> TableAdapter<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new(), selected: HashSet::new(), renamed: Vec::new() }
    }

    /// Shows `to` wherever the row type says `from`, in headers and detail views.
    pub fn relabel(mut self, from: &'static str, to: &'static str) -> Self {
        self.renamed.push((from, to));
        self
    }

    fn label(&self, label: &'static str) -> &'static str {
        self.renamed.iter().find(|(from, _)| *from == label).map_or(label, |&(_, to)| to)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        T::headers().len() + 2
    }

    pub fn header(&self, column: usize) -> Option<&'static str> {
        let data = T::headers();
        match column {
            0 => Some(""),
            c if c <= data.len() => Some(self.label(data[c - 1])),
            c if c == data.len() + 1 => Some(DETAIL_HEADER),
            _ => None,
        }
    }

    pub fn cell(&self, row: usize, column: usize, role: Role) -> Option<Cell> {
        let record = self.rows.get(row)?;
        let data = T::headers().len();
        match (column, role) {
            (0, Role::CheckState) => {
                let checked = record.key().is_some_and(|key| self.selected.contains(&key));
                Some(Cell::Checked(checked))
            },
            (c, Role::Display) if (1..=data).contains(&c) => {
                record.cells().into_iter().nth(c - 1).map(Cell::Text)
            },
            (c, Role::Display) if c == data + 1 => Some(Cell::Text(DETAIL_HEADER.to_string())),
            _ => None,
        }
    }

    /// Returns whether the row is selected afterwards.
    pub fn set_checked(&mut self, row: usize, checked: bool) -> bool {
        let Some(key) = self.rows.get(row).and_then(Keyed::key) else {
            return false;
        };
        if checked {
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
        checked
    }

    pub fn toggle(&mut self, row: usize) -> bool {
        let Some(key) = self.rows.get(row).and_then(Keyed::key) else {
            return false;
        };
        let checked = !self.selected.contains(&key);
        self.set_checked(row, checked)
    }

    pub fn record_at(&self, row: usize) -> Option<&T> {
        self.rows.get(row)
    }

    /// Selected keys in the order their rows are displayed.
    pub fn selected_keys(&self) -> Vec<T::Key> {
        self.rows.iter().filter_map(Keyed::key).filter(|key| self.selected.contains(key)).collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Swaps in a fresh collection, forgetting selected keys that are gone.
    pub fn replace(&mut self, rows: Vec<T>) {
        let present: HashSet<T::Key> = rows.iter().filter_map(Keyed::key).collect();
        self.selected.retain(|key| present.contains(key));
        self.rows = rows;
    }

    pub fn detail(&self, row: usize) -> Option<Vec<(&'static str, String)>> {
        let record = self.rows.get(row)?;
        let fields = record.detail().into_iter().map(|(label, value)| (self.label(label), value));
        Some(fields.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;

    fn city(id: Option<i32>, name: &str) -> City {
        City {
            id,
            name: name.to_string(),
            region: String::new(),
            country: "Chile".to_string(),
            notes: String::new(),
        }
    }

    fn adapter() -> TableAdapter<City> {
        let mut table = TableAdapter::new();
        table.replace(vec![
            city(Some(1), "Santiago"),
            city(Some(2), "Valparaíso"),
            city(Some(3), "Temuco"),
        ]);
        table
    }

    #[test]
    fn columns_wrap_the_data_with_select_and_detail() {
        let table = adapter();
        assert_eq!(table.column_count(), City::headers().len() + 2);
        assert_eq!(table.header(1), Some("ID"));
        assert_eq!(table.header(table.column_count() - 1), Some(DETAIL_HEADER));
        assert_eq!(table.header(table.column_count()), None);
        assert_eq!(table.cell(1, 2, Role::Display), Some(Cell::Text("Valparaíso".to_string())));
        assert_eq!(table.cell(1, 0, Role::CheckState), Some(Cell::Checked(false)));
        assert_eq!(table.cell(1, 0, Role::Display), None);
        assert_eq!(table.cell(9, 1, Role::Display), None);
    }

    #[test]
    fn selection_follows_row_order_and_survives_reorder() {
        let mut table = adapter();
        assert!(table.toggle(2));
        assert!(table.toggle(0));
        assert_eq!(table.selected_keys(), vec![1, 3]);

        table.replace(vec![city(Some(3), "Temuco"), city(Some(1), "Santiago")]);
        assert_eq!(table.selected_keys(), vec![3, 1]);
        assert_eq!(table.cell(0, 0, Role::CheckState), Some(Cell::Checked(true)));
    }

    #[test]
    fn replacing_prunes_keys_that_disappeared() {
        let mut table = adapter();
        table.set_checked(0, true);
        table.set_checked(1, true);

        table.replace(vec![city(Some(2), "Valparaíso"), city(Some(4), "Arica")]);
        assert_eq!(table.selected_keys(), vec![2]);

        // id 1 coming back must not resurrect the old selection
        table.replace(vec![city(Some(1), "Santiago"), city(Some(2), "Valparaíso")]);
        assert_eq!(table.selected_keys(), vec![2]);
    }

    #[test]
    fn unsaved_rows_cannot_be_selected() {
        let mut table = TableAdapter::new();
        table.replace(vec![city(None, "Draft")]);
        assert!(!table.toggle(0));
        assert!(table.selected_keys().is_empty());

        table.replace(vec![city(Some(1), "Santiago")]);
        table.toggle(0);
        assert!(!table.toggle(0));
        table.toggle(0);
        table.clear_selection();
        assert!(table.selected_keys().is_empty());
    }

    #[test]
    fn relabel_applies_to_headers_and_detail() {
        let mut table = TableAdapter::<City>::new().relabel("Name", "City");
        table.replace(vec![city(Some(1), "Santiago")]);
        assert_eq!(table.header(2), Some("City"));
        let detail = table.detail(0).unwrap();
        assert!(detail.contains(&("City", "Santiago".to_string())));
    }
}
