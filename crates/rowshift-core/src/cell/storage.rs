//! Sparse cell storage

use std::collections::BTreeMap;

use super::CellValue;

/// A stored cell: value plus style pool index (0 is the default style)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    pub style_index: u32,
}

impl CellData {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }
}

/// Cells keyed by row, then column
///
/// A cell exists from the moment it is created, even while it holds
/// [`CellValue::Empty`]. Only [`CellStorage::remove`] deletes it.
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row)?.get(&col)
    }

    pub fn get_or_create(&mut self, row: u32, col: u16) -> &mut CellData {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    /// Delete a cell, dropping its row entry once the row is empty
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let cols = self.rows.get_mut(&row)?;
        let removed = cols.remove(&col);
        if cols.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    pub fn has_cells_in_row(&self, row: u32) -> bool {
        self.rows.contains_key(&row)
    }

    pub fn last_column(&self, row: u32) -> Option<u16> {
        self.rows.get(&row)?.keys().next_back().copied()
    }

    pub fn last_row(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    /// Highest column holding a cell in any row
    pub fn max_column(&self) -> Option<u16> {
        self.rows
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Move rows `start..=end` down by `distance`; see [`shift_keys_down`]
    pub fn shift_rows_down(&mut self, start: u32, end: u32, distance: u32) {
        shift_keys_down(&mut self.rows, start, end, distance);
    }
}

/// Move the entries keyed `start..=end` to `key + distance`
///
/// Entries already at a destination key are dropped. Entries between the
/// block and its destination stay where they are. The caller checks that
/// `end + distance` fits in a `u32`.
pub(crate) fn shift_keys_down<V>(map: &mut BTreeMap<u32, V>, start: u32, end: u32, distance: u32) {
    if distance == 0 || start > end {
        return;
    }

    let dest = start + distance..=end + distance;
    let mut block = map.split_off(&start);
    let after = block.split_off(&(end + 1));

    map.extend(after.into_iter().filter(|(key, _)| !dest.contains(key)));
    map.extend(block.into_iter().map(|(key, value)| (key + distance, value)));
}
