//! Worksheet type

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::cell::{shift_keys_down, CellAddress, CellData, CellStorage, CellValue};
use crate::comment::CellComment;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::style::{Style, StylePool};
use crate::{MAX_COLS, MAX_ROWS};

/// A sheet of cells with row metadata, interned styles and comments
///
/// Methods taking a `&str` address accept A1 notation; the `_at` forms take
/// 0-based indices.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    styles: StylePool,
    rows: BTreeMap<u32, Row>,
    comments: HashMap<(u32, u16), Arc<CellComment>>,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            styles: StylePool::new(),
            rows: BTreeMap::new(),
            comments: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cells ===

    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// The cell's value, [`CellValue::Empty`] when the cell does not exist
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map_or(CellValue::Empty, |cell| cell.value.clone())
    }

    pub fn get_formula_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cells.get(row, col)?.value.formula_text()
    }

    /// Create an empty cell unless one exists
    pub fn create_cell_at(&mut self, row: u32, col: u16) -> Result<&mut CellData> {
        check_position(row, col)?;
        Ok(self.cells.get_or_create(row, col))
    }

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Replace the cell's value, keeping its style
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.create_cell_at(row, col)?.value = value.into();
        Ok(())
    }

    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_formula_at(addr.row, addr.col, formula)
    }

    /// Store a formula, adding the leading `=` when missing
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        let text = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={formula}")
        };
        self.replace_formula_at(row, col, text)
    }

    /// Store formula text exactly as given
    ///
    /// Any cached result belongs to the previous text and is dropped.
    pub fn replace_formula_at(&mut self, row: u32, col: u16, text: String) -> Result<()> {
        self.set_cell_value_at(row, col, CellValue::formula(text))
    }

    // === Styles ===

    /// Intern `style` and apply it to the cell, keeping the value
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        check_position(row, col)?;
        let index = self.styles.intern(style.clone());
        self.cells.get_or_create(row, col).style_index = index;
        Ok(())
    }

    /// Point the cell at a style already in this sheet's pool
    pub fn set_cell_style_index_at(&mut self, row: u32, col: u16, style_index: u32) -> Result<()> {
        if self.styles.get(style_index).is_none() {
            return Err(Error::InvalidStyleIndex(style_index));
        }
        self.create_cell_at(row, col)?.style_index = style_index;
        Ok(())
    }

    /// 0 for absent cells and cells with the default style
    pub fn cell_style_index_at(&self, row: u32, col: u16) -> u32 {
        self.cells.get(row, col).map_or(0, |cell| cell.style_index)
    }

    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        self.styles.get(self.cells.get(row, col)?.style_index)
    }

    pub fn is_date_formatted_at(&self, row: u32, col: u16) -> bool {
        self.cell_style_at(row, col).is_some_and(Style::is_date)
    }

    // === Rows ===

    /// Whether the row was created or holds a cell
    pub fn has_row(&self, row: u32) -> bool {
        self.rows.contains_key(&row) || self.cells.has_cells_in_row(row)
    }

    pub fn create_row(&mut self, row: u32) -> Result<&mut Row> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        Ok(self.rows.entry(row).or_insert_with(|| Row::new(row)))
    }

    pub fn last_row(&self) -> Option<u32> {
        let created = self.rows.keys().next_back().copied();
        created.max(self.cells.last_row())
    }

    /// Number of rows up to and including the last existing row
    pub fn row_count(&self) -> u32 {
        self.last_row().map_or(0, |row| row + 1)
    }

    pub fn last_column(&self, row: u32) -> Option<u16> {
        self.cells.last_column(row)
    }

    /// Highest column holding a cell in any row
    pub fn max_column(&self) -> Option<u16> {
        self.cells.max_column()
    }

    pub fn custom_row_height(&self, row: u32) -> Option<f64> {
        self.rows.get(&row)?.height
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.set_custom_row_height(row, Some(height))
    }

    /// Set or clear the custom height, creating the row
    pub fn set_custom_row_height(&mut self, row: u32, height: Option<f64>) -> Result<()> {
        self.create_row(row)?.height = height;
        Ok(())
    }

    /// Move rows `start..=end` down by `distance`
    ///
    /// Cells, row metadata and comments travel with their rows. Whatever sits
    /// in the destination rows is overwritten and the vacated rows are left
    /// empty. Formula text is never rewritten.
    pub fn shift_rows(&mut self, start: u32, end: u32, distance: u32) -> Result<()> {
        if distance == 0 || start > end {
            return Ok(());
        }
        if end >= MAX_ROWS || distance >= MAX_ROWS - end {
            return Err(Error::ShiftOutOfBounds {
                start,
                end,
                distance,
                max: MAX_ROWS - 1,
            });
        }

        self.cells.shift_rows_down(start, end, distance);

        shift_keys_down(&mut self.rows, start, end, distance);
        for (index, row) in self.rows.range_mut(start + distance..=end + distance) {
            row.index = *index;
        }

        let block = start..=end;
        let dest = start + distance..=end + distance;
        self.comments = std::mem::take(&mut self.comments)
            .into_iter()
            .filter_map(|((row, col), comment)| {
                if block.contains(&row) {
                    Some(((row + distance, col), comment))
                } else if dest.contains(&row) {
                    None
                } else {
                    Some(((row, col), comment))
                }
            })
            .collect();

        Ok(())
    }

    // === Comments ===

    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_comment_at(addr.row, addr.col, comment);
        Ok(())
    }

    pub fn set_comment_at(&mut self, row: u32, col: u16, comment: CellComment) {
        self.set_comment_ref_at(row, col, Arc::new(comment));
    }

    /// Attach a comment shared with other cells
    pub fn set_comment_ref_at(&mut self, row: u32, col: u16, comment: Arc<CellComment>) {
        self.comments.insert((row, col), comment);
    }

    pub fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.comments.get(&(row, col)).map(Arc::as_ref)
    }

    pub fn comment_ref_at(&self, row: u32, col: u16) -> Option<&Arc<CellComment>> {
        self.comments.get(&(row, col))
    }

    pub fn has_comment_at(&self, row: u32, col: u16) -> bool {
        self.comments.contains_key(&(row, col))
    }

    // === Iteration ===

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// True when the sheet has neither cells nor created rows
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.rows.is_empty()
    }

    /// Every cell in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Every formula cell as `(row, col, text)`
    pub fn formula_cells(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.cells
            .iter()
            .filter_map(|(row, col, cell)| Some((row, col, cell.value.formula_text()?)))
    }
}

fn check_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
    }
    Ok(())
}
