//! Row insertion and movement
//!
//! The grid moves rows physically; this module layers formula correction on
//! top. Inserting copies a template row into the opened gap, moving rewrites
//! every formula in the moved block so references past the edit point follow
//! their rows.
//!
//! # Example
//!
//! ```rust
//! use rowshift::prelude::*;
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value_at(0, 0, 10.0).unwrap();
//! sheet.set_cell_value_at(1, 0, 20.0).unwrap();
//! sheet.set_cell_formula_at(2, 0, "=A1+A2").unwrap();
//!
//! // Push rows 2.. down by three. References to row 1 and 2 stay.
//! let stats = sheet.move_rows(1, 3).unwrap();
//! assert_eq!(stats.formulas_updated, 1);
//! assert_eq!(sheet.get_formula_at(5, 0), Some("=A1+A5"));
//! ```

use std::ops::AddAssign;

use rowshift_core::Result;
use rowshift_formula::{FormulaTranslator, ABSOLUTE_MARKER};
use tracing::{debug, trace};

use crate::copy::{CellCopier, CopyStats};
use crate::grid::Grid;

/// Options for row operations
#[derive(Debug, Clone)]
pub struct ShiftOptions {
    /// Character that freezes the row reference after it (default: `$`)
    pub absolute_marker: char,
}

impl Default for ShiftOptions {
    fn default() -> Self {
        Self {
            absolute_marker: ABSOLUTE_MARKER,
        }
    }
}

impl ShiftOptions {
    fn translator(&self) -> FormulaTranslator {
        FormulaTranslator::with_marker(self.absolute_marker)
    }
}

/// Statistics from a row operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftStats {
    /// Rows in the block moved by the grid
    pub rows_shifted: u32,
    /// Rows filled from a template
    pub rows_inserted: u32,
    /// Formula cells rewritten in place
    pub formulas_updated: usize,
    /// Cells copied from a template
    pub cells_copied: usize,
    /// Cells whose value could not be copied
    pub skipped: usize,
}

impl AddAssign<CopyStats> for ShiftStats {
    fn add_assign(&mut self, copy: CopyStats) {
        self.cells_copied += copy.cells_copied;
        self.skipped += copy.skipped;
    }
}

/// Insert one row at `row_index`, filled from `template_row`
///
/// See [`RowShiftExt::insert_row`].
pub fn insert_row<G>(grid: &mut G, template_row: u32, row_index: u32) -> Result<ShiftStats>
where
    G: Grid + ?Sized,
{
    RowShifter::new(&ShiftOptions::default()).insert_rows(grid, template_row, row_index, 1)
}

/// Insert `row_count` rows at `row_index`, each filled from `template_row`
///
/// See [`RowShiftExt::insert_rows`].
pub fn insert_rows<G>(
    grid: &mut G,
    template_row: u32,
    row_index: u32,
    row_count: i32,
) -> Result<ShiftStats>
where
    G: Grid + ?Sized,
{
    RowShifter::new(&ShiftOptions::default()).insert_rows(grid, template_row, row_index, row_count)
}

/// Move rows from `start_row` down by `move_count`
///
/// See [`RowShiftExt::move_rows`].
pub fn move_rows<G>(grid: &mut G, start_row: u32, move_count: i32) -> Result<ShiftStats>
where
    G: Grid + ?Sized,
{
    move_rows_at(grid, start_row, move_count, default_insert_point(start_row, move_count))
}

/// Move rows from `start_row` down by `move_count` with an explicit insert point
///
/// See [`RowShiftExt::move_rows_at`].
pub fn move_rows_at<G>(
    grid: &mut G,
    start_row: u32,
    move_count: i32,
    insert_point: i64,
) -> Result<ShiftStats>
where
    G: Grid + ?Sized,
{
    RowShifter::new(&ShiftOptions::default()).move_rows(grid, start_row, move_count, insert_point)
}

/// Rewrite the formula in one cell
///
/// References to rows at or after `insert_row_index + 1` move by
/// `move_count`. Returns whether the cell held a formula that was rewritten;
/// other cells and formulas with blank text are left alone.
pub fn update_formula<G>(
    grid: &mut G,
    row: u32,
    col: u16,
    move_count: i32,
    insert_row_index: u32,
) -> Result<bool>
where
    G: Grid + ?Sized,
{
    RowShifter::new(&ShiftOptions::default()).update_formula(
        grid,
        row,
        col,
        move_count,
        insert_row_index,
    )
}

/// Row operations as methods on any [`Grid`]
pub trait RowShiftExt {
    /// Insert a row at `row_index` and fill it from `template_row`
    ///
    /// Rows from `row_index` down move one row further. The opened row is
    /// created if needed and receives the template's height and cells, with
    /// formulas translated as a drag-copy from the template. A template at or
    /// below `row_index` is read from the position it was moved to.
    fn insert_row(&mut self, template_row: u32, row_index: u32) -> Result<ShiftStats>;

    /// Insert `row_count` rows at `row_index`, each filled from `template_row`
    ///
    /// A `row_count` of zero or less does nothing.
    fn insert_rows(&mut self, template_row: u32, row_index: u32, row_count: i32)
        -> Result<ShiftStats>;

    /// Move every row from `start_row` down by `move_count`
    ///
    /// Uses `start_row - move_count - 1` as the insert point.
    fn move_rows(&mut self, start_row: u32, move_count: i32) -> Result<ShiftStats>;

    /// Move every row from `start_row` down by `move_count`
    ///
    /// After the move, each formula in the moved block has its references to
    /// rows after `insert_point + 1` (1-based) moved by `move_count`.
    /// `insert_point` is clamped to zero. A `move_count` of zero or less does
    /// nothing.
    fn move_rows_at(&mut self, start_row: u32, move_count: i32, insert_point: i64)
        -> Result<ShiftStats>;

    /// Rewrite the formula in one cell; see [`update_formula`]
    fn update_formula(
        &mut self,
        row: u32,
        col: u16,
        move_count: i32,
        insert_row_index: u32,
    ) -> Result<bool>;

    /// [`insert_rows`](Self::insert_rows) with custom options
    fn insert_rows_with_options(
        &mut self,
        template_row: u32,
        row_index: u32,
        row_count: i32,
        options: &ShiftOptions,
    ) -> Result<ShiftStats>;

    /// [`move_rows_at`](Self::move_rows_at) with custom options
    fn move_rows_with_options(
        &mut self,
        start_row: u32,
        move_count: i32,
        insert_point: i64,
        options: &ShiftOptions,
    ) -> Result<ShiftStats>;
}

impl<G: Grid + ?Sized> RowShiftExt for G {
    fn insert_row(&mut self, template_row: u32, row_index: u32) -> Result<ShiftStats> {
        self.insert_rows_with_options(template_row, row_index, 1, &ShiftOptions::default())
    }

    fn insert_rows(
        &mut self,
        template_row: u32,
        row_index: u32,
        row_count: i32,
    ) -> Result<ShiftStats> {
        self.insert_rows_with_options(template_row, row_index, row_count, &ShiftOptions::default())
    }

    fn move_rows(&mut self, start_row: u32, move_count: i32) -> Result<ShiftStats> {
        let insert_point = default_insert_point(start_row, move_count);
        self.move_rows_at(start_row, move_count, insert_point)
    }

    fn move_rows_at(
        &mut self,
        start_row: u32,
        move_count: i32,
        insert_point: i64,
    ) -> Result<ShiftStats> {
        self.move_rows_with_options(start_row, move_count, insert_point, &ShiftOptions::default())
    }

    fn update_formula(
        &mut self,
        row: u32,
        col: u16,
        move_count: i32,
        insert_row_index: u32,
    ) -> Result<bool> {
        RowShifter::new(&ShiftOptions::default()).update_formula(
            self,
            row,
            col,
            move_count,
            insert_row_index,
        )
    }

    fn insert_rows_with_options(
        &mut self,
        template_row: u32,
        row_index: u32,
        row_count: i32,
        options: &ShiftOptions,
    ) -> Result<ShiftStats> {
        RowShifter::new(options).insert_rows(self, template_row, row_index, row_count)
    }

    fn move_rows_with_options(
        &mut self,
        start_row: u32,
        move_count: i32,
        insert_point: i64,
        options: &ShiftOptions,
    ) -> Result<ShiftStats> {
        RowShifter::new(options).move_rows(self, start_row, move_count, insert_point)
    }
}

fn default_insert_point(start_row: u32, move_count: i32) -> i64 {
    i64::from(start_row) - i64::from(move_count) - 1
}

/// Runs row operations with one translator
struct RowShifter {
    translator: FormulaTranslator,
}

impl RowShifter {
    fn new(options: &ShiftOptions) -> Self {
        Self {
            translator: options.translator(),
        }
    }

    fn insert_rows<G>(
        &self,
        grid: &mut G,
        template_row: u32,
        row_index: u32,
        row_count: i32,
    ) -> Result<ShiftStats>
    where
        G: Grid + ?Sized,
    {
        let mut stats = ShiftStats::default();
        if row_count <= 0 {
            return Ok(stats);
        }
        let count = row_count.unsigned_abs();

        stats.rows_shifted = self.shift_tail(grid, row_index, count)?;

        // The template moved with the block when it sat inside it.
        let template = if stats.rows_shifted > 0 && template_row >= row_index {
            template_row.saturating_add(count)
        } else {
            template_row
        };

        let copier = CellCopier::new(self.translator);
        for target in row_index..row_index.saturating_add(count) {
            grid.create_row(target)?;
            stats += copier.copy_row(grid, template, target)?;
            stats.rows_inserted += 1;
        }

        debug!(
            template,
            at = row_index,
            count,
            cells = stats.cells_copied,
            "inserted rows"
        );
        Ok(stats)
    }

    fn move_rows<G>(
        &self,
        grid: &mut G,
        start_row: u32,
        move_count: i32,
        insert_point: i64,
    ) -> Result<ShiftStats>
    where
        G: Grid + ?Sized,
    {
        let mut stats = ShiftStats::default();
        if move_count <= 0 {
            return Ok(stats);
        }
        let distance = move_count.unsigned_abs();
        let insert_point = insert_point.max(0);
        // Tokens past the insert point, in 1-based rows, have already moved.
        let insert_row_index = u32::try_from(insert_point + 1).unwrap_or(u32::MAX);

        stats.rows_shifted = self.shift_tail(grid, start_row, distance)?;
        if stats.rows_shifted == 0 {
            return Ok(stats);
        }

        let first = start_row + distance;
        let last = first + stats.rows_shifted - 1;
        for row in first..=last {
            if !grid.has_row(row) {
                continue;
            }
            let Some(last_col) = grid.last_column(row) else {
                continue;
            };
            for col in 0..=last_col {
                if self.update_formula(grid, row, col, move_count, insert_row_index)? {
                    stats.formulas_updated += 1;
                }
            }
        }

        debug!(
            start = start_row,
            distance,
            insert_point,
            rows = stats.rows_shifted,
            formulas = stats.formulas_updated,
            "moved rows"
        );
        Ok(stats)
    }

    fn update_formula<G>(
        &self,
        grid: &mut G,
        row: u32,
        col: u16,
        move_count: i32,
        insert_row_index: u32,
    ) -> Result<bool>
    where
        G: Grid + ?Sized,
    {
        let Some(text) = grid.formula_text(row, col) else {
            return Ok(false);
        };
        if text.trim().is_empty() {
            return Ok(false);
        }

        let moved = self.translator.translate(text, move_count, insert_row_index);
        trace!(from = %text, to = %moved, row, col, "updated formula");
        grid.set_formula_text(row, col, moved)?;
        Ok(true)
    }

    /// Move `[start, last row]` down by `distance`, returning the block height
    fn shift_tail<G>(&self, grid: &mut G, start: u32, distance: u32) -> Result<u32>
    where
        G: Grid + ?Sized,
    {
        let Some(last) = grid.row_count().checked_sub(1) else {
            return Ok(0);
        };
        if start > last {
            return Ok(0);
        }

        grid.shift_rows(start, last, distance)?;
        Ok(last - start + 1)
    }
}
