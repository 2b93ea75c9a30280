//! Cell and row copying
//!
//! Copies behave like a spreadsheet drag-copy: every unfrozen row reference in
//! a copied formula moves by the distance between source and target row.

use std::ops::AddAssign;

use rowshift_core::{Error, Result, MAX_ROWS};
use rowshift_formula::FormulaTranslator;
use tracing::{trace, warn};

use crate::grid::{CellContent, Grid};

/// Counters from a copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Cells whose value was written to the target
    pub cells_copied: usize,
    /// Formulas written with translated references
    pub formulas_translated: usize,
    /// Cells whose value could not be copied
    pub skipped: usize,
}

impl AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.cells_copied += other.cells_copied;
        self.formulas_translated += other.formulas_translated;
        self.skipped += other.skipped;
    }
}

/// Copy one cell onto another
///
/// Nothing happens unless both cells exist. See [`CellCopier::copy_cell`].
pub fn copy_cell<G>(grid: &mut G, source: (u32, u16), target: (u32, u16)) -> Result<CopyStats>
where
    G: Grid + ?Sized,
{
    CellCopier::default().copy_cell(grid, source, target)
}

/// Copy a whole row onto another
///
/// Nothing happens unless the target row exists. See [`CellCopier::copy_row`].
pub fn copy_row<G>(grid: &mut G, source_row: u32, target_row: u32) -> Result<CopyStats>
where
    G: Grid + ?Sized,
{
    CellCopier::default().copy_row(grid, source_row, target_row)
}

/// Copies cells and rows within a grid
#[derive(Debug, Clone, Copy, Default)]
pub struct CellCopier {
    translator: FormulaTranslator,
}

impl CellCopier {
    /// Create a copier translating formulas with the given translator
    pub fn new(translator: FormulaTranslator) -> Self {
        Self { translator }
    }

    /// Copy the value, style and comment of `source` onto `target`
    ///
    /// Style and comment are shared with the source, not duplicated. A source
    /// without a comment leaves the target's comment in place. Numbers are
    /// written unchanged, so a date keeps its exact serial and stays a date
    /// through the shared style. Formulas are written with their row
    /// references moved by `target.row - source.row`; formulas with blank text
    /// are copied as they are.
    ///
    /// A value the grid reports as unsupported is logged and counted in
    /// [`CopyStats::skipped`]; style and comment are still copied.
    pub fn copy_cell<G>(
        &self,
        grid: &mut G,
        source: (u32, u16),
        target: (u32, u16),
    ) -> Result<CopyStats>
    where
        G: Grid + ?Sized,
    {
        let mut stats = CopyStats::default();
        let (src_row, src_col) = source;
        let (dst_row, dst_col) = target;

        if !grid.has_cell(dst_row, dst_col) || !grid.has_cell(src_row, src_col) {
            return Ok(stats);
        }

        if let Some(comment) = grid.comment_ref(src_row, src_col) {
            grid.set_comment_ref(dst_row, dst_col, comment)?;
        }
        if let Some(style) = grid.style_ref(src_row, src_col) {
            grid.set_style_ref(dst_row, dst_col, style)?;
        }

        match grid.content(src_row, src_col) {
            CellContent::Blank => return Ok(stats),
            CellContent::Formula(text) => {
                let text = if text.trim().is_empty() {
                    text
                } else {
                    let move_count = row_delta(src_row, dst_row)?;
                    let moved = self.translator.translate_all(&text, move_count);
                    trace!(
                        from = %text,
                        to = %moved,
                        row = dst_row,
                        col = dst_col,
                        "copied formula"
                    );
                    stats.formulas_translated += 1;
                    moved
                };
                grid.set_formula_text(dst_row, dst_col, text)?;
            }
            CellContent::Unsupported(kind) => {
                warn!(
                    row = src_row,
                    col = src_col,
                    kind,
                    "cell value cannot be copied, skipping"
                );
                stats.skipped += 1;
                return Ok(stats);
            }
            value => grid.set_content(dst_row, dst_col, value)?,
        }

        stats.cells_copied += 1;
        Ok(stats)
    }

    /// Copy the height and every cell of `source_row` onto `target_row`
    ///
    /// Target cells are created where the source has a cell. Columns without
    /// a source cell are left untouched. Nothing happens unless both rows
    /// exist.
    pub fn copy_row<G>(&self, grid: &mut G, source_row: u32, target_row: u32) -> Result<CopyStats>
    where
        G: Grid + ?Sized,
    {
        let mut stats = CopyStats::default();
        if !grid.has_row(target_row) || !grid.has_row(source_row) {
            return Ok(stats);
        }

        let height = grid.row_height(source_row);
        grid.set_row_height(target_row, height)?;

        let Some(last_col) = grid.last_column(source_row) else {
            return Ok(stats);
        };
        for col in 0..=last_col {
            if !grid.has_cell(source_row, col) {
                continue;
            }
            grid.create_cell(target_row, col)?;
            stats += self.copy_cell(grid, (source_row, col), (target_row, col))?;
        }

        Ok(stats)
    }
}

fn row_delta(from: u32, to: u32) -> Result<i32> {
    i32::try_from(i64::from(to) - i64::from(from))
        .map_err(|_| Error::RowOutOfBounds(to.max(from), MAX_ROWS - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rowshift_core::{CellComment, CellValue, NumberFormat, Style, Worksheet};
    use std::sync::Arc;

    #[test]
    fn test_copy_cell_requires_target() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value_at(0, 0, 5.0).unwrap();

        let stats = copy_cell(&mut sheet, (0, 0), (3, 0)).unwrap();

        assert_eq!(stats, CopyStats::default());
        assert!(!sheet.has_cell(3, 0));
    }

    #[test]
    fn test_copy_cell_translates_by_row_delta() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_formula_at(1, 2, "=A2*$B$1+C2").unwrap();
        sheet.create_cell(4, 2).unwrap();

        let stats = copy_cell(&mut sheet, (1, 2), (4, 2)).unwrap();

        assert_eq!(sheet.get_formula_at(4, 2), Some("=A5*$B$1+C5"));
        assert_eq!(stats.formulas_translated, 1);
        assert_eq!(stats.cells_copied, 1);
    }

    #[test]
    fn test_copy_cell_upwards() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_formula_at(5, 0, "=B6").unwrap();
        sheet.create_cell(2, 0).unwrap();

        copy_cell(&mut sheet, (5, 0), (2, 0)).unwrap();

        assert_eq!(sheet.get_formula_at(2, 0), Some("=B3"));
    }

    #[test]
    fn test_blank_formula_copied_untranslated() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value_at(0, 0, CellValue::formula("  ")).unwrap();
        sheet.create_cell(1, 0).unwrap();

        let stats = copy_cell(&mut sheet, (0, 0), (1, 0)).unwrap();

        assert_eq!(sheet.get_formula_at(1, 0), Some("  "));
        assert_eq!(stats.formulas_translated, 0);
    }

    #[test]
    fn test_style_and_comment_are_shared() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value_at(0, 0, "note").unwrap();
        sheet.set_cell_style_at(0, 0, &Style::new().bold(true)).unwrap();
        sheet.set_comment_at(0, 0, CellComment::new("ann", "keep"));
        sheet.create_cell(1, 0).unwrap();

        copy_cell(&mut sheet, (0, 0), (1, 0)).unwrap();

        assert_eq!(
            sheet.cell_style_index_at(1, 0),
            sheet.cell_style_index_at(0, 0)
        );
        assert!(Arc::ptr_eq(
            sheet.comment_ref_at(1, 0).unwrap(),
            sheet.comment_ref_at(0, 0).unwrap()
        ));
        assert_eq!(sheet.get_value_at(1, 0).as_string(), Some("note"));
    }

    #[test]
    fn test_missing_source_comment_keeps_target_comment() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value_at(0, 0, 1.0).unwrap();
        sheet.set_cell_value_at(1, 0, 2.0).unwrap();
        sheet.set_comment_at(1, 0, CellComment::text_only("mine"));

        copy_cell(&mut sheet, (0, 0), (1, 0)).unwrap();

        assert_eq!(sheet.comment_at(1, 0).unwrap().text, "mine");
        assert_eq!(sheet.get_value_at(1, 0), CellValue::Number(1.0));
    }

    #[test]
    fn test_blank_source_copies_nothing() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.create_cell(0, 0).unwrap();
        sheet.set_cell_value_at(1, 0, 9.0).unwrap();

        let stats = copy_cell(&mut sheet, (0, 0), (1, 0)).unwrap();

        assert_eq!(stats.cells_copied, 0);
        assert_eq!(sheet.get_value_at(1, 0), CellValue::Number(9.0));
    }

    #[test]
    fn test_unsupported_value_is_skipped() {
        let mut sheet = Worksheet::new("Sheet1");
        let spill = CellValue::SpillTarget {
            source_row: 0,
            source_col: 0,
        };
        sheet.set_cell_value_at(0, 1, spill).unwrap();
        sheet.set_cell_style_at(0, 1, &Style::new().italic(true)).unwrap();
        sheet.set_cell_value_at(1, 1, "old").unwrap();

        let stats = copy_cell(&mut sheet, (0, 1), (1, 1)).unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.cells_copied, 0);
        assert_eq!(sheet.get_value_at(1, 1).as_string(), Some("old"));
        assert!(sheet.cell_style_at(1, 1).unwrap().italic);
    }

    #[test]
    fn test_date_copies_keep_exact_serial() {
        let mut sheet = Worksheet::new("Sheet1");
        let datetime = Style::new().with_number_format(NumberFormat::datetime());
        for (col, serial) in [(0, 45000.123456789), (1, 1e15), (2, 60.25)] {
            sheet.set_cell_value_at(0, col, serial).unwrap();
            sheet.set_cell_style_at(0, col, &datetime).unwrap();
            sheet.create_cell(1, col).unwrap();

            let stats = copy_cell(&mut sheet, (0, col), (1, col)).unwrap();

            assert_eq!(stats.cells_copied, 1);
            assert_eq!(sheet.get_value_at(1, col), CellValue::Number(serial));
            assert!(sheet.is_date_formatted(1, col));
        }
    }

    #[test]
    fn test_copy_row_copies_height_and_cells() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_row_height(0, 30.0).unwrap();
        sheet.set_cell_value_at(0, 0, "a").unwrap();
        sheet.set_cell_formula_at(0, 3, "=A1").unwrap();
        sheet.set_cell_value_at(2, 1, "untouched").unwrap();

        let stats = copy_row(&mut sheet, 0, 2).unwrap();

        assert_eq!(stats.cells_copied, 2);
        assert_eq!(sheet.custom_row_height(2), Some(30.0));
        assert_eq!(sheet.get_value_at(2, 0).as_string(), Some("a"));
        assert_eq!(sheet.get_value_at(2, 1).as_string(), Some("untouched"));
        assert!(!sheet.has_cell(2, 2));
        assert_eq!(sheet.get_formula_at(2, 3), Some("=A3"));
    }

    #[test]
    fn test_copy_row_requires_target_row() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value_at(0, 0, "a").unwrap();

        let stats = copy_row(&mut sheet, 0, 4).unwrap();

        assert_eq!(stats, CopyStats::default());
        assert!(!sheet.has_row(4));
    }
}
