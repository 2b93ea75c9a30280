//! # rowshift
//!
//! Copy, insert and move spreadsheet rows while keeping formula row
//! references pointing at the right rows.
//!
//! Spreadsheet applications rewrite references automatically when rows move.
//! This crate does the same for a grid held in memory:
//!
//! - [`copy_cell`] and [`copy_row`] copy like a drag-copy, moving every
//!   unfrozen row reference by the copy distance
//! - [`insert_row`] opens a row and fills it from a template row
//! - [`move_rows`] pushes a block of rows down and fixes the formulas in it
//!
//! Formulas are rewritten by [`rowshift_formula`], which treats every digit
//! run as a row number and honours the `$` absolute marker.
//!
//! ## Example
//!
//! ```rust
//! use rowshift::prelude::*;
//!
//! let mut sheet = Worksheet::new("Invoice");
//! sheet.set_cell_value_at(0, 0, "Item").unwrap();
//! sheet.set_cell_value_at(1, 0, "Widget").unwrap();
//! sheet.set_cell_formula_at(1, 1, "=C2*$D$1").unwrap();
//! sheet.set_cell_value_at(2, 0, "Total").unwrap();
//!
//! // Add a line below the first one, using it as the template.
//! sheet.insert_row(1, 2).unwrap();
//!
//! assert_eq!(sheet.get_value_at(2, 0).as_string(), Some("Widget"));
//! assert_eq!(sheet.get_formula_at(2, 1), Some("=C3*$D$1"));
//! assert_eq!(sheet.get_value_at(3, 0).as_string(), Some("Total"));
//! ```

pub mod copy;
pub mod grid;
pub mod prelude;
pub mod shift;

pub use copy::{copy_cell, copy_row, CellCopier, CopyStats};
pub use grid::{set_cell_content, CellContent, Grid};
pub use shift::{
    insert_row, insert_rows, move_rows, move_rows_at, update_formula, RowShiftExt, ShiftOptions,
    ShiftStats,
};

// Re-export core types
pub use rowshift_core::{
    CellAddress, CellComment, CellData, CellError, CellValue, Error, NumberFormat, Result, Row,
    SharedString, Style, Worksheet, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use rowshift_formula::{
    translate, translate_all, translate_by_insert, translate_rows_and_columns, FormulaError,
    FormulaResult, FormulaTranslator,
};
