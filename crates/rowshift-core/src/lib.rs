//! # rowshift-core
//!
//! The in-memory sheet that row edits operate on.
//!
//! A [`Worksheet`] stores cells sparsely by row and column, keeps created
//! rows with their heights, interns [`Style`]s and shares [`CellComment`]s.
//! [`Worksheet::shift_rows`] is the structural primitive: it moves a block of
//! rows down and leaves formula text alone, so callers decide how references
//! change.
//!
//! ```rust
//! use rowshift_core::{CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_formula("B1", "=A1&\"!\"").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Number(3.5)).unwrap();
//!
//! sheet.shift_rows(0, 1, 2).unwrap();
//! assert_eq!(sheet.get_formula_at(2, 1), Some("=A1&\"!\""));
//! assert_eq!(sheet.get_value_at(3, 0), CellValue::Number(3.5));
//! ```

pub mod cell;
pub mod comment;
pub mod date;
pub mod error;
pub mod row;
pub mod style;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellError, CellStorage, CellValue, SharedString};
pub use comment::CellComment;
pub use error::{Error, Result};
pub use row::Row;
pub use style::{NumberFormat, Style};
pub use worksheet::Worksheet;

/// Rows per sheet
pub const MAX_ROWS: u32 = 1 << 20;

/// Columns per sheet, `A` to `XFD`
pub const MAX_COLS: u16 = 1 << 14;
