//! Grid abstraction
//!
//! The row operations only need a handful of index-addressed primitives from
//! the document they edit. [`Grid`] names them; [`Worksheet`] implements it.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use rowshift_core::date::datetime_to_serial;
use rowshift_core::{
    CellComment, CellError, CellValue, NumberFormat, Result, SharedString, Worksheet,
};

/// A cell's value as seen by the row operations
///
/// Exactly one variant describes a cell. Numbers are reported as
/// [`CellContent::Number`]; whether they display as dates is a formatting
/// question answered by [`Grid::is_date_formatted`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Text
    Text(SharedString),
    /// TRUE or FALSE
    Boolean(bool),
    /// Plain number
    Number(f64),
    /// Date and time
    Date(NaiveDateTime),
    /// Error value such as `#REF!`
    Error(CellError),
    /// Formula text, including the leading `=` if the grid stores one
    Formula(String),
    /// No value
    Blank,
    /// A stored value that cannot be reproduced in another cell
    Unsupported(&'static str),
}

impl CellContent {
    /// Short name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CellContent::Text(_) => "text",
            CellContent::Boolean(_) => "boolean",
            CellContent::Number(_) => "number",
            CellContent::Date(_) => "date",
            CellContent::Error(_) => "error",
            CellContent::Formula(_) => "formula",
            CellContent::Blank => "blank",
            CellContent::Unsupported(kind) => *kind,
        }
    }
}

impl From<bool> for CellContent {
    fn from(value: bool) -> Self {
        CellContent::Boolean(value)
    }
}

impl From<i32> for CellContent {
    fn from(value: i32) -> Self {
        CellContent::Number(f64::from(value))
    }
}

impl From<i64> for CellContent {
    fn from(value: i64) -> Self {
        CellContent::Number(value as f64)
    }
}

impl From<f64> for CellContent {
    fn from(value: f64) -> Self {
        CellContent::Number(value)
    }
}

impl From<&str> for CellContent {
    fn from(value: &str) -> Self {
        CellContent::Text(SharedString::new(value))
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        CellContent::Text(SharedString::from(value))
    }
}

impl From<NaiveDate> for CellContent {
    fn from(value: NaiveDate) -> Self {
        CellContent::Date(value.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for CellContent {
    fn from(value: NaiveDateTime) -> Self {
        CellContent::Date(value)
    }
}

impl From<Decimal> for CellContent {
    fn from(value: Decimal) -> Self {
        match value.to_f64() {
            Some(n) => CellContent::Number(n),
            None => CellContent::Text(SharedString::from(value.to_string())),
        }
    }
}

impl From<CellError> for CellContent {
    fn from(value: CellError) -> Self {
        CellContent::Error(value)
    }
}

/// Index-addressed access to a row/column document
///
/// Rows are 0-based `u32`, columns 0-based `u16`. Style and comment handles
/// are opaque to the row operations: they are read from one cell and written
/// to another without being inspected, so the target shares the source's
/// object.
pub trait Grid {
    /// Handle to a cell style
    type StyleRef: Clone;
    /// Handle to a cell comment
    type CommentRef: Clone;

    /// Number of rows up to and including the last existing row
    fn row_count(&self) -> u32;

    /// Whether the row exists
    fn has_row(&self, row: u32) -> bool;

    /// Create the row if it does not exist
    fn create_row(&mut self, row: u32) -> Result<()>;

    /// Move rows `start..=end` down by `distance`
    ///
    /// Cells move with their native content; formula text is not rewritten.
    /// Rows already at the destination are overwritten.
    fn shift_rows(&mut self, start: u32, end: u32, distance: u32) -> Result<()>;

    /// Custom height of the row, `None` for the default
    fn row_height(&self, row: u32) -> Option<f64>;

    /// Set or clear the custom height of the row
    fn set_row_height(&mut self, row: u32, height: Option<f64>) -> Result<()>;

    /// Highest column holding a cell in the row
    fn last_column(&self, row: u32) -> Option<u16>;

    /// Whether the cell exists
    fn has_cell(&self, row: u32, col: u16) -> bool;

    /// Create the cell if it does not exist
    fn create_cell(&mut self, row: u32, col: u16) -> Result<()>;

    /// The cell's value, [`CellContent::Blank`] for absent cells
    fn content(&self, row: u32, col: u16) -> CellContent;

    /// Replace the cell's value, creating the cell if needed
    fn set_content(&mut self, row: u32, col: u16, content: CellContent) -> Result<()>;

    /// Formula text of a formula cell
    fn formula_text(&self, row: u32, col: u16) -> Option<&str>;

    /// Replace the cell's value with a formula
    fn set_formula_text(&mut self, row: u32, col: u16, text: String) -> Result<()>;

    /// Whether numbers in the cell display as dates
    fn is_date_formatted(&self, row: u32, col: u16) -> bool;

    /// The cell's style handle
    fn style_ref(&self, row: u32, col: u16) -> Option<Self::StyleRef>;

    /// Point the cell at a style
    fn set_style_ref(&mut self, row: u32, col: u16, style: Self::StyleRef) -> Result<()>;

    /// The cell's comment handle
    fn comment_ref(&self, row: u32, col: u16) -> Option<Self::CommentRef>;

    /// Attach a comment to the cell
    fn set_comment_ref(&mut self, row: u32, col: u16, comment: Self::CommentRef) -> Result<()>;
}

impl Grid for Worksheet {
    /// Index into the sheet's style pool
    type StyleRef = u32;
    type CommentRef = Arc<CellComment>;

    fn row_count(&self) -> u32 {
        Worksheet::row_count(self)
    }

    fn has_row(&self, row: u32) -> bool {
        Worksheet::has_row(self, row)
    }

    fn create_row(&mut self, row: u32) -> Result<()> {
        Worksheet::create_row(self, row).map(|_| ())
    }

    fn shift_rows(&mut self, start: u32, end: u32, distance: u32) -> Result<()> {
        Worksheet::shift_rows(self, start, end, distance)
    }

    fn row_height(&self, row: u32) -> Option<f64> {
        self.custom_row_height(row)
    }

    fn set_row_height(&mut self, row: u32, height: Option<f64>) -> Result<()> {
        self.set_custom_row_height(row, height)
    }

    fn last_column(&self, row: u32) -> Option<u16> {
        Worksheet::last_column(self, row)
    }

    fn has_cell(&self, row: u32, col: u16) -> bool {
        self.cell_at(row, col).is_some()
    }

    fn create_cell(&mut self, row: u32, col: u16) -> Result<()> {
        self.create_cell_at(row, col).map(|_| ())
    }

    fn content(&self, row: u32, col: u16) -> CellContent {
        let Some(cell) = self.cell_at(row, col) else {
            return CellContent::Blank;
        };

        match &cell.value {
            CellValue::Empty => CellContent::Blank,
            CellValue::Boolean(b) => CellContent::Boolean(*b),
            CellValue::Number(n) => CellContent::Number(*n),
            CellValue::String(s) => CellContent::Text(s.clone()),
            CellValue::Error(e) => CellContent::Error(*e),
            CellValue::Formula { text, .. } => CellContent::Formula(text.clone()),
            CellValue::SpillTarget { .. } => CellContent::Unsupported("spill target"),
        }
    }

    fn set_content(&mut self, row: u32, col: u16, content: CellContent) -> Result<()> {
        let value = match content {
            CellContent::Text(s) => CellValue::String(s),
            CellContent::Boolean(b) => CellValue::Boolean(b),
            CellContent::Number(n) => CellValue::Number(n),
            CellContent::Date(dt) => {
                self.ensure_date_format(row, col, dt)?;
                CellValue::Number(datetime_to_serial(dt))
            }
            CellContent::Error(e) => CellValue::Error(e),
            CellContent::Formula(text) => return self.replace_formula_at(row, col, text),
            CellContent::Blank => CellValue::Empty,
            CellContent::Unsupported(kind) => {
                return Err(rowshift_core::Error::other(format!(
                    "cannot store a {} value",
                    kind
                )))
            }
        };
        self.set_cell_value_at(row, col, value)
    }

    fn formula_text(&self, row: u32, col: u16) -> Option<&str> {
        self.get_formula_at(row, col)
    }

    fn set_formula_text(&mut self, row: u32, col: u16, text: String) -> Result<()> {
        self.replace_formula_at(row, col, text)
    }

    fn is_date_formatted(&self, row: u32, col: u16) -> bool {
        self.is_date_formatted_at(row, col)
    }

    fn style_ref(&self, row: u32, col: u16) -> Option<u32> {
        self.cell_at(row, col).map(|cell| cell.style_index)
    }

    fn set_style_ref(&mut self, row: u32, col: u16, style: u32) -> Result<()> {
        self.set_cell_style_index_at(row, col, style)
    }

    fn comment_ref(&self, row: u32, col: u16) -> Option<Arc<CellComment>> {
        self.comment_ref_at(row, col).cloned()
    }

    fn set_comment_ref(&mut self, row: u32, col: u16, comment: Arc<CellComment>) -> Result<()> {
        self.create_cell_at(row, col)?;
        self.set_comment_ref_at(row, col, comment);
        Ok(())
    }
}

/// Write any convertible value into a cell, creating the cell on demand
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rowshift::{set_cell_content, Grid, Worksheet};
///
/// let mut sheet = Worksheet::new("Sheet1");
/// set_cell_content(&mut sheet, 0, 0, 42i64).unwrap();
/// set_cell_content(&mut sheet, 0, 1, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()).unwrap();
///
/// assert!(sheet.is_date_formatted(0, 1));
/// ```
pub fn set_cell_content<G, V>(grid: &mut G, row: u32, col: u16, value: V) -> Result<()>
where
    G: Grid + ?Sized,
    V: Into<CellContent>,
{
    grid.set_content(row, col, value.into())
}

trait WorksheetDateExt {
    fn ensure_date_format(&mut self, row: u32, col: u16, value: NaiveDateTime) -> Result<()>;
}

impl WorksheetDateExt for Worksheet {
    /// Give a cell that will hold a date a date number format
    ///
    /// The rest of the cell's style is kept. Cells already showing dates are
    /// left alone.
    fn ensure_date_format(&mut self, row: u32, col: u16, value: NaiveDateTime) -> Result<()> {
        if self.is_date_formatted_at(row, col) {
            return Ok(());
        }

        let format = if value.num_seconds_from_midnight() == 0 {
            NumberFormat::date_short()
        } else {
            NumberFormat::datetime()
        };
        let style = self
            .cell_style_at(row, col)
            .cloned()
            .unwrap_or_default()
            .with_number_format(format);
        self.set_cell_style_at(row, col, &style)
    }
}
