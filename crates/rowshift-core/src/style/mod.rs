//! Cell styles
//!
//! The row operations never look inside a style: they move style indices
//! between cells. The one question asked of a style is whether its
//! [`NumberFormat`] shows numbers as dates.

mod number_format;
mod pool;

pub use number_format::NumberFormat;
pub(crate) use pool::StylePool;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub number_format: NumberFormat,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Use a custom format code such as `"#,##0.00"`
    pub fn number_format<S: Into<String>>(self, code: S) -> Self {
        self.with_number_format(NumberFormat::Custom(code.into()))
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Whether numbers in this style display as dates or times
    pub fn is_date(&self) -> bool {
        self.number_format.is_date_format()
    }
}
