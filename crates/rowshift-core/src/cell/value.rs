//! Stored cell values

use std::fmt;
use std::sync::Arc;

/// What a worksheet cell holds
///
/// Dates have no variant of their own. They are serial numbers whose cell
/// carries a date number format (see [`crate::date`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    String(SharedString),
    Error(CellError),
    /// Formula text as entered, with the result of its last evaluation
    Formula {
        text: String,
        cached_value: Option<Box<CellValue>>,
    },
    /// One element of an array result owned by the formula at the source cell
    ///
    /// The cell holds nothing of its own, so there is nothing to copy out of it.
    SpillTarget { source_row: u32, source_col: u16 },
}

impl CellValue {
    pub fn string<S: AsRef<str>>(text: S) -> Self {
        CellValue::String(SharedString::new(text))
    }

    /// Formula without a cached result
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula {
            text: text.into(),
            cached_value: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The number, or the cached number of a formula
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Formula {
                cached_value: Some(cached),
                ..
            } => cached.as_number(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Renders the value the way a sheet shows it in a text export: formulas
/// as their text, booleans upper case, spill targets empty
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty | CellValue::SpillTarget { .. } => Ok(()),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::String(s) => f.write_str(s.as_str()),
            CellValue::Error(e) => f.write_str(e.as_str()),
            CellValue::Formula { text, .. } => f.write_str(text),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::string(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(SharedString::from(value))
    }
}

impl From<CellError> for CellValue {
    fn from(value: CellError) -> Self {
        CellValue::Error(value)
    }
}

/// Spreadsheet error literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
}

impl CellError {
    const ALL: [CellError; 7] = [
        CellError::Null,
        CellError::Div0,
        CellError::Value,
        CellError::Ref,
        CellError::Name,
        CellError::Num,
        CellError::Na,
    ];

    /// The literal as a sheet displays it, e.g. `#REF!`
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
        }
    }

    /// Recognise a literal, ignoring case
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable text shared by every cell it is copied into
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        SharedString(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both handles point at the same text
    pub fn ptr_eq(&self, other: &SharedString) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for SharedString {
    fn from(text: &str) -> Self {
        SharedString::new(text)
    }
}

impl From<String> for SharedString {
    fn from(text: String) -> Self {
        SharedString(Arc::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_matches_export_text() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from(CellError::Div0).to_string(), "#DIV/0!");
        assert_eq!(CellValue::formula("=A1+1").to_string(), "=A1+1");
        let spill = CellValue::SpillTarget {
            source_row: 3,
            source_col: 1,
        };
        assert_eq!(spill.to_string(), "");
    }

    #[test]
    fn test_formula_accessors() {
        let cached = CellValue::Formula {
            text: "=B2*2".into(),
            cached_value: Some(Box::new(CellValue::Number(8.0))),
        };
        assert_eq!(cached.formula_text(), Some("=B2*2"));
        assert_eq!(cached.as_number(), Some(8.0));
        assert_eq!(CellValue::formula("=B2").as_number(), None);
        assert_eq!(CellValue::Number(1.0).formula_text(), None);
    }

    #[test]
    fn test_cell_error_literals() {
        for error in CellError::ALL {
            assert_eq!(CellError::parse(error.as_str()), Some(error));
        }
        assert_eq!(CellError::parse("#n/a"), Some(CellError::Na));
        assert_eq!(CellError::parse("#REF"), None);
    }

    #[test]
    fn test_shared_string_clone_shares_allocation() {
        let a = SharedString::new("x");
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&SharedString::new("x")));
    }
}
