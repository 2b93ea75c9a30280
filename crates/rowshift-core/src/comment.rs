//! Cell comments
//!
//! Worksheets hold comments behind an [`Arc`](std::sync::Arc), so cells that
//! received a comment through a row copy point at the same note.
//!
//! ```rust
//! use rowshift_core::{CellComment, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_comment("A1", CellComment::new("ops", "check totals")).unwrap();
//! assert_eq!(sheet.comment_at(0, 0).unwrap().to_string(), "[ops]: check totals");
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellComment {
    /// Empty when the note is anonymous
    pub author: String,
    pub text: String,
}

impl CellComment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }
}

impl fmt::Display for CellComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.author.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "[{}]: {}", self.author, self.text)
        }
    }
}
