//! Row reference translation
//!
//! Rewrites the row numbers inside a formula when rows move. The formula is
//! not parsed: every maximal run of ASCII digits is taken to be a 1-based row
//! number, and everything else is copied through untouched.
//!
//! A token is shifted when it names a row at or after the edit point, that is
//! when `token >= insert_row_index + 1`. Rows strictly before the edit point
//! keep their number.
//!
//! The absolute marker (`$` by default) freezes the next token. Once seen, the
//! marker stays armed across any number of non-digit characters and is only
//! cleared by the token it freezes, so `$A1` keeps its row as well as its
//! column. A marker that directly follows a digit run freezes that run.

use crate::error::{FormulaError, FormulaResult};

/// Default absolute reference marker
pub const ABSOLUTE_MARKER: char = '$';

/// Row reference translator with a configurable absolute marker
///
/// # Example
///
/// ```rust
/// use rowshift_formula::FormulaTranslator;
///
/// let translator = FormulaTranslator::default();
/// assert_eq!(translator.translate("A1+B5", 2, 4), "A1+B7");
/// assert_eq!(translator.translate_all("$A$1+B2", 1), "$A$1+B3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaTranslator {
    absolute_marker: char,
}

impl Default for FormulaTranslator {
    fn default() -> Self {
        Self {
            absolute_marker: ABSOLUTE_MARKER,
        }
    }
}

impl FormulaTranslator {
    /// Create a translator using `$` as the absolute marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator with a custom absolute marker
    ///
    /// Digits are always read as token content, so an ASCII digit given here
    /// never arms.
    pub fn with_marker(absolute_marker: char) -> Self {
        Self { absolute_marker }
    }

    /// The absolute marker in use
    pub fn absolute_marker(&self) -> char {
        self.absolute_marker
    }

    /// Shift row tokens at or after `insert_row_index + 1` by `move_count`
    ///
    /// `insert_row_index` is 0-based. A zero `move_count` returns the formula
    /// unchanged. A negative `move_count` moves references up.
    pub fn translate(&self, formula: &str, move_count: i32, insert_row_index: u32) -> String {
        if move_count == 0 {
            return formula.to_string();
        }

        let shift = RowShift {
            move_count: i64::from(move_count),
            threshold: i64::from(insert_row_index) + 1,
        };

        let mut out = String::with_capacity(formula.len() + 4);
        let mut token_start: Option<usize> = None;
        let mut armed = false;

        for (pos, c) in formula.char_indices() {
            if c.is_ascii_digit() {
                token_start.get_or_insert(pos);
                continue;
            }

            if c == self.absolute_marker {
                armed = true;
            }
            if let Some(start) = token_start.take() {
                shift.emit(&mut out, &formula[start..pos], &mut armed);
            }
            out.push(c);
        }

        if let Some(start) = token_start {
            shift.emit(&mut out, &formula[start..], &mut armed);
        }

        out
    }

    /// Shift every unfrozen row token by `move_count`
    ///
    /// Used when a whole formula is carried to another row, as in a drag copy.
    /// Same as [`translate`](Self::translate) with an insert point of 0.
    pub fn translate_all(&self, formula: &str, move_count: i32) -> String {
        self.translate(formula, move_count, 0)
    }
}

/// Shift parameters for one translation pass
struct RowShift {
    move_count: i64,
    /// 1-based row number from which tokens move
    threshold: i64,
}

impl RowShift {
    fn emit(&self, out: &mut String, token: &str, armed: &mut bool) {
        if std::mem::take(armed) {
            out.push_str(token);
            return;
        }

        // Tokens too long for i64 cannot be row numbers; keep them as written.
        let Ok(row) = token.parse::<i64>() else {
            out.push_str(token);
            return;
        };

        if row < self.threshold {
            out.push_str(&row.to_string());
            return;
        }
        match row.checked_add(self.move_count) {
            Some(moved) => out.push_str(&moved.to_string()),
            None => out.push_str(token),
        }
    }
}

/// Shift row tokens at or after `insert_row_index + 1` by `move_count`
///
/// Uses the default `$` marker. See [`FormulaTranslator::translate`].
pub fn translate(formula: &str, move_count: i32, insert_row_index: u32) -> String {
    FormulaTranslator::default().translate(formula, move_count, insert_row_index)
}

/// Shift every unfrozen row token by `move_count`
///
/// See [`FormulaTranslator::translate_all`].
pub fn translate_all(formula: &str, move_count: i32) -> String {
    FormulaTranslator::default().translate_all(formula, move_count)
}

/// Rewrite a formula after `move_count` rows were inserted at `insert_row`
///
/// Rows before the insertion keep their numbers; rows at or after it move.
pub fn translate_by_insert(formula: &str, move_count: i32, insert_row: u32) -> String {
    translate(formula, move_count, insert_row)
}

/// Move a formula by rows and columns at once
///
/// Column letters are opaque to the translator, so combined moves are not
/// supported. Callers needing one must translate rows and handle columns
/// themselves.
pub fn translate_rows_and_columns(
    _formula: &str,
    row_move: i32,
    col_move: i32,
) -> FormulaResult<String> {
    Err(FormulaError::Unsupported(format!(
        "moving references by {} rows and {} columns",
        row_move, col_move
    )))
}
