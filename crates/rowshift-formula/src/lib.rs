//! # rowshift-formula
//!
//! Row reference translation for spreadsheet formulas.
//!
//! Formulas are treated as text. Each run of digits is read as a row number
//! and shifted when it lies at or after the edit point; a `$` marker freezes
//! the run that follows it. No parsing is done, so numeric constants move
//! along with references.
//!
//! ## Example
//!
//! ```rust
//! use rowshift_formula::{translate, translate_all};
//!
//! // Two rows inserted before 0-based row 4: references to rows 5+ move.
//! assert_eq!(translate("=A1+B5", 2, 4), "=A1+B7");
//!
//! // Copying a formula one row down.
//! assert_eq!(translate_all("=$A$1*B2", 1), "=$A$1*B3");
//! ```

pub mod error;
pub mod translate;

pub use error::{FormulaError, FormulaResult};
pub use translate::{
    translate, translate_all, translate_by_insert, translate_rows_and_columns,
    FormulaTranslator, ABSOLUTE_MARKER,
};
