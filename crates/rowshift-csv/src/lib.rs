//! # rowshift-csv
//!
//! CSV reader and writer for rowshift worksheets.
//!
//! Fields starting with `=` are loaded as formulas and written back as their
//! formula text, so a sheet can be edited with the row operations and saved
//! without losing its formulas.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
