//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rowshift_core::{CellError, CellValue, Worksheet, MAX_COLS};
use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// Leading mark that keeps a field as text
pub(crate) const TEXT_MARK: char = '\'';

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Record `n` becomes row `n`; every record creates its row even when all
    /// of its fields are empty. Empty fields leave no cell.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.clone());
        let mut row_idx = 0u32;

        for result in csv_reader.records() {
            let record = result?;
            worksheet.create_row(row_idx)?;

            let is_header = options.has_header && row_idx == 0;
            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                let col = match u16::try_from(col) {
                    Ok(col) if col < MAX_COLS => col,
                    _ => {
                        return Err(CsvError::Parse {
                            row: row_idx as usize + 1,
                            column: col + 1,
                            message: format!("more than {} columns", MAX_COLS),
                        })
                    }
                };

                let value = if is_header {
                    CellValue::string(Self::unmarked(field, options).unwrap_or(field))
                } else {
                    Self::field_value(field, options)
                };
                worksheet.set_cell_value_at(row_idx, col, value)?;
            }

            row_idx += 1;
        }

        debug!(
            rows = row_idx,
            cells = worksheet.cell_count(),
            "read csv"
        );
        Ok(worksheet)
    }

    fn field_value(field: &str, options: &CsvReadOptions) -> CellValue {
        if let Some(text) = Self::unmarked(field, options) {
            return CellValue::string(text);
        }
        if options.detect_formulas && is_formula(field) {
            return CellValue::formula(field);
        }
        if options.auto_detect_types {
            if let Some(value) = typed_value(field) {
                return value;
            }
        }
        CellValue::string(field)
    }

    /// The field without its text mark, when it has one and detection is on
    fn unmarked<'a>(field: &'a str, options: &CsvReadOptions) -> Option<&'a str> {
        if !options.detect_formulas && !options.auto_detect_types {
            return None;
        }
        field.strip_prefix(TEXT_MARK)
    }
}

pub(crate) fn is_formula(field: &str) -> bool {
    field.len() > 1 && field.starts_with('=')
}

/// The boolean, error or number a field spells, if any
pub(crate) fn typed_value(field: &str) -> Option<CellValue> {
    let trimmed = field.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return Some(CellValue::Boolean(true));
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(CellValue::Boolean(false));
    }
    if let Some(error) = CellError::parse(trimmed) {
        return Some(CellValue::Error(error));
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(CellValue::Number)
}
