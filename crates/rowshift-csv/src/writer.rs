//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rowshift_core::{CellValue, Worksheet};
use tracing::debug;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use crate::reader::{is_formula, typed_value, TEXT_MARK};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer
    ///
    /// Writes rows `0..row_count` and columns up to the rightmost cell of
    /// the sheet, so gaps are kept as empty fields. Formula cells are written
    /// as their formula text. With [`CsvWriteOptions::mark_text`], text that
    /// the reader would load as another type is written behind a `'`.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(writer);

        let width = worksheet.max_column().map_or(0, |col| usize::from(col) + 1);
        let mut record = Vec::with_capacity(width);

        for row in 0..worksheet.row_count() {
            record.clear();
            for col in 0..width {
                // `width` never exceeds u16::MAX + 1
                let value = worksheet.get_value_at(row, col as u16);
                let field = match &value {
                    CellValue::String(text) if options.mark_text && reads_as_typed(text.as_str()) => {
                        format!("{TEXT_MARK}{text}")
                    }
                    _ => value.to_string(),
                };
                record.push(field);
            }
            if record.is_empty() {
                // A lone empty field keeps the row
                record.push(String::new());
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        debug!(rows = worksheet.row_count(), columns = width, "wrote csv");
        Ok(())
    }
}

fn reads_as_typed(text: &str) -> bool {
    text.starts_with(TEXT_MARK) || is_formula(text) || typed_value(text).is_some()
}
