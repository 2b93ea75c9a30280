//! rowshift CLI - row edits on CSV sheets with formula references kept in step
//!
//! Rows on the command line are 1-based, as in spreadsheet notation.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rowshift::prelude::*;
use rowshift::MAX_ROWS;
use rowshift_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rowshift")]
#[command(
    author,
    version,
    about = "Copy, insert and move spreadsheet rows while keeping formulas correct"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the row references of a single formula
    Translate {
        /// Formula text, e.g. "=A1+$B$2"
        formula: String,

        /// Rows to move references by (negative moves up)
        #[arg(short, long = "move", allow_negative_numbers = true)]
        move_count: i32,

        /// First row whose references move (default: all rows)
        #[arg(short, long, default_value = "1", value_parser = row_parser())]
        insert_at: u32,

        /// Absolute reference marker
        #[arg(long, default_value = "$")]
        marker: char,
    },

    /// Insert rows filled from a template row
    InsertRow {
        #[command(flatten)]
        args: IoArgs,

        /// Row to insert at
        #[arg(long, value_parser = row_parser())]
        at: u32,

        /// Row to copy into the new rows
        #[arg(short, long, value_parser = row_parser())]
        template: u32,

        /// Number of rows to insert
        #[arg(short, long, default_value = "1")]
        count: i32,
    },

    /// Move a row and every row below it down
    MoveRows {
        #[command(flatten)]
        args: IoArgs,

        /// First row of the block
        #[arg(short, long, value_parser = row_parser())]
        start: u32,

        /// Rows to move the block by
        #[arg(short, long)]
        count: i32,

        /// Row after which references move (default: derived from start and count)
        #[arg(short, long, value_parser = row_parser())]
        insert_point: Option<u32>,
    },

    /// Copy a row onto another, translating its formulas
    CopyRow {
        #[command(flatten)]
        args: IoArgs,

        /// Row to copy
        #[arg(short, long, value_parser = row_parser())]
        from: u32,

        /// Row to copy onto (created if missing)
        #[arg(short, long, value_parser = row_parser())]
        to: u32,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input CSV file
    input: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter (default: comma)
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

fn row_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_ROWS))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            formula,
            move_count,
            insert_at,
            marker,
        } => {
            let translator = FormulaTranslator::with_marker(marker);
            println!("{}", translator.translate(&formula, move_count, insert_at - 1));
            Ok(())
        }
        Commands::InsertRow {
            args,
            at,
            template,
            count,
        } => edit_sheet(&args, |sheet| {
            let stats = sheet
                .insert_rows(template - 1, at - 1, count)
                .context("Failed to insert rows")?;
            eprintln!(
                "Inserted {} rows ({} cells copied, {} skipped)",
                stats.rows_inserted, stats.cells_copied, stats.skipped
            );
            Ok(())
        }),
        Commands::MoveRows {
            args,
            start,
            count,
            insert_point,
        } => edit_sheet(&args, |sheet| {
            let stats = match insert_point {
                Some(row) => sheet.move_rows_at(start - 1, count, i64::from(row) - 1),
                None => sheet.move_rows(start - 1, count),
            }
            .context("Failed to move rows")?;
            eprintln!(
                "Moved {} rows ({} formulas updated)",
                stats.rows_shifted, stats.formulas_updated
            );
            Ok(())
        }),
        Commands::CopyRow { args, from, to } => edit_sheet(&args, |sheet| {
            let (from, to) = (from - 1, to - 1);
            if !sheet.has_row(from) {
                bail!("Row {} is empty", from + 1);
            }
            sheet.create_row(to)?;
            let stats = rowshift::copy_row(sheet, from, to).context("Failed to copy row")?;
            eprintln!(
                "Copied {} cells ({} formulas translated, {} skipped)",
                stats.cells_copied, stats.formulas_translated, stats.skipped
            );
            Ok(())
        }),
    }
}

/// Load the input sheet, apply `edit`, and write the result
fn edit_sheet<F>(args: &IoArgs, edit: F) -> Result<()>
where
    F: FnOnce(&mut Worksheet) -> Result<()>,
{
    let delimiter = delimiter_byte(args.delimiter)?;
    let mut sheet = load(&args.input, delimiter)?;

    edit(&mut sheet)?;

    let options = CsvWriteOptions {
        delimiter,
        ..Default::default()
    };
    match &args.output {
        Some(path) => CsvWriter::write_file(&sheet, path, &options)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => CsvWriter::write(&sheet, io::stdout().lock(), &options)
            .context("Failed to write to stdout"),
    }
}

fn load(path: &Path, delimiter: u8) -> Result<Worksheet> {
    let options = CsvReadOptions {
        delimiter,
        ..Default::default()
    };
    let sheet = CsvReader::read_file(path, &options)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    debug!(path = %path.display(), rows = sheet.row_count(), "loaded sheet");
    Ok(sheet)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}
