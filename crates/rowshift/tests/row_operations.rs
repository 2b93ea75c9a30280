//! End-to-end tests for row copy, insert and move on a worksheet

use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rowshift::prelude::*;
use rowshift::{copy_row, set_cell_content, translate, MAX_ROWS};

type Snapshot = Vec<(u32, u16, CellValue, u32)>;

fn snapshot(sheet: &Worksheet) -> (Snapshot, Vec<Option<f64>>) {
    let cells = sheet
        .iter_cells()
        .map(|(row, col, data)| (row, col, data.value.clone(), data.style_index))
        .collect();
    let heights = (0..sheet.row_count())
        .map(|row| sheet.custom_row_height(row))
        .collect();
    (cells, heights)
}

/// An order sheet: header, two lines with formulas, a total row.
fn order_sheet() -> Worksheet {
    let mut sheet = Worksheet::new("Orders");
    let money = Style::new().number_format("#,##0.00");

    sheet.set_cell_value("A1", "Item").unwrap();
    sheet.set_cell_value("B1", "Qty").unwrap();
    sheet.set_cell_value("C1", "Price").unwrap();
    sheet.set_cell_value("D1", "Rate").unwrap();
    sheet.set_cell_value("E1", 1.2).unwrap();

    let lines = [("Bolt", 4.0, 0.25), ("Nut", 10.0, 0.1)];
    for (row, (item, qty, price)) in (1u32..).zip(lines) {
        let n = row + 1;
        sheet.set_cell_value_at(row, 0, item).unwrap();
        sheet.set_cell_value_at(row, 1, qty).unwrap();
        sheet.set_cell_value_at(row, 2, price).unwrap();
        sheet
            .set_cell_formula_at(row, 3, &format!("=B{n}*C{n}*$E$1"))
            .unwrap();
        sheet.set_cell_style_at(row, 3, &money).unwrap();
    }

    sheet.set_cell_value("A4", "Total").unwrap();
    sheet.set_cell_formula("D4", "=SUM(D2:D3)").unwrap();
    sheet.set_row_height(1, 22.5).unwrap();
    sheet
}

#[test]
fn test_copy_row_reproduces_values_and_styles() {
    let mut sheet = order_sheet();
    sheet.create_row(7).unwrap();

    let stats = copy_row(&mut sheet, 1, 7).unwrap();

    assert_eq!(stats.cells_copied, 4);
    assert_eq!(stats.skipped, 0);
    for col in 0..3 {
        assert_eq!(sheet.get_value_at(7, col), sheet.get_value_at(1, col));
        assert_eq!(
            sheet.cell_style_index_at(7, col),
            sheet.cell_style_index_at(1, col)
        );
    }
    assert_eq!(sheet.get_formula_at(7, 3), Some("=B8*C8*$E$1"));
    assert_eq!(sheet.cell_style_index_at(7, 3), sheet.cell_style_index_at(1, 3));
    assert_eq!(sheet.custom_row_height(7), Some(22.5));
}

#[test]
fn test_copy_row_keeps_dates() {
    let mut sheet = Worksheet::new("Dates");
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let stamp = day.and_hms_milli_opt(13, 45, 30, 250).unwrap();
    set_cell_content(&mut sheet, 0, 0, day).unwrap();
    set_cell_content(&mut sheet, 0, 1, stamp).unwrap();
    sheet.set_cell_value_at(0, 2, 45351.000000123).unwrap();
    sheet
        .set_cell_style_at(0, 2, &Style::new().number_format("yyyy-mm-dd hh:mm:ss"))
        .unwrap();
    sheet.create_row(1).unwrap();

    let stats = copy_row(&mut sheet, 0, 1).unwrap();

    assert_eq!(stats.cells_copied, 3);
    for col in 0..3 {
        assert!(sheet.is_date_formatted(1, col));
        assert_eq!(sheet.get_value_at(1, col), sheet.get_value_at(0, col));
    }
}

#[test]
fn test_move_rows_shifts_tokens_past_insert_point() {
    let mut sheet = order_sheet();
    let before: Vec<(u32, u16, String)> = sheet
        .formula_cells()
        .filter(|(row, _, _)| *row >= 1)
        .map(|(row, col, text)| (row, col, text.to_string()))
        .collect();

    let stats = sheet.move_rows_at(1, 3, 0).unwrap();

    assert_eq!(stats.rows_shifted, 3);
    assert_eq!(stats.formulas_updated, 3);
    for (row, col, text) in before {
        assert_eq!(
            sheet.get_formula_at(row + 3, col),
            Some(translate(&text, 3, 1).as_str())
        );
    }
    assert_eq!(sheet.get_formula_at(4, 3), Some("=B5*C5*$E$1"));
    assert_eq!(sheet.get_formula_at(6, 3), Some("=SUM(D5:D6)"));
    assert_eq!(sheet.get_value_at(0, 4), CellValue::Number(1.2));
}

#[test]
fn test_move_rows_leaves_rows_above_untouched() {
    let mut sheet = order_sheet();
    sheet.set_cell_formula_at(0, 5, "=D4").unwrap();

    sheet.move_rows(3, 2).unwrap();

    // Default insert point is 0, so every token from 2 moves; formulas above
    // the moved block are not rescanned.
    assert_eq!(sheet.get_formula_at(0, 5), Some("=D4"));
    assert_eq!(sheet.get_formula_at(5, 3), Some("=SUM(D4:D5)"));
    assert_eq!(sheet.get_value_at(5, 0).as_string(), Some("Total"));
}

#[test]
fn test_move_rows_at_skips_rows_above_the_block() {
    let mut sheet = order_sheet();
    sheet.set_cell_formula_at(0, 5, "=D4").unwrap();

    let stats = sheet.move_rows_at(2, 2, 1).unwrap();

    assert_eq!(stats.rows_shifted, 2);
    assert_eq!(stats.formulas_updated, 2);
    // Tokens from row 3 on move, but only the moved rows are rewritten.
    assert_eq!(sheet.get_formula_at(0, 5), Some("=D4"));
    assert_eq!(sheet.get_formula_at(1, 3), Some("=B2*C2*$E$1"));
    assert_eq!(sheet.get_formula_at(4, 3), Some("=B5*C5*$E$1"));
    assert_eq!(sheet.get_formula_at(5, 3), Some("=SUM(D2:D5)"));
    assert!(!sheet.has_row(2));
}

#[test]
fn test_insert_row_leaves_shifted_formulas_as_written() {
    let mut sheet = order_sheet();

    let stats = sheet.insert_row(1, 1).unwrap();

    assert_eq!(stats.rows_shifted, 3);
    assert_eq!(stats.formulas_updated, 0);
    assert_eq!(sheet.get_formula_at(2, 3), Some("=B2*C2*$E$1"));
    assert_eq!(sheet.get_formula_at(3, 3), Some("=B3*C3*$E$1"));
    assert_eq!(sheet.get_formula_at(4, 3), Some("=SUM(D2:D3)"));
    assert_eq!(sheet.get_formula_at(1, 3), Some("=B1*C1*$E$1"));
    assert_eq!(sheet.get_value_at(1, 0).as_string(), Some("Bolt"));
}

#[test]
fn test_no_op_paths_leave_sheet_unchanged() {
    let mut sheet = order_sheet();
    let before = snapshot(&sheet);

    for count in [0, -1, -20] {
        assert_eq!(sheet.move_rows(1, count).unwrap(), ShiftStats::default());
        assert_eq!(sheet.move_rows_at(0, count, 3).unwrap(), ShiftStats::default());
        assert_eq!(
            sheet.insert_rows(1, 2, count).unwrap(),
            ShiftStats::default()
        );
    }

    assert_eq!(snapshot(&sheet), before);
}

#[test]
fn test_insert_row_uses_template() {
    let mut sheet = order_sheet();

    let stats = sheet.insert_row(2, 3).unwrap();

    assert_eq!(stats.rows_inserted, 1);
    assert_eq!(stats.rows_shifted, 1);
    assert_eq!(sheet.get_value_at(3, 0).as_string(), Some("Nut"));
    assert_eq!(sheet.get_formula_at(3, 3), Some("=B4*C4*$E$1"));
    assert_eq!(sheet.get_value_at(4, 0).as_string(), Some("Total"));
}

#[test]
fn test_insert_row_template_below_insertion() {
    let mut sheet = order_sheet();

    // Template row 2 sits below the insertion at row 1 and moves to row 3.
    sheet.insert_row(2, 1).unwrap();

    assert_eq!(sheet.get_value_at(3, 0).as_string(), Some("Nut"));
    assert_eq!(sheet.get_value_at(1, 0).as_string(), Some("Nut"));
    assert_eq!(sheet.get_formula_at(1, 3), Some("=B1*C1*$E$1"));
    assert_eq!(sheet.get_value_at(2, 0).as_string(), Some("Bolt"));
}

#[test]
fn test_unsupported_cell_does_not_abort_row_copy() {
    let mut sheet = Worksheet::new("Spill");
    sheet.set_cell_formula_at(0, 0, "=SEQUENCE(2)").unwrap();
    sheet
        .set_cell_value_at(
            0,
            1,
            CellValue::SpillTarget {
                source_row: 0,
                source_col: 0,
            },
        )
        .unwrap();
    sheet.set_cell_style_at(0, 1, &Style::new().bold(true)).unwrap();
    sheet.set_comment_at(0, 1, CellComment::new("ops", "spilled"));
    sheet.set_cell_value_at(0, 2, "after").unwrap();
    sheet.create_row(4).unwrap();

    let stats = copy_row(&mut sheet, 0, 4).unwrap();

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.cells_copied, 2);
    assert_eq!(sheet.get_formula_at(4, 0), Some("=SEQUENCE(6)"));
    assert!(sheet.get_value_at(4, 1).is_empty());
    assert!(sheet.cell_style_at(4, 1).unwrap().bold);
    assert!(Arc::ptr_eq(
        sheet.comment_ref_at(4, 1).unwrap(),
        sheet.comment_ref_at(0, 1).unwrap()
    ));
    assert_eq!(sheet.get_value_at(4, 2).as_string(), Some("after"));
}

#[test]
fn test_comments_travel_with_moved_rows() {
    let mut sheet = order_sheet();
    sheet.set_comment("A2", CellComment::text_only("first line")).unwrap();

    sheet.move_rows(1, 2).unwrap();

    assert!(!sheet.has_comment_at(1, 0));
    assert_eq!(sheet.comment_at(3, 0).unwrap().text, "first line");
}

#[test]
fn test_shift_past_row_limit_is_an_error() {
    let mut sheet = Worksheet::new("Edge");
    sheet.set_cell_value_at(MAX_ROWS - 2, 0, 1.0).unwrap();

    let err = sheet.move_rows_at(0, 5, 0).unwrap_err();

    assert!(matches!(err, Error::ShiftOutOfBounds { .. }));
}
