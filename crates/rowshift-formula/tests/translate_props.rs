use proptest::prelude::*;
use rowshift_formula::{translate, translate_all, FormulaTranslator};

/// Formula-like text: letters, digits, operators and the odd marker.
fn formula_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z0-9$:+*(),=]{0,40}").unwrap()
}

fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_digit()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn zero_move_returns_input(formula in formula_text(), insert in 0u32..2000) {
        prop_assert_eq!(translate(&formula, 0, insert), formula);
    }

    #[test]
    fn translate_all_matches_insert_point_zero(formula in formula_text(), mv in -50i32..50) {
        prop_assert_eq!(translate_all(&formula, mv), translate(&formula, mv, 0));
    }

    #[test]
    fn non_digit_characters_are_preserved(
        formula in formula_text(),
        mv in 1i32..500,
        insert in 0u32..200,
    ) {
        let out = translate(&formula, mv, insert);
        prop_assert_eq!(strip_digits(&out), strip_digits(&formula));
    }

    #[test]
    fn rows_before_insert_point_are_untouched(
        row in 1u32..100,
        extra in 0u32..100,
        mv in 1i32..100,
    ) {
        let formula = format!("=A{}", row);
        let insert = row + extra;
        prop_assert_eq!(translate(&formula, mv, insert), formula);
    }

    #[test]
    fn rows_at_or_after_insert_point_move(
        insert in 0u32..100,
        extra in 0u32..100,
        mv in 1i32..100,
    ) {
        let row = insert + 1 + extra;
        let expected = format!("=B{}", i64::from(row) + i64::from(mv));
        prop_assert_eq!(translate(&format!("=B{}", row), mv, insert), expected);
    }

    #[test]
    fn fully_absolute_reference_is_frozen(row in 1u32..1_048_576, mv in 1i32..1000) {
        let formula = format!("=$C${}", row);
        prop_assert_eq!(FormulaTranslator::default().translate_all(&formula, mv), formula);
    }
}
