//! Property tests for normalizer idempotence and row shape.

use proptest::prelude::*;
use tabnorm_normalization::{
    OverflowPolicy, RowReconciler, normalize_boolean, normalize_date, normalize_whitespace,
};

fn overflow_policy() -> impl Strategy<Value = OverflowPolicy> {
    prop_oneof![
        Just(OverflowPolicy::Truncate),
        Just(OverflowPolicy::MergeIntoLast),
    ]
}

fn date_like() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=31, 1u32..=12, 1000i32..=9999).prop_map(|(d, m, y)| format!("{d}/{m}/{y}")),
        (1u32..=31, 1u32..=12, 1000i32..=9999).prop_map(|(d, m, y)| format!("{d:02}-{m:02}-{y}")),
        (1000i32..=9999, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| format!("{y}/{m}/{d}")),
        (1u32..=31, 1u32..=12, 1000i32..=9999).prop_map(|(d, m, y)| format!("{d}.{m}.{y}")),
        "\\PC{0,12}",
    ]
}

proptest! {
    #[test]
    fn whitespace_idempotent(value in "\\PC{0,24}") {
        let once = normalize_whitespace(&value);
        prop_assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn date_idempotent(value in date_like()) {
        let once = normalize_date(&value);
        prop_assert_eq!(normalize_date(&once), once);
    }

    #[test]
    fn boolean_idempotent(value in prop_oneof![
        Just("Sí".to_string()),
        Just(" VERDADERO ".to_string()),
        Just("no".to_string()),
        "\\PC{0,12}",
    ]) {
        let once = normalize_boolean(&value);
        prop_assert_eq!(normalize_boolean(&once), once);
    }

    #[test]
    fn reconciled_rows_match_header_width(
        fields in prop::collection::vec("[a-z]{0,3}", 0..12),
        width in 1usize..8,
        overflow in overflow_policy(),
    ) {
        let reconciled = RowReconciler::new(width, overflow).reconcile(fields).unwrap();
        prop_assert_eq!(reconciled.fields.len(), width);
    }

    #[test]
    fn padding_keeps_leading_fields(
        fields in prop::collection::vec("[a-z]{1,3}", 0..6),
        extra in 0usize..4,
    ) {
        let width = fields.len() + extra;
        let reconciled = RowReconciler::new(width, OverflowPolicy::Truncate)
            .reconcile(fields.clone())
            .unwrap();
        prop_assert_eq!(&reconciled.fields[..fields.len()], &fields[..]);
        prop_assert!(reconciled.fields[fields.len()..].iter().all(String::is_empty));
    }
}
