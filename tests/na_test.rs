mod common;

use common::missing_frame;
use tabrs::{cells, Axis, DataFrame, Label, Value};

#[test]
fn test_drop_na_rows() {
    let df = missing_frame();
    let dropped = df.drop_na(Axis::Rows, None).unwrap();
    assert_eq!(dropped.shape(), (1, 3));
    assert_eq!(dropped.at(0, "A").unwrap(), Value::Float(1.0));
    assert_eq!(dropped.at(0, "B").unwrap(), Value::Float(5.0));
    assert_eq!(dropped.at(0, "C").unwrap(), Value::Int(1));
}

#[test]
fn test_drop_na_columns() {
    let df = missing_frame();
    let dropped = df.drop_na(Axis::Columns, None).unwrap();
    assert_eq!(dropped.column_names(), &["C"]);
    assert_eq!(dropped.row_count(), 3);
}

#[test]
fn test_drop_na_threshold() {
    let df = missing_frame();
    let kept = df.drop_na(Axis::Rows, Some(2)).unwrap();
    assert_eq!(kept.row_count(), 2);
    assert_eq!(kept.index().labels(), vec![Label::from(0), Label::from(1)]);

    // zero keeps everything, more than the width keeps nothing
    assert_eq!(df.drop_na(Axis::Rows, Some(0)).unwrap(), df);
    assert_eq!(df.drop_na(Axis::Rows, Some(4)).unwrap().row_count(), 0);
}

#[test]
fn test_drop_na_threshold_property() {
    let df = missing_frame();
    for threshold in 0..=3 {
        let kept = df.drop_na(Axis::Rows, Some(threshold)).unwrap();
        for pos in 0..kept.row_count() {
            let row = kept.at_position(pos as isize).unwrap();
            let present = row.values().iter().filter(|v| v.is_value()).count();
            assert!(present >= threshold);
        }
        let discarded = df.row_count() - kept.row_count();
        let short_rows = (0..df.row_count())
            .filter(|&pos| {
                let row = df.at_position(pos as isize).unwrap();
                row.values().iter().filter(|v| v.is_value()).count() < threshold
            })
            .count();
        assert_eq!(discarded, short_rows);
    }
}

#[test]
fn test_fill_na_with_text() {
    let df = missing_frame();
    let filled = df.fill_na(&Value::from("X"));
    assert_eq!(filled.column_values("A").unwrap(), &cells![1.0, 2.0, "X"]);
    assert_eq!(filled.column_values("B").unwrap(), &cells![5.0, "X", "X"]);
    assert_eq!(filled.column_values("C").unwrap(), &cells![1, 2, 3]);
    assert!(filled.na_counts().iter().all(|(_, n)| *n == 0));
}

#[test]
fn test_fill_na_inplace_matches_copy() {
    let df = missing_frame();
    let mut inplace = df.clone();
    inplace.fill_na_inplace(&Value::Int(0));
    assert_eq!(inplace, df.fill_na(&Value::Int(0)));
}

#[test]
fn test_fill_column_with_mean() {
    let df = missing_frame();
    let a = df.get_column("A").unwrap();
    let filled = a.fill_na(&a.mean().unwrap());
    assert_eq!(filled.values(), &cells![1.0, 2.0, 1.5]);

    let by_mean = df.fill_na_with(|column| column.mean()).unwrap();
    assert_eq!(by_mean.column_values("A").unwrap(), &cells![1.0, 2.0, 1.5]);
    assert_eq!(by_mean.column_values("B").unwrap(), &cells![5.0, 5.0, 5.0]);
}

#[test]
fn test_missing_masks_and_counts() {
    let df = missing_frame();
    let null = df.is_null();
    assert_eq!(null.column_values("B").unwrap(), &cells![false, true, true]);
    let present = df.not_null();
    assert_eq!(present.column_values("A").unwrap(), &cells![true, true, false]);
    assert_eq!(
        df.na_counts(),
        vec![("A".to_string(), 1), ("B".to_string(), 2), ("C".to_string(), 0)]
    );
}

#[test]
fn test_missing_propagates_through_arithmetic() {
    let df = missing_frame();
    let sum = (&df.get_column("A").unwrap() + &df.get_column("C").unwrap()).unwrap();
    assert_eq!(sum.values(), &cells![2.0, 4.0, Value::NA]);
    // comparisons against a missing cell are false
    let gt = df.get_column("B").unwrap().gt(&Value::Int(0)).unwrap();
    assert_eq!(gt.values(), &cells![true, false, false]);
}

#[test]
fn test_drop_na_in_one_column() {
    let df = DataFrame::from_columns(
        vec![("A", cells![1, Value::NA, 3]), ("B", cells![Value::NA, "y", "z"])],
        None,
    )
    .unwrap();
    let dropped = df.drop_na_in("A").unwrap();
    assert_eq!(dropped.column_values("B").unwrap(), &cells![Value::NA, "z"]);
    assert!(df.drop_na_in("Q").is_err());
}
