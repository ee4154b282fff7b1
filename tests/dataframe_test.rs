mod common;

use common::{labels, random_frame};
use tabrs::{cells, DataFrame, Error, Label, Row, Series, Value};

#[test]
fn test_dataframe_creation() {
    let df = random_frame();
    assert_eq!(df.shape(), (5, 4));
    assert_eq!(df.column_names(), &["W", "X", "Y", "Z"]);
    assert_eq!(df.index().label(4), Some(Label::from("E")));
    assert!(df.dtypes().iter().all(|(_, t)| *t == tabrs::DType::Float));
}

#[test]
fn test_duplicate_column_name_rejected() {
    let result = DataFrame::from_columns(vec![("A", cells![1]), ("A", cells![2])], None);
    assert!(matches!(result, Err(Error::DuplicateColumnName(name)) if name == "A"));
}

#[test]
fn test_column_round_trip() {
    let df = random_frame();
    for name in df.column_names() {
        let column = df.get_column(name).unwrap();
        let back = df.with_column(name, &column).unwrap().get_column(name).unwrap();
        assert_eq!(back, column);
    }
}

#[test]
fn test_with_column_replaces_in_place() {
    let df = random_frame();
    let replaced = df.with_column("X", cells![1, 2, 3, 4, 5]).unwrap();
    assert_eq!(replaced.column_names(), df.column_names());
    assert_eq!(replaced.column_values("X").unwrap(), &cells![1, 2, 3, 4, 5]);
    // the source frame is untouched
    assert_eq!(df.get_column("X").unwrap().dtype(), tabrs::DType::Float);
}

#[test]
fn test_with_column_wrong_length() {
    let df = random_frame();
    assert!(matches!(
        df.with_column("new", cells![1, 2]),
        Err(Error::LengthMismatch { expected: 5, actual: 2 })
    ));
}

#[test]
fn test_added_column_is_sum_of_two() {
    let mut df = random_frame();
    let total = (&df.get_column("W").unwrap() + &df.get_column("Z").unwrap()).unwrap();
    df.add_column_inplace("new", &total).unwrap();
    let w = df.at("C", "W").unwrap().as_f64().unwrap();
    let z = df.at("C", "Z").unwrap().as_f64().unwrap();
    assert_eq!(df.at("C", "new").unwrap(), Value::Float(w + z));
    df.drop_column_inplace("new").unwrap();
    assert_eq!(df.column_count(), 4);
}

#[test]
fn test_drop_returns_copy_unless_inplace() {
    let df = random_frame();
    let dropped = df.drop_column("W").unwrap();
    assert_eq!(dropped.column_count(), 3);
    assert_eq!(df.column_count(), 4);

    let mut df = df;
    assert!(df.drop_row_inplace("Q").unwrap_err().is_key_error());
    assert_eq!(df.row_count(), 5);
    df.drop_row_inplace("E").unwrap();
    assert_eq!(df.row_count(), 4);
}

#[test]
fn test_drop_row_removes_every_duplicate() {
    let df = DataFrame::from_columns(vec![("v", cells![1, 2, 3])], Some(labels(&["a", "b", "a"]))).unwrap();
    let dropped = df.drop_row("a").unwrap();
    assert_eq!(dropped.column_values("v").unwrap(), &cells![2]);
}

#[test]
fn test_row_access() {
    let df = random_frame();
    let by_label = match df.at_label("A").unwrap() {
        Row::Single(row) => row,
        Row::Multiple(_) => panic!("label A is unique"),
    };
    let by_position = df.at_position(0).unwrap();
    assert_eq!(by_label, by_position);
    assert_eq!(by_label.get(2), df.column_values("Y").unwrap().first());
    assert!(matches!(
        df.at_position(-6),
        Err(Error::IndexOutOfBounds { index: -6, size: 5 })
    ));
}

#[test]
fn test_loc_sub_frame() {
    let df = random_frame();
    let sub = df.loc(&[Label::from("A"), Label::from("B")], &["W", "Y"]).unwrap();
    assert_eq!(sub.shape(), (2, 2));
    assert_eq!(sub.at("B", "Y").unwrap(), df.at("B", "Y").unwrap());
    assert!(matches!(df.loc(&[Label::from("A")], &["Q"]), Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_set_index_with_duplicates() {
    let df = random_frame()
        .with_column("States", cells!["CA", "NY", "CA", "OR", "CO"])
        .unwrap();
    let indexed = df.set_index("States").unwrap();
    assert_eq!(indexed.column_count(), 4);
    assert!(!indexed.contains_column("States"));
    match indexed.at_label("CA").unwrap() {
        Row::Multiple(rows) => assert_eq!(rows.row_count(), 2),
        Row::Single(_) => panic!("CA appears twice"),
    }
    assert!(matches!(
        indexed.at("CA", "W"),
        Err(Error::AmbiguousKey { matches: 2, .. })
    ));

    let reset = indexed.reset_index().unwrap();
    assert_eq!(reset.column_names()[0], "States");
    assert_eq!(reset.column_values("States").unwrap(), df.column_values("States").unwrap());
}

#[test]
fn test_rename_and_select() {
    let df = random_frame();
    let renamed = df.rename_column("W", "w").unwrap();
    assert_eq!(renamed.column_names(), &["w", "X", "Y", "Z"]);
    assert!(matches!(df.rename_column("W", "X"), Err(Error::DuplicateColumnName(_))));
    let selected = df.select(&["Z", "W"]).unwrap();
    assert_eq!(selected.column_names(), &["Z", "W"]);
}

#[test]
fn test_series_operations() {
    let df = DataFrame::from_columns(
        vec![
            ("col1", cells![1, 2, 3, 4]),
            ("col2", cells![444, 555, 777, 444]),
            ("col3", cells!["abc", "def", "ghi", "xyz"]),
        ],
        None,
    )
    .unwrap();
    let col2 = df.get_column("col2").unwrap();
    assert_eq!(col2.unique(), cells![444, 555, 777]);
    assert_eq!(col2.nunique(), 3);
    assert_eq!(col2.value_counts().get(0), Some(&Value::Int(2)));

    let col1 = df.get_column("col1").unwrap();
    assert_eq!(col1.sum().unwrap(), Value::Int(10));
    let doubled = col1.try_apply(|v| v * &Value::Int(2)).unwrap();
    assert_eq!(doubled.values(), &cells![2, 4, 6, 8]);

    let lengths = df
        .get_column("col3")
        .unwrap()
        .apply(|v| v.as_str().map(|s| Value::from(s.len())).unwrap_or_default());
    assert_eq!(lengths.values(), &cells![3, 3, 3, 3]);

    let text = df.get_column("col3").unwrap();
    assert!(matches!(&col1 + &text, Err(Error::TypeMismatch(_))));
}

#[test]
fn test_sort_keeps_labels_attached() {
    let df = DataFrame::from_columns(
        vec![("col2", cells![444, 555, 777, 444]), ("col3", cells!["abc", "def", "ghi", "xyz"])],
        None,
    )
    .unwrap();
    let sorted = df.sort_values("col2", true).unwrap();
    assert_eq!(sorted.column_values("col3").unwrap(), &cells!["abc", "xyz", "def", "ghi"]);
    assert_eq!(sorted.index().label(1), Some(Label::from(3)));
}

#[test]
fn test_transpose_of_describe() {
    let df = random_frame();
    let summary = df.describe().unwrap();
    assert_eq!(summary.row_count(), 8);
    assert_eq!(summary.at("count", "W").unwrap(), Value::Float(5.0));
    let transposed = summary.transpose().unwrap();
    assert_eq!(transposed.column_names()[2], "std");
    assert_eq!(transposed.row_count(), 4);
}

#[test]
fn test_display_grid() {
    let df = DataFrame::from_columns(vec![("A", cells![1, 22])], Some(labels(&["x", "y"]))).unwrap();
    assert_eq!(df.to_string(), "    A\nx   1\ny  22");
    let series = Series::from_vec(vec![1, 2], Some("n".into()));
    assert!(series.to_string().ends_with("Name: n, dtype: int64"));
}
