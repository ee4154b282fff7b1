mod common;

use common::hierarchical_frame;
use tabrs::{cells, Error, Label, MultiIndex, Row, TableIndex, Value};

#[test]
fn test_multi_index_construction() {
    let index = MultiIndex::from_arrays(
        vec![cells!["G1", "G1", "G2"], cells![1, 2, 1]],
        Some(vec![Some("Groups".to_string()), Some("Num".to_string())]),
    )
    .unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.n_levels(), 2);
    assert_eq!(index.get_tuple(2), Some(cells!["G2", 1]));
    assert_eq!(index.levels()[0], cells!["G1", "G2"]);

    let ragged = MultiIndex::from_arrays(vec![cells!["G1", "G2"], cells![1]], None);
    assert!(ragged.is_err());
}

#[test]
fn test_loc_outer_level_drops_it() {
    let df = hierarchical_frame();
    let g1 = match df.at_label("G1").unwrap() {
        Row::Multiple(rows) => rows,
        Row::Single(_) => panic!("G1 holds three rows"),
    };
    assert_eq!(g1.shape(), (3, 2));
    assert!(!g1.index().is_multi());
    assert_eq!(g1.index().names(), vec![Some("Num".to_string())]);
    assert_eq!(g1.column_values("A").unwrap(), &cells![0.1, 0.2, 0.3]);

    let row = g1.at_label(1).unwrap().into_single().unwrap();
    assert_eq!(row.values(), &cells![0.1, 1.1]);
}

#[test]
fn test_full_tuple_selects_one_row() {
    let df = hierarchical_frame();
    match df.at_label(cells!["G2", 2]).unwrap() {
        Row::Single(row) => assert_eq!(row.values(), &cells![0.5, 1.5]),
        Row::Multiple(_) => panic!("a full tuple is unique here"),
    }
    assert_eq!(df.at(cells!["G2", 2], "B").unwrap(), Value::Float(1.5));
    assert!(df.at_label(cells!["G3", 1]).unwrap_err().is_key_error());
}

#[test]
fn test_loc_prefix() {
    let df = hierarchical_frame();
    let g2 = df.loc_prefix(&cells!["G2"]).unwrap();
    assert_eq!(g2.row_count(), 3);
    assert_eq!(g2.at(2, "B").unwrap(), Value::Float(1.5));

    // a prefix covering every level keeps the full labels
    let exact = df.loc_prefix(&cells!["G2", 2]).unwrap();
    assert_eq!(exact.row_count(), 1);
    assert!(exact.index().is_multi());
    assert_eq!(exact.index().label(0), Some(Label::from(cells!["G2", 2])));
}

#[test]
fn test_cross_section_by_level_name() {
    let df = hierarchical_frame();
    let num_one = df.xs(1, "Num").unwrap();
    assert_eq!(num_one.shape(), (2, 2));
    assert_eq!(num_one.index().labels(), vec![Label::from("G1"), Label::from("G2")]);
    assert_eq!(num_one.column_values("A").unwrap(), &cells![0.1, 0.4]);

    let by_number = df.xs_level(1, 1).unwrap();
    assert_eq!(by_number, num_one);

    let g1 = df.xs("G1", "Groups").unwrap();
    assert_eq!(g1.index().labels(), vec![Label::from(1), Label::from(2), Label::from(3)]);
}

#[test]
fn test_cross_section_errors() {
    let df = hierarchical_frame();
    assert!(df.xs(1, "Level").unwrap_err().is_key_error());
    assert!(df.xs(7, "Num").unwrap_err().is_key_error());
}

#[test]
fn test_set_index_multi_and_reset() {
    let df = hierarchical_frame().reset_index().unwrap();
    assert_eq!(df.column_names(), &["Groups", "Num", "A", "B"]);
    assert!(matches!(df.index(), TableIndex::Simple(_)));

    let indexed = df.set_index_multi(&["Groups", "Num"]).unwrap();
    assert_eq!(indexed, hierarchical_frame());
}

#[test]
fn test_index_names_must_match_levels() {
    let mut df = hierarchical_frame();
    assert!(matches!(
        df.set_index_names(vec![Some("only".to_string())]),
        Err(Error::LengthMismatch { expected: 2, actual: 1 })
    ));
}

#[test]
fn test_multi_index_without_rows() {
    let names = Some(vec![Some("Groups".to_string()), Some("Num".to_string())]);
    let index = MultiIndex::from_arrays(vec![Vec::new(), Vec::new()], names.clone()).unwrap();
    assert_eq!(index, MultiIndex::empty(2, names).unwrap());
    assert_eq!((index.len(), index.n_levels()), (0, 2));

    let df = tabrs::DataFrame::from_columns(
        vec![("Groups", Vec::<Value>::new()), ("Num", Vec::new()), ("A", Vec::new())],
        None,
    )
    .unwrap();
    let indexed = df.set_index_multi(&["Groups", "Num"]).unwrap();
    assert_eq!(indexed.shape(), (0, 1));
    assert!(indexed.index().is_multi());
    assert!(MultiIndex::from_tuples(Vec::new(), None).is_err());
}
