use tabrs::dataframe::{concat, merge};
use tabrs::io::{self, Format, IoOptions};
use tabrs::{cells, AggFunc, Axis, DataFrame, Index, JoinType, Label, MultiIndex, Row, TableIndex, Value};

fn letters(labels: &[&str]) -> TableIndex {
    TableIndex::Simple(Index::new(labels.iter().map(|&l| Value::from(l)).collect()))
}

fn show(title: &str, value: impl std::fmt::Display) {
    println!("--- {} ---\n{}\n", title, value);
}

fn selection() -> tabrs::Result<()> {
    let mut df = DataFrame::random_normal(letters(&["A", "B", "C", "D", "E"]), &["W", "X", "Y", "Z"], 101)?;
    show("random frame", &df);
    show("column W", df.get_column("W")?);
    show("columns W and Z", df.select(&["W", "Z"])?);

    let new = (&df.get_column("W")? + &df.get_column("Z")?)?;
    df.add_column_inplace("new", &new)?;
    show("with W + Z", &df);
    df.drop_column_inplace("new")?;

    if let Row::Single(row) = df.at_label("A")? {
        show("row A", row);
    }
    show("row at position 0", df.at_position(0)?);
    show("cell (A, Y)", df.at("A", "Y")?);
    show(
        "rows A, B and columns W, Y",
        df.loc(&[Label::from("A"), Label::from("B")], &["W", "Y"])?,
    );

    let positive = df.gt(&Value::Int(0))?;
    show("df > 0", &positive);
    show("df where df > 0", df.where_mask(&positive)?);
    show("rows where W > 0", df.filter_rows(&df.get_column("W")?.gt(&Value::Int(0))?)?);

    let both = (&df.get_column("W")?.gt(&Value::Int(0))? & &df.get_column("Y")?.gt(&Value::Int(1))?)?;
    show("rows where W > 0 and Y > 1", df.filter_rows(&both)?);

    let states = df.with_column("States", cells!["CA", "NY", "WY", "OR", "CO"])?;
    show("indexed by state", states.set_index("States")?);
    Ok(())
}

fn multi_index() -> tabrs::Result<()> {
    let index = MultiIndex::from_arrays(
        vec![cells!["G1", "G1", "G1", "G2", "G2", "G2"], cells![1, 2, 3, 1, 2, 3]],
        None,
    )?;
    let mut df = DataFrame::random_normal(TableIndex::Multi(index), &["A", "B"], 101)?;
    df.set_index_names(vec![Some("Groups".to_string()), Some("Num".to_string())])?;
    show("hierarchical index", &df);

    if let Row::Multiple(g1) = df.at_label("G1")? {
        show("loc G1", &g1);
        show("loc G1, 1", g1.at_label(1)?.into_single()?);
    }
    show("cell (G2, 2), B", df.loc_prefix(&cells!["G2"])?.at(2, "B")?);
    show("row (G2, 2)", df.loc_prefix(&cells!["G2", 2])?);
    show("cross-section Num = 1", df.xs(1, "Num")?);
    Ok(())
}

fn missing_data() -> tabrs::Result<()> {
    let df = DataFrame::from_columns(
        vec![
            ("A", cells![1.0, 2.0, f64::NAN]),
            ("B", cells![5.0, f64::NAN, f64::NAN]),
            ("C", cells![1, 2, 3]),
        ],
        None,
    )?;
    show("with gaps", &df);
    show("drop_na rows", df.drop_na(Axis::Rows, None)?);
    show("drop_na columns", df.drop_na(Axis::Columns, None)?);
    show("drop_na threshold 2", df.drop_na(Axis::Rows, Some(2))?);
    show("fill_na", df.fill_na(&Value::from("Fill Value")));
    let a = df.get_column("A")?;
    show("A filled with its mean", a.fill_na(&a.mean()?));
    Ok(())
}

fn grouping() -> tabrs::Result<()> {
    let df = DataFrame::from_columns(
        vec![
            ("Company", cells!["GOOG", "GOOG", "MSFT", "MSFT", "FB", "FB"]),
            ("Person", cells!["Sam", "Charlie", "Amy", "Vanessa", "Carl", "Sarah"]),
            ("Sales", cells![200, 120, 340, 124, 243, 350]),
        ],
        None,
    )?;
    let by_company = df.group_by(&["Company"])?;
    show("mean", by_company.mean()?);
    show("std", by_company.std()?);
    show("sum of FB", by_company.sum()?.at("FB", "Sales")?);
    show("count", by_company.count()?);
    show("max", by_company.max()?);
    show("min", by_company.min()?);
    show("describe transposed", by_company.describe()?.transpose()?);
    show("first person", by_company.agg_columns(&[("Person", AggFunc::First)])?);
    Ok(())
}

fn combining() -> tabrs::Result<()> {
    let block = |start: usize| -> tabrs::Result<DataFrame> {
        let labels: Vec<usize> = (start..start + 4).collect();
        let columns: Vec<(String, Vec<Value>)> = ["A", "B", "C", "D"]
            .iter()
            .map(|c| (c.to_string(), labels.iter().map(|i| Value::from(format!("{}{}", c, i))).collect()))
            .collect();
        DataFrame::from_columns(
            columns,
            Some(TableIndex::Simple(Index::new(labels.iter().map(|&i| Value::from(i)).collect()))),
        )
    };
    let (df1, df2, df3) = (block(0)?, block(4)?, block(8)?);
    show("concat rows", concat(&[&df1, &df2, &df3], Axis::Rows)?);
    show("concat columns", concat(&[&df1, &df2, &df3], Axis::Columns)?);

    let left = DataFrame::from_columns(
        vec![
            ("key1", cells!["K0", "K0", "K1", "K2"]),
            ("key2", cells!["K0", "K1", "K0", "K1"]),
            ("A", cells!["A0", "A1", "A2", "A3"]),
            ("B", cells!["B0", "B1", "B2", "B3"]),
        ],
        None,
    )?;
    let right = DataFrame::from_columns(
        vec![
            ("key1", cells!["K0", "K1", "K1", "K2"]),
            ("key2", cells!["K0", "K0", "K0", "K0"]),
            ("C", cells!["C0", "C1", "C2", "C3"]),
            ("D", cells!["D0", "D1", "D2", "D3"]),
        ],
        None,
    )?;
    for how in [JoinType::Inner, JoinType::Outer, JoinType::Right, JoinType::Left] {
        show(&format!("merge {:?}", how), merge(&left, &right, &["key1", "key2"], how)?);
    }

    let left = DataFrame::from_columns(
        vec![("A", cells!["A0", "A1", "A2"]), ("B", cells!["B0", "B1", "B2"])],
        Some(letters(&["K0", "K1", "K2"])),
    )?;
    let right = DataFrame::from_columns(
        vec![("C", cells!["C0", "C2", "C3"]), ("D", cells!["D0", "D2", "D3"])],
        Some(letters(&["K0", "K2", "K3"])),
    )?;
    show("join", left.join(&right, JoinType::default())?);
    show("join outer", left.join(&right, JoinType::Outer)?);
    Ok(())
}

fn operations() -> tabrs::Result<()> {
    let df = DataFrame::from_columns(
        vec![
            ("col1", cells![1, 2, 3, 4]),
            ("col2", cells![444, 555, 777, 444]),
            ("col3", cells!["abc", "def", "ghi", "xyz"]),
        ],
        None,
    )?;
    let col2 = df.get_column("col2")?;
    show("unique col2", format!("{:?}", col2.unique()));
    show("nunique col2", col2.nunique());
    show("value_counts col2", col2.value_counts());

    let col1 = df.get_column("col1")?;
    let mask = (&col1.gt(&Value::Int(2))? & &col2.eq_value(&Value::Int(444)))?;
    show("col1 > 2 and col2 == 444", df.filter_rows(&mask)?);
    show("sum col1", col1.sum()?);
    show("col1 times two", col1.try_apply(|v| v * &Value::Int(2))?);
    show(
        "length of col3",
        df.get_column("col3")?
            .apply(|v| v.as_str().map(|s| Value::from(s.len())).unwrap_or_default()),
    );
    show("without col1", df.drop_column("col1")?);
    show("sorted by col2", df.sort_values("col2", true)?);
    show("is_null", df.is_null());

    let pivot_source = DataFrame::from_columns(
        vec![
            ("A", cells!["foo", "foo", "foo", "bar", "bar", "bar"]),
            ("B", cells!["one", "one", "two", "two", "one", "one"]),
            ("C", cells!["x", "y", "x", "y", "x", "y"]),
            ("D", cells![1, 3, 2, 5, 4, 1]),
        ],
        None,
    )?;
    show("pivot table", pivot_source.pivot_table_mean("D", &["A", "B"], "C")?);
    Ok(())
}

fn input_output() -> tabrs::Result<()> {
    let df = DataFrame::from_columns(
        vec![("a", cells![0, 4, 8, 12]), ("b", cells![1, 5, 9, 13]), ("c", cells![2, 6, 10, 14])],
        None,
    )?;
    let with_index = io::encode(&df, Format::Csv, &IoOptions::default())?;
    show("csv with index", String::from_utf8_lossy(&with_index));
    show(
        "csv read back",
        io::decode(&with_index, Format::Csv, &IoOptions::default())?,
    );

    let html = io::encode(&df, Format::Html, &IoOptions::default().without_index())?;
    show("html", String::from_utf8_lossy(&html));
    show("html read back", io::decode(&html, Format::Html, &IoOptions::default())?);
    Ok(())
}

fn main() -> tabrs::Result<()> {
    selection()?;
    multi_index()?;
    missing_data()?;
    grouping()?;
    combining()?;
    operations()?;
    input_output()?;
    Ok(())
}
