use tabviz::inference::{
    describe_columns, infer_column_type, suggest_axes, x_axis_candidates, y_axis_candidates,
    ColumnDescriptor,
};
use tabviz::{ColumnType, Dataset, RawValue, Row};

fn column(values: &[&str]) -> Dataset {
    Dataset::from_rows(values.iter().map(|v| Row::new().with("c", *v)).collect())
}

#[test]
fn test_numeric_column() {
    // 空欄は型の判定に影響しない
    let ds = column(&["1", "2.5", "", "-3", "1e2"]);
    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Numeric);
}

#[test]
fn test_date_column() {
    let ds = column(&["2024-01-01", "2024-02-15", "", "2024-03-31T12:00:00"]);
    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Date);
}

#[test]
fn test_numeric_takes_precedence_over_date() {
    // 4桁の年は日付としても解釈できるが数値が優先
    let ds = column(&["2021", "2022", "2023"]);
    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Numeric);
}

#[test]
fn test_categorical_column() {
    let ds = column(&["Seoul", "12", "2024-01-01"]);
    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Categorical);
}

#[test]
fn test_unknown_for_empty_or_missing() {
    assert_eq!(infer_column_type(&Dataset::new(), "c"), ColumnType::Unknown);

    let ds = column(&["1"]);
    assert_eq!(infer_column_type(&ds, "missing"), ColumnType::Unknown);
    assert_eq!(infer_column_type(&ds, ""), ColumnType::Unknown);
}

#[test]
fn test_only_first_100_rows_are_sampled() {
    let mut values: Vec<String> = (0..100).map(|i| i.to_string()).collect();
    values.push("not a number".to_string());
    let ds = Dataset::from_rows(values.iter().map(|v| Row::new().with("c", v.as_str())).collect());

    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Numeric);
}

#[test]
fn test_stable_under_permutation_of_sample() {
    let values = ["3", "x", "2024-01-01", "", "7"];
    let forward = column(&values);
    let mut reversed_values = values;
    reversed_values.reverse();
    let reversed = column(&reversed_values);

    assert_eq!(
        infer_column_type(&forward, "c"),
        infer_column_type(&reversed, "c")
    );
}

#[test]
fn test_number_cells_from_spreadsheets() {
    let ds = Dataset::from_rows(vec![
        Row::new().with("c", 1.0),
        Row::new().with("c", RawValue::Null),
        Row::new().with("c", 2.5),
    ]);
    assert_eq!(infer_column_type(&ds, "c"), ColumnType::Numeric);
}

#[test]
fn test_describe_and_suggest_axes() {
    let ds = Dataset::from_rows(vec![
        Row::new()
            .with("region", "north")
            .with("day", "2024-01-01")
            .with("sales", "10"),
        Row::new()
            .with("region", "south")
            .with("day", "2024-01-02")
            .with("sales", "12"),
    ]);

    let columns = describe_columns(&ds);
    let types: Vec<ColumnType> = columns.iter().map(|c| c.column_type).collect();
    assert_eq!(
        types,
        vec![ColumnType::Categorical, ColumnType::Date, ColumnType::Numeric]
    );

    // 日付列があればX軸に優先して選ばれる
    let axes = suggest_axes(&columns);
    assert_eq!(axes.x.as_deref(), Some("day"));
    assert_eq!(axes.y.as_deref(), Some("sales"));

    let x_names: Vec<&str> = x_axis_candidates(&columns).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(x_names, vec!["region", "day"]);
    let y_names: Vec<&str> = y_axis_candidates(&columns).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(y_names, vec!["sales"]);
}

#[test]
fn test_suggest_axes_fallbacks() {
    let descriptor = |name: &str, column_type| ColumnDescriptor {
        name: name.to_string(),
        column_type,
    };

    // 数値列しかない場合
    let numeric_only = vec![
        descriptor("a", ColumnType::Numeric),
        descriptor("b", ColumnType::Numeric),
    ];
    let axes = suggest_axes(&numeric_only);
    assert_eq!(axes.x.as_deref(), Some("a"));
    assert_eq!(axes.y.as_deref(), Some("a"));
    assert_eq!(x_axis_candidates(&numeric_only).len(), 2);

    // 数値列がない場合は2列目をY軸にする
    let text_only = vec![
        descriptor("a", ColumnType::Categorical),
        descriptor("b", ColumnType::Categorical),
    ];
    let axes = suggest_axes(&text_only);
    assert_eq!(axes.x.as_deref(), Some("a"));
    assert_eq!(axes.y.as_deref(), Some("b"));

    assert_eq!(suggest_axes(&[]), Default::default());
}
