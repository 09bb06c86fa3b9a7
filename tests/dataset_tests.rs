use studviz::VizError;
use studviz::core::{DataTable, Selection, coerce_number, composite_key};

const CSV: &str = "\
land, semester, Deutsche weiblich, Ausländer weiblich
Berlin, WS 2020/21, 100, 20
Hamburg, WS 2020/21, 80, -
Berlin, WS 2021/22, 110, 25
, WS 2021/22, 1, 1
Bremen, WS 2021/22, 40
";

#[test]
fn header_splits_into_id_category_and_value_columns() {
    let table = DataTable::parse_csv(CSV, "semester").expect("parse");

    assert_eq!(table.id_column(), "land");
    assert_eq!(table.category_column(), "semester");
    assert_eq!(
        table.value_columns(),
        ["Deutsche weiblich", "Ausländer weiblich"]
    );
}

#[test]
fn rows_without_id_are_skipped() {
    let table = DataTable::parse_csv(CSV, "semester").expect("parse");
    let ids: Vec<_> = table.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["Berlin", "Hamburg", "Berlin", "Bremen"]);
}

#[test]
fn non_numeric_and_missing_cells_become_nan() {
    let table = DataTable::parse_csv(CSV, "semester").expect("parse");

    let hamburg = &table.rows()[1];
    assert_eq!(hamburg.value(0), 80.0);
    assert!(hamburg.value(1).is_nan());

    let bremen = &table.rows()[3];
    assert_eq!(bremen.value(0), 40.0);
    assert!(bremen.value(1).is_nan());
    assert!(bremen.value(7).is_nan());
}

#[test]
fn series_filters_by_category_in_file_order() {
    let table = DataTable::parse_csv(CSV, "semester").expect("parse");

    let series = table.series("WS 2021/22", "Ausländer weiblich");
    let ids: Vec<_> = series.iter().map(|point| point.id.as_str()).collect();
    assert_eq!(ids, vec!["Berlin", "Bremen"]);
    assert_eq!(series[0].value, 25.0);
    assert!(series[1].value.is_nan());
}

#[test]
fn unknown_key_or_category_yields_empty_series() {
    let table = DataTable::parse_csv(CSV, "semester").expect("parse");

    assert!(table.series("WS 2020/21", "Deutsche divers").is_empty());
    assert!(table.series("WS 1999/00", "Deutsche weiblich").is_empty());
    assert_eq!(table.rows_in_category("WS 2020/21").count(), 2);
}

#[test]
fn category_column_can_sit_anywhere_after_the_id() {
    let csv = "id,a,semester,b\nx,1,S1,2\n";
    let table = DataTable::parse_csv(csv, "semester").expect("parse");

    assert_eq!(table.value_columns(), ["a", "b"]);
    assert_eq!(table.rows()[0].category, "S1");
    assert_eq!(table.rows()[0].values, vec![1.0, 2.0]);
}

#[test]
fn missing_category_column_is_rejected() {
    let err = DataTable::parse_csv("id,a\nx,1\n", "semester").expect_err("no semester");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn category_in_id_position_is_rejected() {
    let err = DataTable::parse_csv("semester,a\nS1,1\n", "semester").expect_err("id clash");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn coerce_number_accepts_only_plain_numbers() {
    assert_eq!(coerce_number(" 42 "), 42.0);
    assert_eq!(coerce_number("-1.5"), -1.5);
    assert_eq!(coerce_number("1e3"), 1000.0);
    assert!(coerce_number("").is_nan());
    assert!(coerce_number("1.234,5").is_nan());
    assert!(coerce_number("n/a").is_nan());
}

#[test]
fn composite_key_joins_with_a_single_space() {
    assert_eq!(composite_key("Deutsche", "weiblich"), "Deutsche weiblich");

    let selection = Selection::compose("Ausländer", "männlich", "WS 2022/23");
    assert_eq!(selection.key_x, "Ausländer männlich");
    assert_eq!(selection.key_y, "WS 2022/23");
}
