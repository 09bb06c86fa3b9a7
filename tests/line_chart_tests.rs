use std::cell::RefCell;

use futures::executor::block_on;
use studviz::api::{
    AppConfig, LineChart, LineChartLayout, LoadOutcome, MemorySource, VisualizationView,
    load_view, render_view,
};
use studviz::render::{CanvasLayerKind, NullRenderer, SvgRenderer};
use studviz::VizError;

const CSV: &str = "\
land,semester,German m,German f
Berlin,S1,10,12
Hamburg,S1,20,n/a
Bremen,S1,30,32
Bayern,S1,40,42
Berlin,S2,5,6
";

fn chart() -> LineChart<NullRenderer> {
    LineChart::from_config(NullRenderer::default(), &AppConfig::default()).expect("chart init")
}

fn loaded_chart(key_x: &str, key_y: &str) -> LineChart<NullRenderer> {
    let mut chart = chart();
    chart.set_data("data.csv").set_key_x(key_x).set_key_y(key_y);
    let ticket = chart.begin_load().expect("begin load");
    let outcome = chart
        .complete_load(ticket, vec![CSV.to_owned()])
        .expect("complete load");
    assert_eq!(outcome, LoadOutcome::Applied);
    chart
}

#[test]
fn setters_chain_and_getters_read_back() {
    let mut chart = chart();
    chart
        .set_data("a.csv")
        .set_key_x("German f")
        .set_key_y("Berlin");

    assert_eq!(chart.data(), Some("a.csv"));
    assert_eq!(chart.key_x(), "German f");
    assert_eq!(chart.key_y(), "Berlin");
}

#[test]
fn init_creates_the_surface_once() {
    let mut chart = chart();
    assert!(!chart.surface().is_initialized());

    assert!(chart.init());
    assert!(!chart.init());
    assert_eq!(chart.surface().creations(), 1);
}

#[test]
fn render_without_data_is_rejected() {
    let mut chart = chart();
    let err = chart.render("S1").expect_err("no data bound");
    assert!(matches!(err, VizError::NoDataBound));
}

#[test]
fn begin_load_requires_a_data_path() {
    let mut chart = chart();
    assert!(matches!(chart.begin_load(), Err(VizError::NoDataBound)));
}

#[test]
fn render_draws_one_dot_per_row_of_the_category() {
    let mut chart = loaded_chart("German m", "Bremen");

    let summary = chart.render("S1").expect("render");
    assert_eq!(summary.category, "S1");
    assert_eq!(summary.drawn_items, 4);
    assert_eq!(summary.highlighted.as_deref(), Some("Bremen"));

    let frame = chart.last_frame().expect("frame kept");
    let markers = frame.layer(CanvasLayerKind::Markers).expect("markers layer");
    assert_eq!(markers.circles.len(), 4);
    let highlighted: Vec<_> = markers
        .circles
        .iter()
        .filter(|circle| circle.highlighted)
        .map(|circle| circle.id.as_str())
        .collect();
    assert_eq!(highlighted, vec!["Bremen"]);

    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.paths.len(), 1);
    assert_eq!(series.paths[0].points.len(), 4);
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn dots_are_ordered_by_row_and_scaled_by_value() {
    let mut chart = loaded_chart("German m", "");
    chart.render("S1").expect("render");

    let frame = chart.last_frame().expect("frame kept");
    let circles = &frame.layer(CanvasLayerKind::Markers).expect("markers").circles;
    let ids: Vec<_> = circles.iter().map(|circle| circle.id.as_str()).collect();
    assert_eq!(ids, vec!["Berlin", "Hamburg", "Bremen", "Bayern"]);

    for pair in circles.windows(2) {
        assert!(pair[0].cx < pair[1].cx);
        // larger values sit higher on the plot
        assert!(pair[0].cy > pair[1].cy);
    }
}

#[test]
fn non_numeric_cells_are_skipped_and_break_the_line() {
    let mut chart = loaded_chart("German f", "");

    let summary = chart.render("S1").expect("render");
    assert_eq!(summary.drawn_items, 3);

    let frame = chart.last_frame().expect("frame kept");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.paths.len(), 1);
    assert_eq!(series.paths[0].points.len(), 2);

    let axis = frame.layer(CanvasLayerKind::Axis).expect("axis layer");
    assert!(axis.texts.iter().any(|text| text.text == "Hamburg"));
}

#[test]
fn unknown_category_renders_nothing() {
    let mut chart = loaded_chart("German m", "");

    let summary = chart.render("S9").expect("render");
    assert_eq!(summary.drawn_items, 0);
    assert!(chart.last_frame().expect("frame kept").is_empty());
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn unknown_column_key_renders_nothing() {
    let mut chart = loaded_chart("Martian x", "");

    let summary = chart.render("S1").expect("render");
    assert_eq!(summary.drawn_items, 0);
    assert!(summary.highlighted.is_none());
}

#[test]
fn single_point_lands_mid_plot() {
    let mut chart = loaded_chart("German m", "Berlin");
    chart.render("S2").expect("render");

    let layout = LineChartLayout::default();
    let frame = chart.last_frame().expect("frame kept");
    let circle = &frame.layer(CanvasLayerKind::Markers).expect("markers").circles[0];
    let left = layout.margins.left;
    let right = f64::from(layout.viewport.width) - layout.margins.right;
    assert!((circle.cx - (left + right) / 2.0).abs() <= 1e-9);
    assert!(circle.highlighted);
}

#[test]
fn equal_large_values_still_draw_every_dot() {
    let csv = "land,semester,A b\nX,S1,1e17\nY,S1,1e17\n";
    let mut chart = chart();
    chart.set_data("large.csv").set_key_x("A b");
    let ticket = chart.begin_load().expect("begin load");
    chart
        .complete_load(ticket, vec![csv.to_owned()])
        .expect("complete load");

    let summary = chart.render("S1").expect("render");
    assert_eq!(summary.drawn_items, 2);

    let layout = LineChartLayout::default();
    let top = layout.margins.top;
    let bottom = f64::from(layout.viewport.height) - layout.margins.bottom;
    let frame = chart.last_frame().expect("frame kept");
    let circles = &frame.layer(CanvasLayerKind::Markers).expect("markers").circles;
    assert!(circles
        .iter()
        .all(|circle| (circle.cy - (top + bottom) / 2.0).abs() <= 1e-6));
}

#[test]
fn value_axis_labels_are_grouped() {
    let csv = "land,semester,k\nA,S1,1000\nB,S1,5000\n";
    let mut chart = chart();
    chart.set_data("big.csv").set_key_x("k");
    let ticket = chart.begin_load().expect("begin load");
    chart
        .complete_load(ticket, vec![csv.to_owned()])
        .expect("complete load");
    chart.render("S1").expect("render");

    let frame = chart.last_frame().expect("frame kept");
    let axis = frame.layer(CanvasLayerKind::Axis).expect("axis layer");
    assert!(axis.texts.iter().any(|text| text.text == "5,000"));
}

#[test]
fn stale_completion_does_not_overwrite_newer_data() {
    let mut chart = chart();
    chart.set_data("data.csv").set_key_x("k");

    let older = chart.begin_load().expect("older");
    let newer = chart.begin_load().expect("newer");
    let applied = chart
        .complete_load(newer, vec!["land,semester,k\nNew,S1,2\n".to_owned()])
        .expect("newer load");
    let stale = chart
        .complete_load(older, vec!["land,semester,k\nOld,S1,1\n".to_owned()])
        .expect("older load");

    assert_eq!(applied, LoadOutcome::Applied);
    assert_eq!(stale, LoadOutcome::Stale);
    let table = chart.table().expect("table");
    assert_eq!(table.rows()[0].id, "New");
}

#[test]
fn changing_the_data_path_drops_table_and_outstanding_loads() {
    let mut chart = loaded_chart("German m", "");
    let pending = chart.begin_load().expect("pending");

    chart.set_data("other.csv");
    assert!(!chart.is_loaded());

    let outcome = chart
        .complete_load(pending, vec![CSV.to_owned()])
        .expect("complete");
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(!chart.is_loaded());
}

#[test]
fn rebinding_the_same_path_keeps_data() {
    let mut chart = loaded_chart("German m", "");
    chart.set_data("data.csv");
    assert!(chart.is_loaded());
}

#[test]
fn payload_count_mismatch_is_rejected() {
    let mut chart = chart();
    chart.set_data("data.csv");
    let ticket = chart.begin_load().expect("ticket");

    let err = chart
        .complete_load(ticket, Vec::new())
        .expect_err("missing payload");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn missing_category_column_fails_the_load() {
    let mut chart = chart();
    chart.set_data("data.csv");
    let ticket = chart.begin_load().expect("ticket");

    let err = chart
        .complete_load(ticket, vec!["land,year,k\nA,1,2\n".to_owned()])
        .expect_err("no semester column");
    assert!(matches!(err, VizError::InvalidData(_)));
    assert!(!chart.is_loaded());
}

#[test]
fn render_view_loads_on_first_render() {
    let source = MemorySource::new().with_entry("data.csv", CSV);
    let mut chart = chart();
    chart.set_data("data.csv").set_key_x("German m");
    let chart = RefCell::new(chart);

    let summary = block_on(render_view(&chart, &source, "S1"))
        .expect("render")
        .expect("data loaded");
    assert_eq!(summary.drawn_items, 4);
    assert_eq!(source.fetch_count("data.csv"), 1);

    block_on(render_view(&chart, &source, "S2")).expect("second render");
    assert_eq!(source.fetch_count("data.csv"), 1);
}

#[test]
fn load_view_maps_fetch_failures() {
    let source = MemorySource::new();
    let mut chart = chart();
    chart.set_data("missing.csv");
    let chart = RefCell::new(chart);

    let err = block_on(load_view(&chart, &source)).expect_err("missing file");
    assert!(matches!(err, VizError::DataUnavailable { .. }));
}

#[test]
fn svg_output_contains_highlight_and_labels() {
    let mut chart =
        LineChart::from_config(SvgRenderer::new(), &AppConfig::default()).expect("chart init");
    chart.set_data("data.csv").set_key_x("German m").set_key_y("Bayern");
    let ticket = chart.begin_load().expect("ticket");
    chart
        .complete_load(ticket, vec![CSV.to_owned()])
        .expect("load");
    chart.render("S1").expect("render");

    let svg = chart.into_renderer().into_document();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("class=\"highlight\"><title>Bayern</title>"));
    assert!(svg.contains(">Hamburg</text>"));
    assert_eq!(svg.matches("<circle").count(), 4);
}
