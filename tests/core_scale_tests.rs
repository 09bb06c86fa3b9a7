use approx::assert_relative_eq;
use studviz::core::{
    GeoBounds, LinearScale, Margins, MercatorProjection, PlotArea, PointScale, RegionCollection,
    Viewport, finite_extent,
};
use studviz::render::{Color, SequentialColorScale};

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0)
        .expect("valid scale")
        .with_range(300.0, 20.0)
        .expect("valid range");

    let px = scale.map(42.5).expect("to pixel");
    let recovered = scale.invert(px).expect("from pixel");
    assert_relative_eq!(recovered, 42.5, epsilon = 1e-9);
    assert_eq!(scale.map(10.0).expect("start"), 300.0);
    assert_eq!(scale.map(110.0).expect("end"), 20.0);
}

#[test]
fn degenerate_or_non_finite_domain_is_rejected() {
    assert!(LinearScale::new(1.0, 1.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
    assert!(LinearScale::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn mapping_nan_is_an_error() {
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.map(f64::NAN).is_err());
}

#[test]
fn scale_from_values_uses_finite_extent() {
    let scale = LinearScale::from_values([3.0, f64::NAN, -2.0, 7.5]).expect("extent");
    assert_eq!(scale.domain(), (-2.0, 7.5));

    let single = LinearScale::from_values([4.0, f64::NAN]).expect("single value");
    assert_eq!(single.domain(), (3.5, 4.5));

    assert!(LinearScale::from_values([f64::NAN]).is_none());
    assert_eq!(finite_extent(Vec::new()), None);
}

#[test]
fn single_large_value_is_padded_by_its_own_precision() {
    let value = 1e17;
    assert_eq!(value - 0.5, value);

    let scale = LinearScale::from_values([value, value]).expect("single large value");
    let (start, end) = scale.domain();
    assert!(start < value && value < end);
    assert_relative_eq!(scale.normalize(value), 0.5, epsilon = 1e-9);

    let top = LinearScale::from_values([f64::MAX]).expect("largest finite value");
    let (start, end) = top.domain();
    assert!(start < f64::MAX);
    assert_eq!(end, f64::MAX);
}

#[test]
fn scale_ticks_stay_inside_domain() {
    let scale = LinearScale::new(13.0, 987.0).expect("valid scale");
    let ticks = scale.ticks(5);

    assert_eq!(ticks, vec![200.0, 400.0, 600.0, 800.0]);
}

#[test]
fn point_scale_spaces_entries_evenly_with_padding() {
    let scale = PointScale::new(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        .with_range(0.0, 400.0)
        .expect("range")
        .with_padding(0.5)
        .expect("padding");

    assert_relative_eq!(scale.step(), 133.333_333_333_333_34, epsilon = 1e-9);
    assert_relative_eq!(scale.position("a").expect("a"), 66.666_666_666_666_67, epsilon = 1e-9);
    assert_relative_eq!(scale.position("b").expect("b"), 200.0, epsilon = 1e-9);
    assert_relative_eq!(scale.position("c").expect("c"), 333.333_333_333_333_3, epsilon = 1e-9);
    assert_eq!(scale.position("d"), None);
    assert_eq!(scale.position_at(3), None);
}

#[test]
fn point_scale_without_padding_touches_the_range_ends() {
    let scale = PointScale::new(vec!["a".to_owned(), "b".to_owned()])
        .with_range(10.0, 20.0)
        .expect("range");

    assert_eq!(scale.position_at(0), Some(10.0));
    assert_eq!(scale.position_at(1), Some(20.0));
    assert!(scale.clone().with_padding(-1.0).is_err());
}

#[test]
fn plot_area_subtracts_margins() {
    let area = PlotArea::resolve(Viewport::new(720, 360), Margins::new(20.0, 20.0, 60.0, 60.0))
        .expect("plot area");

    assert_eq!(area.left, 60.0);
    assert_eq!(area.top, 20.0);
    assert_eq!(area.right(), 700.0);
    assert_eq!(area.bottom(), 300.0);

    assert!(PlotArea::resolve(Viewport::new(0, 100), Margins::default()).is_err());
    assert!(PlotArea::resolve(Viewport::new(100, 100), Margins::uniform(60.0)).is_err());
}

#[test]
fn projection_fit_centers_bounds_and_keeps_north_up() {
    let bounds = GeoBounds {
        min: [6.0, 47.0],
        max: [15.0, 55.0],
    };
    let area = PlotArea::resolve(Viewport::new(480, 600), Margins::uniform(10.0)).expect("area");
    let projection = MercatorProjection::fit(bounds, area).expect("fit");

    let (x0, y0) = projection.project(bounds.min);
    let (x1, y1) = projection.project(bounds.max);
    assert!(y1 < y0);
    assert!(x0 < x1);

    let fits_width = (x1 - x0 - area.width).abs() <= 1e-6;
    let fits_height = (y0 - y1 - area.height).abs() <= 1e-6;
    assert!(fits_width || fits_height);
    assert_relative_eq!((x0 + x1) / 2.0, area.left + area.width / 2.0, epsilon = 1e-6);
    assert_relative_eq!((y0 + y1) / 2.0, area.top + area.height / 2.0, epsilon = 1e-6);
}

#[test]
fn projection_fit_rejects_point_bounds() {
    let bounds = GeoBounds {
        min: [10.0, 50.0],
        max: [10.0, 50.0],
    };
    let area = PlotArea::resolve(Viewport::new(100, 100), Margins::default()).expect("area");
    assert!(MercatorProjection::fit(bounds, area).is_err());
}

#[test]
fn projection_clamps_polar_latitudes() {
    let projection = MercatorProjection::new(100.0, 0.0, 0.0).expect("projection");
    let (_, y) = projection.project([0.0, 90.0]);
    assert!(y.is_finite());
    assert!(MercatorProjection::new(0.0, 0.0, 0.0).is_err());
}

#[test]
fn region_bounds_cover_every_ring() {
    let geojson = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "A"},
         "geometry": {"type": "Polygon", "coordinates": [[[1, 2], [3, 2], [3, 4], [1, 2]]]}},
        {"type": "Feature", "properties": {"name": "B"},
         "geometry": {"type": "Polygon", "coordinates": [[[-1, 0], [0, 0], [0, 5], [-1, 0]]]}}
    ]}"#;
    let regions = RegionCollection::from_geojson_str(geojson, "name").expect("geojson");
    let bounds = regions.bounds().expect("bounds");

    assert_eq!(bounds.min, [-1.0, 0.0]);
    assert_eq!(bounds.max, [3.0, 5.0]);
    assert!(RegionCollection::default().bounds().is_none());
}

#[test]
fn region_without_name_is_rejected() {
    let geojson = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"id": 1},
         "geometry": {"type": "Polygon", "coordinates": [[[1, 2], [3, 2], [3, 4], [1, 2]]]}}
    ]}"#;
    assert!(RegionCollection::from_geojson_str(geojson, "name").is_err());
}

#[test]
fn color_scale_interpolates_and_marks_missing_values() {
    let low = Color::rgb(0.0, 0.0, 0.0);
    let high = Color::rgb(1.0, 0.5, 0.0);
    let missing = Color::rgb(0.8, 0.8, 0.8);
    let scale = SequentialColorScale::new(
        LinearScale::new(0.0, 100.0).expect("domain"),
        low,
        high,
        missing,
    );

    let mid = scale.color(50.0);
    assert_relative_eq!(mid.red, 0.5, epsilon = 1e-12);
    assert_relative_eq!(mid.green, 0.25, epsilon = 1e-12);
    assert_eq!(scale.color(f64::NAN), missing);
    assert_eq!(scale.color(-10.0), low);
    assert_eq!(scale.color_at(0.0), low);
}
