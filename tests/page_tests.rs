use studviz::api::{
    AppConfig, CookieJar, DeviceNotice, FilterControls, InfoPanel, MemoryCookieJar, PageModel,
    PageViews, export_page_html,
};
use studviz::core::Manifest;

fn manifest() -> Manifest {
    Manifest::from_json_str(
        r#"{
            "title": "Studierende & Hochschulen",
            "author": "Destatis",
            "url": "https://www.destatis.de/",
            "file": "students.csv",
            "attributes": {"sex": ["weiblich", "männlich"]}
        }"#,
    )
    .expect("parse manifest")
}

#[test]
fn applying_a_manifest_twice_keeps_one_suffix() {
    let mut page = PageModel::new("Studierende in Deutschland");
    page.apply_manifest(&manifest());
    page.apply_manifest(&manifest());

    assert_eq!(
        page.title(),
        "Studierende in Deutschland: Studierende & Hochschulen"
    );
    assert_eq!(page.base_title(), "Studierende in Deutschland");
}

#[test]
fn fallback_hides_content_only() {
    let mut page = PageModel::new("T");
    page.show_fallback("no data");

    assert_eq!(
        page.info(),
        &InfoPanel::Fallback {
            message: "no data".to_owned()
        }
    );
    assert!(!page.is_content_visible());
    assert!(page.is_loading_visible());
}

#[test]
fn body_classes_are_a_set() {
    let mut page = PageModel::new("T");
    assert!(page.add_body_class("a"));
    assert!(!page.add_body_class("a"));
    assert!(page.add_body_class("b"));
    assert_eq!(page.body_classes().collect::<Vec<_>>(), vec!["a", "b"]);

    assert!(page.remove_body_class("a"));
    assert!(!page.remove_body_class("a"));
    assert!(!page.has_body_class("a"));
}

#[test]
fn device_notice_requires_the_exact_flag_value() {
    let notice = DeviceNotice::new(AppConfig::default().device_notice);
    let mut page = PageModel::new("T");

    let jar = MemoryCookieJar::from_header("device_notice_confirmed=false");
    assert!(!notice.apply(&jar, &mut page));
    assert!(!page.has_body_class("device-notice-confirmed"));

    let jar = MemoryCookieJar::from_header("device_notice_confirmed=true");
    assert!(notice.apply(&jar, &mut page));
    assert!(page.has_body_class("device-notice-confirmed"));
}

#[test]
fn confirm_persists_into_the_cookie_header() {
    let notice = DeviceNotice::new(AppConfig::default().device_notice);
    let mut page = PageModel::new("T");
    let mut jar = MemoryCookieJar::from_header("lang=de");

    notice.confirm(&mut jar, &mut page);
    assert_eq!(jar.to_header(), "lang=de; device_notice_confirmed=true");

    assert!(!notice.toggle(&mut jar, &mut page));
    assert_eq!(jar.to_header(), "lang=de");
    assert!(jar.get("device_notice_confirmed").is_none());
}

#[test]
fn export_carries_hooks_controls_and_views() {
    let config = AppConfig::default();
    let manifest = manifest();
    let mut page = PageModel::new(config.base_title.clone());
    page.apply_manifest(&manifest);
    let mut controls = FilterControls::from_manifest(&manifest);
    controls
        .select(studviz::core::FilterAttribute::Sex, "männlich")
        .expect("select");
    page.set_controls(controls);
    page.hide_loading();

    let html = export_page_html(
        &page,
        &config.selectors,
        &config.device_notice,
        PageViews {
            map_svg: Some("<svg id=\"map\"></svg>\n"),
            chart_svg: None,
        },
    );

    assert!(html.contains(
        "<title>Studierende in Deutschland: Studierende &amp; Hochschulen</title>"
    ));
    assert!(html.contains("<div class=\"fullscreen-loading\" hidden></div>"));
    assert!(html.contains("<div class=\"data-info\">"));
    assert!(html.contains("<div class=\"page\">"));
    assert!(html.contains("<button class=\"device-notice-button\">"));
    assert!(html.contains("<option value=\"männlich\" selected>männlich</option>"));
    assert!(html.contains("<option value=\"weiblich\">weiblich</option>"));
    assert!(html.contains("<svg id=\"map\"></svg>"));
    assert!(!html.contains("class=\"chart\""));
}

#[test]
fn export_of_fallback_page_hides_the_wrapper() {
    let config = AppConfig::default();
    let mut page = PageModel::new(config.base_title.clone());
    page.show_fallback(config.data_unavailable_message.clone());
    page.hide_loading();
    page.add_body_class(&config.device_notice.confirmed_class);

    let html = export_page_html(
        &page,
        &config.selectors,
        &config.device_notice,
        PageViews::default(),
    );

    assert!(html.contains("<div class=\"page\" hidden>"));
    assert!(html.contains("<div class=\"device-notice\" hidden>"));
    assert!(html.contains("<body class=\"device-notice-confirmed\">"));
    assert!(html.contains("The dataset has not been downloaded yet."));
}
