use crate::render::escape_xml;

use super::{DeviceNoticeConfig, InfoPanel, PageModel, SelectorHooks};

const DEVICE_NOTICE_TEXT: &str =
    "Diese Visualisierung ist für größere Bildschirme gedacht und wird auf Mobilgeräten \
     eventuell nicht korrekt dargestellt.";

/// Rendered view documents embedded into the exported page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageViews<'a> {
    pub map_svg: Option<&'a str>,
    pub chart_svg: Option<&'a str>,
}

/// Serializes the page model into a static HTML document.
///
/// Regions carry the configured selector hook classes. The data-info panel
/// sits outside the page wrapper so the fallback message stays visible when
/// the content is hidden.
#[must_use]
pub fn export_page_html(
    page: &PageModel,
    selectors: &SelectorHooks,
    device_notice: &DeviceNoticeConfig,
    views: PageViews<'_>,
) -> String {
    let body_classes = page.body_classes().collect::<Vec<_>>().join(" ");
    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body class=\"{}\">\n",
        escape_xml(page.title()),
        escape_xml(&body_classes)
    );

    html.push_str(&format!(
        "<div class=\"{}\"{}></div>\n",
        escape_xml(&selectors.loading_overlay),
        hidden(!page.is_loading_visible())
    ));
    html.push_str(&format!(
        "<div class=\"{}\"{}>\n<p>{}</p>\n<button class=\"{}\">OK</button>\n</div>\n",
        escape_xml(&selectors.device_notice),
        hidden(page.has_body_class(&device_notice.confirmed_class)),
        escape_xml(DEVICE_NOTICE_TEXT),
        escape_xml(&selectors.device_notice_button)
    ));
    html.push_str(&info_panel(page.info(), &selectors.data_info));

    html.push_str(&format!(
        "<div class=\"{}\"{}>\n",
        escape_xml(&selectors.page_wrapper),
        hidden(!page.is_content_visible())
    ));
    html.push_str(&format!("<form class=\"{}\">\n", escape_xml(&selectors.controls)));
    for control in page.controls().iter() {
        let name = control.attribute.name();
        html.push_str(&format!("<label>{name}\n<select name=\"{name}\">\n"));
        for (index, option) in control.options.iter().enumerate() {
            let selected = if control.selected == Some(index) {
                " selected"
            } else {
                ""
            };
            let option = escape_xml(option);
            html.push_str(&format!(
                "<option value=\"{option}\"{selected}>{option}</option>\n"
            ));
        }
        html.push_str("</select>\n</label>\n");
    }
    html.push_str("</form>\n");

    for (class, document) in [("map", views.map_svg), ("chart", views.chart_svg)] {
        if let Some(document) = document {
            html.push_str(&format!("<figure class=\"{class}\">\n{document}</figure>\n"));
        }
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn info_panel(info: &InfoPanel, class: &str) -> String {
    let content = match info {
        InfoPanel::Loading => String::new(),
        InfoPanel::Dataset {
            title,
            author,
            url,
            file,
        } => format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n<p>{}</p>\n",
            escape_xml(title),
            escape_xml(author),
            escape_xml(url),
            escape_xml(url),
            escape_xml(file)
        ),
        InfoPanel::Fallback { message } => format!("<p>{}</p>\n", escape_xml(message)),
    };
    format!("<div class=\"{}\">\n{content}</div>\n", escape_xml(class))
}

fn hidden(is_hidden: bool) -> &'static str {
    if is_hidden { " hidden" } else { "" }
}
