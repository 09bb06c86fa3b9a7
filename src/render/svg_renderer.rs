use crate::error::VizResult;
use crate::render::{Color, PathPrimitive, RenderFrame, Renderer, TextHAlign};

/// Renderer serializing each frame into a standalone SVG document.
///
/// Only the most recent frame is kept.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// SVG markup of the last rendered frame, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;

        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">\n"
        );

        for rect in &frame.rects {
            svg.push_str(&format!(
                "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"{}/>\n",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                paint("fill", rect.fill)
            ));
        }
        for path in &frame.paths {
            svg.push_str(&path_element(path));
        }
        for line in &frame.lines {
            svg.push_str(&format!(
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke-width=\"{}\"{}/>\n",
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.stroke_width,
                paint("stroke", line.color)
            ));
        }
        for circle in &frame.circles {
            let class = if circle.highlighted {
                " class=\"highlight\""
            } else {
                ""
            };
            svg.push_str(&format!(
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\"{}{class}><title>{}</title></circle>\n",
                circle.cx,
                circle.cy,
                circle.radius,
                paint("fill", circle.fill),
                escape_xml(&circle.id)
            ));
        }
        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            svg.push_str(&format!(
                "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"{anchor}\"{}>{}</text>\n",
                text.x,
                text.y,
                text.font_size_px,
                paint("fill", text.color),
                escape_xml(&text.text)
            ));
        }

        svg.push_str("</svg>\n");
        self.document = svg;
        Ok(())
    }
}

fn path_element(path: &PathPrimitive) -> String {
    let mut data = String::new();
    for (index, (x, y)) in path.points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        data.push_str(&format!("{command}{x:.2},{y:.2}"));
    }
    if path.closed {
        data.push('Z');
    }

    let fill = path
        .fill
        .map_or_else(|| " fill=\"none\"".to_owned(), |fill| paint("fill", fill));
    let stroke = path.stroke.map_or_else(String::new, |(width, color)| {
        format!(" stroke-width=\"{width}\"{}", paint("stroke", color))
    });
    let title = if path.id.is_empty() {
        String::new()
    } else {
        format!("<title>{}</title>", escape_xml(&path.id))
    };
    format!("  <path d=\"{data}\" fill-rule=\"evenodd\"{fill}{stroke}>{title}</path>\n")
}

fn paint(attribute: &str, color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            " {attribute}=\"{}\" {attribute}-opacity=\"{:.3}\"",
            color.to_hex(),
            color.alpha
        )
    } else {
        format!(" {attribute}=\"{}\"", color.to_hex())
    }
}

/// Escapes text content and attribute values.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
