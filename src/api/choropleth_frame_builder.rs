use std::collections::HashMap;

use crate::core::ticks::format_tick_label;
use crate::core::{DataTable, LinearScale, MercatorProjection, PlotArea, RegionCollection};
use crate::error::VizResult;
use crate::render::{
    CanvasLayerKind, LayeredRenderFrame, PathPrimitive, RectPrimitive, SequentialColorScale,
    TextHAlign, TextPrimitive, ViewLayerStack,
};

use super::ChoroplethLayout;

const LEGEND_OFFSET_PX: f64 = 12.0;

/// Layered frame of one map pass plus the number of shaded regions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethFrame {
    pub frame: LayeredRenderFrame,
    pub drawn_items: usize,
}

/// Builds the map frame for one category slice of `key`.
///
/// Regions are matched to rows by name. Regions without a row, or whose
/// cell is not a number, get the no-data color and do not count as shaded.
pub fn build_choropleth_frame(
    layout: &ChoroplethLayout,
    stack: &ViewLayerStack,
    regions: &RegionCollection,
    table: &DataTable,
    category: &str,
    key: &str,
) -> VizResult<ChoroplethFrame> {
    let area = PlotArea::resolve(layout.viewport, layout.margins)?;
    let mut frame = LayeredRenderFrame::from_stack(layout.viewport, stack);
    let Some(bounds) = regions.bounds() else {
        return Ok(ChoroplethFrame {
            frame,
            drawn_items: 0,
        });
    };
    let projection = MercatorProjection::fit(bounds, area)?;

    let values: HashMap<&str, f64> = match table.column_index(key) {
        Some(column) => table
            .rows_in_category(category)
            .map(|row| (row.id.as_str(), row.value(column)))
            .collect(),
        None => HashMap::new(),
    };
    let domain = LinearScale::from_values(values.values().copied());

    let mut drawn_items = 0;
    for region in regions.regions() {
        let value = values
            .get(region.name.as_str())
            .copied()
            .unwrap_or(f64::NAN);
        let fill = match domain {
            Some(domain) if value.is_finite() => {
                drawn_items += 1;
                SequentialColorScale::new(
                    domain,
                    layout.low_color,
                    layout.high_color,
                    layout.no_data_color,
                )
                .color(value)
            }
            _ => layout.no_data_color,
        };

        for ring in &region.rings {
            if ring.len() < 3 {
                continue;
            }
            let points = ring.iter().map(|&point| projection.project(point)).collect();
            frame.push_path(
                CanvasLayerKind::Regions,
                PathPrimitive::polygon(points, fill, region.name.clone())
                    .with_stroke(layout.stroke_width, layout.stroke_color),
            );
        }
    }

    if let Some(domain) = domain {
        push_legend(&mut frame, layout, area, domain);
    }

    Ok(ChoroplethFrame { frame, drawn_items })
}

fn push_legend(
    frame: &mut LayeredRenderFrame,
    layout: &ChoroplethLayout,
    area: PlotArea,
    domain: LinearScale,
) {
    let scale = SequentialColorScale::new(
        domain,
        layout.low_color,
        layout.high_color,
        layout.no_data_color,
    );
    let steps = layout.legend_steps.max(1);
    let swatch = layout.legend_swatch_px;
    let top = area.bottom() + LEGEND_OFFSET_PX;
    let left = area.left;

    for index in 0..steps {
        let t = (index as f64 + 0.5) / steps as f64;
        frame.push_rect(
            CanvasLayerKind::Legend,
            RectPrimitive::new(
                left + index as f64 * swatch,
                top,
                swatch,
                swatch / 2.0,
                scale.color_at(t),
            ),
        );
    }

    let (min, max) = scale.domain();
    let step = (max - min) / steps as f64;
    let label_y = top + swatch / 2.0 + layout.font_size_px + 2.0;
    frame.push_text(
        CanvasLayerKind::Legend,
        TextPrimitive::new(
            format_tick_label(min, step),
            left,
            label_y,
            layout.font_size_px,
            layout.text_color,
            TextHAlign::Left,
        ),
    );
    frame.push_text(
        CanvasLayerKind::Legend,
        TextPrimitive::new(
            format_tick_label(max, step),
            left + steps as f64 * swatch,
            label_y,
            layout.font_size_px,
            layout.text_color,
            TextHAlign::Right,
        ),
    );
}
