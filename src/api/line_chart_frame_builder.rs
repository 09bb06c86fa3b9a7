use crate::core::ticks::{
    AXIS_VALUE_MAX_TICKS, AXIS_VALUE_MIN_TICKS, AXIS_VALUE_TARGET_SPACING_PX,
    axis_tick_target_count, format_tick_label,
};
use crate::core::{LinearScale, PlotArea, PointScale, SeriesPoint};
use crate::error::VizResult;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LayeredRenderFrame, LinePrimitive, PathPrimitive,
    TextHAlign, TextPrimitive, ViewLayerStack,
};

use super::LineChartLayout;

const LABEL_GAP_PX: f64 = 3.0;

/// Layered frame of one line-chart pass plus what it drew.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartFrame {
    pub frame: LayeredRenderFrame,
    pub drawn_items: usize,
    pub highlighted: Option<String>,
}

/// Builds the chart frame for one category slice.
///
/// Points with a non-finite value keep their slot on the id axis but get no
/// dot, and the line breaks around them. A series without any finite value
/// produces an empty frame.
pub fn build_line_chart_frame(
    layout: &LineChartLayout,
    stack: &ViewLayerStack,
    series: &[SeriesPoint],
    highlight_id: &str,
) -> VizResult<LineChartFrame> {
    let area = PlotArea::resolve(layout.viewport, layout.margins)?;
    let mut frame = LayeredRenderFrame::from_stack(layout.viewport, stack);

    let Some(value_scale) = LinearScale::from_values(series.iter().map(|point| point.value))
    else {
        return Ok(LineChartFrame {
            frame,
            drawn_items: 0,
            highlighted: None,
        });
    };
    let value_scale = value_scale.with_range(area.bottom(), area.top)?;
    let id_scale = PointScale::new(series.iter().map(|point| point.id.clone()).collect())
        .with_range(area.left, area.right())?
        .with_padding(layout.point_padding)?;

    push_id_axis(&mut frame, layout, area, &id_scale);
    push_value_axis(&mut frame, layout, area, value_scale)?;

    let mut run = Vec::new();
    let mut drawn_items = 0;
    let mut highlighted = None;
    for (index, point) in series.iter().enumerate() {
        let Some(x) = id_scale.position_at(index) else {
            continue;
        };
        if !point.value.is_finite() {
            flush_line_run(&mut frame, layout, &mut run);
            continue;
        }

        let y = value_scale.map(point.value)?;
        run.push((x, y));

        let is_highlight = highlighted.is_none() && point.id == highlight_id;
        let (radius, fill) = if is_highlight {
            highlighted = Some(point.id.clone());
            (layout.highlight_radius, layout.highlight_color)
        } else {
            (layout.dot_radius, layout.dot_color)
        };
        frame.push_circle(
            CanvasLayerKind::Markers,
            CirclePrimitive::new(x, y, radius, fill, point.id.clone()).with_highlight(is_highlight),
        );
        drawn_items += 1;
    }
    flush_line_run(&mut frame, layout, &mut run);

    Ok(LineChartFrame {
        frame,
        drawn_items,
        highlighted,
    })
}

fn flush_line_run(frame: &mut LayeredRenderFrame, layout: &LineChartLayout, run: &mut Vec<(f64, f64)>) {
    if run.len() < 2 {
        run.clear();
        return;
    }
    frame.push_path(
        CanvasLayerKind::Series,
        PathPrimitive::polyline(std::mem::take(run), layout.line_width, layout.line_color),
    );
}

fn push_id_axis(
    frame: &mut LayeredRenderFrame,
    layout: &LineChartLayout,
    area: PlotArea,
    id_scale: &PointScale,
) {
    let baseline = area.bottom();
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(area.left, baseline, area.right(), baseline, 1.0, layout.axis_color),
    );

    for (index, id) in id_scale.domain().iter().enumerate() {
        let Some(x) = id_scale.position_at(index) else {
            continue;
        };
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                x,
                baseline,
                x,
                baseline + layout.tick_length_px,
                1.0,
                layout.axis_color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                id.clone(),
                x,
                baseline + layout.tick_length_px + LABEL_GAP_PX + layout.font_size_px,
                layout.font_size_px,
                layout.text_color,
                TextHAlign::Center,
            ),
        );
    }
}

fn push_value_axis(
    frame: &mut LayeredRenderFrame,
    layout: &LineChartLayout,
    area: PlotArea,
    value_scale: LinearScale,
) -> VizResult<()> {
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(area.left, area.top, area.left, area.bottom(), 1.0, layout.axis_color),
    );

    let count = axis_tick_target_count(
        area.height,
        AXIS_VALUE_TARGET_SPACING_PX,
        AXIS_VALUE_MIN_TICKS,
        AXIS_VALUE_MAX_TICKS,
    );
    let ticks = value_scale.ticks(count);
    let step = match ticks.as_slice() {
        [first, second, ..] => second - first,
        _ => 1.0,
    };
    for tick in ticks {
        let y = value_scale.map(tick)?;
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                area.left - layout.tick_length_px,
                y,
                area.left,
                y,
                1.0,
                layout.axis_color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_tick_label(tick, step),
                area.left - layout.tick_length_px - LABEL_GAP_PX,
                y + layout.font_size_px / 3.0,
                layout.font_size_px,
                layout.text_color,
                TextHAlign::Right,
            ),
        );
    }
    Ok(())
}
