use plotly::common::{Anchor, DashType, Font};
use plotly::layout::{
    Annotation, Axis, Layout, Margin, Shape, ShapeLayer, ShapeLine, ShapeType, TicksDirection,
};
use plotly::Plot;

use crate::config::DashStyle;
use crate::plot::layout::{Arrow, AxisRange, GridLine, Orientation, PathShape, PlotSpec};

fn dash_type(dash: DashStyle) -> DashType {
    match dash {
        DashStyle::Solid => DashType::Solid,
        DashStyle::Dot => DashType::Dot,
        DashStyle::Dash => DashType::Dash,
        DashStyle::LongDash => DashType::LongDash,
        DashStyle::DashDot => DashType::DashDot,
        DashStyle::LongDashDot => DashType::LongDashDot,
    }
}

fn grid_shape(line: &GridLine) -> Shape {
    let (x0, x1, y0, y1) = match line.orientation {
        Orientation::Vertical => (line.position, line.position, line.from, line.to),
        Orientation::Horizontal => (line.from, line.to, line.position, line.position),
    };
    Shape::new()
        .shape_type(ShapeType::Line)
        .x_ref("x")
        .y_ref("y")
        .layer(ShapeLayer::Below)
        .x0(x0)
        .x1(x1)
        .y0(y0)
        .y1(y1)
        .line(
            ShapeLine::new()
                .color(line.color.clone())
                .width(line.width)
                .dash(dash_type(line.dash)),
        )
}

fn path_shape(path: &PathShape) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Path)
        .path(path.path.as_str())
        .line(ShapeLine::new().color(path.color.clone()).width(path.width))
        .fill_color(path.fill_color.clone())
}

fn arrow_annotation(arrow: &Arrow) -> Annotation {
    Annotation::new()
        .ax(arrow.origin.x)
        .ay(arrow.origin.y)
        .x(arrow.tip.x)
        .y(arrow.tip.y)
        .x_ref("x")
        .y_ref("y")
        .ax_ref("x")
        .ay_ref("y")
        .show_arrow(true)
        .arrow_head(2)
        .arrow_size(arrow.head_size)
        .arrow_width(arrow.width)
        .arrow_color(arrow.color.clone())
        .text(arrow.label.as_str())
        .x_anchor(Anchor::Left)
        .y_anchor(Anchor::Bottom)
        .font(Font::new().size(12).color(arrow.color.clone()))
        .background_color("rgba(255,255,255,0.7)")
        .border_pad(2.0)
}

fn axis(range: AxisRange, dtick: Option<f64>) -> Axis {
    let axis = Axis::new()
        .range(vec![range.min, range.max])
        .zero_line(true)
        .zero_line_color("black")
        // plotly-rs takes whole pixels here; 2 is the closest to 1.5
        .zero_line_width(2)
        .show_grid(true)
        .line_color("black")
        .ticks(TicksDirection::Outside)
        .tick_color("black")
        .tick_length(4)
        .tick_font(Font::new().color("black").size(11));
    match dtick {
        Some(step) => axis.dtick(step),
        None => axis,
    }
}

/// Turn a [`PlotSpec`] into a plotly figure: grid lines and the
/// parallelogram as shapes, vectors as arrow annotations.
pub fn to_plotly(spec: &PlotSpec) -> Plot {
    let mut layout = Layout::new()
        .x_axis(axis(spec.x_range, spec.dtick_x()))
        .y_axis(axis(spec.y_range, spec.dtick_y()))
        .show_legend(false)
        .margin(Margin::new().left(20).right(20).top(20).bottom(20))
        .plot_background_color("white")
        .paper_background_color("white");

    for line in &spec.lines {
        layout.add_shape(grid_shape(line));
    }
    for path in &spec.paths {
        layout.add_shape(path_shape(path));
    }
    for arrow in &spec.arrows {
        layout.add_annotation(arrow_annotation(arrow));
    }

    let mut plot = Plot::new();
    plot.set_layout(layout);
    plot
}
