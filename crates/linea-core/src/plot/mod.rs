//! Plot scene generation for 2D vectors and its plotly rendering.
pub mod layout;
pub mod render;

pub use layout::{
    axis_limits, choose_step, frange, nice_step, plot_layout, Arrow, AxisRange, GridLine,
    GridSteps, LineKind, Orientation, PathShape, PlotSpec,
};
pub use render::to_plotly;
