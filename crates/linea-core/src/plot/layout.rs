//! Deterministic scene layout for two 2D vectors.
//!
//! `plot_layout` picks axis ranges, grid steps and drawable primitives from
//! `u`, `v` and a [`GridConfig`]. It has no failure path: coincident points,
//! zero vectors and zero-width axes are absorbed by the padding and clamping
//! rules below.

use serde::Serialize;

use crate::config::{DashStyle, GridConfig};
use crate::vectors::Vec2;

/// Main lines allowed at the desired step before switching to a nice step.
const MAX_MAIN_LINES: f64 = 200.0;
/// Hard cap on values emitted by [`frange`] for one axis.
const MAX_LINES_PER_AXIS: usize = 200;
const NICE_DIVISIONS: f64 = 8.0;
const AXIS_PAD: f64 = 0.1;
const MIN_AXIS_SPAN: f64 = 1e-6;
const MIN_STEP_SPAN: f64 = 1e-9;
const ZERO_LINE_TOL: f64 = 1e-12;
const MIN_ARROW_LENGTH: f64 = 1e-9;

const PARALLELOGRAM_COLOR: &str = "gray";
const PARALLELOGRAM_FILL: &str = "rgba(128,128,128,0.1)";

/// Closed interval on one axis, serialized as `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Strict containment.
    pub fn contains(&self, value: f64) -> bool {
        self.min < value && value < self.max
    }
}

impl From<AxisRange> for [f64; 2] {
    fn from(r: AxisRange) -> Self {
        [r.min, r.max]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant x, spans the y range.
    Vertical,
    /// Constant y, spans the x range.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Main,
    Minor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridLine {
    pub orientation: Orientation,
    pub kind: LineKind,
    pub position: f64,
    /// Extent along the other axis.
    pub from: f64,
    pub to: f64,
    pub color: String,
    pub width: f64,
    pub dash: DashStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub origin: Vec2,
    pub tip: Vec2,
    pub label: String,
    pub color: String,
    pub width: f64,
    pub head_size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathShape {
    pub path: String,
    pub color: String,
    pub width: f64,
    pub fill_color: String,
}

/// Steps actually used, echoed back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSteps {
    pub main_step_x: f64,
    pub main_step_y: f64,
    pub minor_step_x: f64,
    pub minor_step_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotSpec {
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Minor lines first, then main lines.
    pub lines: Vec<GridLine>,
    pub paths: Vec<PathShape>,
    pub arrows: Vec<Arrow>,
    /// `None` when the grid is disabled.
    pub grid: Option<GridSteps>,
}

impl PlotSpec {
    pub fn dtick_x(&self) -> Option<f64> {
        self.grid.map(|g| g.main_step_x)
    }

    pub fn dtick_y(&self) -> Option<f64> {
        self.grid.map(|g| g.main_step_y)
    }

    pub fn line_positions(&self, kind: LineKind, orientation: Orientation) -> Vec<f64> {
        self.lines
            .iter()
            .filter(|l| l.kind == kind && l.orientation == orientation)
            .map(|l| l.position)
            .collect()
    }

    pub fn arrow(&self, label: &str) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.label == label)
    }
}

/// Padded axis ranges covering `points` and the origin.
pub fn axis_limits(points: &[Vec2]) -> (AxisRange, AxisRange) {
    let xs = points.iter().map(|p| p.x).chain(std::iter::once(0.0));
    let ys = points.iter().map(|p| p.y).chain(std::iter::once(0.0));
    (padded(xs), padded(ys))
}

fn padded<I: Iterator<Item = f64>>(values: I) -> AxisRange {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = (max - min).max(MIN_AXIS_SPAN) * AXIS_PAD;
    AxisRange {
        min: min - pad,
        max: max + pad,
    }
}

/// Smallest of `{1, 2, 5, 10} * 10^k` that gives at most ~8 divisions.
pub fn nice_step(min: f64, max: f64) -> f64 {
    let span = (max - min).abs().max(MIN_STEP_SPAN);
    let raw = span / NICE_DIVISIONS;
    let pow10 = 10f64.powi(raw.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * pow10)
        .find(|&step| raw <= step)
        .unwrap_or(pow10)
}

/// The desired step (default 1.0), unless it would draw more than 200 lines.
pub fn choose_step(min: f64, max: f64, desired: Option<f64>) -> f64 {
    let span = (max - min).abs().max(MIN_STEP_SPAN);
    let desired = desired.unwrap_or(1.0);
    if desired.is_finite() && desired > 0.0 && span / desired <= MAX_MAIN_LINES {
        desired
    } else {
        log::debug!(
            "grid step {} too dense for span {}, using nice step",
            desired,
            span
        );
        nice_step(min, max)
    }
}

/// Grid positions from `floor(min/step)*step` up to `max`, at most 200,
/// each rounded to 12 decimals.
pub fn frange(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut x = (min / step).floor() * step;
    while x <= max + 1e-12 && values.len() < MAX_LINES_PER_AXIS {
        values.push(round12(x));
        x += step;
    }
    values
}

/// Rounds to 12 decimals. Values too large to scale are already integral.
fn round12(x: f64) -> f64 {
    let scaled = x * 1e12;
    if scaled.is_finite() {
        scaled.round() / 1e12
    } else {
        x
    }
}

fn arrow(origin: Vec2, tip: Vec2, label: &str, color: &str, width: f64) -> Option<Arrow> {
    let length = (tip - origin).length();
    if length < MIN_ARROW_LENGTH {
        return None;
    }
    Some(Arrow {
        origin,
        tip,
        label: label.to_string(),
        color: color.to_string(),
        width,
        head_size: (length * 0.15).clamp(0.8, 2.0),
    })
}

struct LineStyle<'a> {
    kind: LineKind,
    color: &'a str,
    width: f64,
    dash: DashStyle,
}

fn push_lines(
    lines: &mut Vec<GridLine>,
    orientation: Orientation,
    positions: Vec<f64>,
    extent: AxisRange,
    style: &LineStyle<'_>,
) {
    for position in positions {
        if style.kind == LineKind::Minor && position.abs() < ZERO_LINE_TOL {
            continue;
        }
        lines.push(GridLine {
            orientation,
            kind: style.kind,
            position,
            from: extent.min,
            to: extent.max,
            color: style.color.to_string(),
            width: style.width,
            dash: style.dash,
        });
    }
}

fn minor_step(configured: Option<f64>, main: f64, factor: u32) -> f64 {
    configured
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(main / f64::from(factor.max(1)))
}

/// Build the scene for `u`, `v`, their sum and (optionally) their difference.
pub fn plot_layout(u: Vec2, v: Vec2, config: &GridConfig) -> PlotSpec {
    let sum = u + v;
    let diff = u - v;
    let (x_range, y_range) = axis_limits(&[u, v, sum, diff]);

    let mut lines = Vec::new();
    let grid = if config.enabled {
        let main_x = choose_step(x_range.min, x_range.max, config.main_step_x);
        let main_y = choose_step(y_range.min, y_range.max, config.main_step_y);
        let minor_x = minor_step(config.minor_step_x, main_x, config.minor_factor);
        let minor_y = minor_step(config.minor_step_y, main_y, config.minor_factor);

        if config.show_minor {
            let style = LineStyle {
                kind: LineKind::Minor,
                color: &config.minor_color,
                width: config.minor_width,
                dash: config.minor_dash,
            };
            let xs = frange(x_range.min, x_range.max, minor_x);
            push_lines(&mut lines, Orientation::Vertical, xs, y_range, &style);
            let ys = frange(y_range.min, y_range.max, minor_y);
            push_lines(&mut lines, Orientation::Horizontal, ys, x_range, &style);
        }

        let style = LineStyle {
            kind: LineKind::Main,
            color: &config.color,
            width: config.width,
            dash: config.dash,
        };
        let xs = frange(x_range.min, x_range.max, main_x);
        push_lines(&mut lines, Orientation::Vertical, xs, y_range, &style);
        let ys = frange(y_range.min, y_range.max, main_y);
        push_lines(&mut lines, Orientation::Horizontal, ys, x_range, &style);

        Some(GridSteps {
            main_step_x: main_x,
            main_step_y: main_y,
            minor_step_x: minor_x,
            minor_step_y: minor_y,
        })
    } else {
        None
    };

    let mut arrows: Vec<Arrow> = [
        arrow(Vec2::ZERO, u, "u", "blue", 2.0),
        arrow(Vec2::ZERO, v, "v", "red", 2.0),
        arrow(Vec2::ZERO, sum, "u+v", "green", 3.0),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut paths = Vec::new();
    if config.parallelogram {
        paths.push(PathShape {
            path: format!(
                "M 0 0 L {} {} L {} {} L {} {} Z",
                u.x, u.y, sum.x, sum.y, v.x, v.y
            ),
            color: PARALLELOGRAM_COLOR.to_string(),
            width: 1.0,
            fill_color: PARALLELOGRAM_FILL.to_string(),
        });
    }

    if config.subtraction {
        arrows.extend(arrow(v, diff, "u\u{2212}v", "purple", 2.0));
    }

    log::trace!(
        "plot layout: x {:?}, y {:?}, {} lines, {} arrows",
        x_range,
        y_range,
        lines.len(),
        arrows.len()
    );

    PlotSpec {
        x_range,
        y_range,
        lines,
        paths,
        arrows,
        grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_picks_smallest_candidate() {
        // raw = 80 / 8 = 10 -> exactly 1 * 10
        assert_eq!(nice_step(0.0, 80.0), 10.0);
        // raw = 1000 / 8 = 125 -> 2 * 100
        assert_eq!(nice_step(0.0, 1000.0), 200.0);
        // raw = 300 / 8 = 37.5 -> 5 * 10
        assert_eq!(nice_step(-150.0, 150.0), 50.0);
        // raw = 7.5 -> 10 * 1
        assert_eq!(nice_step(0.0, 60.0), 10.0);
    }

    #[test]
    fn choose_step_keeps_default_until_too_dense() {
        assert_eq!(choose_step(-5.0, 5.0, None), 1.0);
        assert_eq!(choose_step(0.0, 200.0, None), 1.0);
        assert_eq!(choose_step(0.0, 1000.0, None), 200.0);
        assert_eq!(choose_step(0.0, 10.0, Some(0.5)), 0.5);
        assert_eq!(choose_step(0.0, 80.0, Some(0.0)), 10.0);
    }

    #[test]
    fn frange_starts_below_min_and_rounds() {
        assert_eq!(frange(-1.5, 1.2, 1.0), vec![-2.0, -1.0, 0.0, 1.0]);
        let tenths = frange(0.0, 0.3, 0.1);
        assert_eq!(tenths, vec![0.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn frange_rejects_bad_steps_and_caps_output() {
        assert!(frange(0.0, 1.0, 0.0).is_empty());
        assert!(frange(0.0, 1.0, -1.0).is_empty());
        assert!(frange(0.0, 1.0, f64::NAN).is_empty());
        assert_eq!(frange(0.0, 1e6, 1.0).len(), 200);
    }

    #[test]
    fn arrow_head_is_clamped() {
        let short = arrow(Vec2::ZERO, Vec2::new(1.0, 0.0), "s", "black", 1.0).unwrap();
        assert_eq!(short.head_size, 0.8);
        let long = arrow(Vec2::ZERO, Vec2::new(100.0, 0.0), "l", "black", 1.0).unwrap();
        assert_eq!(long.head_size, 2.0);
        let mid = arrow(Vec2::ZERO, Vec2::new(0.0, 10.0), "m", "black", 1.0).unwrap();
        assert!((mid.head_size - 1.5).abs() < 1e-12);
        assert!(arrow(Vec2::ZERO, Vec2::ZERO, "z", "black", 1.0).is_none());
    }

    #[test]
    fn degenerate_axis_gets_positive_span() {
        let (x, y) = axis_limits(&[Vec2::ZERO]);
        assert!(x.span() > 0.0);
        assert!(y.span() > 0.0);
        assert!(x.contains(0.0) && y.contains(0.0));
    }
}
