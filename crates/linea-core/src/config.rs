use serde::{Deserialize, Serialize};

/// Grid and overlay options for [`crate::plot::plot_layout`].
///
/// Every field is optional on the wire (camelCase keys); missing ones take
/// the defaults below.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub enabled: bool,

    /// Desired main step on x. `None` means 1.0.
    pub main_step_x: Option<f64>,
    /// Desired main step on y. `None` means 1.0.
    pub main_step_y: Option<f64>,

    /// Minor subdivisions per main step; values below 1 count as 1.
    pub minor_factor: u32,
    pub minor_step_x: Option<f64>,
    pub minor_step_y: Option<f64>,

    pub color: String,
    pub width: f64,
    pub dash: DashStyle,

    pub minor_color: String,
    pub minor_width: f64,
    pub minor_dash: DashStyle,

    pub show_minor: bool,
    pub parallelogram: bool,
    pub subtraction: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            main_step_x: None,
            main_step_y: None,
            minor_factor: 5,
            minor_step_x: None,
            minor_step_y: None,
            color: "rgba(0,0,0,0.18)".to_string(),
            width: 1.0,
            dash: DashStyle::Solid,
            minor_color: "rgba(0,0,0,0.10)".to_string(),
            minor_width: 1.0,
            minor_dash: DashStyle::Dot,
            show_minor: true,
            parallelogram: false,
            subtraction: false,
        }
    }
}

impl GridConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Line dash patterns, named as plotly names them.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    LongDash,
    DashDot,
    LongDashDot,
}
