//! Joystick configuration: raw option bag and validated settings.
//!
//! Options arrive as [`JoystickParams`] (deserialized from JSON or a JS
//! object, every field optional, camelCase names) and are turned
//! once into a [`JoystickConfig`] with all defaults applied.

use kurbo::Size;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::surface::GradientStop;

/// Default surface element id.
pub const DEFAULT_TITLE: &str = "joystick";
/// Default line width for both circles.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },
    #[error("Invalid gradient stop offset: {0} (expected a number in [0, 1])")]
    InvalidStopOffset(String),
    #[error("Invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: f64 },
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Raw joystick options, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoystickParams {
    pub title: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub internal_fill_color: Option<String>,
    pub internal_line_width: Option<f64>,
    pub internal_stroke_color: Option<String>,
    pub external_line_width: Option<f64>,
    pub external_stroke_color: Option<String>,
    /// Extra gradient stops keyed by offset ("0.5" -> "#0099FF").
    pub another_internal_fill_color: Option<BTreeMap<String, String>>,
    pub auto_return_to_center: Option<bool>,
}

/// Validated joystick configuration.
#[derive(Debug, Clone)]
pub struct JoystickConfig {
    /// Id given to the created surface element.
    pub title: String,
    /// Explicit surface width; `None` uses the container width.
    pub width: Option<f64>,
    /// Explicit surface height; `None` uses the container height.
    pub height: Option<f64>,
    pub internal_fill_color: Color,
    pub internal_line_width: f64,
    pub internal_stroke_color: Color,
    pub external_line_width: f64,
    pub external_stroke_color: Color,
    /// Extra gradient stops between the fill and stroke colors, ascending.
    pub gradient_stops: Vec<GradientStop>,
    /// Snap the stick back to center on release.
    pub auto_return_to_center: bool,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: None,
            height: None,
            internal_fill_color: Color::from_rgba8(0x00, 0xAA, 0x00, 0xFF), // #00AA00
            internal_line_width: DEFAULT_LINE_WIDTH,
            internal_stroke_color: Color::from_rgba8(0x00, 0x33, 0x00, 0xFF), // #003300
            external_line_width: DEFAULT_LINE_WIDTH,
            external_stroke_color: Color::from_rgba8(0x00, 0x80, 0x00, 0xFF), // #008000
            gradient_stops: Vec::new(),
            auto_return_to_center: true,
        }
    }
}

impl JoystickConfig {
    /// Apply defaults to raw options and validate them.
    pub fn from_params(params: JoystickParams) -> ConfigResult<Self> {
        let defaults = Self::default();

        let gradient_stops = match params.another_internal_fill_color {
            Some(stops) => parse_stops(&stops)?,
            None => Vec::new(),
        };

        Ok(Self {
            title: params.title.unwrap_or(defaults.title),
            // Zero keeps its historical meaning of "size to the container"
            width: dimension("width", params.width)?,
            height: dimension("height", params.height)?,
            internal_fill_color: color_or(
                "internalFillColor",
                params.internal_fill_color,
                defaults.internal_fill_color,
            )?,
            internal_line_width: line_width(
                "internalLineWidth",
                params.internal_line_width,
                defaults.internal_line_width,
            )?,
            internal_stroke_color: color_or(
                "internalStrokeColor",
                params.internal_stroke_color,
                defaults.internal_stroke_color,
            )?,
            external_line_width: line_width(
                "externalLineWidth",
                params.external_line_width,
                defaults.external_line_width,
            )?,
            external_stroke_color: color_or(
                "externalStrokeColor",
                params.external_stroke_color,
                defaults.external_stroke_color,
            )?,
            gradient_stops,
            auto_return_to_center: params
                .auto_return_to_center
                .unwrap_or(defaults.auto_return_to_center),
        })
    }

    /// Parse and validate a JSON option object.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let params: JoystickParams = serde_json::from_str(json)?;
        Self::from_params(params)
    }

    /// Final surface size: explicit dimensions win, the container fills the rest.
    pub fn resolve_size(&self, container: Size) -> Size {
        Size::new(
            self.width.unwrap_or(container.width),
            self.height.unwrap_or(container.height),
        )
    }

    /// Set the surface element id.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set an explicit surface size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the stick fill and stroke colors.
    pub fn with_internal_colors(mut self, fill: Color, stroke: Color) -> Self {
        self.internal_fill_color = fill;
        self.internal_stroke_color = stroke;
        self
    }

    /// Set the outer ring color.
    pub fn with_external_color(mut self, stroke: Color) -> Self {
        self.external_stroke_color = stroke;
        self
    }

    /// Set both line widths.
    pub fn with_line_widths(mut self, internal: f64, external: f64) -> Self {
        self.internal_line_width = internal;
        self.external_line_width = external;
        self
    }

    /// Add an extra gradient stop, keeping stops sorted by offset.
    pub fn with_gradient_stop(mut self, offset: f32, color: Color) -> Self {
        self.gradient_stops.push(GradientStop::new(offset.clamp(0.0, 1.0), color));
        self.gradient_stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self
    }

    /// Enable or disable snapping back to center on release.
    pub fn with_auto_return(mut self, enabled: bool) -> Self {
        self.auto_return_to_center = enabled;
        self
    }
}

fn dimension(field: &'static str, value: Option<f64>) -> ConfigResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidNumber { field, value: v }),
        Some(v) if v == 0.0 => Ok(None),
        Some(v) => Ok(Some(v)),
    }
}

fn line_width(field: &'static str, value: Option<f64>, default: f64) -> ConfigResult<f64> {
    match value {
        None => Ok(default),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidNumber { field, value: v }),
        Some(v) => Ok(v),
    }
}

fn color_or(field: &'static str, value: Option<String>, default: Color) -> ConfigResult<Color> {
    match value {
        None => Ok(default),
        Some(s) => parse_css(field, &s),
    }
}

/// Parse a CSS color string ("#00AA00", "rgb(0, 170, 0)", "green", ...).
pub fn parse_css(field: &'static str, value: &str) -> ConfigResult<Color> {
    parse_color(value.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ConfigError::InvalidColor {
            field,
            value: value.to_string(),
        })
}

fn parse_stops(stops: &BTreeMap<String, String>) -> ConfigResult<Vec<GradientStop>> {
    let mut parsed = stops
        .iter()
        .map(|(offset, color)| {
            let offset_value: f32 = offset
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidStopOffset(offset.clone()))?;
            if !(0.0..=1.0).contains(&offset_value) {
                return Err(ConfigError::InvalidStopOffset(offset.clone()));
            }
            Ok(GradientStop::new(offset_value, parse_css("anotherInternalFillColor", color)?))
        })
        .collect::<ConfigResult<Vec<_>>>()?;
    // Keys sort lexically, offsets must sort numerically
    parsed.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn test_defaults() {
        let config = JoystickConfig::from_params(JoystickParams::default()).unwrap();
        assert_eq!(config.title, "joystick");
        assert_eq!(config.width, None);
        assert_eq!(config.height, None);
        assert_eq!(rgba(config.internal_fill_color), [0x00, 0xAA, 0x00, 0xFF]);
        assert_eq!(rgba(config.internal_stroke_color), [0x00, 0x33, 0x00, 0xFF]);
        assert_eq!(rgba(config.external_stroke_color), [0x00, 0x80, 0x00, 0xFF]);
        assert!((config.internal_line_width - 2.0).abs() < f64::EPSILON);
        assert!((config.external_line_width - 2.0).abs() < f64::EPSILON);
        assert!(config.gradient_stops.is_empty());
        assert!(config.auto_return_to_center);
    }

    #[test]
    fn test_from_json_full() {
        let json = r##"{
            "title": "MainJoyStick",
            "internalFillColor": "#FFFFFF",
            "anotherInternalFillColor": { "0.9": "#0071BD", "0.5": "#0099FF" },
            "internalLineWidth": 2,
            "internalStrokeColor": "#00568F",
            "externalLineWidth": 5,
            "externalStrokeColor": "#000000",
            "autoReturnToCenter": false
        }"##;
        let config = JoystickConfig::from_json(json).unwrap();
        assert_eq!(config.title, "MainJoyStick");
        assert_eq!(rgba(config.internal_fill_color), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(rgba(config.internal_stroke_color), [0x00, 0x56, 0x8F, 0xFF]);
        assert!((config.external_line_width - 5.0).abs() < f64::EPSILON);
        assert!(!config.auto_return_to_center);

        let offsets: Vec<f32> = config.gradient_stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.5, 0.9]);
        assert_eq!(rgba(config.gradient_stops[0].color), [0x00, 0x99, 0xFF, 0xFF]);
    }

    #[test]
    fn test_stops_sort_numerically() {
        let json = r##"{ "anotherInternalFillColor": { "0.25": "red", "0.125": "blue", "1": "lime" } }"##;
        let config = JoystickConfig::from_json(json).unwrap();
        let offsets: Vec<f32> = config.gradient_stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.125, 0.25, 1.0]);
    }

    #[test]
    fn test_invalid_color() {
        let result = JoystickConfig::from_json(r#"{ "internalFillColor": "not-a-color" }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidColor { field: "internalFillColor", .. })
        ));
    }

    #[test]
    fn test_invalid_stop_offset() {
        let out_of_range = JoystickConfig::from_json(r##"{ "anotherInternalFillColor": { "1.5": "#000000" } }"##);
        assert!(matches!(out_of_range, Err(ConfigError::InvalidStopOffset(_))));

        let not_a_number = JoystickConfig::from_json(r##"{ "anotherInternalFillColor": { "mid": "#000000" } }"##);
        assert!(matches!(not_a_number, Err(ConfigError::InvalidStopOffset(_))));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let result = JoystickConfig::from_json(r#"{ "width": -10 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidNumber { field: "width", .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(JoystickConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_resolve_size() {
        let container = Size::new(300.0, 250.0);

        let config = JoystickConfig::default();
        assert_eq!(config.resolve_size(container), container);

        let zero = JoystickConfig::from_json(r#"{ "width": 0, "height": 120 }"#).unwrap();
        assert_eq!(zero.resolve_size(container), Size::new(300.0, 120.0));

        let explicit = JoystickConfig::default().with_size(200.0, 200.0);
        assert_eq!(explicit.resolve_size(container), Size::new(200.0, 200.0));
    }

    #[test]
    fn test_builder_stops_stay_sorted() {
        let config = JoystickConfig::default()
            .with_gradient_stop(0.8, Color::BLACK)
            .with_gradient_stop(0.2, Color::WHITE);
        assert_eq!(config.gradient_stops[0].offset, 0.2);
        assert_eq!(config.gradient_stops[1].offset, 0.8);
    }
}
