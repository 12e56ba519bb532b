use crate::error::ConfigError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel geometry used to turn grid coordinates into boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    /// Widen every column to fit the widest label.
    pub fit_labels: bool,
    pub label_padding: f32,
    pub stroke_width: f32,
    pub corner_radius: f32,
    /// Scale applied when rasterizing to PNG.
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 30.0,
            node_height: 30.0,
            margin_x: 50.0,
            margin_y: 40.0,
            fit_labels: false,
            label_padding: 6.0,
            stroke_width: 1.0,
            corner_radius: 0.0,
            png_scale: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("pngScale", self.png_scale),
        ];
        for (field, value) in fields {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        let non_negative = [
            ("marginX", self.margin_x),
            ("marginY", self.margin_y),
            ("labelPadding", self.label_padding),
            ("strokeWidth", self.stroke_width),
            ("cornerRadius", self.corner_radius),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}

impl Config {
    /// Checks the render geometry and the theme's font size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        let font_size = self.theme.font_size;
        if font_size <= 0.0 || !font_size.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "fontSize",
                value: font_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
    fit_labels: Option<bool>,
    label_padding: Option<f32>,
    stroke_width: Option<f32>,
    corner_radius: Option<f32>,
    png_scale: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    node_fill: Option<String>,
    node_border_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

/// Loads a JSON5 config file over the defaults. `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = json5::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    apply_config_file(Config::default(), parsed)
}

/// Parses config text directly, for callers without a file on disk.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let parsed: ConfigFile = json5::from_str(contents).map_err(|source| ConfigError::Parse {
        path: "<inline>".into(),
        source,
    })?;
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Result<Config, ConfigError> {
    if let Some(name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(name).ok_or_else(|| ConfigError::UnknownTheme(name.into()))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.node_border_color {
            config.theme.node_border_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    let render = &mut config.render;
    if let Some(v) = parsed.node_width {
        render.node_width = v;
    }
    if let Some(v) = parsed.node_height {
        render.node_height = v;
    }
    if let Some(v) = parsed.margin_x {
        render.margin_x = v;
    }
    if let Some(v) = parsed.margin_y {
        render.margin_y = v;
    }
    if let Some(v) = parsed.fit_labels {
        render.fit_labels = v;
    }
    if let Some(v) = parsed.label_padding {
        render.label_padding = v;
    }
    if let Some(v) = parsed.stroke_width {
        render.stroke_width = v;
    }
    if let Some(v) = parsed.corner_radius {
        render.corner_radius = v;
    }
    if let Some(v) = parsed.png_scale {
        render.png_scale = v;
    }
    config.validate()?;
    Ok(config)
}
