use serde::Deserialize;
use treegrid::build::{NodeRecord, build_tree, parse_records};
use treegrid::{Config, Theme, compute_layout, render_svg};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
}

fn build_config(options: TreeRenderOptions) -> Result<Config, String> {
    let mut config = Config::default();
    if let Some(name) = options.theme.as_deref() {
        config.theme = Theme::by_name(name).ok_or_else(|| format!("unknown theme '{name}'"))?;
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(v) = options.node_width {
        config.render.node_width = v;
    }
    if let Some(v) = options.node_height {
        config.render.node_height = v;
    }
    if let Some(v) = options.margin_x {
        config.render.margin_x = v;
    }
    if let Some(v) = options.margin_y {
        config.render.margin_y = v;
    }
    config.validate().map_err(|error| error.to_string())?;
    Ok(config)
}

fn render_records(records: Vec<NodeRecord>, config: &Config) -> Result<String, String> {
    let mut tree = build_tree(records).map_err(|error| error.to_string())?;
    compute_layout(&mut tree);
    render_svg(&tree, &config.theme, &config.render).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn render_tree_svg(records_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TreeRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TreeRenderOptions::default()
    };
    let config = build_config(options).map_err(|error| JsValue::from_str(&error))?;
    let records = parse_records(records_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    render_records(records, &config).map_err(|error| JsValue::from_str(&error))
}
