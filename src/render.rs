use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::layout::{Extent, extent};
use crate::text_metrics::measure_text_width;
use crate::theme::Theme;
use crate::tree::{NodeId, Tree};
use std::fmt::Display;
use std::path::Path;

/// Pixel geometry of one rendering pass.
///
/// Every column has the same width, so a grid slot maps to one fixed pixel
/// column regardless of the label it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub cell_width: f32,
    pub cell_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl Geometry {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            cell_width: config.node_width,
            cell_height: config.node_height,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
        }
    }

    /// Widens the columns so that every label fits inside its box.
    pub fn fit_labels<T: Display>(mut self, tree: &Tree<T>, theme: &Theme, padding: f32) -> Self {
        let widest = tree
            .iter()
            .map(|id| {
                let label = tree.payload(id).to_string();
                measure_text_width(&label, theme.font_size, &theme.font_family)
            })
            .fold(0.0f32, f32::max);
        self.cell_width = self.cell_width.max((widest + padding * 2.0).ceil());
        self
    }

    pub fn box_left(&self, x: i32) -> f32 {
        self.margin_x + x as f32 * (self.cell_width + self.margin_x)
    }

    pub fn box_top(&self, y: i32) -> f32 {
        self.margin_y + y as f32 * (self.cell_height + self.margin_y)
    }

    pub fn center_x(&self, x: i32) -> f32 {
        self.box_left(x) + self.cell_width / 2.0
    }

    /// Canvas size for a tree with the given extent, margins included on
    /// every side.
    pub fn canvas_size(&self, extent: Extent) -> (f32, f32) {
        let columns = extent.columns() as f32;
        let rows = extent.rows() as f32;
        (
            columns * self.cell_width + (columns + 1.0) * self.margin_x,
            rows * self.cell_height + (rows + 1.0) * self.margin_y,
        )
    }
}

/// Renders a laid-out tree as an SVG document.
pub fn render_svg<T: Display>(
    tree: &Tree<T>,
    theme: &Theme,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let extent = extent(tree).ok_or(RenderError::NotLaidOut)?;
    let mut geometry = Geometry::from_config(config);
    if config.fit_labels {
        geometry = geometry.fit_labels(tree, theme, config.label_padding);
    }
    let (width, height) = geometry.canvas_size(extent);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str(&format!(
        "<g fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">",
        theme.line_color, config.stroke_width
    ));
    for id in tree.iter() {
        push_connectors(&mut svg, tree, id, &geometry);
    }
    svg.push_str("</g>");

    for id in tree.iter() {
        push_node(&mut svg, tree, id, &geometry, theme, config);
    }

    svg.push_str("</svg>");
    tracing::debug!(width, height, nodes = tree.len(), "rendered svg");
    Ok(svg)
}

fn push_connectors<T>(svg: &mut String, tree: &Tree<T>, id: NodeId, geometry: &Geometry) {
    let node = tree.node(id);
    let center_x = geometry.center_x(node.x());
    let top = geometry.box_top(node.y());
    let half_gap = geometry.margin_y / 2.0;

    if !node.is_root() {
        push_line(svg, center_x, top, center_x, top - half_gap);
    }

    let (Some(first), Some(last)) = (tree.first_child(id), tree.last_child(id)) else {
        return;
    };
    let bottom = top + geometry.cell_height;
    push_line(svg, center_x, bottom, center_x, bottom + half_gap);
    if first != last {
        let bar_y = bottom + half_gap;
        push_line(
            svg,
            geometry.center_x(tree.node(first).x()),
            bar_y,
            geometry.center_x(tree.node(last).x()),
            bar_y,
        );
    }
}

fn push_line(svg: &mut String, x1: f32, y1: f32, x2: f32, y2: f32) {
    svg.push_str(&format!(
        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\"/>"
    ));
}

fn push_node<T: Display>(
    svg: &mut String,
    tree: &Tree<T>,
    id: NodeId,
    geometry: &Geometry,
    theme: &Theme,
    config: &RenderConfig,
) {
    let node = tree.node(id);
    let left = geometry.box_left(node.x());
    let top = geometry.box_top(node.y());
    svg.push_str(&format!(
        "<rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        geometry.cell_width,
        geometry.cell_height,
        theme.node_fill,
        theme.node_border_color,
        config.stroke_width,
        r = config.corner_radius,
    ));

    let label = node.payload.to_string();
    if label.is_empty() {
        return;
    }
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        left + geometry.cell_width / 2.0,
        top + geometry.cell_height / 2.0,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(&label)
    ));
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<(), RenderError> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{svg}");
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &RenderConfig) -> Result<(), RenderError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size();
    let width = (size.width() * config.png_scale).ceil() as u32;
    let height = (size.height() * config.png_scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::Pixmap { width, height })?;

    let transform = resvg::tiny_skia::Transform::from_scale(config.png_scale, config.png_scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap
        .save_png(output)
        .map_err(|err| RenderError::Png(err.to_string()))?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
