use crate::build::{NodeRecord, build_tree, parse_records, sample_records};
use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::logging::init_logging;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "treegrid", version, about = "Lay out and draw a tree from parent/child records")]
pub struct Args {
    /// Input JSON records file or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Use the built-in sample tree instead of reading input
    #[arg(long = "sample")]
    pub sample: bool,

    /// Output file. Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Node box width in pixels
    #[arg(long = "node-width")]
    pub node_width: Option<f32>,

    /// Node box height in pixels
    #[arg(long = "node-height")]
    pub node_height: Option<f32>,

    /// Horizontal gap between boxes
    #[arg(long = "margin-x")]
    pub margin_x: Option<f32>,

    /// Vertical gap between rows
    #[arg(long = "margin-y")]
    pub margin_y: Option<f32>,

    /// Widen boxes to fit their labels
    #[arg(long = "fit-labels")]
    pub fit_labels: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run_with_args(&args)
}

pub fn run_with_args(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;

    let records = if args.sample {
        sample_records()
    } else {
        read_records(args.input.as_deref())?
    };
    let mut tree = build_tree(records).context("failed to build tree from records")?;
    let extent = compute_layout(&mut tree);
    tracing::info!(
        nodes = tree.len(),
        columns = extent.columns(),
        rows = extent.rows(),
        "laid out tree"
    );

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&tree, &config.theme, &config.render)?;
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&tree, &config.theme, &config.render)?;
            write_png(&svg, &output, &config)?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &tree)?;
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    let render = &mut config.render;
    if let Some(v) = args.node_width {
        render.node_width = v;
    }
    if let Some(v) = args.node_height {
        render.node_height = v;
    }
    if let Some(v) = args.margin_x {
        render.margin_x = v;
    }
    if let Some(v) = args.margin_y {
        render.margin_y = v;
    }
    if args.fit_labels {
        render.fit_labels = true;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

fn read_records(path: Option<&Path>) -> Result<Vec<NodeRecord>> {
    let input = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_records(&input).context("input is not a JSON array of records")
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
