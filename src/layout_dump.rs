use crate::error::RenderError;
use crate::layout::{LayoutStats, extent, layout_stats};
use crate::tree::Tree;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: i32,
    pub height: i32,
    pub columns: i32,
    pub rows: i32,
    pub stats: LayoutStats,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub index: usize,
    pub label: String,
    pub parent: Option<usize>,
    pub x: i32,
    pub y: i32,
    pub subtree_width: i32,
    pub subtree_height: i32,
    /// Slots of the leftmost and rightmost descendant leaves.
    pub span: [i32; 2],
    pub leaf: bool,
}

impl LayoutDump {
    pub fn from_tree<T: Display>(tree: &Tree<T>) -> Result<Self, RenderError> {
        let extent = extent(tree).ok_or(RenderError::NotLaidOut)?;
        let nodes = tree
            .iter()
            .map(|id| {
                let node = tree.node(id);
                let left = tree.node(tree.leftmost_descendant_leaf(id)).x();
                let right = tree.node(tree.rightmost_descendant_leaf(id)).x();
                NodeDump {
                    index: id.index(),
                    label: node.payload.to_string(),
                    parent: node.parent().map(|parent| parent.index()),
                    x: node.x(),
                    y: node.y(),
                    subtree_width: node.subtree_width(),
                    subtree_height: node.subtree_height(),
                    span: [left, right],
                    leaf: node.is_leaf(),
                }
            })
            .collect();

        Ok(LayoutDump {
            width: extent.width,
            height: extent.height,
            columns: extent.columns(),
            rows: extent.rows(),
            stats: layout_stats(tree),
            nodes,
        })
    }
}

/// Writes the dump as pretty JSON to `path`, or to stdout.
pub fn write_layout_dump<T: Display>(path: Option<&Path>, tree: &Tree<T>) -> anyhow::Result<()> {
    let dump = LayoutDump::from_tree(tree)?;
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
