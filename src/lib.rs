//! Grid layout for rooted trees, with an SVG renderer on top.
//!
//! Build a [`Tree`](tree::Tree), run [`compute_layout`](layout::compute_layout)
//! and read back the integer `(x, y)` slot of every node:
//!
//! ```
//! use treegrid::{Tree, compute_layout};
//!
//! let mut tree = Tree::new("root");
//! let root = tree.root();
//! let a = tree.create_node("a", root);
//! let b = tree.create_node("b", root);
//! let extent = compute_layout(&mut tree);
//!
//! assert_eq!(tree.node(a).x(), 0);
//! assert_eq!(tree.node(b).x(), 1);
//! assert_eq!(tree.node(root).x(), 0);
//! assert_eq!((extent.width, extent.height), (1, 1));
//! ```

pub mod build;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod tree;

pub use build::{NodeRecord, TreeRecord, build_tree};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use error::{BuildError, ConfigError, RenderError};
pub use layout::{Extent, compute_layout, extent};
pub use render::render_svg;
pub use theme::Theme;
pub use tree::{GridPos, NodeId, Tree};
