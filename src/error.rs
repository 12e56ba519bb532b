use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("no records to build a tree from")]
    Empty,
    #[error("no root record (every record names a parent)")]
    NoRoot,
    #[error("multiple root records: '{first}' and '{second}'")]
    MultipleRoots { first: String, second: String },
    #[error("duplicate record id '{0}'")]
    DuplicateId(String),
    #[error("record '{id}' names unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },
    #[error("records not reachable from the root: {}", ids.join(", "))]
    Unreachable { ids: Vec<String> },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tree has not been laid out")]
    NotLaidOut,
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("failed to rasterize svg: {0}")]
    Svg(#[from] usvg::Error),
    #[cfg(feature = "png")]
    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[cfg(feature = "png")]
    #[error("failed to encode png: {0}")]
    Png(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },
    #[error("unknown theme '{0}' (expected 'classic' or 'modern')")]
    UnknownTheme(String),
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}
