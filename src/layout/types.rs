use serde::Serialize;

/// 0-based bounding box of a laid-out tree, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    /// Number of slot columns the tree occupies.
    pub fn columns(&self) -> i32 {
        self.width + 1
    }

    /// Number of depth rows the tree occupies.
    pub fn rows(&self) -> i32 {
        self.height + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LayoutStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Deepest parent-link count below the root.
    pub depth: usize,
}
