//! Explicit level hierarchy over table rows.
//!
//! Source data carries level numbers but no parent pointers; nesting is
//! implied by adjacency. The tree is built once at table construction: a
//! row at level `n` becomes a child of the nearest preceding row at a
//! shallower level (its level-`n-1` neighbor in well-formed data).

use serde::{Deserialize, Serialize};

/// One node of the level tree, addressed by table row position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Row index into the table's items.
    pub row: usize,
    /// Hierarchy depth as declared in the source.
    pub level: u32,
    /// Row index of the parent, `None` for roots.
    pub parent: Option<usize>,
    /// Row indices of direct children, in source order.
    pub children: Vec<usize>,
}

/// The level tree for a whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    roots: Vec<usize>,
}

impl Hierarchy {
    /// Build the tree from per-row levels by adjacency.
    pub(crate) fn from_levels(levels: &[u32]) -> Self {
        let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(levels.len());
        let mut roots = Vec::new();
        // Ancestor chain of the current row: (level, row), strictly
        // increasing in level.
        let mut open: Vec<(u32, usize)> = Vec::new();

        for (row, &level) in levels.iter().enumerate() {
            while open.last().is_some_and(|&(l, _)| l >= level) {
                open.pop();
            }
            let parent = open.last().map(|&(_, r)| r);
            match parent {
                Some(p) => nodes[p].children.push(row),
                None => roots.push(row),
            }
            nodes.push(HierarchyNode {
                row,
                level,
                parent,
                children: Vec::new(),
            });
            open.push((level, row));
        }

        Self { nodes, roots }
    }

    /// Number of nodes (one per table row).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the table had no rows.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root rows, in source order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Node for a row, if the index is in range.
    pub fn node(&self, row: usize) -> Option<&HierarchyNode> {
        self.nodes.get(row)
    }

    /// Parent row of a row.
    pub fn parent(&self, row: usize) -> Option<usize> {
        self.nodes.get(row).and_then(|node| node.parent)
    }

    /// Direct children of a row.
    pub fn children(&self, row: usize) -> &[usize] {
        self.nodes
            .get(row)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Depth-first traversal yielding `(row, depth)` in display order.
    /// Depth is the tree depth, which may differ from the declared level
    /// when levels skip.
    pub fn walk(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|&row| (row, 0)).collect();

        while let Some((row, depth)) = stack.pop() {
            out.push((row, depth));
            for &child in self.nodes[row].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}
