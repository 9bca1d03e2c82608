use slotmap::{SecondaryMap, SlotMap, new_key_type};
use std::collections::HashMap;

use crate::domain::tracking_item::{TrackingItem, TrackingKey};
use crate::error::{Error, Result};
use crate::traits::{SilentDiagnostics, TreeDiagnostics};

new_key_type! {
    pub struct TreeNodeId;
}

/// One tracking record placed in the tree, plus its layout state.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub item: TrackingItem,

    /// Keys into the owning tree, in input order.
    pub children: Vec<TreeNodeId>,

    /// Horizontal span reserved for this subtree.
    pub width: f64,

    /// Center coordinates, valid after `layout::assign_coordinates`.
    pub x: f64,
    pub y: f64,
}

impl TreeNode {
    fn new(item: TrackingItem) -> Self {
        TreeNode { item, children: Vec::new(), width: 0.0, x: 0.0, y: 0.0 }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node reached by `TrackingTree::traverse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub id: TreeNodeId,
    pub parent: Option<TreeNodeId>,
    pub depth: usize,
}

/// Rooted tree of tracking records, stored in an arena.
#[derive(Debug, Clone, Default)]
pub struct TrackingTree {
    nodes: SlotMap<TreeNodeId, TreeNode>,

    /// Canonical key -> node. A later duplicate key replaces the earlier entry.
    index: HashMap<String, TreeNodeId>,

    root: Option<TreeNodeId>,

    /// Keys of records dropped because their parent was missing.
    orphans: Vec<TrackingKey>,
}

impl TrackingTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the tree, dropping orphans silently.
    pub fn build(items: &[TrackingItem]) -> Option<Self> {
        Self::build_with(items, &mut SilentDiagnostics)
    }

    /// Builds the tree from flat records.
    ///
    /// Returns `None` for empty input or when no record satisfies `key === parent`.
    /// The first such record becomes the root. Every other record is appended to
    /// the children of the node indexed by its parent key, in input order.
    pub fn build_with(items: &[TrackingItem], diagnostics: &mut dyn TreeDiagnostics) -> Option<Self> {
        // Phase 0: Nothing to build
        if items.is_empty() {
            log::debug!("No tracking records supplied, skipping tree construction.");
            return None;
        }

        // Phase 1: Locate the root
        let Some(root_index) = items.iter().position(TrackingItem::is_root) else {
            log::debug!("No root record among {} tracking records.", items.len());
            return None;
        };

        // Phase 2: One node per record
        let mut tree = TrackingTree::new();
        let ids: Vec<TreeNodeId> = items.iter().map(|item| tree.insert(item.clone())).collect();
        tree.root = Some(ids[root_index]);

        // Phase 3: Link children to parents
        for (position, item) in items.iter().enumerate() {
            if position == root_index {
                continue;
            }

            match tree.index.get(item.parent.as_str()).copied() {
                Some(parent_id) => tree.nodes[parent_id].children.push(ids[position]),
                None => {
                    log::debug!("Tracking record '{}' has no parent '{}' in the input.", item.key, item.parent);
                    diagnostics.on_orphan(item);
                    tree.orphans.push(item.key.clone());
                }
            }
        }

        log::debug!(
            "Built tracking tree rooted at '{}' from {} records ({} orphans).",
            items[root_index].key,
            items.len(),
            tree.orphans.len()
        );

        Some(tree)
    }

    /// Adds a detached node and indexes it by its canonical key.
    pub fn insert(&mut self, item: TrackingItem) -> TreeNodeId {
        let key = item.key.as_str().to_string();
        let id = self.nodes.insert(TreeNode::new(item));
        self.index.insert(key, id);
        id
    }

    /// Appends `child` to the children of `parent`.
    pub fn attach_child(&mut self, parent: TreeNodeId, child: TreeNodeId) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::UnknownNode);
        }
        let parent_node = self.nodes.get_mut(parent).ok_or(Error::UnknownNode)?;
        parent_node.children.push(child);
        Ok(())
    }

    pub fn set_root(&mut self, id: TreeNodeId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::UnknownNode);
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn root(&self) -> Option<TreeNodeId> {
        self.root
    }

    pub fn node(&self, id: TreeNodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: TreeNodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id)
    }

    /// Looks a node up by canonical key.
    pub fn lookup(&self, key: &str) -> Option<TreeNodeId> {
        self.index.get(key).copied()
    }

    /// Number of nodes in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn orphans(&self) -> &[TrackingKey] {
        &self.orphans
    }

    /// Pre-order walk from the root, children left to right.
    ///
    /// Fails with `Error::CycleDetected` when a node is reached twice, which
    /// covers cycles as well as children shared between parents. An empty
    /// vector is returned when no root is set.
    pub fn traverse(&self) -> Result<Vec<Visit>> {
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };

        let mut visited: SecondaryMap<TreeNodeId, ()> = SecondaryMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Visit { id: root, parent: None, depth: 0 }];

        while let Some(visit) = stack.pop() {
            let node = self.nodes.get(visit.id).ok_or(Error::UnknownNode)?;
            if visited.insert(visit.id, ()).is_some() {
                return Err(Error::CycleDetected { key: node.item.key.to_string() });
            }
            order.push(visit);

            stack.extend(node.children.iter().rev().map(|&child| Visit { id: child, parent: Some(visit.id), depth: visit.depth + 1 }));
        }

        Ok(order)
    }
}
