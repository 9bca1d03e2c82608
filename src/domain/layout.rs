use slotmap::SecondaryMap;

use crate::domain::layout_config::{LayoutConfig, ensure_finite};
use crate::domain::tracking_tree::{TrackingTree, TreeNodeId};
use crate::error::{Error, Result};

/// **Pass 1: Subtree widths (post-order)**
///
/// A leaf reserves one node box. An internal node reserves the larger of one
/// box and the summed widths of its children plus the gaps between them.
pub fn calculate_layout(tree: &mut TrackingTree, config: &LayoutConfig) -> Result<()> {
    let order = tree.traverse()?;

    // Reverse pre-order visits every child before its parent.
    for visit in order.iter().rev() {
        let node = tree.node(visit.id).ok_or(Error::UnknownNode)?;
        let key = node.item.key.to_string();
        let children = node.children.clone();

        let width = if node.is_leaf() {
            config.node_width
        } else {
            let mut children_width = 0.0;
            for child in &children {
                children_width += tree.node(*child).ok_or(Error::UnknownNode)?.width;
            }
            let gaps = (children.len() - 1) as f64 * config.spacing;
            config.node_width.max(children_width + gaps)
        };
        let width = ensure_finite("width", &key, width)?;

        if let Some(node) = tree.node_mut(visit.id) {
            node.width = width;
        }
    }

    Ok(())
}

/// **Pass 2: Coordinates (pre-order)**
///
/// The subtree starting at `(x, y)` gets its node centered over its reserved
/// width; children are packed left to right one level below.
pub fn assign_coordinates(tree: &mut TrackingTree, x: f64, y: f64, config: &LayoutConfig) -> Result<()> {
    let order = tree.traverse()?;
    let Some(first) = order.first() else {
        return Ok(());
    };

    // Top-left corner of the span reserved for each subtree.
    let mut origins: SecondaryMap<TreeNodeId, (f64, f64)> = SecondaryMap::new();
    origins.insert(first.id, (x, y));

    for visit in &order {
        let (left, top) = origins.get(visit.id).copied().ok_or(Error::UnknownNode)?;

        let node = tree.node_mut(visit.id).ok_or(Error::UnknownNode)?;
        let key = node.item.key.as_str();
        node.x = ensure_finite("x", key, left + node.width / 2.0)?;
        node.y = ensure_finite("y", key, top)?;
        let children = node.children.clone();

        let mut current_x = left;
        for child in children {
            origins.insert(child, (current_x, top + config.level_height));
            current_x += tree.node(child).ok_or(Error::UnknownNode)?.width + config.spacing;
        }
    }

    Ok(())
}

/// Runs both passes with the configured start offsets.
pub fn apply_layout(tree: &mut TrackingTree, config: &LayoutConfig) -> Result<()> {
    calculate_layout(tree, config)?;
    assign_coordinates(tree, config.start_x, config.start_y, config)
}
