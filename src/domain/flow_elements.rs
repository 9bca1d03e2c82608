use crate::domain::layout_config::{EDGE_TYPE, EdgeStyle, LayoutConfig, NODE_TYPE};
use crate::domain::tracking_tree::TrackingTree;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Payload rendered inside a node box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub role: String,
    pub name: String,
    pub title: String,
    pub department: String,
    pub is_main_processor: bool,
}

/// A positioned box of the diagram. `position` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    pub id: String,
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

/// A directed connector from a parent step to one of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub edge_type: String,
    pub animated: bool,
    pub style: EdgeStyle,
}

/// Axis-aligned extent of the emitted node boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowFlow {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,

    /// Box width used for the layout; needed to recover the horizontal extent.
    pub node_width: f64,
}

impl WorkflowFlow {
    /// Extent of the diagram for viewport fitting.
    ///
    /// Box height is not part of the layout, so vertically this only covers the
    /// range of the top edges.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let (mut min_x, mut min_y) = (first.position.x, first.position.y);
        let (mut max_x, mut max_y) = (min_x, min_y);

        for node in &self.nodes[1..] {
            min_x = min_x.min(node.position.x);
            min_y = min_y.min(node.position.y);
            max_x = max_x.max(node.position.x);
            max_y = max_y.max(node.position.y);
        }

        Some(Bounds { min_x, min_y, width: max_x - min_x + self.node_width, height: max_y - min_y })
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Walks the laid-out tree in pre-order and emits one node per visited tree
/// node plus one edge per parent/child link.
///
/// The edge to a child is emitted right before that child is visited, so the
/// edge list follows the same order as the node list (minus the root).
pub fn generate_flow_elements(tree: &TrackingTree, config: &LayoutConfig) -> Result<WorkflowFlow> {
    let order = tree.traverse()?;
    let mut nodes = Vec::with_capacity(order.len());
    let mut edges = Vec::with_capacity(order.len().saturating_sub(1));

    for visit in &order {
        let tree_node = tree.node(visit.id).ok_or(Error::UnknownNode)?;
        let item = &tree_node.item;
        let id = item.key.to_string();

        if let Some(parent_id) = visit.parent {
            let source = tree.node(parent_id).ok_or(Error::UnknownNode)?.item.key.to_string();
            edges.push(WorkflowEdge {
                id: format!("e{}-{}", source, id),
                source,
                target: id.clone(),
                edge_type: EDGE_TYPE.to_string(),
                animated: false,
                style: config.edge_style.clone(),
            });
        }

        nodes.push(WorkflowNode {
            id,
            node_type: NODE_TYPE.to_string(),
            position: Position { x: tree_node.x - config.node_width / 2.0, y: tree_node.y },
            data: NodeData {
                role: item.role().to_string(),
                name: item.name.clone(),
                title: item.position.clone(),
                department: item.org.clone(),
                is_main_processor: item.execute,
            },
        });
    }

    log::debug!("Generated {} diagram nodes and {} edges.", nodes.len(), edges.len());

    Ok(WorkflowFlow { nodes, edges, node_width: config.node_width })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::apply_layout;
    use crate::domain::tracking_item::{COORDINATOR_ROLE, MAIN_PROCESSOR_ROLE, TrackingItem};

    fn flow_for(items: &[TrackingItem]) -> WorkflowFlow {
        let config = LayoutConfig::default();
        let mut tree = TrackingTree::build(items).unwrap();
        apply_layout(&mut tree, &config).unwrap();
        generate_flow_elements(&tree, &config).unwrap()
    }

    #[test]
    fn test_edges_follow_preorder_of_children() {
        // 1 -> {2 -> {4}, 3}
        let flow = flow_for(&[
            TrackingItem::new(1, 1, "A"),
            TrackingItem::new(2, 1, "B"),
            TrackingItem::new(3, 1, "C"),
            TrackingItem::new(4, 2, "D"),
        ]);

        let node_ids: Vec<&str> = flow.nodes.iter().map(|n| n.id.as_str()).collect();
        let edge_ids: Vec<&str> = flow.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(node_ids, vec!["1", "2", "4", "3"]);
        assert_eq!(edge_ids, vec!["e1-2", "e2-4", "e1-3"]);
    }

    #[test]
    fn test_node_payload_is_derived_from_record() {
        let flow = flow_for(&[
            TrackingItem::new(10, 10, "Nguyen Van A").with_execute(true).with_position("Director").with_org("Office"),
            TrackingItem::new(11, 10, "Tran Thi B").with_position("Clerk"),
        ]);

        let root = flow.node("10").unwrap();
        assert_eq!(root.node_type, "organization");
        assert_eq!(root.data.role, MAIN_PROCESSOR_ROLE);
        assert_eq!(root.data.title, "Director");
        assert_eq!(root.data.department, "Office");
        assert!(root.data.is_main_processor);

        let child = flow.node("11").unwrap();
        assert_eq!(child.data.role, COORDINATOR_ROLE);
        assert!(!child.data.is_main_processor);
    }

    #[test]
    fn test_edges_share_constant_style() {
        let flow = flow_for(&[TrackingItem::new(1, 1, "A"), TrackingItem::new(2, 1, "B"), TrackingItem::new(3, 2, "C")]);

        for edge in &flow.edges {
            assert_eq!(edge.edge_type, "smoothstep");
            assert!(!edge.animated);
            assert_eq!(edge.style, EdgeStyle::default());
        }
    }

    #[test]
    fn test_bounds_cover_all_boxes() {
        let flow = flow_for(&[TrackingItem::new(1, 1, "A"), TrackingItem::new(2, 1, "B"), TrackingItem::new(3, 1, "C")]);

        let bounds = flow.bounds().unwrap();
        assert_eq!(bounds, Bounds { min_x: 0.0, min_y: 50.0, width: 680.0, height: 250.0 });
    }
}
