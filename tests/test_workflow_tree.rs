use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use workflow_tree_layout::{
    build_workflow_tree, build_workflow_tree_with,
    domain::flow_elements::WorkflowFlow,
    domain::layout_config::{FIXED_NODE_WIDTH, LEVEL_HEIGHT, LayoutConfig, SPACING, START_Y},
    domain::tracking_item::{COORDINATOR_ROLE, MAIN_PROCESSOR_ROLE, TrackingItem},
    error::Error,
    traits::SilentDiagnostics,
};

/// Random valid tree: item `i` hangs off a random earlier item.
fn random_tracking(seed: u64, size: usize) -> Vec<TrackingItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut items = vec![TrackingItem::new(0, 0, "root").with_execute(true)];

    for i in 1..size as i64 {
        let parent = rng.random_range(0..i);
        items.push(TrackingItem::new(i, parent, format!("participant {}", i)).with_execute(rng.random_bool(0.3)));
    }

    items
}

/// Centers of every node, recovered from the top-left positions.
fn centers(flow: &WorkflowFlow) -> HashMap<String, (f64, f64)> {
    flow.nodes.iter().map(|node| (node.id.clone(), (node.position.x + FIXED_NODE_WIDTH / 2.0, node.position.y))).collect()
}

fn children(flow: &WorkflowFlow) -> HashMap<String, Vec<String>> {
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &flow.edges {
        children.entry(edge.source.clone()).or_default().push(edge.target.clone());
    }
    children
}

fn depths(flow: &WorkflowFlow) -> HashMap<String, usize> {
    let parents: HashMap<&str, &str> = flow.edges.iter().map(|edge| (edge.target.as_str(), edge.source.as_str())).collect();

    flow.nodes
        .iter()
        .map(|node| {
            let mut depth = 0;
            let mut current = node.id.as_str();
            while let Some(parent) = parents.get(current) {
                depth += 1;
                current = *parent;
            }
            (node.id.clone(), depth)
        })
        .collect()
}

/// Width reserved by each subtree, recomputed from the emitted edges.
fn subtree_widths(flow: &WorkflowFlow) -> HashMap<String, f64> {
    let children = children(flow);
    let mut widths = HashMap::new();

    // Nodes are in pre-order, so walking them backwards sees children first.
    for node in flow.nodes.iter().rev() {
        let width = match children.get(&node.id) {
            None => FIXED_NODE_WIDTH,
            Some(kids) => {
                let sum: f64 = kids.iter().map(|kid| widths[kid]).sum();
                FIXED_NODE_WIDTH.max(sum + (kids.len() - 1) as f64 * SPACING)
            }
        };
        widths.insert(node.id.clone(), width);
    }

    widths
}

#[test]
fn test_three_node_scenario() {
    let items = vec![
        TrackingItem::new(1, 1, "A").with_execute(true),
        TrackingItem::new(2, 1, "B").with_execute(false),
        TrackingItem::new(3, 1, "C").with_execute(false),
    ];

    let flow = build_workflow_tree(&items).unwrap().unwrap();

    assert_eq!(flow.nodes.len(), 3);
    assert_eq!(flow.edges.len(), 2);
    assert!(flow.edges.iter().all(|edge| edge.source == "1"));
    assert_eq!(flow.edges[0].id, "e1-2");
    assert_eq!(flow.edges[1].id, "e1-3");

    let centers = centers(&flow);
    assert_eq!(centers["1"], (340.0, 50.0));
    assert_eq!(centers["2"], (150.0, 300.0));
    assert_eq!(centers["3"], (530.0, 300.0));

    // Siblings are one box plus one gap apart.
    assert_eq!(centers["3"].0 - centers["2"].0, FIXED_NODE_WIDTH + SPACING);

    let root = flow.node("1").unwrap();
    assert_eq!((root.position.x, root.position.y), (190.0, 50.0));
    assert_eq!(root.data.role, MAIN_PROCESSOR_ROLE);
    assert_eq!(flow.node("2").unwrap().data.role, COORDINATOR_ROLE);
}

#[test]
fn test_single_record_sits_at_the_origin() {
    let flow = build_workflow_tree(&[TrackingItem::new(7, 7, "only")]).unwrap().unwrap();

    assert_eq!(flow.nodes.len(), 1);
    assert!(flow.edges.is_empty());
    assert_eq!((flow.nodes[0].position.x, flow.nodes[0].position.y), (0.0, 50.0));
}

#[test]
fn test_empty_and_rootless_input_yield_none() {
    assert!(build_workflow_tree(&[]).unwrap().is_none());

    let rootless = vec![TrackingItem::new(1, 2, "A"), TrackingItem::new(2, 3, "B")];
    assert!(build_workflow_tree(&rootless).unwrap().is_none());
}

#[test]
fn test_node_count_matches_reachable_records() {
    let mut items = random_tracking(11, 40);
    // An orphan with its own little subtree.
    items.push(TrackingItem::new(500, 404, "orphan"));
    items.push(TrackingItem::new(501, 500, "orphan child"));

    let flow = build_workflow_tree(&items).unwrap().unwrap();
    assert_eq!(flow.nodes.len(), 40);
    assert_eq!(flow.edges.len(), flow.nodes.len() - 1);
    assert!(flow.node("500").is_none());
    assert!(flow.node("501").is_none());
}

#[test]
fn test_width_monotonicity_and_sibling_separation() {
    for seed in 0..20 {
        let flow = build_workflow_tree(&random_tracking(seed, 60)).unwrap().unwrap();
        let centers = centers(&flow);
        let widths = subtree_widths(&flow);

        for (parent, kids) in children(&flow) {
            let sum: f64 = kids.iter().map(|kid| widths[kid]).sum();
            assert!(widths[&parent] >= FIXED_NODE_WIDTH);
            assert!(widths[&parent] >= sum + (kids.len() - 1) as f64 * SPACING);

            // Consecutive sibling spans never overlap and keep the gap.
            for pair in kids.windows(2) {
                let left_end = centers[&pair[0]].0 + widths[&pair[0]] / 2.0;
                let right_start = centers[&pair[1]].0 - widths[&pair[1]] / 2.0;
                assert!(right_start - left_end >= SPACING - 1e-9, "seed {}: {} overlaps {}", seed, pair[0], pair[1]);
            }
        }
    }
}

#[test]
fn test_levels_are_stratified() {
    let flow = build_workflow_tree(&random_tracking(3, 80)).unwrap().unwrap();
    let depths = depths(&flow);

    for node in &flow.nodes {
        assert_eq!(node.position.y, START_Y + depths[&node.id] as f64 * LEVEL_HEIGHT);
    }
}

#[test]
fn test_roles_follow_execute_flag() {
    let items = random_tracking(5, 30);
    let flow = build_workflow_tree(&items).unwrap().unwrap();

    for item in &items {
        let node = flow.node(item.key.as_str()).unwrap();
        let expected = if item.execute { MAIN_PROCESSOR_ROLE } else { COORDINATOR_ROLE };
        assert_eq!(node.data.role, expected);
        assert_eq!(node.data.is_main_processor, item.execute);
    }
}

#[test]
fn test_repeated_calls_give_identical_output() {
    let items = random_tracking(42, 50);

    let first = build_workflow_tree(&items).unwrap();
    let second = build_workflow_tree(&items).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_deep_chain_does_not_exhaust_the_stack() {
    let mut items = vec![TrackingItem::new(0, 0, "root")];
    for i in 1..20_000i64 {
        items.push(TrackingItem::new(i, i - 1, "step"));
    }

    let flow = build_workflow_tree(&items).unwrap().unwrap();
    let last = flow.node("19999").unwrap();
    assert_eq!(last.position.y, START_Y + 19_999.0 * LEVEL_HEIGHT);
    assert_eq!(last.position.x, 0.0);
}

#[test]
fn test_custom_config_is_applied() {
    let items = vec![TrackingItem::new(1, 1, "A"), TrackingItem::new(2, 1, "B"), TrackingItem::new(3, 1, "C")];
    let config = LayoutConfig { node_width: 100.0, spacing: 10.0, level_height: 60.0, start_x: 0.0, start_y: 0.0, ..LayoutConfig::default() };

    let flow = build_workflow_tree_with(&items, &config, &mut SilentDiagnostics).unwrap().unwrap();

    assert_eq!(flow.node("1").unwrap().position.x, 5.0);
    assert_eq!(flow.node("3").unwrap().position.x, 110.0);
    assert_eq!(flow.node("3").unwrap().position.y, 60.0);
}

#[test]
fn test_invalid_config_is_rejected_before_layout() {
    let config = LayoutConfig { level_height: -5.0, ..LayoutConfig::default() };
    let result = build_workflow_tree_with(&[TrackingItem::new(1, 1, "A")], &config, &mut SilentDiagnostics);

    assert!(matches!(result, Err(Error::InvalidLayoutConfig(_))));
}

#[test]
fn test_oversized_node_width_never_reaches_the_output() {
    let items = vec![TrackingItem::new(1, 1, "A"), TrackingItem::new(2, 1, "B"), TrackingItem::new(3, 1, "C")];
    let config = LayoutConfig { node_width: 1e308, ..LayoutConfig::default() };

    let result = build_workflow_tree_with(&items, &config, &mut SilentDiagnostics);
    assert!(matches!(result, Err(Error::InvalidLayoutConfig(_))));
}
