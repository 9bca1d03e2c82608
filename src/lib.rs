use std::path::Path;

use crate::api::tracking_dto::TrackingFileDto;
use crate::domain::flow_elements::{WorkflowFlow, generate_flow_elements};
use crate::domain::layout::apply_layout;
use crate::domain::layout_config::LayoutConfig;
use crate::domain::tracking_item::TrackingItem;
use crate::domain::tracking_tree::TrackingTree;
use crate::error::Result;
use crate::loader::parser::parse_json_file;
use crate::traits::{SilentDiagnostics, TreeDiagnostics};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod traits;

/// Lays out the routing history of a document as a top-down tree diagram.
///
/// Returns `Ok(None)` when `tracking` is empty or holds no root record
/// (`key === parent`). Orphaned records are dropped silently.
pub fn build_workflow_tree(tracking: &[TrackingItem]) -> Result<Option<WorkflowFlow>> {
    build_workflow_tree_with(tracking, &LayoutConfig::default(), &mut SilentDiagnostics)
}

/// Same as [`build_workflow_tree`] with an explicit layout and an observer for
/// dropped records.
pub fn build_workflow_tree_with(
    tracking: &[TrackingItem],
    config: &LayoutConfig,
    diagnostics: &mut dyn TreeDiagnostics,
) -> Result<Option<WorkflowFlow>> {
    config.validate()?;

    let Some(mut tree) = TrackingTree::build_with(tracking, diagnostics) else {
        return Ok(None);
    };

    apply_layout(&mut tree, config)?;
    let flow = generate_flow_elements(&tree, config)?;

    Ok(Some(flow))
}

/// Loads a tracking JSON file and lays it out with the default configuration.
pub fn generate_workflow_flow(file_path: impl AsRef<Path>) -> Result<Option<WorkflowFlow>> {
    let file_dto: TrackingFileDto = parse_json_file(file_path.as_ref())?;
    let items = file_dto.into_items();
    log::info!("Loaded {} tracking records from '{}'.", items.len(), file_path.as_ref().display());

    build_workflow_tree(&items)
}
