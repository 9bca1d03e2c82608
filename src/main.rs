use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use workflow_tree_layout::api::flow_dto::render_flow_json;
use workflow_tree_layout::api::layout_config_dto::LayoutConfigDto;
use workflow_tree_layout::api::tracking_dto::TrackingFileDto;
use workflow_tree_layout::build_workflow_tree_with;
use workflow_tree_layout::domain::layout_config::LayoutConfig;
use workflow_tree_layout::loader::parser::parse_json_file;
use workflow_tree_layout::logger;
use workflow_tree_layout::traits::LoggingDiagnostics;

/// Lays out a document's routing history as a node/edge tree diagram.
#[derive(Parser, Debug)]
#[command(name = "workflow-tree-layout", version, about)]
struct Cli {
    /// JSON file with the tracking records (array or `{ "tracking": [...] }`).
    tracking_file: PathBuf,

    /// Optional JSON layout configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the diagram here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    /// Log level (error, warn, info, debug, trace). Defaults to RUST_LOG, then info.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(logger::resolve_level(cli.log_level.as_deref()), cli.log_file.as_deref());

    let config = match &cli.config {
        Some(path) => {
            let dto: LayoutConfigDto = parse_json_file(path).with_context(|| format!("reading layout config '{}'", path.display()))?;
            LayoutConfig::try_from(dto).with_context(|| format!("validating layout config '{}'", path.display()))?
        }
        None => LayoutConfig::default(),
    };

    let file_dto: TrackingFileDto =
        parse_json_file(&cli.tracking_file).with_context(|| format!("reading tracking file '{}'", cli.tracking_file.display()))?;
    let items = file_dto.into_items();
    log::info!("Loaded {} tracking records from '{}'.", items.len(), cli.tracking_file.display());

    let mut diagnostics = LoggingDiagnostics::default();
    let flow = build_workflow_tree_with(&items, &config, &mut diagnostics)?;

    if diagnostics.dropped > 0 {
        log::warn!("{} tracking records were not attached to the tree.", diagnostics.dropped);
    }

    match &flow {
        Some(flow) => log::info!("Laid out {} nodes and {} edges.", flow.nodes.len(), flow.edges.len()),
        None => log::info!("No root record found, emitting an empty diagram."),
    }

    let json = render_flow_json(flow.as_ref(), cli.pretty)?;

    match &cli.output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing diagram to '{}'", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}
