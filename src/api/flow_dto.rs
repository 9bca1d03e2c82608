use serde::{Deserialize, Serialize};

use crate::domain::flow_elements::{WorkflowEdge, WorkflowFlow, WorkflowNode};
use crate::error::Result;

/// Diagram handed to the node/edge rendering widget.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowFlowDto {
    pub nodes: Vec<WorkflowNodeDto>,
    pub edges: Vec<WorkflowEdgeDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PositionDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataDto {
    pub role: String,
    pub name: String,
    pub title: String,
    pub department: String,
    pub is_main_processor: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNodeDto {
    pub id: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub position: PositionDto,
    pub data: NodeDataDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyleDto {
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDto {
    #[serde(rename = "type")]
    pub typ: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdgeDto {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub animated: bool,
    pub style: EdgeStyleDto,
    pub marker_end: MarkerDto,
}

impl From<&WorkflowNode> for WorkflowNodeDto {
    fn from(node: &WorkflowNode) -> Self {
        WorkflowNodeDto {
            id: node.id.clone(),
            typ: node.node_type.clone(),
            position: PositionDto { x: node.position.x, y: node.position.y },
            data: NodeDataDto {
                role: node.data.role.clone(),
                name: node.data.name.clone(),
                title: node.data.title.clone(),
                department: node.data.department.clone(),
                is_main_processor: node.data.is_main_processor,
            },
        }
    }
}

impl From<&WorkflowEdge> for WorkflowEdgeDto {
    fn from(edge: &WorkflowEdge) -> Self {
        let marker = &edge.style.marker;
        WorkflowEdgeDto {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            typ: edge.edge_type.clone(),
            animated: edge.animated,
            style: EdgeStyleDto { stroke: edge.style.stroke.clone(), stroke_width: edge.style.stroke_width },
            marker_end: MarkerDto { typ: marker.kind.clone(), color: marker.color.clone(), width: marker.width, height: marker.height },
        }
    }
}

impl From<&WorkflowFlow> for WorkflowFlowDto {
    fn from(flow: &WorkflowFlow) -> Self {
        WorkflowFlowDto {
            nodes: flow.nodes.iter().map(WorkflowNodeDto::from).collect(),
            edges: flow.edges.iter().map(WorkflowEdgeDto::from).collect(),
        }
    }
}

/// Serializes a diagram for output. A missing diagram is written as `null`.
pub fn render_flow_json(flow: Option<&WorkflowFlow>, pretty: bool) -> Result<String> {
    let dto = flow.map(WorkflowFlowDto::from);
    let json = if pretty { serde_json::to_string_pretty(&dto)? } else { serde_json::to_string(&dto)? };
    Ok(json)
}
