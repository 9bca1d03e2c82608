use serde::{Deserialize, Serialize};

use crate::domain::layout_config::LayoutConfig;
use crate::error::{Error, Result};

/// Layout configuration file. Every field is optional; missing ones keep the
/// built-in defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutConfigDto {
    #[serde(default)]
    pub node_width: Option<f64>,
    #[serde(default)]
    pub spacing: Option<f64>,
    #[serde(default)]
    pub level_height: Option<f64>,
    #[serde(default)]
    pub start_x: Option<f64>,
    #[serde(default)]
    pub start_y: Option<f64>,
    #[serde(default)]
    pub edge_stroke: Option<String>,
    #[serde(default)]
    pub edge_stroke_width: Option<f64>,
    #[serde(default)]
    pub marker_color: Option<String>,
    #[serde(default)]
    pub marker_width: Option<f64>,
    #[serde(default)]
    pub marker_height: Option<f64>,
}

impl TryFrom<LayoutConfigDto> for LayoutConfig {
    type Error = Error;

    fn try_from(dto: LayoutConfigDto) -> Result<Self> {
        let mut config = LayoutConfig::default();

        if let Some(node_width) = dto.node_width {
            config.node_width = node_width;
        }
        if let Some(spacing) = dto.spacing {
            config.spacing = spacing;
        }
        if let Some(level_height) = dto.level_height {
            config.level_height = level_height;
        }
        if let Some(start_x) = dto.start_x {
            config.start_x = start_x;
        }
        if let Some(start_y) = dto.start_y {
            config.start_y = start_y;
        }

        let style = &mut config.edge_style;
        if let Some(stroke) = dto.edge_stroke {
            // The arrowhead follows the stroke unless colored explicitly.
            style.marker.color = stroke.clone();
            style.stroke = stroke;
        }
        if let Some(stroke_width) = dto.edge_stroke_width {
            style.stroke_width = stroke_width;
        }
        if let Some(color) = dto.marker_color {
            style.marker.color = color;
        }
        if let Some(width) = dto.marker_width {
            style.marker.width = width;
        }
        if let Some(height) = dto.marker_height {
            style.marker.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}
