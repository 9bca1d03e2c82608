use crate::error::{Error, Result};

/// Width of one node box, in layout units.
pub const FIXED_NODE_WIDTH: f64 = 300.0;

/// Horizontal gap between sibling subtrees.
pub const SPACING: f64 = 80.0;

/// Vertical distance between two consecutive tree levels.
pub const LEVEL_HEIGHT: f64 = 250.0;

/// Left edge of the root subtree.
pub const START_X: f64 = 0.0;

/// Top of the root level.
pub const START_Y: f64 = 50.0;

/// Upper bound for the configurable geometry values.
pub const MAX_LAYOUT_VALUE: f64 = 1e6;

pub const NODE_TYPE: &str = "organization";
pub const EDGE_TYPE: &str = "smoothstep";

pub const EDGE_STROKE_COLOR: &str = "#3b82f6";
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

pub const EDGE_MARKER_TYPE: &str = "arrowclosed";
pub const EDGE_MARKER_WIDTH: f64 = 20.0;
pub const EDGE_MARKER_HEIGHT: f64 = 20.0;

/// Arrowhead drawn at the target end of every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub kind: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
}

/// Visual attributes shared by every edge of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub marker: MarkerStyle,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        EdgeStyle {
            stroke: EDGE_STROKE_COLOR.to_string(),
            stroke_width: EDGE_STROKE_WIDTH,
            marker: MarkerStyle {
                kind: EDGE_MARKER_TYPE.to_string(),
                color: EDGE_STROKE_COLOR.to_string(),
                width: EDGE_MARKER_WIDTH,
                height: EDGE_MARKER_HEIGHT,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub spacing: f64,
    pub level_height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub edge_style: EdgeStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            node_width: FIXED_NODE_WIDTH,
            spacing: SPACING,
            level_height: LEVEL_HEIGHT,
            start_x: START_X,
            start_y: START_Y,
            edge_style: EdgeStyle::default(),
        }
    }
}

impl LayoutConfig {
    /// Rejects values that would make boxes overlap or coordinates non-finite.
    ///
    /// Geometry values are capped at `MAX_LAYOUT_VALUE`; the layout passes
    /// still check every computed width and center.
    pub fn validate(&self) -> Result<()> {
        let positive = [("nodeWidth", self.node_width), ("levelHeight", self.level_height)];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 || value > MAX_LAYOUT_VALUE {
                return Err(Error::InvalidLayoutConfig(format!(
                    "{} must be a positive number up to {}, got {}",
                    name, MAX_LAYOUT_VALUE, value
                )));
            }
        }

        if !self.spacing.is_finite() || self.spacing < 0.0 || self.spacing > MAX_LAYOUT_VALUE {
            return Err(Error::InvalidLayoutConfig(format!(
                "spacing must be a non-negative number up to {}, got {}",
                MAX_LAYOUT_VALUE, self.spacing
            )));
        }

        for (name, value) in [("startX", self.start_x), ("startY", self.start_y)] {
            if !value.is_finite() || value.abs() > MAX_LAYOUT_VALUE {
                return Err(Error::InvalidLayoutConfig(format!("{} must be within ±{}, got {}", name, MAX_LAYOUT_VALUE, value)));
            }
        }

        let marker = &self.edge_style.marker;
        let styles = [("edge stroke width", self.edge_style.stroke_width), ("marker width", marker.width), ("marker height", marker.height)];
        for (name, value) in styles {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidLayoutConfig(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        Ok(())
    }
}

/// Checks a value computed by the layout passes.
pub(crate) fn ensure_finite(name: &str, key: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidLayoutConfig(format!("{} of node '{}' is not finite ({})", name, key, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width, 300.0);
        assert_eq!(config.spacing, 80.0);
        assert_eq!(config.level_height, 250.0);
        assert_eq!((config.start_x, config.start_y), (0.0, 50.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_width = LayoutConfig { node_width: 0.0, ..LayoutConfig::default() };
        assert!(matches!(zero_width.validate(), Err(Error::InvalidLayoutConfig(_))));

        let negative_spacing = LayoutConfig { spacing: -1.0, ..LayoutConfig::default() };
        assert!(matches!(negative_spacing.validate(), Err(Error::InvalidLayoutConfig(_))));

        let nan_start = LayoutConfig { start_y: f64::NAN, ..LayoutConfig::default() };
        assert!(matches!(nan_start.validate(), Err(Error::InvalidLayoutConfig(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_geometry() {
        let huge_width = LayoutConfig { node_width: 1e308, ..LayoutConfig::default() };
        assert!(matches!(huge_width.validate(), Err(Error::InvalidLayoutConfig(_))));

        let huge_spacing = LayoutConfig { spacing: MAX_LAYOUT_VALUE * 2.0, ..LayoutConfig::default() };
        assert!(matches!(huge_spacing.validate(), Err(Error::InvalidLayoutConfig(_))));

        let far_start = LayoutConfig { start_x: -2e6, ..LayoutConfig::default() };
        assert!(matches!(far_start.validate(), Err(Error::InvalidLayoutConfig(_))));

        let at_cap = LayoutConfig { node_width: MAX_LAYOUT_VALUE, ..LayoutConfig::default() };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_marker_size() {
        let mut negative = LayoutConfig::default();
        negative.edge_style.marker.width = -4.0;
        assert!(matches!(negative.validate(), Err(Error::InvalidLayoutConfig(_))));

        let mut nan = LayoutConfig::default();
        nan.edge_style.marker.height = f64::NAN;
        assert!(matches!(nan.validate(), Err(Error::InvalidLayoutConfig(_))));
    }

    #[test]
    fn test_zero_spacing_is_allowed() {
        let packed = LayoutConfig { spacing: 0.0, ..LayoutConfig::default() };
        assert!(packed.validate().is_ok());
    }
}
