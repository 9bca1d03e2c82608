pub mod flow_elements;
pub mod layout;
pub mod layout_config;
pub mod tracking_item;
pub mod tracking_tree;
