pub mod flow_dto;
pub mod layout_config_dto;
pub mod tracking_dto;
