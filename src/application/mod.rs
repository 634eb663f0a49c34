pub mod escape_planning_service;

pub use escape_planning_service::*;
