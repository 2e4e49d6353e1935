//! Power-supply catalog use-cases

pub mod service;

pub use service::PowerSupplyService;
