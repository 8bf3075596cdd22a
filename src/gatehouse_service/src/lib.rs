pub mod gateway_service;
pub mod tracing;

pub use gateway_service::GatewayService;
