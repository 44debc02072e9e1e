pub mod content_gateway;

pub use content_gateway::ContentGateway;
