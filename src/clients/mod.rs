pub mod content_client;

pub use content_client::ContentClient;
