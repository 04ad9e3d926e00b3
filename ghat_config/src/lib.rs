mod schema;

pub use schema::{ChatConfig, Config, EndpointConfig, ExportConfig};
