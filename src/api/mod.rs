//! Server client module for HTTP communication

mod client;
mod traits;
mod types;

pub use client::{resolve_server_url, ServerClient};
pub use traits::ServerClientTrait;
pub use types::{CreateDatasetRequest, CreatedDataset};

#[cfg(test)]
pub use traits::MockServerClientTrait;
