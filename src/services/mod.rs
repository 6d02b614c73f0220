//! Service layer modules for external integrations.

pub mod api_client;

pub use api_client::{ForwardedCredentials, RemoteApiClient, RemoteUser};
