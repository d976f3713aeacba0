//! Remote card service: endpoint resolution and the HTTP client.

pub mod client;
pub mod endpoint;

pub use client::{query_url, CardApi, HttpCardApi};
pub use endpoint::{
    resolve, ApiEndpoint, DeploymentContext, EndpointError, DEFAULT_API_BASE, NAMESPACED_API_BASE,
};
