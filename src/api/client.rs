use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{Session, Space};

/// Server-side constraints for a session list fetch. `space_id` and
/// `not_connected` are mutually exclusive; the "all" scope maps both to
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub space_id: Option<String>,
    pub not_connected: Option<bool>,
}

impl SessionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_space(id: impl Into<String>) -> Self {
        Self {
            space_id: Some(id.into()),
            not_connected: None,
        }
    }

    pub fn unconnected() -> Self {
        Self {
            space_id: None,
            not_connected: Some(true),
        }
    }
}

/// The backend collection boundary. Every call returns the decoded payload or
/// an [`ApiError`]; the console never sees the wire format.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list_spaces(&self) -> Result<Vec<Space>, ApiError>;
    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, ApiError>;

    async fn create_space(&self, configs: Value) -> Result<(), ApiError>;
    async fn create_session(
        &self,
        space_id: Option<String>,
        configs: Value,
    ) -> Result<(), ApiError>;

    async fn delete_space(&self, id: &str) -> Result<(), ApiError>;
    async fn delete_session(&self, id: &str) -> Result<(), ApiError>;

    async fn space_configs(&self, id: &str) -> Result<Value, ApiError>;
    async fn session_configs(&self, id: &str) -> Result<Value, ApiError>;
    async fn update_space_configs(&self, id: &str, configs: Value) -> Result<(), ApiError>;
    async fn update_session_configs(&self, id: &str, configs: Value) -> Result<(), ApiError>;

    async fn connect_session(&self, session_id: &str, space_id: &str) -> Result<(), ApiError>;
}
