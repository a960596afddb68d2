use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::{ResourceApi, SessionFilter};
use super::envelope::Envelope;
use super::error::ApiError;
use crate::config::ConsoleConfig;
use crate::models::{Session, Space};

/// `getConfigs` wraps the blob one level deep on the wire.
#[derive(Debug, Deserialize)]
struct ConfigsData {
    configs: Value,
}

/// HTTP implementation of the Resource API against the backend REST surface.
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = self.request(builder).send().await.map_err(ApiError::from)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport(format!(
                "http status {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }
        response
            .json::<Envelope<T>>()
            .await
            .map_err(|err| ApiError::Protocol(err.to_string()))
    }

    /// Runs a call whose envelope carries no payload the console cares about.
    async fn send_unit(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.send::<Value>(builder).await?.into_result()?;
        Ok(())
    }
}

#[async_trait]
impl ResourceApi for HttpApi {
    async fn list_spaces(&self) -> Result<Vec<Space>, ApiError> {
        let builder = self.client.get(self.url("/spaces"));
        let data = self.send::<Vec<Space>>(builder).await?.into_result()?;
        Ok(data.unwrap_or_default())
    }

    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(space_id) = filter.space_id {
            query.push(("space_id", space_id));
        }
        if let Some(not_connected) = filter.not_connected {
            query.push(("not_connected", not_connected.to_string()));
        }
        let builder = self.client.get(self.url("/sessions")).query(&query);
        let data = self.send::<Vec<Session>>(builder).await?.into_result()?;
        Ok(data.unwrap_or_default())
    }

    async fn create_space(&self, configs: Value) -> Result<(), ApiError> {
        let builder = self
            .client
            .post(self.url("/spaces"))
            .json(&json!({ "configs": configs }));
        self.send_unit(builder).await
    }

    async fn create_session(
        &self,
        space_id: Option<String>,
        configs: Value,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "configs": configs });
        if let Some(space_id) = space_id {
            body["space_id"] = Value::String(space_id);
        }
        let builder = self.client.post(self.url("/sessions")).json(&body);
        self.send_unit(builder).await
    }

    async fn delete_space(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.client.delete(self.url(&format!("/spaces/{id}")));
        self.send_unit(builder).await
    }

    async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.client.delete(self.url(&format!("/sessions/{id}")));
        self.send_unit(builder).await
    }

    async fn space_configs(&self, id: &str) -> Result<Value, ApiError> {
        let builder = self.client.get(self.url(&format!("/spaces/{id}/configs")));
        let data = self.send::<ConfigsData>(builder).await?.into_result()?;
        data.map(|d| d.configs)
            .ok_or_else(|| ApiError::Protocol("configs payload missing".into()))
    }

    async fn session_configs(&self, id: &str) -> Result<Value, ApiError> {
        let builder = self
            .client
            .get(self.url(&format!("/sessions/{id}/configs")));
        let data = self.send::<ConfigsData>(builder).await?.into_result()?;
        data.map(|d| d.configs)
            .ok_or_else(|| ApiError::Protocol("configs payload missing".into()))
    }

    async fn update_space_configs(&self, id: &str, configs: Value) -> Result<(), ApiError> {
        let builder = self
            .client
            .put(self.url(&format!("/spaces/{id}/configs")))
            .json(&json!({ "configs": configs }));
        self.send_unit(builder).await
    }

    async fn update_session_configs(&self, id: &str, configs: Value) -> Result<(), ApiError> {
        let builder = self
            .client
            .put(self.url(&format!("/sessions/{id}/configs")))
            .json(&json!({ "configs": configs }));
        self.send_unit(builder).await
    }

    async fn connect_session(&self, session_id: &str, space_id: &str) -> Result<(), ApiError> {
        let builder = self
            .client
            .post(self.url(&format!("/sessions/{session_id}/connect")))
            .json(&json!({ "space_id": space_id }));
        self.send_unit(builder).await
    }
}
