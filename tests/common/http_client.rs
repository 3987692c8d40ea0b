//! Thin JSON client for tests that talk to a spawned gateway.

use serde_json::Value;

use lodestone::LODESTONE_STATUS_HEADER;

/// One decoded HTTP exchange: status code, gateway status header, JSON body.
#[derive(Debug)]
pub struct JsonReply {
    pub status: reqwest::StatusCode,
    pub gateway_status: Option<String>,
    pub body: Value,
}

impl JsonReply {
    /// The `X-Lodestone-Status` header value, or empty when absent.
    pub fn status_header(&self) -> &str {
        self.gateway_status.as_deref().unwrap_or("")
    }
}

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_json(&self, path: &str) -> anyhow::Result<JsonReply> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> anyhow::Result<JsonReply> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> anyhow::Result<JsonReply> {
        let status = response.status();
        let gateway_status = response
            .headers()
            .get(LODESTONE_STATUS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.json().await?;
        Ok(JsonReply {
            status,
            gateway_status,
            body,
        })
    }
}
