// Copyright (c) 2025 - Cowboy AI, Inc.
//! REST Gateway
//!
//! Talks to the provisioning backend over HTTP:
//!
//! ```text
//! GET  /api/users            GET /api/users/:id
//! GET  /api/queues           GET /api/queues/:id
//! GET  /api/topics           GET /api/topics/:id
//! POST /api/mq/provision     POST /api/users
//! ```
//!
//! Identifiers are percent-encoded as a single path segment.
//!
//! # Example
//!
//! ```rust,no_run
//! use acmq_provisioning::config::PortalConfig;
//! use acmq_provisioning::gateway::{BackendGateway, HttpGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpGateway::new(&PortalConfig::from_env()?)?;
//!     for queue in gateway.list_queues().await? {
//!         println!("{} ({})", queue.name, queue.environment);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{BackendGateway, OrderResponse, ProvisionPayload, UserOrderPayload, IDEMPOTENCY_HEADER};
use crate::config::PortalConfig;
use crate::domain::{Queue, ResourceSummary, Topic, User, UserSummary};
use crate::errors::{PortalError, PortalResult};

/// HTTP implementation of [`BackendGateway`]
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    pub fn new(config: &PortalConfig) -> PortalResult<Self> {
        info!("Using provisioning backend at {}", config.base_url);

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PortalError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, collection, urlencoding::encode(id))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, failure: &str) -> PortalResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PortalError::NotFound(failure.to_string()));
        }
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(PortalError::Backend {
                status: status.as_u16(),
                message: failure.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    async fn post_order<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse> {
        debug!("POST {} ({})", url, idempotency_key);
        let response = self
            .client
            .post(url)
            .header(IDEMPOTENCY_HEADER, idempotency_key.to_string())
            .json(body)
            .send()
            .await?;

        read_order_response(response).await
    }
}

/// Merge the HTTP status into the order body
async fn read_order_response(response: Response) -> PortalResult<OrderResponse> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        let mut order: OrderResponse = serde_json::from_str(&body)
            .map_err(|e| PortalError::Deserialization(e.to_string()))?;
        order.ok = true;
        return Ok(order);
    }

    warn!("Order rejected with {}: {}", status, body);
    let mut order = serde_json::from_str::<OrderResponse>(&body).unwrap_or_default();
    order.ok = false;
    Ok(order)
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_users(&self) -> PortalResult<Vec<UserSummary>> {
        self.fetch(&self.url("/api/users"), "Failed to fetch users").await
    }

    async fn get_user(&self, id: &str) -> PortalResult<User> {
        self.fetch(&self.item_url("users", id), "Failed to fetch user").await
    }

    async fn list_queues(&self) -> PortalResult<Vec<ResourceSummary>> {
        self.fetch(&self.url("/api/queues"), "Failed to fetch queues").await
    }

    async fn get_queue(&self, id: &str) -> PortalResult<Queue> {
        self.fetch(&self.item_url("queues", id), "Failed to fetch queue").await
    }

    async fn list_topics(&self) -> PortalResult<Vec<ResourceSummary>> {
        self.fetch(&self.url("/api/topics"), "Failed to fetch topics").await
    }

    async fn get_topic(&self, id: &str) -> PortalResult<Topic> {
        self.fetch(&self.item_url("topics", id), "Failed to fetch topic").await
    }

    async fn create_provisioning_order(
        &self,
        payload: &ProvisionPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse> {
        self.post_order(&self.url("/api/mq/provision"), payload, idempotency_key)
            .await
    }

    async fn create_user_order(
        &self,
        payload: &UserOrderPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse> {
        self.post_order(&self.url("/api/users"), payload, idempotency_key)
            .await
    }
}
