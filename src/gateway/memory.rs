// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Gateway
//!
//! Serves the development data set (five users, four queues, three topics)
//! and records every order it receives. Orders never change the data set;
//! like the real backend, an accepted order only opens pull requests.
//!
//! Resubmitting with an idempotency key that was already accepted returns
//! the original response without recording a second order.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{BackendGateway, OrderResponse, ProvisionPayload, UserOrderPayload};
use crate::domain::{Environment, Queue, ResourceSummary, Topic, User, UserSummary};
use crate::errors::{PortalError, PortalResult};

const SEED: &str = include_str!("seed.json");

const PULL_REQUEST_BASE: &str = "https://github.com/example/mq-config/pull";

#[derive(Debug, Clone, Default, Deserialize)]
struct DataSet {
    users: Vec<User>,
    queues: Vec<Queue>,
    topics: Vec<Topic>,
}

/// How the gateway should misbehave
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureMode {
    /// Orders come back with `ok == false` and this message
    RejectOrders(String),
    /// Every call fails as if the backend were unreachable
    Unavailable(String),
}

/// An order as the gateway received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOrder {
    Provision {
        payload: ProvisionPayload,
        idempotency_key: Uuid,
    },
    User {
        payload: UserOrderPayload,
        idempotency_key: Uuid,
    },
}

#[derive(Debug, Default)]
struct OrderBook {
    orders: Vec<RecordedOrder>,
    accepted: HashMap<Uuid, OrderResponse>,
}

/// In-memory implementation of [`super::BackendGateway`]
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    data: DataSet,
    book: RwLock<OrderBook>,
    failure: RwLock<Option<FailureMode>>,
    next_request: AtomicU64,
}

impl InMemoryGateway {
    /// Gateway with no users, queues or topics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gateway loaded with the development data set
    pub fn seeded() -> PortalResult<Self> {
        let data: DataSet = serde_json::from_str(SEED)
            .map_err(|e| PortalError::Configuration(format!("Invalid seed data: {}", e)))?;
        Ok(Self {
            data,
            ..Self::default()
        })
    }

    /// Add a queue on top of the current data set
    pub fn with_queue(mut self, queue: Queue) -> Self {
        self.data.queues.push(queue);
        self
    }

    /// Add a topic on top of the current data set
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.data.topics.push(topic);
        self
    }

    pub async fn set_failure(&self, failure: Option<FailureMode>) {
        *self.failure.write().await = failure;
    }

    /// Orders received so far, oldest first
    pub async fn orders(&self) -> Vec<RecordedOrder> {
        self.book.read().await.orders.clone()
    }

    async fn check_available(&self) -> PortalResult<()> {
        match &*self.failure.read().await {
            Some(FailureMode::Unavailable(message)) => Err(PortalError::Http(message.clone())),
            _ => Ok(()),
        }
    }

    async fn place_order(
        &self,
        order: RecordedOrder,
        idempotency_key: &Uuid,
        id_prefix: &str,
    ) -> PortalResult<OrderResponse> {
        self.check_available().await?;

        if let Some(FailureMode::RejectOrders(message)) = &*self.failure.read().await {
            return Ok(OrderResponse::rejected(message.clone()));
        }

        let mut book = self.book.write().await;
        if let Some(previous) = book.accepted.get(idempotency_key) {
            debug!("Replaying order for idempotency key {}", idempotency_key);
            return Ok(previous.clone());
        }

        let n = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        let response = OrderResponse {
            message: Some("Order created successfully".to_string()),
            ..OrderResponse::accepted(
                format!("{id_prefix}-{n}"),
                vec![format!("{PULL_REQUEST_BASE}/{}", 122 + n)],
            )
        };

        book.orders.push(order);
        book.accepted.insert(*idempotency_key, response.clone());
        Ok(response)
    }
}

fn summarize(
    id: &str,
    name: &str,
    environment: Environment,
    team: &str,
    description: &str,
) -> ResourceSummary {
    ResourceSummary {
        id: id.to_string(),
        name: name.to_string(),
        environment,
        team: team.to_string(),
        description: description.to_string(),
    }
}

#[async_trait]
impl BackendGateway for InMemoryGateway {
    async fn list_users(&self) -> PortalResult<Vec<UserSummary>> {
        self.check_available().await?;
        Ok(self
            .data
            .users
            .iter()
            .map(|u| UserSummary {
                id: u.id.clone(),
                name: u.name.clone(),
                team: u.team.clone(),
                description: u.description.clone(),
            })
            .collect())
    }

    async fn get_user(&self, id: &str) -> PortalResult<User> {
        self.check_available().await?;
        self.data
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| PortalError::NotFound("User not found".to_string()))
    }

    async fn list_queues(&self) -> PortalResult<Vec<ResourceSummary>> {
        self.check_available().await?;
        Ok(self
            .data
            .queues
            .iter()
            .map(|q| summarize(&q.id, &q.name, q.environment, &q.team, &q.description))
            .collect())
    }

    async fn get_queue(&self, id: &str) -> PortalResult<Queue> {
        self.check_available().await?;
        self.data
            .queues
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| PortalError::NotFound("Queue not found".to_string()))
    }

    async fn list_topics(&self) -> PortalResult<Vec<ResourceSummary>> {
        self.check_available().await?;
        Ok(self
            .data
            .topics
            .iter()
            .map(|t| summarize(&t.id, &t.name, t.environment, &t.team, &t.description))
            .collect())
    }

    async fn get_topic(&self, id: &str) -> PortalResult<Topic> {
        self.check_available().await?;
        self.data
            .topics
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| PortalError::NotFound("Topic not found".to_string()))
    }

    async fn create_provisioning_order(
        &self,
        payload: &ProvisionPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse> {
        let order = RecordedOrder::Provision {
            payload: payload.clone(),
            idempotency_key: *idempotency_key,
        };
        self.place_order(order, idempotency_key, "REQ").await
    }

    async fn create_user_order(
        &self,
        payload: &UserOrderPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse> {
        let order = RecordedOrder::User {
            payload: payload.clone(),
            idempotency_key: *idempotency_key,
        };
        self.place_order(order, idempotency_key, "USER").await
    }
}
