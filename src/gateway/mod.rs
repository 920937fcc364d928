// Copyright (c) 2025 - Cowboy AI, Inc.
//! Backend Gateway
//!
//! The only boundary where the portal performs I/O. A [`BackendGateway`]
//! answers the six read endpoints and accepts the two order kinds.
//!
//! # Implementations
//!
//! - [`HttpGateway`] - REST client for the provisioning backend
//! - [`InMemoryGateway`] - seeded development data, used offline and in tests
//!
//! # Order semantics
//!
//! A reachable backend that refuses an order is *not* an `Err`: it yields an
//! [`OrderResponse`] with `ok == false` and the backend's message. `Err` is
//! reserved for transport and decoding failures.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Queue, ResourceSummary, Topic, User, UserSummary};
use crate::errors::PortalResult;

pub mod http;
pub mod memory;
pub mod types;

pub use http::HttpGateway;
pub use memory::{FailureMode, InMemoryGateway, RecordedOrder};
pub use types::{OrderResponse, ProvisionPayload, UserOrderPayload};

/// Header carrying the per-form idempotency key
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn list_users(&self) -> PortalResult<Vec<UserSummary>>;

    async fn get_user(&self, id: &str) -> PortalResult<User>;

    async fn list_queues(&self) -> PortalResult<Vec<ResourceSummary>>;

    async fn get_queue(&self, id: &str) -> PortalResult<Queue>;

    async fn list_topics(&self) -> PortalResult<Vec<ResourceSummary>>;

    async fn get_topic(&self, id: &str) -> PortalResult<Topic>;

    /// Submit a queue/topic order
    async fn create_provisioning_order(
        &self,
        payload: &ProvisionPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse>;

    /// Submit a new broker user order
    async fn create_user_order(
        &self,
        payload: &UserOrderPayload,
        idempotency_key: &Uuid,
    ) -> PortalResult<OrderResponse>;
}
