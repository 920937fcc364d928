// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! Orchestrates forms and the backend gateway.
//!
//! ```text
//! View (catalog) ──selection──▶ ResourceForm / NewUserForm
//!                                     │
//!                          ProvisioningService::submit
//!                                     │
//!                               BackendGateway
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use acmq_provisioning::domain::ResourceType;
//! use acmq_provisioning::form::{PendingRole, ResourceForm, TextField};
//! use acmq_provisioning::gateway::InMemoryGateway;
//! use acmq_provisioning::service::ProvisioningService;
//!
//! # tokio_test::block_on(async {
//! let gateway = Arc::new(InMemoryGateway::seeded().unwrap());
//! let service = ProvisioningService::new(gateway, Duration::ZERO);
//!
//! let mut form = ResourceForm::new(ResourceType::Queue);
//! form.set_text(TextField::Name, "orders.queue");
//! form.set_text(TextField::Team, "Team X");
//! form.set_text(TextField::Requester, "Alice");
//! form.set_text(TextField::TicketNumber, "INC-1");
//! form.set_pending(PendingRole::Producer, "order-service");
//! form.add_producer();
//!
//! let outcome = service.submit(&mut form).await;
//! assert!(outcome.is_accepted());
//! # });
//! ```

pub mod catalog;
pub mod provisioning;

pub use catalog::{LoadState, ResourcesView, Tab, UsersView};
pub use provisioning::{OrderKind, ProvisioningService, SubmitOutcome, MSG_FALLBACK_ERROR};
