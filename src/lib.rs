//! Provisioning core for ActiveMQ Artemis queues, topics and users
//!
//! This crate holds the order forms, validation rules, subscription naming
//! convention, submission protocol and the REST gateway to the provisioning
//! backend.

pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod gateway;
pub mod service;
pub mod state_machine;

// Re-export commonly used types
pub use config::PortalConfig;
pub use domain::derive_subscription_name;
pub use errors::{PortalError, PortalResult};
pub use form::{NewUserForm, OrderSheet, ResourceForm};
pub use gateway::{BackendGateway, HttpGateway, InMemoryGateway};
pub use service::{ProvisioningService, ResourcesView, SubmitOutcome, UsersView};
