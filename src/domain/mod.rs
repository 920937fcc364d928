// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Domain Models
//!
//! Core concepts for ordering broker resources: the vocabulary of resource and
//! request types, name patterns, read models returned by the backend, the
//! subscription naming convention and the order invariants.
//!
//! # Name Patterns
//!
//! - [`is_valid_resource_name`] - `^[A-Za-z0-9._-]+$`
//! - [`is_valid_ticket_number`] - `^[A-Za-z0-9_-]+$`
//!
//! # Read Models
//!
//! - [`Queue`], [`Topic`], [`User`] and their listing summaries
//!
//! # Pure Functions
//!
//! - [`derive_subscription_name`] - naming convention for topic subscriptions
//! - [`validate_order`] / [`validate_user_order`] - submit-time rules

pub mod invariants;
pub mod naming;
pub mod resource;
pub mod resource_name;
pub mod resource_type;

pub use invariants::{validate_order, validate_user_order, FormErrors, FormField, OrderFields};
pub use naming::{derive_subscription_name, topic_naming_warning, TOPIC_MARKER};
pub use resource::{
    Queue, Resource, ResourceSummary, RoleEntry, SubscriptionBinding, Topic, User, UserRoles,
    UserSummary,
};
pub use resource_name::{is_valid_resource_name, is_valid_ticket_number};
pub use resource_type::{Environment, PrincipalType, RequestType, ResourceType};
