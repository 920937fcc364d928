// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wire payloads exchanged with the provisioning backend

use serde::{Deserialize, Serialize};

use crate::domain::{Environment, RequestType, ResourceType};

/// Body of `POST /api/mq/provision`
///
/// For topics `producers` carries the publishers, `consumers` the subscriber
/// of every subscription and `subscriptionName` only the first subscription's
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionPayload {
    pub request_type: RequestType,
    pub resource_type: ResourceType,
    pub name: String,
    pub environment: Environment,
    pub description: String,
    pub team: String,
    pub requester: String,
    pub ticket_number: String,
    pub consumers: Vec<String>,
    pub producers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    /// Subscription names beyond the first, which this shape cannot carry
    #[serde(skip)]
    pub dropped_subscriptions: Vec<String>,
}

impl ProvisionPayload {
    /// Names of subscriptions the backend will not see
    pub fn dropped_subscriptions(&self) -> &[String] {
        &self.dropped_subscriptions
    }
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderPayload {
    pub request_type: RequestType,
    pub resource_type: ResourceType,
    pub name: String,
    pub description: String,
    pub team: String,
    pub requester: String,
    pub environment: Environment,
}

/// Backend answer to an order
///
/// `ok` mirrors whether the HTTP status was 2xx; it is not part of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub pull_requests: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OrderResponse {
    pub fn accepted(request_id: impl Into<String>, pull_requests: Vec<String>) -> Self {
        Self {
            ok: true,
            request_id: Some(request_id.into()),
            pull_requests,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            request_id: None,
            pull_requests: Vec::new(),
            message: Some(message.into()),
        }
    }
}
