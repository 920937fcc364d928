// Copyright (c) 2025 - Cowboy AI, Inc.
//! Broker Resource Read Models
//!
//! Snapshots returned by the backend. The portal never mutates these; it only
//! copies them into a local draft (see [`crate::form::ResourceForm`]).

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{Environment, ResourceType};

/// Row in the user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub description: String,
}

/// Row in the queue/topic listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
    pub environment: Environment,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub description: String,
}

/// A point-to-point destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: String,
    pub name: String,
    pub environment: Environment,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub producers: Vec<String>,
    #[serde(default)]
    pub consumers: Vec<String>,
}

/// A named subscription bound to exactly one subscriber
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionBinding {
    pub name: String,
    pub subscriber: String,
}

/// A publish-subscribe destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub environment: Environment,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub producers: Vec<String>,
    /// Accepts either `[{name, subscriber}]` or `{name: subscriber}`
    #[serde(default, deserialize_with = "deserialize_subscriptions")]
    pub subscriptions: Vec<SubscriptionBinding>,
    /// Legacy flat subscriber list some backends still send
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscribers: Vec<String>,
}

struct SubscriptionsVisitor;

impl<'de> Visitor<'de> for SubscriptionsVisitor {
    type Value = Vec<SubscriptionBinding>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of subscriptions or a map of name to subscriber")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bindings = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(binding) = seq.next_element::<SubscriptionBinding>()? {
            bindings.push(binding);
        }
        Ok(bindings)
    }

    // Entries keep the backend's order; the first one names the subscription on the wire
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut bindings = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, subscriber)) = map.next_entry::<String, String>()? {
            bindings.push(SubscriptionBinding { name, subscriber });
        }
        Ok(bindings)
    }
}

fn deserialize_subscriptions<'de, D>(deserializer: D) -> Result<Vec<SubscriptionBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(SubscriptionsVisitor)
}

/// Existing destination loaded for an update order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Queue(Queue),
    Topic(Topic),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Queue(_) => ResourceType::Queue,
            Resource::Topic(_) => ResourceType::Topic,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Queue(q) => &q.id,
            Resource::Topic(t) => &t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Queue(q) => &q.name,
            Resource::Topic(t) => &t.name,
        }
    }

    pub fn environment(&self) -> Environment {
        match self {
            Resource::Queue(q) => q.environment,
            Resource::Topic(t) => t.environment,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Resource::Queue(q) => &q.description,
            Resource::Topic(t) => &t.description,
        }
    }

    pub fn team(&self) -> &str {
        match self {
            Resource::Queue(q) => &q.team,
            Resource::Topic(t) => &t.team,
        }
    }

    pub fn producers(&self) -> &[String] {
        match self {
            Resource::Queue(q) => &q.producers,
            Resource::Topic(t) => &t.producers,
        }
    }
}

/// One grant held by a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub name: String,
    pub environment: Environment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// Grants of a principal grouped by role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoles {
    #[serde(default)]
    pub producer: Vec<RoleEntry>,
    #[serde(default)]
    pub consumer: Vec<RoleEntry>,
    #[serde(default, alias = "subscriber")]
    pub subscription: Vec<RoleEntry>,
}

impl UserRoles {
    pub fn is_empty(&self) -> bool {
        self.producer.is_empty() && self.consumer.is_empty() && self.subscription.is_empty()
    }
}

/// Broker principal with its grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub roles: UserRoles,
}
