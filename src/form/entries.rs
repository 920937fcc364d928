// Copyright (c) 2025 - Cowboy AI, Inc.
//! Role list entries held by a form draft

use serde::{Deserialize, Serialize};

use crate::domain::{PrincipalType, SubscriptionBinding};

/// Producer, consumer or publisher entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub name: String,
    /// Principal must be created as part of this order
    #[serde(default)]
    pub is_new: bool,
}

impl Assignment {
    pub fn existing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_new: false,
        }
    }

    pub fn new_principal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_new: true,
        }
    }
}

/// Named subscription bound to a subscriber
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub name: String,
    pub subscriber: String,
    #[serde(default)]
    pub is_new: bool,
}

impl Subscription {
    pub fn existing(name: impl Into<String>, subscriber: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscriber: subscriber.into(),
            is_new: false,
        }
    }
}

impl From<&SubscriptionBinding> for Subscription {
    fn from(binding: &SubscriptionBinding) -> Self {
        Self::existing(binding.name.clone(), binding.subscriber.clone())
    }
}

/// "Add producer/consumer/publisher" input that has not been committed yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAssignment {
    pub value: String,
    pub principal_type: PrincipalType,
}

impl PendingAssignment {
    /// Switching between existing and new principal clears the typed value
    pub fn toggle(&mut self, principal_type: PrincipalType) {
        self.principal_type = principal_type;
        self.value.clear();
    }

    pub(crate) fn to_assignment(&self) -> Assignment {
        Assignment {
            name: self.value.clone(),
            is_new: self.principal_type.is_new(),
        }
    }
}

/// Role lists of a queue or topic draft
///
/// Topics keep their publishers in `producers` and leave `consumers` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleLists {
    pub consumers: Vec<Assignment>,
    pub producers: Vec<Assignment>,
    pub subscriptions: Vec<Subscription>,
}

impl RoleLists {
    pub fn producer_names(&self) -> Vec<String> {
        self.producers.iter().map(|p| p.name.clone()).collect()
    }

    pub fn consumer_names(&self) -> Vec<String> {
        self.consumers.iter().map(|c| c.name.clone()).collect()
    }
}

/// Outcome of an add operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Blank input, nothing to do
    Ignored,
    /// Rejected with a message attached to the add control
    Rejected(String),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}
