// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Order Invariants
//!
//! Field rules for provisioning and user orders. Every rule is evaluated
//! independently (no short-circuit) and contributes at most one message per
//! field. An empty [`FormErrors`] means the order may be submitted.
//!
//! # Rules
//!
//! | Field | Rule |
//! |---|---|
//! | `name` | new orders only; required; `^[A-Za-z0-9._-]+$` |
//! | `team`, `requester` | required after trimming |
//! | `ticketNumber` | required; `^[A-Za-z0-9_-]+$` |
//! | `general` | queue: a consumer or a producer; topic: a subscription |
//! | `publisher` | topic: at least one publisher |

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::resource_name::{is_valid_resource_name, is_valid_ticket_number};
use super::{RequestType, ResourceType};

/// Form field an error message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    UserName,
    Team,
    Requester,
    TicketNumber,
    Consumer,
    Producer,
    Publisher,
    Subscription,
    /// Cross-field rule not tied to one input
    General,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::UserName => "userName",
            Self::Team => "team",
            Self::Requester => "requester",
            Self::TicketNumber => "ticketNumber",
            Self::Consumer => "consumer",
            Self::Producer => "producer",
            Self::Publisher => "publisher",
            Self::Subscription => "subscription",
            Self::General => "general",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field-scoped, user-facing error messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, msg)| format!("{field}: {msg}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_USER_NAME_REQUIRED: &str = "User name is required";
pub const MSG_NAME_PATTERN: &str = "Only letters, digits, dot, underscore and hyphen are allowed";
pub const MSG_TEAM_REQUIRED: &str = "Team is required";
pub const MSG_REQUESTER_REQUIRED: &str = "Requester is required";
pub const MSG_TICKET_REQUIRED: &str = "Ticket number is required";
pub const MSG_TICKET_PATTERN: &str = "Only letters, digits, underscore and hyphen are allowed";
pub const MSG_QUEUE_NEEDS_PARTICIPANT: &str = "At least one consumer or producer must be specified";
pub const MSG_TOPIC_NEEDS_SUBSCRIPTION: &str = "At least one subscription must be specified";
pub const MSG_TOPIC_NEEDS_PUBLISHER: &str = "At least one publisher must be specified";

/// Snapshot of the fields a provisioning order is validated against
#[derive(Debug, Clone, Copy)]
pub struct OrderFields<'a> {
    pub request_type: RequestType,
    pub resource_type: ResourceType,
    pub name: &'a str,
    pub team: &'a str,
    pub requester: &'a str,
    pub ticket_number: &'a str,
    pub consumer_count: usize,
    pub producer_count: usize,
    pub subscription_count: usize,
}

/// Validate a queue/topic provisioning order
pub fn validate_order(fields: &OrderFields<'_>) -> FormErrors {
    let mut errors = FormErrors::new();

    // Name is immutable in update mode
    if fields.request_type == RequestType::New {
        if let Some(msg) = check_name(fields.name, MSG_NAME_REQUIRED) {
            errors.insert(FormField::Name, msg);
        }
    }

    if let Some(msg) = check_required(fields.team, MSG_TEAM_REQUIRED) {
        errors.insert(FormField::Team, msg);
    }

    if let Some(msg) = check_required(fields.requester, MSG_REQUESTER_REQUIRED) {
        errors.insert(FormField::Requester, msg);
    }

    if let Some(msg) = check_ticket_number(fields.ticket_number) {
        errors.insert(FormField::TicketNumber, msg);
    }

    match fields.resource_type {
        ResourceType::Topic => {
            if fields.producer_count == 0 {
                errors.insert(FormField::Publisher, MSG_TOPIC_NEEDS_PUBLISHER);
            }
            if fields.subscription_count == 0 {
                errors.insert(FormField::General, MSG_TOPIC_NEEDS_SUBSCRIPTION);
            }
        }
        ResourceType::Queue => {
            if fields.consumer_count == 0 && fields.producer_count == 0 {
                errors.insert(FormField::General, MSG_QUEUE_NEEDS_PARTICIPANT);
            }
        }
        ResourceType::User => {}
    }

    errors
}

/// Validate a new broker user order
pub fn validate_user_order(user_name: &str, team: &str, requester: &str) -> FormErrors {
    let mut errors = FormErrors::new();

    if let Some(msg) = check_name(user_name, MSG_USER_NAME_REQUIRED) {
        errors.insert(FormField::UserName, msg);
    }
    if let Some(msg) = check_required(team, MSG_TEAM_REQUIRED) {
        errors.insert(FormField::Team, msg);
    }
    if let Some(msg) = check_required(requester, MSG_REQUESTER_REQUIRED) {
        errors.insert(FormField::Requester, msg);
    }

    errors
}

fn check_required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

fn check_name(value: &str, required: &'static str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(required)
    } else if !is_valid_resource_name(value) {
        Some(MSG_NAME_PATTERN)
    } else {
        None
    }
}

fn check_ticket_number(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(MSG_TICKET_REQUIRED)
    } else if !is_valid_ticket_number(value) {
        Some(MSG_TICKET_PATTERN)
    } else {
        None
    }
}
