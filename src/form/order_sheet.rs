// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative order description
//!
//! An [`OrderSheet`] is the JSON document the CLI reads for
//! `provision --file`. It is replayed through the same form operations an
//! interactive user would perform, so duplicate checks and subscription
//! name derivation apply unchanged.
//!
//! ```json
//! {
//!   "resourceType": "topic",
//!   "name": "orders.topic.created",
//!   "team": "Team X",
//!   "requester": "Alice",
//!   "ticketNumber": "INC-1",
//!   "publishers": [{ "name": "order-service" }],
//!   "subscriptions": [{ "subscriber": "svc-a" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::entries::{AddOutcome, Assignment};
use super::resource_form::{PendingRole, ResourceForm, TextField};
use crate::domain::{Environment, PrincipalType, RequestType, Resource, ResourceType};
use crate::errors::{PortalError, PortalResult};

/// Subscription line of a sheet; the name is derived when omitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSubscription {
    pub subscriber: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSheet {
    #[serde(default)]
    pub request_type: RequestType,
    pub resource_type: ResourceType,
    /// Required for updates; new orders use `name`
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub requester: String,
    #[serde(default)]
    pub ticket_number: String,
    #[serde(default)]
    pub consumers: Vec<Assignment>,
    #[serde(default)]
    pub producers: Vec<Assignment>,
    #[serde(default)]
    pub publishers: Vec<Assignment>,
    #[serde(default)]
    pub subscriptions: Vec<SheetSubscription>,
    /// Names of existing entries to drop (update orders)
    #[serde(default)]
    pub remove: Vec<String>,
}

impl OrderSheet {
    pub fn from_json(text: &str) -> PortalResult<Self> {
        serde_json::from_str(text).map_err(|e| PortalError::Deserialization(e.to_string()))
    }

    /// Build a form by replaying the sheet.
    ///
    /// `existing` is the current resource for update orders.
    pub fn into_form(self, existing: Option<&Resource>) -> PortalResult<ResourceForm> {
        let mut form = match (self.request_type, existing) {
            (RequestType::Update, Some(resource)) => {
                if resource.resource_type() != self.resource_type {
                    return Err(PortalError::Submission(format!(
                        "{} is a {}, not a {}",
                        resource.name(),
                        resource.resource_type(),
                        self.resource_type
                    )));
                }
                ResourceForm::for_update(resource)
            }
            (RequestType::Update, None) => {
                return Err(PortalError::Submission(
                    "Update orders need the existing resource".to_string(),
                ))
            }
            (RequestType::New, _) => {
                let mut form = ResourceForm::new(self.resource_type);
                form.set_text(TextField::Name, self.name.as_str());
                form.set_environment(self.environment);
                form
            }
        };

        if !self.description.is_empty() {
            form.set_text(TextField::Description, self.description.as_str());
        }
        if let Some(team) = &self.team {
            form.set_text(TextField::Team, team.as_str());
        }
        form.set_text(TextField::Requester, self.requester.as_str());
        form.set_text(TextField::TicketNumber, self.ticket_number.as_str());

        for name in &self.remove {
            let removed = form.remove_consumer(name)
                | form.remove_producer(name)
                | form.remove_subscription(name);
            if !removed {
                return Err(PortalError::Submission(format!("{name} is not on this order")));
            }
        }

        for consumer in &self.consumers {
            add_pending(&mut form, PendingRole::Consumer, consumer)?;
        }
        for producer in &self.producers {
            add_pending(&mut form, PendingRole::Producer, producer)?;
        }
        for publisher in &self.publishers {
            add_pending(&mut form, PendingRole::Publisher, publisher)?;
        }
        for subscription in &self.subscriptions {
            form.toggle_subscriber_type(principal_type(subscription.is_new));
            form.set_subscriber(subscription.subscriber.as_str());
            if let Some(name) = &subscription.name {
                form.edit_subscription_name(name.as_str());
            }
            reject_to_error(form.add_subscription())?;
        }

        Ok(form)
    }
}

fn principal_type(is_new: bool) -> PrincipalType {
    if is_new {
        PrincipalType::New
    } else {
        PrincipalType::Existing
    }
}

fn add_pending(form: &mut ResourceForm, role: PendingRole, entry: &Assignment) -> PortalResult<()> {
    form.toggle_pending(role, principal_type(entry.is_new));
    form.set_pending(role, entry.name.as_str());
    let outcome = match role {
        PendingRole::Consumer => form.add_consumer(),
        PendingRole::Producer => form.add_producer(),
        PendingRole::Publisher => form.add_topic_publisher(),
    };
    reject_to_error(outcome)
}

fn reject_to_error(outcome: AddOutcome) -> PortalResult<()> {
    match outcome {
        AddOutcome::Rejected(message) => Err(PortalError::Submission(message)),
        AddOutcome::Added | AddOutcome::Ignored => Ok(()),
    }
}
