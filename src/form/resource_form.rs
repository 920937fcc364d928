// Copyright (c) 2025 - Cowboy AI, Inc.
//! Queue/Topic Provisioning Form
//!
//! Holds one in-progress order: scalar fields, committed role lists, the
//! pending "add" inputs, the subscription draft, field errors and the
//! submission lifecycle. Nothing here performs I/O; see
//! [`crate::service::ProvisioningService`] for the submit path.
//!
//! # Modes
//!
//! - **New**: empty draft, every field editable
//! - **Update**: pre-filled from an existing [`Resource`]; the name is frozen
//!   and the role lists are compared with the opening snapshot
//!   (see [`has_changes`])

use tracing::debug;
use uuid::Uuid;

use super::change_detection::has_changes;
use super::entries::{AddOutcome, Assignment, PendingAssignment, RoleLists, Subscription};
use crate::domain::{
    topic_naming_warning, validate_order, Environment, FormErrors, FormField, OrderFields,
    PrincipalType, RequestType, Resource, ResourceType,
};
use crate::gateway::ProvisionPayload;
use crate::state_machine::submission::SubmissionState;
use crate::state_machine::subscription_draft::{DraftInput, SubscriptionDraft};
use crate::state_machine::{StateMachine, StateMachineWithHistory};

pub const MSG_DUPLICATE_CONSUMER: &str = "This user is already a consumer";
pub const MSG_DUPLICATE_PRODUCER: &str = "This user is already a producer";
pub const MSG_DUPLICATE_PUBLISHER: &str = "This user is already a publisher";
pub const MSG_SUBSCRIPTION_NAME_REQUIRED: &str = "Subscription name is required";
pub const MSG_SUBSCRIBER_REQUIRED: &str = "Subscriber is required";
pub const MSG_DUPLICATE_SUBSCRIPTION: &str = "A subscription with this name already exists";

/// Free-text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
    Team,
    Requester,
    TicketNumber,
}

impl TextField {
    fn error_field(&self) -> Option<FormField> {
        match self {
            Self::Name => Some(FormField::Name),
            Self::Team => Some(FormField::Team),
            Self::Requester => Some(FormField::Requester),
            Self::TicketNumber => Some(FormField::TicketNumber),
            Self::Description => None,
        }
    }
}

/// Which pending "add" input an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRole {
    Consumer,
    Producer,
    Publisher,
}

/// Draft of a queue or topic order
#[derive(Debug, Clone)]
pub struct ResourceForm {
    request_type: RequestType,
    resource_type: ResourceType,
    resource_id: Option<String>,
    name: String,
    environment: Environment,
    description: String,
    team: String,
    requester: String,
    ticket_number: String,
    roles: RoleLists,
    initial: Option<RoleLists>,
    pending_consumer: PendingAssignment,
    pending_producer: PendingAssignment,
    pending_publisher: PendingAssignment,
    subscription_draft: SubscriptionDraft,
    errors: FormErrors,
    submission: StateMachineWithHistory<SubmissionState>,
    idempotency_key: Uuid,
}

impl ResourceForm {
    /// Empty form for a new queue or topic
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            request_type: RequestType::New,
            resource_type,
            resource_id: None,
            name: String::new(),
            environment: Environment::default(),
            description: String::new(),
            team: String::new(),
            requester: String::new(),
            ticket_number: String::new(),
            roles: RoleLists::default(),
            initial: None,
            pending_consumer: PendingAssignment::default(),
            pending_producer: PendingAssignment::default(),
            pending_publisher: PendingAssignment::default(),
            subscription_draft: SubscriptionDraft::default(),
            errors: FormErrors::new(),
            submission: StateMachineWithHistory::new(SubmissionState::Idle),
            idempotency_key: Uuid::now_v7(),
        }
    }

    /// Form pre-filled from an existing resource, remembering the opening
    /// snapshot for change detection
    pub fn for_update(resource: &Resource) -> Self {
        let mut form = Self::new(resource.resource_type());
        form.request_type = RequestType::Update;
        form.resource_id = Some(resource.id().to_string());
        form.name = resource.name().to_string();
        form.environment = resource.environment();
        form.description = resource.description().to_string();
        form.team = resource.team().to_string();

        let producers = resource
            .producers()
            .iter()
            .map(|p| Assignment::existing(p.clone()))
            .collect();
        form.roles = match resource {
            Resource::Queue(queue) => RoleLists {
                consumers: queue
                    .consumers
                    .iter()
                    .map(|c| Assignment::existing(c.clone()))
                    .collect(),
                producers,
                subscriptions: Vec::new(),
            },
            Resource::Topic(topic) => RoleLists {
                consumers: Vec::new(),
                producers,
                subscriptions: topic.subscriptions.iter().map(Subscription::from).collect(),
            },
        };
        form.initial = Some(form.roles.clone());
        form
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn requester(&self) -> &str {
        &self.requester
    }

    pub fn ticket_number(&self) -> &str {
        &self.ticket_number
    }

    pub fn roles(&self) -> &RoleLists {
        &self.roles
    }

    pub fn initial_roles(&self) -> Option<&RoleLists> {
        self.initial.as_ref()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn subscription_draft(&self) -> &SubscriptionDraft {
        &self.subscription_draft
    }

    pub fn pending(&self, role: PendingRole) -> &PendingAssignment {
        match role {
            PendingRole::Consumer => &self.pending_consumer,
            PendingRole::Producer => &self.pending_producer,
            PendingRole::Publisher => &self.pending_publisher,
        }
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.current_state()
    }

    pub fn submission_history(&self) -> &StateMachineWithHistory<SubmissionState> {
        &self.submission
    }

    pub(crate) fn submission_mut(&mut self) -> &mut StateMachineWithHistory<SubmissionState> {
        &mut self.submission
    }

    /// Key sent with every submit of this form so a resubmit after a lost
    /// response cannot create a second order
    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Edit a free-text field; clears that field's error.
    ///
    /// Returns false when the edit is refused (the name of an update order).
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            TextField::Name => {
                if self.request_type == RequestType::Update {
                    debug!("Ignoring name edit on update order for {}", self.name);
                    return false;
                }
                self.name = value;
                self.apply_draft(DraftInput::TopicRenamed {
                    topic_name: self.name.clone(),
                });
            }
            TextField::Description => self.description = value,
            TextField::Team => self.team = value,
            TextField::Requester => self.requester = value,
            TextField::TicketNumber => self.ticket_number = value,
        }

        if let Some(error_field) = field.error_field() {
            self.errors.clear(error_field);
        }
        true
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Non-blocking naming-convention warning for topic names
    pub fn naming_warning(&self) -> Option<String> {
        topic_naming_warning(self.resource_type, &self.name)
    }

    // ------------------------------------------------------------------
    // Pending add inputs
    // ------------------------------------------------------------------

    pub fn set_pending(&mut self, role: PendingRole, value: impl Into<String>) {
        self.pending_mut(role).value = value.into();
    }

    pub fn toggle_pending(&mut self, role: PendingRole, principal_type: PrincipalType) {
        self.pending_mut(role).toggle(principal_type);
    }

    fn pending_mut(&mut self, role: PendingRole) -> &mut PendingAssignment {
        match role {
            PendingRole::Consumer => &mut self.pending_consumer,
            PendingRole::Producer => &mut self.pending_producer,
            PendingRole::Publisher => &mut self.pending_publisher,
        }
    }

    // ------------------------------------------------------------------
    // Subscription draft
    // ------------------------------------------------------------------

    pub fn set_subscriber(&mut self, subscriber: impl Into<String>) {
        self.apply_draft(DraftInput::SubscriberChanged {
            subscriber: subscriber.into(),
            topic_name: self.name.clone(),
        });
    }

    pub fn edit_subscription_name(&mut self, name: impl Into<String>) {
        self.apply_draft(DraftInput::NameEdited(name.into()));
    }

    pub fn toggle_subscriber_type(&mut self, subscriber_type: PrincipalType) {
        self.apply_draft(DraftInput::SubscriberTypeToggled(subscriber_type));
    }

    fn apply_draft(&mut self, input: DraftInput) {
        // Every draft input is accepted; the error arm only exists for the trait.
        if let Ok((draft, _)) = self.subscription_draft.transition(&input) {
            self.subscription_draft = draft;
        }
    }

    // ------------------------------------------------------------------
    // Add / remove
    // ------------------------------------------------------------------

    /// Commit the pending consumer
    pub fn add_consumer(&mut self) -> AddOutcome {
        let candidate = self.pending_consumer.to_assignment();
        let outcome = add_assignment(
            &mut self.roles.consumers,
            candidate,
            &mut self.errors,
            FormField::Consumer,
            MSG_DUPLICATE_CONSUMER,
        );
        if outcome.is_added() {
            self.pending_consumer = PendingAssignment::default();
        }
        outcome
    }

    /// Commit the pending producer (queues)
    pub fn add_producer(&mut self) -> AddOutcome {
        let candidate = self.pending_producer.to_assignment();
        let outcome = add_assignment(
            &mut self.roles.producers,
            candidate,
            &mut self.errors,
            FormField::Producer,
            MSG_DUPLICATE_PRODUCER,
        );
        if outcome.is_added() {
            self.pending_producer = PendingAssignment::default();
        }
        outcome
    }

    /// Commit the pending publisher (topics); publishers live in the
    /// producer list
    pub fn add_topic_publisher(&mut self) -> AddOutcome {
        let candidate = self.pending_publisher.to_assignment();
        let outcome = add_assignment(
            &mut self.roles.producers,
            candidate,
            &mut self.errors,
            FormField::Publisher,
            MSG_DUPLICATE_PUBLISHER,
        );
        if outcome.is_added() {
            self.pending_publisher = PendingAssignment::default();
        }
        outcome
    }

    /// Commit the subscription draft
    pub fn add_subscription(&mut self) -> AddOutcome {
        let draft = &self.subscription_draft;

        let rejection = if draft.name.trim().is_empty() {
            Some(MSG_SUBSCRIPTION_NAME_REQUIRED)
        } else if draft.subscriber.trim().is_empty() {
            Some(MSG_SUBSCRIBER_REQUIRED)
        } else if self.roles.subscriptions.iter().any(|s| s.name == draft.name) {
            Some(MSG_DUPLICATE_SUBSCRIPTION)
        } else {
            None
        };

        if let Some(message) = rejection {
            self.errors.insert(FormField::Subscription, message);
            return AddOutcome::Rejected(message.to_string());
        }

        self.roles.subscriptions.push(Subscription {
            name: draft.name.clone(),
            subscriber: draft.subscriber.clone(),
            is_new: draft.subscriber_type.is_new(),
        });
        self.apply_draft(DraftInput::Reset);
        self.errors.clear(FormField::Subscription);
        AddOutcome::Added
    }

    pub fn remove_consumer(&mut self, name: &str) -> bool {
        remove_by(&mut self.roles.consumers, |c| c.name == name)
    }

    /// Remove a producer (queue) or publisher (topic)
    pub fn remove_producer(&mut self, name: &str) -> bool {
        remove_by(&mut self.roles.producers, |p| p.name == name)
    }

    pub fn remove_subscription(&mut self, subscription_name: &str) -> bool {
        remove_by(&mut self.roles.subscriptions, |s| s.name == subscription_name)
    }

    // ------------------------------------------------------------------
    // Submit preparation
    // ------------------------------------------------------------------

    /// Whether the submit action is enabled
    pub fn has_changes(&self) -> bool {
        has_changes(
            self.request_type,
            self.resource_type,
            &self.roles,
            self.initial.as_ref(),
        )
    }

    /// Run every submit-time rule, replacing the stored errors.
    ///
    /// Returns true when the order is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_order(&OrderFields {
            request_type: self.request_type,
            resource_type: self.resource_type,
            name: &self.name,
            team: &self.team,
            requester: &self.requester,
            ticket_number: &self.ticket_number,
            consumer_count: self.roles.consumers.len(),
            producer_count: self.roles.producers.len(),
            subscription_count: self.roles.subscriptions.len(),
        });
        self.errors.is_empty()
    }

    /// Serialize the draft into the backend's wire shape
    pub fn to_payload(&self) -> ProvisionPayload {
        let producers = self.roles.producer_names();

        let (consumers, subscription_name, dropped_subscriptions) = match self.resource_type {
            ResourceType::Topic => {
                let subscribers = self
                    .roles
                    .subscriptions
                    .iter()
                    .map(|s| s.subscriber.clone())
                    .collect();
                let first = self
                    .roles
                    .subscriptions
                    .first()
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                let dropped = self
                    .roles
                    .subscriptions
                    .iter()
                    .skip(1)
                    .map(|s| s.name.clone())
                    .collect();
                (subscribers, Some(first), dropped)
            }
            _ => (self.roles.consumer_names(), None, Vec::new()),
        };

        ProvisionPayload {
            request_type: self.request_type,
            resource_type: self.resource_type,
            name: self.name.clone(),
            environment: self.environment,
            description: self.description.clone(),
            team: self.team.clone(),
            requester: self.requester.clone(),
            ticket_number: self.ticket_number.clone(),
            consumers,
            producers,
            subscription_name,
            dropped_subscriptions,
        }
    }
}

fn add_assignment(
    list: &mut Vec<Assignment>,
    candidate: Assignment,
    errors: &mut FormErrors,
    field: FormField,
    duplicate_message: &str,
) -> AddOutcome {
    if candidate.name.trim().is_empty() {
        return AddOutcome::Ignored;
    }

    if list.iter().any(|a| a.name == candidate.name) {
        errors.insert(field, duplicate_message);
        return AddOutcome::Rejected(duplicate_message.to_string());
    }

    list.push(candidate);
    errors.clear(field);
    AddOutcome::Added
}

fn remove_by<T>(list: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = list.len();
    list.retain(|item| !matches(item));
    list.len() != before
}
