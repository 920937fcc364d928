// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscription Draft State Machine
//!
//! The "add subscription" control of a topic form. Its name field follows the
//! naming convention until the user types into it; from then on it is left
//! alone until the subscriber type is toggled or the draft is reset.
//!
//! # States
//!
//! - AutoDerived: name tracks `derive_subscription_name(topic, subscriber)`
//! - ManuallyEdited: name is owned by the user
//!
//! # Inputs
//!
//! - SubscriberChanged: re-derive while AutoDerived
//! - TopicRenamed: re-derive while AutoDerived
//! - NameEdited: AutoDerived | ManuallyEdited → ManuallyEdited
//! - SubscriberTypeToggled: Any → AutoDerived, name and subscriber cleared
//! - Reset: Any → default draft

use super::{StateMachine, TransitionResult};
use crate::domain::{derive_subscription_name, PrincipalType};

/// Who currently owns the subscription name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMode {
    #[default]
    AutoDerived,
    ManuallyEdited,
}

/// In-progress subscription entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionDraft {
    pub name: String,
    pub subscriber: String,
    pub subscriber_type: PrincipalType,
    pub mode: NameMode,
}

impl SubscriptionDraft {
    pub fn is_manually_edited(&self) -> bool {
        self.mode == NameMode::ManuallyEdited
    }

    fn rederive(&self, topic_name: &str) -> (String, NameUpdate) {
        if self.mode == NameMode::AutoDerived && !self.subscriber.is_empty() {
            (
                derive_subscription_name(topic_name, &self.subscriber),
                NameUpdate::Derived,
            )
        } else {
            (self.name.clone(), NameUpdate::Unchanged)
        }
    }
}

/// Draft input (FSM input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftInput {
    SubscriberChanged {
        subscriber: String,
        topic_name: String,
    },
    TopicRenamed {
        topic_name: String,
    },
    NameEdited(String),
    SubscriberTypeToggled(PrincipalType),
    Reset,
}

/// What happened to the name field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameUpdate {
    /// Recomputed from the naming convention
    Derived,
    /// Replaced by user input
    Manual,
    /// Left as it was
    Unchanged,
    /// Emptied by a toggle or reset
    Cleared,
}

impl StateMachine for SubscriptionDraft {
    type Input = DraftInput;
    type Output = NameUpdate;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        match input {
            DraftInput::SubscriberChanged {
                subscriber,
                topic_name,
            } => {
                let mut next = Self {
                    subscriber: subscriber.clone(),
                    ..self.clone()
                };
                let (name, update) = next.rederive(topic_name);
                next.name = name;
                Ok((next, update))
            }
            DraftInput::TopicRenamed { topic_name } => {
                let (name, update) = self.rederive(topic_name);
                Ok((
                    Self {
                        name,
                        ..self.clone()
                    },
                    update,
                ))
            }
            DraftInput::NameEdited(name) => Ok((
                Self {
                    name: name.clone(),
                    mode: NameMode::ManuallyEdited,
                    ..self.clone()
                },
                NameUpdate::Manual,
            )),
            DraftInput::SubscriberTypeToggled(subscriber_type) => Ok((
                Self {
                    subscriber_type: *subscriber_type,
                    ..Self::default()
                },
                NameUpdate::Cleared,
            )),
            DraftInput::Reset => Ok((Self::default(), NameUpdate::Cleared)),
        }
    }
}
