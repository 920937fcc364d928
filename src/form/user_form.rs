// Copyright (c) 2025 - Cowboy AI, Inc.
//! New broker user order form

use uuid::Uuid;

use crate::domain::{validate_user_order, Environment, FormErrors, FormField, RequestType, ResourceType};
use crate::gateway::UserOrderPayload;
use crate::state_machine::submission::SubmissionState;
use crate::state_machine::StateMachineWithHistory;

/// Free-text inputs of the user form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    UserName,
    Description,
    Team,
    Requester,
}

#[derive(Debug, Clone)]
pub struct NewUserForm {
    user_name: String,
    description: String,
    team: String,
    requester: String,
    environment: Environment,
    errors: FormErrors,
    submission: StateMachineWithHistory<SubmissionState>,
    idempotency_key: Uuid,
}

impl Default for NewUserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NewUserForm {
    pub fn new() -> Self {
        Self {
            user_name: String::new(),
            description: String::new(),
            team: String::new(),
            requester: String::new(),
            environment: Environment::default(),
            errors: FormErrors::new(),
            submission: StateMachineWithHistory::new(SubmissionState::Idle),
            idempotency_key: Uuid::now_v7(),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.current_state()
    }

    pub(crate) fn submission_mut(&mut self) -> &mut StateMachineWithHistory<SubmissionState> {
        &mut self.submission
    }

    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Edit a field; clears that field's error
    pub fn set_text(&mut self, field: UserField, value: impl Into<String>) {
        let value = value.into();
        let error_field = match field {
            UserField::UserName => {
                self.user_name = value;
                Some(FormField::UserName)
            }
            UserField::Description => {
                self.description = value;
                None
            }
            UserField::Team => {
                self.team = value;
                Some(FormField::Team)
            }
            UserField::Requester => {
                self.requester = value;
                Some(FormField::Requester)
            }
        };
        if let Some(error_field) = error_field {
            self.errors.clear(error_field);
        }
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Replace the stored errors with a fresh validation pass
    pub fn validate(&mut self) -> bool {
        self.errors = validate_user_order(&self.user_name, &self.team, &self.requester);
        self.errors.is_empty()
    }

    pub fn to_payload(&self) -> UserOrderPayload {
        UserOrderPayload {
            request_type: RequestType::New,
            resource_type: ResourceType::User,
            name: self.user_name.clone(),
            description: self.description.clone(),
            team: self.team.clone(),
            requester: self.requester.clone(),
            environment: self.environment,
        }
    }
}
