// Copyright (c) 2025 - Cowboy AI, Inc.
//! Submission Lifecycle State Machine
//!
//! One per form instance. Replaces the loose "submitting" flag with an
//! explicit record so a second submit while a request is in flight is
//! rejected by the core rather than by a disabled button.
//!
//! ```text
//! Idle ──Submit──▶ Submitting ──Succeed──▶ Succeeded
//!                      │
//!                      └──Fail──▶ Failed ──Submit──▶ Submitting
//! ```

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Where a form's submission currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        request_id: String,
        pull_requests: Vec<String>,
    },
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Submitting => "Submitting",
            Self::Succeeded { .. } => "Succeeded",
            Self::Failed { .. } => "Failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Submission events (FSM input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Submit,
    Succeed {
        request_id: String,
        pull_requests: Vec<String>,
    },
    Fail {
        message: String,
    },
}

impl StateMachine for SubmissionState {
    type Input = SubmissionInput;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use SubmissionInput::*;
        use SubmissionState::*;

        match (self, input) {
            (Idle | Failed { .. }, Submit) => Ok((Submitting, ())),
            (Submitting, Submit) => Err(TransitionError::BusinessRuleViolation(
                "A submission is already in flight".to_string(),
            )),
            (Succeeded { .. }, Submit) => Err(TransitionError::BusinessRuleViolation(
                "Order already submitted".to_string(),
            )),

            (
                Submitting,
                Succeed {
                    request_id,
                    pull_requests,
                },
            ) => Ok((
                Succeeded {
                    request_id: request_id.clone(),
                    pull_requests: pull_requests.clone(),
                },
                (),
            )),
            (Submitting, Fail { message }) => Ok((
                Failed {
                    message: message.clone(),
                },
                (),
            )),

            (from, Succeed { .. }) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                to: "Succeeded".to_string(),
            }),
            (from, Fail { .. }) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                to: "Failed".to_string(),
            }),
        }
    }
}
