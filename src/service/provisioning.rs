// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Service
//!
//! Runs the submit protocol for queue/topic and user orders:
//!
//! ```text
//! guard (SubmissionState) → validate → change check → payload
//!     → gateway → Succeeded | Failed → (delay) → on_success
//! ```
//!
//! The form is never cleared on failure, and nothing is retried
//! automatically. A manual resubmit of the same form reuses its
//! idempotency key.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::FormErrors;
use crate::errors::PortalError;
use crate::form::{NewUserForm, ResourceForm};
use crate::gateway::{BackendGateway, OrderResponse};
use crate::state_machine::submission::{SubmissionInput, SubmissionState};
use crate::state_machine::{StateMachine, StateMachineWithHistory};

/// Fallback when a rejected order carries no message
pub const MSG_FALLBACK_ERROR: &str = "An error occurred";

/// Which order form produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Queue or topic order
    Resource,
    /// New broker user order
    User,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the errors are also stored on the form
    Invalid(FormErrors),
    /// Update order identical to its opening snapshot
    NoChanges,
    /// Submission state refused the attempt (in flight or already done)
    Blocked(String),
    Accepted {
        kind: OrderKind,
        request_id: String,
        pull_requests: Vec<String>,
    },
    /// Backend refusal or transport failure
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Text for the result banner, if this outcome shows one
    pub fn banner(&self) -> Option<String> {
        match self {
            Self::Accepted {
                kind: OrderKind::Resource,
                request_id,
                ..
            } => Some(format!("Order created! Request ID: {request_id}")),
            Self::Accepted {
                kind: OrderKind::User,
                request_id,
                ..
            } => Some(format!("User order created! Request ID: {request_id}")),
            Self::Rejected { message } => Some(message.clone()),
            Self::Blocked(message) => Some(message.clone()),
            Self::Invalid(_) | Self::NoChanges => None,
        }
    }
}

/// Application service driving order submission
#[derive(Clone)]
pub struct ProvisioningService {
    gateway: Arc<dyn BackendGateway>,
    success_delay: Duration,
}

impl ProvisioningService {
    pub fn new(gateway: Arc<dyn BackendGateway>, success_delay: Duration) -> Self {
        Self {
            gateway,
            success_delay,
        }
    }

    pub fn success_delay(&self) -> Duration {
        self.success_delay
    }

    /// Submit a queue/topic order
    pub async fn submit(&self, form: &mut ResourceForm) -> SubmitOutcome {
        if let Err(e) = check_can_submit(form.submission_state()) {
            return e;
        }

        if !form.validate() {
            info!("Order for {:?} failed validation", form.name());
            return SubmitOutcome::Invalid(form.errors().clone());
        }

        if !form.has_changes() {
            return SubmitOutcome::NoChanges;
        }

        let payload = form.to_payload();
        if !payload.dropped_subscriptions().is_empty() {
            warn!(
                "Topic {} carries {} subscriptions; only {:?} is sent, dropping {:?}",
                payload.name,
                payload.dropped_subscriptions().len() + 1,
                payload.subscription_name,
                payload.dropped_subscriptions()
            );
        }

        if let Err(e) = begin(form.submission_mut()) {
            return e;
        }

        info!(
            "Submitting {} {} order for {} ({})",
            payload.request_type,
            payload.resource_type,
            payload.name,
            payload.environment
        );
        let result = self
            .gateway
            .create_provisioning_order(&payload, &form.idempotency_key())
            .await;

        finish(form.submission_mut(), OrderKind::Resource, result)
    }

    /// Submit, then run `on_success` after the success delay if accepted
    pub async fn submit_and_notify<F>(&self, form: &mut ResourceForm, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(&SubmitOutcome),
    {
        let outcome = self.submit(form).await;
        self.notify(&outcome, on_success).await;
        outcome
    }

    /// Submit a new broker user order
    pub async fn submit_user_order(&self, form: &mut NewUserForm) -> SubmitOutcome {
        if let Err(e) = check_can_submit(form.submission_state()) {
            return e;
        }

        if !form.validate() {
            return SubmitOutcome::Invalid(form.errors().clone());
        }

        if let Err(e) = begin(form.submission_mut()) {
            return e;
        }

        let payload = form.to_payload();
        info!("Submitting user order for {} ({})", payload.name, payload.environment);
        let result = self
            .gateway
            .create_user_order(&payload, &form.idempotency_key())
            .await;

        finish(form.submission_mut(), OrderKind::User, result)
    }

    pub async fn submit_user_order_and_notify<F>(
        &self,
        form: &mut NewUserForm,
        on_success: F,
    ) -> SubmitOutcome
    where
        F: FnOnce(&SubmitOutcome),
    {
        let outcome = self.submit_user_order(form).await;
        self.notify(&outcome, on_success).await;
        outcome
    }

    async fn notify<F>(&self, outcome: &SubmitOutcome, on_success: F)
    where
        F: FnOnce(&SubmitOutcome),
    {
        if outcome.is_accepted() {
            if !self.success_delay.is_zero() {
                tokio::time::sleep(self.success_delay).await;
            }
            on_success(outcome);
        }
    }
}

fn check_can_submit(state: &SubmissionState) -> Result<(), SubmitOutcome> {
    state
        .transition(&SubmissionInput::Submit)
        .map(|_| ())
        .map_err(|e| SubmitOutcome::Blocked(e.to_string()))
}

fn begin(machine: &mut StateMachineWithHistory<SubmissionState>) -> Result<(), SubmitOutcome> {
    machine
        .transition_with_history(SubmissionInput::Submit, Utc::now())
        .map_err(|e| SubmitOutcome::Blocked(e.to_string()))
}

fn finish(
    machine: &mut StateMachineWithHistory<SubmissionState>,
    kind: OrderKind,
    result: Result<OrderResponse, PortalError>,
) -> SubmitOutcome {
    let (input, outcome) = match result {
        Ok(OrderResponse {
            ok: true,
            request_id: Some(request_id),
            pull_requests,
            ..
        }) => {
            info!("Order accepted: {}", request_id);
            (
                SubmissionInput::Succeed {
                    request_id: request_id.clone(),
                    pull_requests: pull_requests.clone(),
                },
                SubmitOutcome::Accepted {
                    kind,
                    request_id,
                    pull_requests,
                },
            )
        }
        // A resubmit reuses the idempotency key
        Ok(response) if response.ok => {
            let e =
                PortalError::Deserialization("accepted order carries no requestId".to_string());
            error!("Unusable order response: {}", e);
            rejected(format!("Could not create order: {}", e.banner_message()))
        }
        Ok(response) => {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| MSG_FALLBACK_ERROR.to_string());
            warn!("Order rejected: {}", message);
            rejected(message)
        }
        Err(e) => {
            error!("Order transport failure: {}", e);
            rejected(format!("Could not create order: {}", e.banner_message()))
        }
    };

    // Submitting always accepts Succeed and Fail.
    if let Err(e) = machine.transition_with_history(input, Utc::now()) {
        error!("Submission state out of sync: {}", e);
    }
    outcome
}

fn rejected(message: String) -> (SubmissionInput, SubmitOutcome) {
    (
        SubmissionInput::Fail {
            message: message.clone(),
        },
        SubmitOutcome::Rejected { message },
    )
}
