// Copyright (c) 2025 - Cowboy AI, Inc.
//! Order Forms
//!
//! Pure, synchronous form state. The forms own their drafts, field errors
//! and submission state machines; network calls happen in
//! [`crate::service`].

pub mod change_detection;
pub mod entries;
pub mod order_sheet;
pub mod resource_form;
pub mod user_form;

pub use change_detection::has_changes;
pub use entries::{AddOutcome, Assignment, PendingAssignment, RoleLists, Subscription};
pub use order_sheet::{OrderSheet, SheetSubscription};
pub use resource_form::{PendingRole, ResourceForm, TextField};
pub use user_form::{NewUserForm, UserField};
