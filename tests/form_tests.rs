// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Form Behaviour Tests
//!
//! Drives [`ResourceForm`] the way the portal does: field edits, add/remove
//! operations, subscription drafting, validation and payload building.

mod fixtures;

use acmq_provisioning::domain::{FormField, PrincipalType, RequestType, ResourceType};
use acmq_provisioning::form::resource_form::{
    MSG_DUPLICATE_PRODUCER, MSG_DUPLICATE_PUBLISHER, MSG_DUPLICATE_SUBSCRIPTION,
    MSG_SUBSCRIBER_REQUIRED, MSG_SUBSCRIPTION_NAME_REQUIRED,
};
use acmq_provisioning::form::{AddOutcome, PendingRole, ResourceForm, TextField};
use pretty_assertions::assert_eq;
use test_case::test_case;

use fixtures::*;

// ============================================================================
// Duplicate handling
// ============================================================================

#[test]
fn test_duplicate_producer_leaves_list_unchanged() {
    let mut form = new_orders_queue_form();
    let before = form.roles().producers.clone();

    form.set_pending(PendingRole::Producer, "order-service");
    let outcome = form.add_producer();

    assert_eq!(outcome, AddOutcome::Rejected(MSG_DUPLICATE_PRODUCER.to_string()));
    assert_eq!(form.roles().producers, before);
    assert_eq!(form.errors().get(FormField::Producer), Some(MSG_DUPLICATE_PRODUCER));
}

#[test]
fn test_duplicate_publisher_sets_publisher_error() {
    let mut form = new_report_topic_form();
    form.set_pending(PendingRole::Publisher, "report-engine");

    assert!(!form.add_topic_publisher().is_added());
    assert_eq!(form.roles().producers.len(), 1);
    assert_eq!(form.errors().get(FormField::Publisher), Some(MSG_DUPLICATE_PUBLISHER));
}

#[test]
fn test_duplicate_check_is_exact_match() {
    let mut form = new_orders_queue_form();
    form.set_pending(PendingRole::Producer, "Order-Service");
    assert!(form.add_producer().is_added());
    assert_eq!(form.roles().producers.len(), 2);
}

// ============================================================================
// Subscription drafting
// ============================================================================

#[test]
fn test_subscriber_selection_derives_name() {
    let mut form = ResourceForm::new(ResourceType::Topic);
    form.set_text(TextField::Name, "accounting.topic.report.results");
    form.set_subscriber("svc-a");

    assert_eq!(form.subscription_draft().name, "report-results-subscription-svc-a");
}

#[test]
fn test_manual_name_survives_subscriber_change() {
    let mut form = ResourceForm::new(ResourceType::Topic);
    form.set_text(TextField::Name, "accounting.topic.report.results");
    form.set_subscriber("svc-a");
    form.edit_subscription_name("my-own-name");
    form.set_subscriber("svc-b");

    assert_eq!(form.subscription_draft().name, "my-own-name");
    assert!(form.subscription_draft().is_manually_edited());
}

#[test]
fn test_add_subscription_resets_draft_to_auto_mode() {
    let mut form = ResourceForm::new(ResourceType::Topic);
    form.set_text(TextField::Name, "orders.topic");
    form.toggle_subscriber_type(PrincipalType::New);
    form.set_subscriber("svc-b");
    form.edit_subscription_name("manual");

    assert!(form.add_subscription().is_added());
    let added = &form.roles().subscriptions[0];
    assert_eq!(added.name, "manual");
    assert!(added.is_new);

    assert!(!form.subscription_draft().is_manually_edited());
    form.set_subscriber("svc-c");
    assert_eq!(form.subscription_draft().name, "subscription-svc-c");
}

#[test_case("", "svc-a", MSG_SUBSCRIPTION_NAME_REQUIRED ; "missing name")]
#[test_case("sub-1", "", MSG_SUBSCRIBER_REQUIRED ; "missing subscriber")]
#[test_case("report-results-subscription-svc-a", "svc-z", MSG_DUPLICATE_SUBSCRIPTION ; "duplicate name")]
fn test_add_subscription_rejections(name: &str, subscriber: &str, expected: &str) {
    let mut form = new_report_topic_form();
    form.set_subscriber(subscriber);
    form.edit_subscription_name(name);

    assert_eq!(form.add_subscription(), AddOutcome::Rejected(expected.to_string()));
    assert_eq!(form.roles().subscriptions.len(), 1);
    assert_eq!(form.errors().get(FormField::Subscription), Some(expected));
}

// ============================================================================
// Validation
// ============================================================================

#[test_case("bad name!", false ; "space and bang rejected")]
#[test_case("order.processing-1_queue", true ; "dots digits underscore hyphen accepted")]
fn test_name_pattern(name: &str, valid: bool) {
    let mut form = new_orders_queue_form();
    form.set_text(TextField::Name, name);
    assert_eq!(form.validate(), valid);
    assert_eq!(form.errors().contains(FormField::Name), !valid);
}

#[test]
fn test_topic_without_subscriptions_always_has_general_error() {
    let mut form = new_report_topic_form();
    assert!(form.remove_subscription("report-results-subscription-svc-a"));

    assert!(!form.validate());
    assert!(form.errors().contains(FormField::General));
    assert_eq!(form.errors().len(), 1);
}

#[test]
fn test_validation_replaces_previous_errors() {
    let mut form = ResourceForm::new(ResourceType::Queue);
    assert!(!form.validate());
    assert!(form.errors().len() > 1);

    let mut form = new_orders_queue_form();
    form.set_pending(PendingRole::Producer, "order-service");
    form.add_producer();
    assert!(form.errors().contains(FormField::Producer));
    assert!(form.validate());
    assert!(form.errors().is_empty());
}

// ============================================================================
// Update mode
// ============================================================================

#[test]
fn test_update_mode_prefill_and_frozen_name() {
    let mut form = ResourceForm::for_update(&queue_resource());
    assert_eq!(form.request_type(), RequestType::Update);
    assert_eq!(form.name(), "orders.queue");
    assert_eq!(form.team(), "Team X");
    assert!(!form.has_changes());

    assert!(!form.set_text(TextField::Name, "other.queue"));
    assert_eq!(form.name(), "orders.queue");
}

#[test]
fn test_update_mode_change_then_revert() {
    let mut form = ResourceForm::for_update(&queue_resource());

    assert!(form.remove_producer("checkout-service"));
    assert!(form.has_changes());

    form.set_pending(PendingRole::Producer, "checkout-service");
    form.add_producer();
    assert!(!form.has_changes());
}

#[test]
fn test_update_topic_payload_flags_dropped_subscriptions() {
    let form = ResourceForm::for_update(&topic_resource());
    let payload = form.to_payload();

    assert_eq!(payload.request_type, RequestType::Update);
    assert_eq!(payload.consumers, vec!["svc-a".to_string(), "svc-b".to_string()]);
    assert_eq!(
        payload.subscription_name.as_deref(),
        Some("report-results-subscription-svc-a")
    );
    assert_eq!(
        payload.dropped_subscriptions(),
        &["report-results-subscription-svc-b".to_string()]
    );
}

#[test]
fn test_topic_naming_warning_is_not_an_error() {
    let mut form = new_report_topic_form();
    form.set_text(TextField::Name, "accounting.reports");

    assert!(form.naming_warning().is_some());
    assert!(form.validate());
}
