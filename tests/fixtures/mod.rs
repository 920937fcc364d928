// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for acmq-provisioning
//!
//! Deterministic resources and forms shared by the integration tests.
//! Resources are built here so tests never depend on the seed data layout.

#![allow(dead_code)]

use acmq_provisioning::domain::{Environment, Queue, Resource, ResourceType, SubscriptionBinding, Topic};
use acmq_provisioning::form::{PendingRole, ResourceForm, TextField};
use serde_json::{json, Value};
use uuid::Uuid;

// Fixed idempotency key (UUID v7 layout, deterministic for testing)
pub const IDEMPOTENCY_KEY: &str = "01934f4a-0001-7000-8000-000000000001";

pub fn idempotency_key() -> Uuid {
    Uuid::parse_str(IDEMPOTENCY_KEY).expect("Invalid UUID in test fixture")
}

pub fn orders_queue() -> Queue {
    Queue {
        id: "queue-10".to_string(),
        name: "orders.queue".to_string(),
        environment: Environment::Test,
        description: "Orders awaiting fulfilment".to_string(),
        team: "Team X".to_string(),
        created_at: Some("2024-05-01".to_string()),
        producers: vec!["order-service".to_string(), "checkout-service".to_string()],
        consumers: vec!["fulfilment-service".to_string()],
    }
}

pub fn report_topic() -> Topic {
    Topic {
        id: "topic-10".to_string(),
        name: "accounting.topic.report.results".to_string(),
        environment: Environment::Prod,
        description: "Finished accounting reports".to_string(),
        team: "Team Finance".to_string(),
        created_at: Some("2024-06-01".to_string()),
        producers: vec!["report-engine".to_string()],
        subscriptions: vec![
            SubscriptionBinding {
                name: "report-results-subscription-svc-a".to_string(),
                subscriber: "svc-a".to_string(),
            },
            SubscriptionBinding {
                name: "report-results-subscription-svc-b".to_string(),
                subscriber: "svc-b".to_string(),
            },
        ],
        subscribers: Vec::new(),
    }
}

pub fn queue_resource() -> Resource {
    Resource::Queue(orders_queue())
}

pub fn topic_resource() -> Resource {
    Resource::Topic(report_topic())
}

/// The new-queue order of the end-to-end scenario: one producer, no consumers
pub fn new_orders_queue_form() -> ResourceForm {
    let mut form = ResourceForm::new(ResourceType::Queue);
    form.set_text(TextField::Name, "orders.queue");
    form.set_text(TextField::Team, "Team X");
    form.set_text(TextField::Requester, "Alice");
    form.set_text(TextField::TicketNumber, "INC-1");
    form.set_pending(PendingRole::Producer, "order-service");
    form.add_producer();
    form
}

/// A valid new-topic order with one publisher and one subscription
pub fn new_report_topic_form() -> ResourceForm {
    let mut form = ResourceForm::new(ResourceType::Topic);
    form.set_text(TextField::Name, "accounting.topic.report.results");
    form.set_text(TextField::Team, "Team Finance");
    form.set_text(TextField::Requester, "Bob");
    form.set_text(TextField::TicketNumber, "CHG-42");
    form.set_pending(PendingRole::Publisher, "report-engine");
    form.add_topic_publisher();
    form.set_subscriber("svc-a");
    form.add_subscription();
    form
}

pub fn accepted_body(request_id: &str) -> Value {
    json!({
        "requestId": request_id,
        "pullRequests": ["https://github.com/example/mq-config/pull/123"],
        "message": "Order created successfully"
    })
}
