// Copyright (c) 2025 - Cowboy AI, Inc.
//! End-to-End Provisioning Flow Tests
//!
//! Form → ProvisioningService → gateway → view refresh, against both the
//! in-memory gateway and a wiremock backend.

mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use acmq_provisioning::domain::{Queue, Resource};
use acmq_provisioning::form::{NewUserForm, PendingRole, ResourceForm, TextField, UserField};
use acmq_provisioning::gateway::{FailureMode, InMemoryGateway, RecordedOrder};
use acmq_provisioning::service::{
    LoadState, OrderKind, ProvisioningService, ResourcesView, SubmitOutcome, Tab,
};
use acmq_provisioning::state_machine::submission::SubmissionState;
use acmq_provisioning::{HttpGateway, PortalConfig};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::*;

#[tokio::test]
async fn test_new_queue_order_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/mq/provision"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body("REQ-1001")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = Arc::new(
        HttpGateway::new(&PortalConfig {
            base_url: server.uri(),
            ..PortalConfig::default()
        })
        .expect("Failed to build gateway"),
    );
    let service = ProvisioningService::new(gateway.clone(), Duration::from_millis(20));
    let mut view = ResourcesView::new(gateway);
    let mut form = new_orders_queue_form();

    let mut refreshed = false;
    let outcome = service
        .submit_and_notify(&mut form, |_| refreshed = true)
        .await;

    assert_eq!(
        outcome.banner().as_deref(),
        Some("Order created! Request ID: REQ-1001")
    );
    assert!(refreshed);
    assert!(view.on_provision_success().await);
    assert_eq!(view.list_state(), LoadState::Loaded);
    assert_eq!(
        form.submission_state(),
        &SubmissionState::Succeeded {
            request_id: "REQ-1001".to_string(),
            pull_requests: vec!["https://github.com/example/mq-config/pull/123".to_string()],
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_success_callback_waits_for_delay() {
    let gateway = Arc::new(InMemoryGateway::seeded().expect("seed data"));
    let service = ProvisioningService::new(gateway, Duration::from_secs(2));
    let mut form = new_orders_queue_form();

    let started = tokio::time::Instant::now();
    let mut called_at = None;
    service
        .submit_and_notify(&mut form, |_| called_at = Some(tokio::time::Instant::now()))
        .await;

    let called_at = called_at.expect("callback ran");
    assert!(called_at - started >= Duration::from_secs(2));
}

#[tokio::test]
async fn test_callback_not_run_on_rejection() {
    let gateway = Arc::new(InMemoryGateway::seeded().expect("seed data"));
    gateway
        .set_failure(Some(FailureMode::RejectOrders("Ticket INC-1 is closed".to_string())))
        .await;
    let service = ProvisioningService::new(gateway, Duration::ZERO);
    let mut form = new_orders_queue_form();

    let mut called = false;
    let outcome = service.submit_and_notify(&mut form, |_| called = true).await;

    assert!(!called);
    assert_eq!(outcome.banner().as_deref(), Some("Ticket INC-1 is closed"));
    assert_eq!(form.name(), "orders.queue");
}

#[tokio::test]
async fn test_manual_resubmit_reuses_idempotency_key() {
    let gateway = Arc::new(InMemoryGateway::seeded().expect("seed data"));
    let service = ProvisioningService::new(gateway.clone(), Duration::ZERO);
    let mut form = new_orders_queue_form();

    gateway
        .set_failure(Some(FailureMode::Unavailable("connection reset".to_string())))
        .await;
    assert!(matches!(
        service.submit(&mut form).await,
        SubmitOutcome::Rejected { .. }
    ));

    gateway.set_failure(None).await;
    assert!(service.submit(&mut form).await.is_accepted());

    let orders = gateway.orders().await;
    assert_eq!(orders.len(), 1);
    match &orders[0] {
        RecordedOrder::Provision {
            idempotency_key, ..
        } => assert_eq!(*idempotency_key, form.idempotency_key()),
        other => panic!("unexpected order {:?}", other),
    }
}

#[tokio::test]
async fn test_unchanged_update_is_not_submitted() {
    let gateway = Arc::new(InMemoryGateway::seeded().expect("seed data"));
    let service = ProvisioningService::new(gateway.clone(), Duration::ZERO);
    let mut view = ResourcesView::new(gateway.clone());
    view.load().await;
    view.select("queue-1").await;

    let mut form: ResourceForm = view.update_order().expect("queue selected");
    form.set_text(TextField::Requester, "Alice");
    form.set_text(TextField::TicketNumber, "INC-2");

    assert_eq!(service.submit(&mut form).await, SubmitOutcome::NoChanges);
    assert!(gateway.orders().await.is_empty());
}

#[tokio::test]
async fn test_new_user_order() {
    let gateway = Arc::new(InMemoryGateway::seeded().expect("seed data"));
    let service = ProvisioningService::new(gateway.clone(), Duration::ZERO);

    let mut form = NewUserForm::new();
    form.set_text(UserField::UserName, "svc-reporting");
    form.set_text(UserField::Team, "Team Data");
    form.set_text(UserField::Requester, "Bob");

    let outcome = service.submit_user_order(&mut form).await;
    assert_eq!(
        outcome.banner().as_deref(),
        Some("User order created! Request ID: USER-1")
    );
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted {
            kind: OrderKind::User,
            ..
        }
    ));
    assert!(matches!(
        gateway.orders().await.as_slice(),
        [RecordedOrder::User { .. }]
    ));
}

fn http_gateway(server: &MockServer) -> Arc<HttpGateway> {
    Arc::new(
        HttpGateway::new(&PortalConfig {
            base_url: server.uri(),
            ..PortalConfig::default()
        })
        .expect("Failed to build gateway"),
    )
}

#[tokio::test]
async fn test_accepted_order_without_request_id_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/mq/provision"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "pullRequests": [],
            "message": "Order created successfully"
        })))
        .mount(&server)
        .await;

    let service = ProvisioningService::new(http_gateway(&server), Duration::ZERO);
    let mut form = new_orders_queue_form();

    let outcome = service.submit(&mut form).await;
    assert_eq!(
        outcome.banner().as_deref(),
        Some("Could not create order: Deserialization error: accepted order carries no requestId")
    );
    assert!(matches!(
        form.submission_state(),
        SubmissionState::Failed { .. }
    ));
}

#[tokio::test]
async fn test_update_success_refreshes_selected_resource() {
    let server = MockServer::start().await;
    let before = orders_queue();
    let after = Queue {
        consumers: vec![
            "fulfilment-service".to_string(),
            "billing-service".to_string(),
        ],
        ..orders_queue()
    };

    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "queue-10", "name": "orders.queue", "environment": "test"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queues/queue-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&before))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queues/queue-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&after))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mq/provision"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body("REQ-2002")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = http_gateway(&server);
    let service = ProvisioningService::new(gateway.clone(), Duration::ZERO);
    let mut view = ResourcesView::new(gateway);
    assert!(view.load().await);
    view.select("queue-10").await;

    let mut form = view.update_order().expect("queue selected");
    form.set_text(TextField::Requester, "Alice");
    form.set_text(TextField::TicketNumber, "INC-3");
    form.set_pending(PendingRole::Consumer, "billing-service");
    form.add_consumer();
    assert!(service.submit(&mut form).await.is_accepted());

    assert!(view.on_provision_success().await);
    assert_eq!(view.selected(), Some(&Resource::Queue(after)));

    let next = view.update_order().expect("queue still selected");
    assert_eq!(next.initial_roles().map(|r| r.consumers.len()), Some(2));
    assert!(!next.has_changes());
}

#[tokio::test]
async fn test_topic_update_against_in_memory_gateway() {
    let gateway = Arc::new(
        InMemoryGateway::empty()
            .with_queue(orders_queue())
            .with_topic(report_topic()),
    );
    let service = ProvisioningService::new(gateway.clone(), Duration::ZERO);
    let mut view = ResourcesView::new(gateway.clone());
    assert!(view.load().await);
    assert_eq!(view.queues().len(), 1);

    view.switch_tab(Tab::Topics);
    view.select("topic-10").await;
    let mut form = view.update_order().expect("topic selected");
    form.set_text(TextField::Requester, "Bob");
    form.set_text(TextField::TicketNumber, "CHG-7");
    assert!(form.remove_subscription("report-results-subscription-svc-b"));

    assert!(service.submit(&mut form).await.is_accepted());
    match gateway.orders().await.as_slice() {
        [RecordedOrder::Provision { payload, .. }] => {
            assert_eq!(payload.consumers, vec!["svc-a".to_string()]);
            assert_eq!(
                payload.subscription_name.as_deref(),
                Some("report-results-subscription-svc-a")
            );
        }
        other => panic!("unexpected orders {:?}", other),
    }
}
