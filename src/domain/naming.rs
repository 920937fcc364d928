// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscription Naming Convention
//!
//! Topic names embed a `.topic` marker segment, e.g.
//! `accounting.topic.report.results`. A subscription on such a topic is named
//! after the logical suffix that follows the marker plus the subscriber:
//!
//! ```text
//! accounting.topic.report.results + svc-a → report-results-subscription-svc-a
//! orders.topic                    + svc-b → subscription-svc-b
//! order.events                    + svc-c → "" (no convention match)
//! ```
//!
//! An empty result means the caller must not auto-apply anything and the user
//! has to type a name by hand.

use super::ResourceType;

/// Marker segment every conventional topic name contains
pub const TOPIC_MARKER: &str = ".topic";

/// Derive the suggested subscription name for `subscriber` on `topic_name`.
///
/// Pure function: returns `""` when either input is empty or the topic name
/// has no case-insensitive `.topic` segment.
pub fn derive_subscription_name(topic_name: &str, subscriber_name: &str) -> String {
    if topic_name.is_empty() || subscriber_name.is_empty() {
        return String::new();
    }

    // ASCII lowering keeps byte offsets aligned with the original string.
    let Some(marker_at) = topic_name.to_ascii_lowercase().find(TOPIC_MARKER) else {
        return String::new();
    };

    let suffix = &topic_name[marker_at + TOPIC_MARKER.len()..];
    if suffix.is_empty() {
        return format!("subscription-{subscriber_name}");
    }

    let cleaned = suffix.strip_prefix('.').unwrap_or(suffix).replace('.', "-");
    format!("{cleaned}-subscription-{subscriber_name}")
}

/// Non-blocking warning for topic names that break the naming convention
pub fn topic_naming_warning(resource_type: ResourceType, name: &str) -> Option<String> {
    if resource_type != ResourceType::Topic || name.is_empty() {
        return None;
    }

    if name.to_ascii_lowercase().contains(TOPIC_MARKER) {
        None
    } else {
        Some("Topic name does not follow the naming convention (missing \".topic\")".to_string())
    }
}
