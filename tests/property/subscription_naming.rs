// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Subscription Naming

use acmq_provisioning::derive_subscription_name;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Topic names that cannot contain ".topic" in any casing
fn unmarked_topic_name() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{0,40}".prop_filter("must not contain the topic marker", |s| {
        !s.to_ascii_lowercase().contains(".topic")
    })
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,10}"
}

fn subscriber() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_unmarked_topic_derives_nothing(topic in unmarked_topic_name(), sub in subscriber()) {
        prop_assert_eq!(derive_subscription_name(&topic, &sub), "");
    }

    #[test]
    fn prop_marker_is_case_insensitive(prefix in segment(), rest in segment(), sub in subscriber()) {
        let lower = format!("{prefix}.topic.{rest}");
        let upper = format!("{prefix}.TOPIC.{rest}");
        prop_assert_eq!(
            derive_subscription_name(&lower, &sub),
            derive_subscription_name(&upper, &sub)
        );
    }

    #[test]
    fn prop_suffix_dots_become_hyphens(
        prefix in segment(),
        parts in prop::collection::vec(segment(), 1..4),
        sub in subscriber(),
    ) {
        let topic = format!("{prefix}.topic.{}", parts.join("."));
        let expected = format!("{}-subscription-{sub}", parts.join("-"));
        prop_assert_eq!(derive_subscription_name(&topic, &sub), expected);
    }

    #[test]
    fn prop_bare_marker_yields_plain_subscription(prefix in segment(), sub in subscriber()) {
        let topic = format!("{prefix}.topic");
        prop_assert_eq!(derive_subscription_name(&topic, &sub), format!("subscription-{sub}"));
    }
}
