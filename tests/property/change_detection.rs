// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Change Detection

use acmq_provisioning::domain::{RequestType, ResourceType};
use acmq_provisioning::form::{has_changes, Assignment, RoleLists, Subscription};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,8}", 0..6).prop_map(|s: BTreeSet<String>| s.into_iter().collect())
}

fn queue_lists(consumers: &[String], producers: &[String]) -> RoleLists {
    RoleLists {
        consumers: consumers.iter().map(|n| Assignment::existing(n.as_str())).collect(),
        producers: producers.iter().map(|n| Assignment::existing(n.as_str())).collect(),
        subscriptions: Vec::new(),
    }
}

fn topic_lists(producers: &[String], subscribers: &[String]) -> RoleLists {
    RoleLists {
        consumers: Vec::new(),
        producers: producers.iter().map(|n| Assignment::existing(n.as_str())).collect(),
        subscriptions: subscribers
            .iter()
            .map(|s| Subscription::existing(format!("sub-{s}"), s.as_str()))
            .collect(),
    }
}

fn update(resource_type: ResourceType, current: &RoleLists, initial: &RoleLists) -> bool {
    has_changes(RequestType::Update, resource_type, current, Some(initial))
}

proptest! {
    #[test]
    fn prop_queue_permutation_is_unchanged(
        consumers in names(),
        producers in names(),
        seed in any::<u64>(),
    ) {
        let initial = queue_lists(&consumers, &producers);
        let mut shuffled = initial.clone();
        let len = shuffled.consumers.len().max(1);
        shuffled.consumers.rotate_left((seed as usize) % len);
        shuffled.producers.reverse();

        prop_assert!(!update(ResourceType::Queue, &shuffled, &initial));
    }

    #[test]
    fn prop_queue_added_entry_is_changed(
        consumers in names(),
        producers in names(),
        extra in "[A-Z]{1,8}",
    ) {
        let initial = queue_lists(&consumers, &producers);
        let mut current = initial.clone();
        current.producers.push(Assignment::existing(extra));

        prop_assert!(update(ResourceType::Queue, &current, &initial));
    }

    #[test]
    fn prop_queue_removed_entry_is_changed(consumers in names(), producers in names()) {
        prop_assume!(!consumers.is_empty());
        let initial = queue_lists(&consumers, &producers);
        let mut current = initial.clone();
        current.consumers.pop();

        prop_assert!(update(ResourceType::Queue, &current, &initial));
    }

    #[test]
    fn prop_topic_renamed_subscription_is_changed(producers in names(), subscribers in names()) {
        prop_assume!(!subscribers.is_empty());
        let initial = topic_lists(&producers, &subscribers);
        let mut current = initial.clone();
        current.subscriptions[0].name.push_str("-renamed");

        prop_assert!(update(ResourceType::Topic, &current, &initial));
    }

    #[test]
    fn prop_topic_permutation_is_unchanged(producers in names(), subscribers in names()) {
        let initial = topic_lists(&producers, &subscribers);
        let mut current = initial.clone();
        current.subscriptions.reverse();
        current.producers.reverse();

        prop_assert!(!update(ResourceType::Topic, &current, &initial));
    }

    #[test]
    fn prop_new_orders_always_changed(consumers in names(), producers in names()) {
        let lists = queue_lists(&consumers, &producers);
        prop_assert!(has_changes(RequestType::New, ResourceType::Queue, &lists, Some(&lists)));
    }
}
