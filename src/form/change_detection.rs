// Copyright (c) 2025 - Cowboy AI, Inc.
//! Change Detection for Update Orders
//!
//! An update order may only be submitted when its role lists differ from the
//! snapshot the form was opened with. Producer and consumer lists compare as
//! name sets (order-independent); subscriptions compare as `(name, subscriber)`
//! pairs.

use super::entries::{Assignment, RoleLists, Subscription};
use crate::domain::{RequestType, ResourceType};

/// Decide whether the current draft differs from its initial snapshot.
///
/// Always true for new orders and when no snapshot exists.
pub fn has_changes(
    request_type: RequestType,
    resource_type: ResourceType,
    current: &RoleLists,
    initial: Option<&RoleLists>,
) -> bool {
    let Some(initial) = initial else {
        return true;
    };
    if request_type != RequestType::Update {
        return true;
    }

    match resource_type {
        ResourceType::Topic => {
            !same_names(&current.producers, &initial.producers)
                || !same_subscriptions(&current.subscriptions, &initial.subscriptions)
        }
        _ => {
            !same_names(&current.consumers, &initial.consumers)
                || !same_names(&current.producers, &initial.producers)
        }
    }
}

fn sorted_names(list: &[Assignment]) -> Vec<&str> {
    let mut names: Vec<&str> = list.iter().map(|a| a.name.as_str()).collect();
    names.sort_unstable();
    names
}

fn same_names(current: &[Assignment], initial: &[Assignment]) -> bool {
    current.len() == initial.len() && sorted_names(current) == sorted_names(initial)
}

fn same_subscriptions(current: &[Subscription], initial: &[Subscription]) -> bool {
    current.len() == initial.len()
        && current.iter().all(|c| {
            initial
                .iter()
                .any(|i| i.name == c.name && i.subscriber == c.subscriber)
        })
}
