// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Name and Ticket Number Patterns

use once_cell::sync::Lazy;
use regex::Regex;

static RESOURCE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("static pattern"));

static TICKET_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern"));

/// Name of a queue, topic or broker user: ASCII letters, digits, `.`, `_`
/// and `-`, at least one character
///
/// ```rust
/// use acmq_provisioning::domain::is_valid_resource_name;
///
/// assert!(is_valid_resource_name("order.processing-1_queue"));
/// assert!(!is_valid_resource_name("bad name!"));
/// assert!(!is_valid_resource_name(""));
/// ```
pub fn is_valid_resource_name(name: &str) -> bool {
    RESOURCE_NAME_PATTERN.is_match(name)
}

/// Change ticket reference; same alphabet as a resource name minus the dot
pub fn is_valid_ticket_number(ticket: &str) -> bool {
    TICKET_NUMBER_PATTERN.is_match(ticket)
}
