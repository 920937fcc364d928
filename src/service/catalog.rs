// Copyright (c) 2025 - Cowboy AI, Inc.
//! Catalog Views
//!
//! Browse state for the queue/topic and user listings. Each view owns one
//! gateway handle, the loaded lists, the current selection and a single
//! error banner. A failed load keeps whatever was loaded before.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Resource, ResourceSummary, ResourceType, User, UserSummary};
use crate::errors::PortalError;
use crate::form::{NewUserForm, ResourceForm};
use crate::gateway::BackendGateway;

/// Progress of a list or detail load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Which destination listing is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Queues,
    Topics,
}

impl Tab {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Tab::Queues => ResourceType::Queue,
            Tab::Topics => ResourceType::Topic,
        }
    }
}

/// Queue and topic browser
pub struct ResourcesView {
    gateway: Arc<dyn BackendGateway>,
    tab: Tab,
    queues: Vec<ResourceSummary>,
    topics: Vec<ResourceSummary>,
    selected_id: Option<String>,
    selected: Option<Resource>,
    list_state: LoadState,
    detail_state: LoadState,
    error: Option<String>,
}

impl ResourcesView {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            tab: Tab::default(),
            queues: Vec::new(),
            topics: Vec::new(),
            selected_id: None,
            selected: None,
            list_state: LoadState::NotLoaded,
            detail_state: LoadState::NotLoaded,
            error: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn queues(&self) -> &[ResourceSummary] {
        &self.queues
    }

    pub fn topics(&self) -> &[ResourceSummary] {
        &self.topics
    }

    /// Listing of the active tab
    pub fn current_resources(&self) -> &[ResourceSummary] {
        match self.tab {
            Tab::Queues => &self.queues,
            Tab::Topics => &self.topics,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Resource> {
        self.selected.as_ref()
    }

    pub fn list_state(&self) -> LoadState {
        self.list_state
    }

    pub fn detail_state(&self) -> LoadState {
        self.detail_state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch queues and topics concurrently, then refresh the selected
    /// resource's details if it is still listed
    pub async fn load(&mut self) -> bool {
        self.list_state = LoadState::Loading;
        self.error = None;

        let result = futures::try_join!(self.gateway.list_queues(), self.gateway.list_topics());
        match result {
            Ok((queues, topics)) => {
                debug!("Loaded {} queues and {} topics", queues.len(), topics.len());
                self.queues = queues;
                self.topics = topics;
                self.list_state = LoadState::Loaded;
                self.refresh_selection().await;
                true
            }
            Err(e) => {
                warn!("Resource listing failed: {}", e);
                self.error = Some(format!("Could not load resources: {}", e.banner_message()));
                self.list_state = LoadState::Failed;
                false
            }
        }
    }

    async fn refresh_selection(&mut self) {
        let Some(id) = self.selected_id.clone() else {
            return;
        };
        if self.current_resources().iter().any(|r| r.id == id) {
            self.select(&id).await;
        } else {
            debug!("Selection {} no longer listed", id);
            self.selected = None;
            self.detail_state = LoadState::NotLoaded;
        }
    }

    /// Switch tab; clears selection and error
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected_id = None;
        self.selected = None;
        self.detail_state = LoadState::NotLoaded;
        self.error = None;
    }

    /// Select a resource of the active tab and load its details.
    ///
    /// An empty id clears the selection. Ids not present in the active
    /// listing are remembered but never fetched.
    pub async fn select(&mut self, id: &str) {
        if id.is_empty() {
            self.selected_id = None;
            self.selected = None;
            self.detail_state = LoadState::NotLoaded;
            return;
        }

        self.selected_id = Some(id.to_string());
        if !self.current_resources().iter().any(|r| r.id == id) {
            debug!("Ignoring selection {} not listed under {:?}", id, self.tab);
            return;
        }

        self.detail_state = LoadState::Loading;
        self.error = None;
        let result: Result<Resource, PortalError> = match self.tab {
            Tab::Queues => self.gateway.get_queue(id).await.map(Resource::Queue),
            Tab::Topics => self.gateway.get_topic(id).await.map(Resource::Topic),
        };

        match result {
            Ok(resource) => {
                self.selected = Some(resource);
                self.detail_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!("Detail load for {} failed: {}", id, e);
                self.error = Some(format!(
                    "Could not load resource details: {}",
                    e.banner_message()
                ));
                self.detail_state = LoadState::Failed;
            }
        }
    }

    /// Blank order form for the active tab
    pub fn new_order(&self) -> ResourceForm {
        ResourceForm::new(self.tab.resource_type())
    }

    /// Update order form for the loaded selection
    pub fn update_order(&self) -> Option<ResourceForm> {
        self.selected.as_ref().map(ResourceForm::for_update)
    }

    /// Called after an accepted order; reloads the listings and the
    /// selected resource
    pub async fn on_provision_success(&mut self) -> bool {
        self.load().await
    }
}

/// Broker user browser
pub struct UsersView {
    gateway: Arc<dyn BackendGateway>,
    users: Vec<UserSummary>,
    selected_id: Option<String>,
    selected: Option<User>,
    list_state: LoadState,
    detail_state: LoadState,
    error: Option<String>,
}

impl UsersView {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            users: Vec::new(),
            selected_id: None,
            selected: None,
            list_state: LoadState::NotLoaded,
            detail_state: LoadState::NotLoaded,
            error: None,
        }
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn list_state(&self) -> LoadState {
        self.list_state
    }

    pub fn detail_state(&self) -> LoadState {
        self.detail_state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self) -> bool {
        self.list_state = LoadState::Loading;
        self.error = None;

        match self.gateway.list_users().await {
            Ok(users) => {
                self.users = users;
                self.list_state = LoadState::Loaded;
                true
            }
            Err(e) => {
                warn!("User listing failed: {}", e);
                self.error = Some(format!("Could not load users: {}", e.banner_message()));
                self.list_state = LoadState::Failed;
                false
            }
        }
    }

    /// Select a user and load its roles; an empty id clears the selection
    pub async fn select(&mut self, id: &str) {
        if id.is_empty() {
            self.selected_id = None;
            self.selected = None;
            self.detail_state = LoadState::NotLoaded;
            return;
        }

        self.selected_id = Some(id.to_string());
        self.detail_state = LoadState::Loading;
        self.error = None;

        match self.gateway.get_user(id).await {
            Ok(user) => {
                self.selected = Some(user);
                self.detail_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!("User detail load for {} failed: {}", id, e);
                self.error = Some(format!("Could not load user details: {}", e.banner_message()));
                self.detail_state = LoadState::Failed;
            }
        }
    }

    pub fn new_user_order(&self) -> NewUserForm {
        NewUserForm::new()
    }

    /// Called after an accepted user order; reloads the listing
    pub async fn on_user_order_success(&mut self) -> bool {
        self.load().await
    }
}
