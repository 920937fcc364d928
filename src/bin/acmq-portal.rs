// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Portal CLI
//!
//! Browse queues, topics and users, derive subscription names and place
//! provisioning orders against the backend.
//!
//! Run with: cargo run --bin acmq-portal -- queues
//!
//! Configuration comes from the environment (`ACMQ_API_URL`,
//! `ACMQ_API_TIMEOUT_SECS`, `ACMQ_SUCCESS_DELAY_MS`); flags override it.
//! `--offline` serves the built-in development data set instead.

use std::path::PathBuf;
use std::sync::Arc;

use acmq_provisioning::{
    derive_subscription_name,
    domain::{Environment, RequestType, Resource, ResourceType},
    form::UserField,
    gateway::BackendGateway,
    HttpGateway, InMemoryGateway, NewUserForm, OrderSheet, PortalConfig, ProvisioningService,
    ResourcesView, SubmitOutcome, UsersView,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "acmq-portal", version, about = "Broker resource provisioning portal")]
struct Cli {
    /// Backend base URL (overrides ACMQ_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides ACMQ_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Use the built-in development data instead of the backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List broker users
    Users,
    /// Show one user with its roles
    User { id: String },
    /// List queues
    Queues,
    /// List topics
    Topics,
    /// Show one queue
    Queue { id: String },
    /// Show one topic with its subscriptions
    Topic { id: String },
    /// Print the conventional subscription name
    Derive { topic: String, subscriber: String },
    /// Place a queue/topic order described by a JSON sheet
    Provision {
        #[arg(long)]
        file: PathBuf,
        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Order a new broker user
    NewUser {
        name: String,
        #[arg(long)]
        team: String,
        #[arg(long)]
        requester: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "dev")]
        environment: Environment,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(outcome: &SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Accepted { pull_requests, .. } => {
            if let Some(banner) = outcome.banner() {
                println!("✅ {}", banner);
            }
            for pr in pull_requests {
                println!("   {}", pr);
            }
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field.as_str(), message);
            }
            bail!("Order is not valid")
        }
        SubmitOutcome::NoChanges => bail!("No changes to submit"),
        SubmitOutcome::Blocked(message) | SubmitOutcome::Rejected { message } => {
            bail!("{}", message)
        }
    }
}

async fn load_existing(gateway: &dyn BackendGateway, sheet: &OrderSheet) -> Result<Option<Resource>> {
    if sheet.request_type != RequestType::Update {
        return Ok(None);
    }
    let id = sheet
        .resource_id
        .as_deref()
        .context("Update orders need \"resourceId\"")?;

    let resource = match sheet.resource_type {
        ResourceType::Queue => Resource::Queue(gateway.get_queue(id).await?),
        ResourceType::Topic => Resource::Topic(gateway.get_topic(id).await?),
        ResourceType::User => bail!("User orders are placed with new-user"),
    };
    Ok(Some(resource))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = PortalConfig::from_env().context("Invalid portal configuration")?;
    if let Some(url) = &cli.api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }

    let gateway: Arc<dyn BackendGateway> = if cli.offline {
        info!("Using built-in development data");
        Arc::new(InMemoryGateway::seeded()?)
    } else {
        Arc::new(HttpGateway::new(&config)?)
    };
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Users => print_json(&gateway.list_users().await?)?,
        Commands::User { id } => print_json(&gateway.get_user(&id).await?)?,
        Commands::Queues => print_json(&gateway.list_queues().await?)?,
        Commands::Topics => print_json(&gateway.list_topics().await?)?,
        Commands::Queue { id } => print_json(&gateway.get_queue(&id).await?)?,
        Commands::Topic { id } => print_json(&gateway.get_topic(&id).await?)?,

        Commands::Derive { topic, subscriber } => {
            let name = derive_subscription_name(&topic, &subscriber);
            if name.is_empty() {
                bail!("{} does not contain \".topic\"; no name can be derived", topic);
            }
            println!("{}", name);
        }

        Commands::Provision { file, dry_run } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let sheet = OrderSheet::from_json(&text)?;
            let existing = load_existing(gateway.as_ref(), &sheet).await?;
            let mut form = sheet.into_form(existing.as_ref())?;

            if let Some(warning) = form.naming_warning() {
                eprintln!("⚠️ {}", warning);
            }

            if dry_run {
                form.validate();
                for (field, message) in form.errors().iter() {
                    eprintln!("  {}: {}", field.as_str(), message);
                }
                return print_json(&form.to_payload());
            }

            let service = ProvisioningService::new(gateway.clone(), config.success_delay());
            let mut refresh = false;
            let outcome = service
                .submit_and_notify(&mut form, |_| refresh = true)
                .await;
            report(&outcome)?;

            if refresh {
                let mut view = ResourcesView::new(gateway.clone());
                if view.on_provision_success().await {
                    info!(
                        "Listings refreshed: {} queues, {} topics",
                        view.queues().len(),
                        view.topics().len()
                    );
                }
            }
        }

        Commands::NewUser {
            name,
            team,
            requester,
            description,
            environment,
        } => {
            let mut form = NewUserForm::new();
            form.set_text(UserField::UserName, name);
            form.set_text(UserField::Team, team);
            form.set_text(UserField::Requester, requester);
            form.set_text(UserField::Description, description);
            form.set_environment(environment);

            let service = ProvisioningService::new(gateway.clone(), config.success_delay());
            let mut refresh = false;
            let outcome = service
                .submit_user_order_and_notify(&mut form, |_| refresh = true)
                .await;
            report(&outcome)?;

            if refresh {
                let mut view = UsersView::new(gateway.clone());
                if view.on_user_order_success().await {
                    info!("User listing refreshed: {} users", view.users().len());
                }
            }
        }
    }

    Ok(())
}
