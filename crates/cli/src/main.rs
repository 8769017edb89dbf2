//! custdesk CLI - Browse and maintain customer records.
//!
//! # Usage
//!
//! ```bash
//! # List every customer, or only those matching a search
//! custdesk list
//! custdesk list --query jane
//!
//! # Show one customer's profile
//! custdesk show 64f1c2
//!
//! # Create a customer with one address
//! custdesk create --first-name Jane --last-name Doe --phone 5551234567 \
//!     --email jane@example.com --address "1 Main St,Springfield,IL,62701"
//!
//! # Edit fields of an existing customer
//! custdesk edit 64f1c2 --set phone=5559876543 --set-address 0.zip=62702
//!
//! # Delete a customer without prompting
//! custdesk delete 64f1c2 --yes
//! ```
//!
//! # Environment
//!
//! - `CUSTDESK_API_URL` - Base URL of the customer API (default `http://localhost:5000`)
//! - `CUSTDESK_LOG_JSON` - Emit JSON logs when `1` or `true`
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Optional error tracking
//! - `RUST_LOG` - Log filter (default `custdesk=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use custdesk_client::{ClientConfig, CustomerClient};
use custdesk_core::{Address, CustomerId};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;
mod render;

use commands::CliError;

#[derive(Parser)]
#[command(name = "custdesk")]
#[command(author, version, about = "Customer records from the terminal")]
struct Cli {
    /// Base URL of the customer API (overrides `CUSTDESK_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List customers, optionally filtered by a search query
    List {
        /// Matches first or last name (any case) or part of the phone number
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show a customer's profile
    Show {
        /// Customer id
        id: CustomerId,
    },
    /// Create a new customer
    Create {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Ten digit phone number
        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        /// Address as `street,city,state,zip` (repeatable)
        #[arg(long = "address", value_parser = commands::parse_address)]
        addresses: Vec<Address>,
    },
    /// Edit an existing customer
    Edit {
        /// Customer id
        id: CustomerId,

        /// Field assignment such as `email=jane@example.com` (repeatable)
        #[arg(long = "set", value_parser = commands::parse_field_assignment)]
        fields: Vec<commands::FieldAssignment>,

        /// Address assignment such as `0.zip=62701` (repeatable)
        #[arg(long = "set-address", value_parser = commands::parse_address_assignment)]
        address_fields: Vec<commands::AddressAssignment>,

        /// Append an address as `street,city,state,zip` (repeatable)
        #[arg(long = "add-address", value_parser = commands::parse_address)]
        new_addresses: Vec<Address>,
    },
    /// Delete a customer
    Delete {
        /// Customer id
        id: CustomerId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "custdesk=info".into());

    // Logs go to stderr so command output stays pipeable
    let json_layer = log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_json);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn load_config(api_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_env()?;
    match api_url {
        Some(raw) => Ok(config.with_api_url(raw)?),
        None => Ok(config),
    }
}

async fn run(command: Commands, config: &ClientConfig) -> Result<(), CliError> {
    let client = CustomerClient::new(config)?;
    tracing::debug!(api_url = %client.base_url(), "Using customer API");

    let out = &mut std::io::stdout();
    match command {
        Commands::List { query } => commands::list::run(client, query.as_deref(), out).await,
        Commands::Show { id } => commands::show::run(client, id, out).await,
        Commands::Create {
            first_name,
            last_name,
            phone,
            email,
            addresses,
        } => {
            let input = commands::create::CreateInput {
                first_name,
                last_name,
                phone,
                email,
                addresses,
            };
            commands::create::run(client, input, out).await.map(drop)
        }
        Commands::Edit {
            id,
            fields,
            address_fields,
            new_addresses,
        } => {
            let changes = commands::edit::EditChanges {
                fields,
                address_fields,
                new_addresses,
            };
            commands::edit::run(client, id, changes, out).await.map(drop)
        }
        Commands::Delete { id, yes } => commands::delete::run(client, &id, yes, out).await,
    }
}
