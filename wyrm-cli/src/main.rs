//! Wyrm CLI
//!
//! Command-line interface for the Wyrm name service: register names,
//! manage records, resolve owners, and run the API server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wyrm_api::{ApiConfig, ApiServer, AppState};
use wyrm_core::types::AccountAddress;
use wyrm_engine::NameService;
use wyrm_registry::{FileStore, MemoryStore};

const DEFAULT_STORE: &str = "registry.wyrm";

/// Wyrm - length-tiered name registry
#[derive(Parser)]
#[command(name = "wyrm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a name
    Register {
        /// The name to register
        name: String,
        /// Owner account address (hex)
        #[arg(short, long)]
        owner: String,
        /// Payment in base units (decimal)
        #[arg(short, long)]
        payment: String,
        /// Path to the registry store file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },

    /// Replace the record of a name you own
    SetRecord {
        /// The target name
        name: String,
        /// Caller account address (hex, must be the owner)
        #[arg(short, long)]
        caller: String,
        /// The new record value
        #[arg(short, long)]
        record: String,
        /// Path to the registry store file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },

    /// Resolve a name to its owner and record
    Resolve {
        /// The name to resolve
        name: String,
        /// Path to the registry store file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },

    /// Price a candidate name without registering it
    Quote {
        /// The candidate name
        name: String,
    },

    /// List every registration in registration order
    List {
        /// Path to the registry store file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Path to a registry store file (omit for in-memory)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "wyrm=debug,info"
    } else {
        "wyrm=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Register {
            name,
            owner,
            payment,
            store,
        } => cmd_register(&name, &owner, &payment, &store).await,
        Commands::SetRecord {
            name,
            caller,
            record,
            store,
        } => cmd_set_record(&name, &caller, record, &store).await,
        Commands::Resolve { name, store } => cmd_resolve(&name, &store).await,
        Commands::Quote { name } => cmd_quote(&name),
        Commands::List { store, json } => cmd_list(&store, json).await,
        Commands::Serve { port, bind, store } => cmd_serve(port, &bind, store).await,
    }
}

/// Opens the file-backed store and wraps it in an engine, keeping a handle
/// to the store so mutations can be flushed before exit.
async fn open_service(path: &Path) -> Result<(NameService, Arc<FileStore>)> {
    let store = Arc::new(
        FileStore::new(path)
            .await
            .with_context(|| format!("failed to open store at {}", path.display()))?,
    );
    Ok((NameService::new(store.clone()), store))
}

fn parse_address(s: &str) -> Result<AccountAddress> {
    AccountAddress::from_hex(s).with_context(|| format!("invalid account address: {s}"))
}

fn parse_payment(s: &str) -> Result<u128> {
    s.trim()
        .parse::<u128>()
        .with_context(|| format!("invalid payment amount: {s} (expected base units)"))
}

async fn cmd_register(name: &str, owner: &str, payment: &str, store_path: &Path) -> Result<()> {
    let owner = parse_address(owner)?;
    let payment = parse_payment(payment)?;

    let (service, store) = open_service(store_path).await?;

    let entry = service.register(owner, name, payment).await?;
    store.flush().await?;

    println!(
        "{} {} (id {}, owner {})",
        "✅ Registered:".green().bold(),
        entry.name.to_string().bold(),
        entry.id,
        entry.owner
    );
    Ok(())
}

async fn cmd_set_record(name: &str, caller: &str, record: String, store_path: &Path) -> Result<()> {
    let caller = parse_address(caller)?;

    let (service, store) = open_service(store_path).await?;

    let entry = service.set_record(caller, name, record).await?;
    store.flush().await?;

    println!(
        "{} {} -> {:?}",
        "✅ Record set:".green().bold(),
        entry.name.to_string().bold(),
        entry.record
    );
    Ok(())
}

async fn cmd_resolve(name: &str, store_path: &Path) -> Result<()> {
    let (service, _store) = open_service(store_path).await?;

    let entry = service.entry_of(name).await?;

    println!("{}", entry.name.to_string().bold());
    println!("  owner:  {}", entry.owner);
    println!("  record: {:?}", entry.record);
    println!("  id:     {}", entry.id);
    Ok(())
}

fn cmd_quote(name: &str) -> Result<()> {
    // Pricing is pure; no store needed
    let service = NameService::new(Arc::new(MemoryStore::new()));
    let quote = service.quote(name)?;

    println!(
        "{} {} tier, {} base units",
        name.bold(),
        quote.tier.to_string().cyan(),
        quote.required_fee
    );
    Ok(())
}

async fn cmd_list(store_path: &Path, json: bool) -> Result<()> {
    let (service, _store) = open_service(store_path).await?;

    let rows = service.list_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No names registered.".yellow());
        return Ok(());
    }

    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>4}. {} {} {:?}",
            i + 1,
            row.name.to_string().bold(),
            row.owner,
            row.record
        );
    }
    Ok(())
}

async fn cmd_serve(port: u16, bind: &str, store_path: Option<PathBuf>) -> Result<()> {
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address: {bind}:{port}"))?;

    let mut config = ApiConfig::from_env();
    config.bind = addr.to_string();
    config.store_path = store_path.clone();

    let state = match store_path {
        Some(path) => {
            // Threshold 0: persist after every write, the server has no
            // natural exit point to flush at
            let store = Arc::new(
                FileStore::with_auto_save(&path, 0)
                    .await
                    .with_context(|| format!("failed to open store at {}", path.display()))?,
            );
            let service = NameService::new(store.clone());
            println!(
                "{} {}",
                "📦 Using store file:".cyan(),
                path.display().to_string().bold()
            );
            AppState::with_service(config, service)
        }
        None => {
            println!("{}", "📦 Using in-memory store (state is lost on exit)".cyan());
            AppState::new(config)
        }
    };

    println!(
        "{} {}",
        "🌐 Wyrm API listening on".green().bold(),
        addr.to_string().bold()
    );

    ApiServer::with_state(state).run(addr).await?;
    Ok(())
}
