//! Contactbook server
//!
//! Serves the contact-management web application.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use contactbook_core::ContactStore;
use contactbook_storage::{MemoryStore, RedbStore};
use contactbook_web::Config;

/// Contactbook - server-rendered contact management
#[derive(Parser, Debug)]
#[command(name = "contactbook")]
#[command(version, about = "Server-rendered contact management", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CONTACTBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(long, env = "CONTACTBOOK_BIND")]
    bind: Option<String>,

    /// Database file (overrides the config file)
    #[arg(long, env = "CONTACTBOOK_DB", conflicts_with = "memory")]
    db: Option<PathBuf>,

    /// Keep contacts in memory only
    #[arg(long)]
    memory: bool,

    /// Session cookie secret (overrides the config file)
    #[arg(long, env = "CONTACTBOOK_SESSION_SECRET", hide_env_values = true)]
    session_secret: Option<String>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(db) = self.db {
            config.storage.path = Some(db);
        }
        if self.memory {
            config.storage.path = None;
        }
        if let Some(secret) = self.session_secret {
            config.session.secret = secret;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,contactbook=debug,contactbook_web=debug,contactbook_storage=debug".into()
            }),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    let store: Arc<dyn ContactStore> = match &config.storage.path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using redb contact store");
            Arc::new(RedbStore::open(path)?)
        }
        None => {
            tracing::info!("Using in-memory contact store");
            Arc::new(MemoryStore::new())
        }
    };

    if config.session.secret == contactbook_web::config::SessionSettings::default().secret {
        tracing::warn!("Using the default session secret; set CONTACTBOOK_SESSION_SECRET");
    }

    contactbook_web::serve(&config, store).await?;
    Ok(())
}
