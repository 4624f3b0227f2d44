use anyhow::Result;
use clap::Parser;
use contacts_service::config::{Config, LogConfig};
use contacts_service::ContactsServiceModule;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Contacts REST server in front of the CRM
#[derive(Debug, Parser)]
#[command(name = "contacts-server", version, about)]
struct Cli {
    /// YAML configuration file; environment variables override it
    #[arg(short, long, env = "CONTACTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address from the configuration
    #[arg(long)]
    bind: Option<String>,
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log.filter.as_str()));

    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.bind_addr = bind;
    }
    init_tracing(&cfg.log);

    let module = ContactsServiceModule::default();
    module.init(cfg)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown requested");
                shutdown.cancel();
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
        }
    });

    Arc::new(module).serve(cancel).await
}
