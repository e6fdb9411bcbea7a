//! Product service entry point
//!
//! Parses CLI arguments, resolves configuration, connects the store, and
//! hands off to the HTTP server. All request handling lives in the library.

use clap::Parser;

use product_service::{HttpServer, ProductStore, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "product-service", about = "Product catalog REST API")]
struct Args {
    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    port: Option<u16>,

    /// Backing store connection string (overrides DATABASE_URI)
    #[arg(long)]
    database_uri: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_service=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ServiceConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(uri) = args.database_uri {
        config.database_uri = uri;
    }

    if let Err(e) = run(config).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProductStore::connect(&config.database_uri).await?;
    store.init().await?;

    HttpServer::with_config(config, store).start().await?;
    Ok(())
}
