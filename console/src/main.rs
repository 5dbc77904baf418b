mod output;
mod shell;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crypto_client_core::catalog::{self, Category};
use crypto_client_core::{ApiClient, HttpMethod, ReqwestTransport};
use serde_json::{json, Value};

use output::{render_catalog, ConsoleSink};

#[derive(Debug, Parser)]
#[command(name = "crypto-console")]
#[command(about = "Test client for the crypto REST API")]
struct Cli {
    /// Base URL every endpoint path is appended to.
    #[arg(long, env = "CRYPTO_CLIENT_BASE_URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the endpoint catalog.
    Catalog {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Issue an arbitrary call against the base URL.
    Call {
        method: HttpMethod,
        path: String,
        /// Send `{"value": <VALUE>}` as the body.
        #[arg(long, conflicts_with = "json")]
        value: Option<String>,
        /// Send this JSON document as the body.
        #[arg(long)]
        json: Option<String>,
    },
    /// GET a catalog endpoint by display name or path.
    Get { endpoint: String },
    /// POST a new value to a config key.
    Set { key: String, value: String },
    /// Interactive session (default).
    Shell,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn request_body(value: Option<String>, json: Option<String>) -> Result<Option<Value>> {
    match (value, json) {
        (Some(value), _) => Ok(Some(json!({ "value": value }))),
        (None, Some(raw)) => {
            let value = serde_json::from_str(&raw).context("--json is not valid JSON")?;
            Ok(Some(value))
        }
        (None, None) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = ApiClient::new(ReqwestTransport::new(), ConsoleSink);
    if let Some(url) = &cli.base_url {
        client.configure_base_url(url).await?;
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Catalog { category } => print!("{}", render_catalog(category)),
        Commands::Call {
            method,
            path,
            value,
            json,
        } => {
            let body = request_body(value, json)?;
            let response = client.dispatch(method, &path, body.as_ref()).await?;
            println!("{response}");
        }
        Commands::Get { endpoint } => {
            let Some(path) = shell::resolve_target(&endpoint) else {
                bail!("no endpoint matches {endpoint:?}");
            };
            let response = client.dispatch(HttpMethod::Get, &path, None).await?;
            println!("{response}");
        }
        Commands::Set { key, value } => {
            if catalog::find(&format!("/config/{key}")).is_none() {
                tracing::warn!(%key, "key is not in the catalog; sending anyway");
            }
            let response = client.update_config(&key, &value).await?;
            println!("{response}");
        }
        Commands::Shell => shell::run(&client).await?,
    }

    Ok(())
}
