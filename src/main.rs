//! ChildSafe client CLI
//!
//! Submits captured feature vectors to the detection service from the
//! command line. Useful for capture-module development and for smoke
//! testing an API key against staging or production.

use anyhow::Context as _;
use childsafe_client::{
    client::{Client, ClientConfig},
    config::{StoredConfig, API_KEY_ENV},
    context::{device_fingerprint, Context, Platform},
    payload::FeaturePayload,
    VERSION,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "childsafe")]
#[command(author = "ChildSafe")]
#[command(version = VERSION)]
#[command(about = "Client for the ChildSafe behavioral risk API", long_about = None)]
struct Cli {
    /// API key (falls back to CHILDSAFE_API_KEY, then the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Service base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a risk assessment for a feature vector
    Detect {
        /// JSON file containing the feature map
        features: PathBuf,

        /// Platform to report in the request context
        #[arg(long, default_value = "desktop")]
        platform: String,

        /// Tag the request context with a device fingerprint
        #[arg(long)]
        tag_device: bool,
    },

    /// Request an enforcement verdict for a feature vector
    Enforce {
        /// JSON file containing the feature map
        features: PathBuf,

        /// Platform to report in the request context
        #[arg(long, default_value = "desktop")]
        platform: String,

        /// Tag the request context with a device fingerprint
        #[arg(long)]
        tag_device: bool,
    },

    /// Check service availability
    Health,

    /// Show the usage quota for the configured key
    Quota,

    /// Show or update stored CLI configuration
    Config {
        /// Store this API key in the config file
        #[arg(long)]
        set_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let stored = StoredConfig::load().unwrap_or_default();
    let base_url = stored.resolve_base_url(cli.base_url);

    match cli.command {
        Commands::Detect {
            features,
            platform,
            tag_device,
        } => {
            let client = build_client(&stored, cli.api_key, base_url)?;
            let context = build_context(&platform, tag_device)?;
            let payload = load_features(&features)?;
            cmd_assess(&client, &payload, &context, false).await
        }
        Commands::Enforce {
            features,
            platform,
            tag_device,
        } => {
            let client = build_client(&stored, cli.api_key, base_url)?;
            let context = build_context(&platform, tag_device)?;
            let payload = load_features(&features)?;
            cmd_assess(&client, &payload, &context, true).await
        }
        Commands::Health => {
            let config = ClientConfig::new(String::new()).with_base_url(base_url);
            cmd_health(&Client::new(config)).await
        }
        Commands::Quota => {
            let client = build_client(&stored, cli.api_key, base_url)?;
            cmd_quota(&client).await
        }
        Commands::Config { set_key } => cmd_config(stored, set_key),
    }
}

/// Build a client from the resolved key and base URL.
fn build_client(
    stored: &StoredConfig,
    key_flag: Option<String>,
    base_url: String,
) -> anyhow::Result<Client> {
    let api_key = stored.resolve_key(key_flag).with_context(|| {
        format!("No API key configured. Pass --api-key, set {API_KEY_ENV}, or run `childsafe config --set-key <KEY>`")
    })?;

    Ok(Client::new(
        ClientConfig::new(api_key).with_base_url(base_url),
    ))
}

/// Build the request context from CLI flags.
fn build_context(platform: &str, tag_device: bool) -> anyhow::Result<Context> {
    let platform: Platform = platform.parse().map_err(anyhow::Error::msg)?;

    let mut context = Context::new(platform);
    if tag_device {
        context = context.with_field("device", device_fingerprint());
    }
    Ok(context)
}

/// Read a feature map from a JSON file.
fn load_features(path: &Path) -> anyhow::Result<FeaturePayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let payload: FeaturePayload = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON feature map", path.display()))?;

    if payload.is_empty() {
        eprintln!("Warning: {} contains no features", path.display());
    }
    Ok(payload)
}

async fn cmd_assess(
    client: &Client,
    payload: &FeaturePayload,
    context: &Context,
    enforce: bool,
) -> anyhow::Result<()> {
    let response = if enforce {
        client.enforce(payload, context).await?
    } else {
        client.detect(payload, context).await?
    };

    println!("{}", serde_json::to_string_pretty(response.as_value())?);

    if let Some(score) = response.score() {
        let confidence = response
            .confidence()
            .map(|c| format!(" (confidence {c:.2})"))
            .unwrap_or_default();
        println!();
        println!("Risk score: {score:.3}{confidence}");
    }
    if let Some(action) = response.action() {
        println!("Action: {action}");
    }
    for reason in response.reasons() {
        println!("  - {reason}");
    }

    Ok(())
}

async fn cmd_health(client: &Client) -> anyhow::Result<()> {
    if client.health().await? {
        println!("Service is up ({})", client.config().base_url);
    } else {
        println!("Service is unhealthy ({})", client.config().base_url);
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_quota(client: &Client) -> anyhow::Result<()> {
    let quota = client.quota().await?;
    println!("{}", serde_json::to_string_pretty(quota.as_value())?);

    if let (Some(remaining), Some(reset_at)) = (quota.number("remaining"), quota.reset_at()) {
        println!();
        println!("{remaining} calls remaining, resets {reset_at}");
    }
    Ok(())
}

fn cmd_config(mut stored: StoredConfig, set_key: Option<String>) -> anyhow::Result<()> {
    if let Some(key) = set_key {
        stored.api_key = Some(key);
        stored.save()?;
        println!("Saved API key to {}", StoredConfig::config_path().display());
        return Ok(());
    }

    println!("Config file: {}", StoredConfig::config_path().display());
    println!("Base URL: {}", stored.base_url);
    println!(
        "API key: {}",
        if stored.api_key.is_some() {
            "stored"
        } else {
            "not set"
        }
    );
    Ok(())
}
