use anyhow::{Context, Result};
use clap::Parser;
use std::{env, str::FromStr, time::Duration};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub review_service_url: String,
    pub review_timeout: Duration,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Movie World catalogue service")]
pub struct Args {
    /// Host to bind to (overrides MOVIEWORLD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides MOVIEWORLD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides MOVIEWORLD_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Base URL of the movie review service (overrides MOVIEREVIEW_SERVICE_URL)
    #[arg(long)]
    pub review_service_url: Option<String>,

    /// Timeout in seconds for review lookups (overrides MOVIEREVIEW_TIMEOUT_SECS)
    #[arg(long)]
    pub review_timeout_secs: Option<u64>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        Self::from_args(Args::parse())
    }

    /// Merge already-parsed CLI args over environment values and defaults.
    pub fn from_args(args: Args) -> Result<(Self, bool)> {
        // --- Environment fallback ---
        let env_host = env::var("MOVIEWORLD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env("MOVIEWORLD_PORT", 8080u16)?;
        let env_db = env::var("MOVIEWORLD_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/movieworld.db".into());
        let env_review_url = env::var("MOVIEREVIEW_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8081".into());
        let env_timeout = parse_env("MOVIEREVIEW_TIMEOUT_SECS", 5u64)?;

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            review_service_url: args.review_service_url.unwrap_or(env_review_url),
            review_timeout: Duration::from_secs(args.review_timeout_secs.unwrap_or(env_timeout)),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
