use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::parser::skills::{default_catalogue, normalize_catalogue};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TAGGER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggerBackend {
    Rules,
    Llm,
}

/// Application configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub tagger_backend: TaggerBackend,
    pub anthropic_api_key: Option<String>,
    /// Overrides the Messages API endpoint used by the llm tagger.
    pub anthropic_api_url: Option<String>,
    pub tagger_timeout: Duration,
    /// When the tagger fails: `true` returns a record with a null name,
    /// `false` fails the request.
    pub allow_degraded_records: bool,
    pub max_upload_bytes: usize,
    pub skill_catalogue: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // .env is optional
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tagger_backend = match get("TAGGER_BACKEND").as_deref().map(str::trim) {
            None | Some("rules") => TaggerBackend::Rules,
            Some("llm") => TaggerBackend::Llm,
            Some(other) => bail!("TAGGER_BACKEND must be 'rules' or 'llm', got '{other}'"),
        };

        let anthropic_api_key = get("ANTHROPIC_API_KEY");
        if tagger_backend == TaggerBackend::Llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (TAGGER_BACKEND=llm)");
        }

        let skill_catalogue = match get("SKILLS_CATALOGUE") {
            Some(list) => normalize_catalogue(list.split(',')),
            None => default_catalogue(),
        };

        Ok(Config {
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            tagger_backend,
            anthropic_api_key,
            anthropic_api_url: get("ANTHROPIC_API_URL").map(|url| url.trim().to_string()),
            tagger_timeout: Duration::from_secs(parse_or(
                get("TAGGER_TIMEOUT_SECS"),
                "TAGGER_TIMEOUT_SECS",
                DEFAULT_TAGGER_TIMEOUT_SECS,
            )?),
            allow_degraded_records: parse_or(
                get("ALLOW_DEGRADED_RECORDS"),
                "ALLOW_DEGRADED_RECORDS",
                true,
            )?,
            max_upload_bytes: parse_or(
                get("MAX_UPLOAD_BYTES"),
                "MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            skill_catalogue,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
