use std::str::FromStr;

use anyhow::{Context, Result};

use super::{
    config_model::{BackendServer, Database, DotEnvyConfig, HubDev, Session, Stripe, Trial},
    stage::Stage,
};

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_HUB_DEV_TIMEOUT: u64 = 10;
const DEFAULT_STRIPE_TIMEOUT: u64 = 10;
const DEFAULT_TRIAL_DAYS: i64 = 7;
const DEFAULT_SESSION_TTL_HOURS: i64 = 8;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let env = Env(lookup);

    let backend_server = BackendServer {
        port: env.parsed("SERVER_PORT_BACKEND")?,
        body_limit: env.parsed("SERVER_BODY_LIMIT")?,
        timeout: env.parsed("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: env.required("DATABASE_URL")?,
        max_connections: env
            .parsed_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
    };

    let hub_dev = HubDev {
        api_url: env.required("HUB_DEV_API_URL")?,
        token: env.required("HUB_DEV_TOKEN")?,
        timeout: env.parsed_or("HUB_DEV_TIMEOUT", DEFAULT_HUB_DEV_TIMEOUT)?,
    };

    let stripe = Stripe {
        secret_key: env.required("STRIPE_SECRET_KEY")?,
        webhook_secret: env.required("STRIPE_WEBHOOK_SECRET")?,
        price_id: env.required("STRIPE_PRICE_ID")?,
        timeout: env.parsed_or("STRIPE_TIMEOUT", DEFAULT_STRIPE_TIMEOUT)?,
    };

    let trial = Trial {
        days: env.parsed_or("TRIAL_DAYS", DEFAULT_TRIAL_DAYS)?,
    };

    let session = Session {
        ttl_hours: env.parsed_or("SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?,
    };

    let stage = env
        .optional("STAGE")
        .map(|raw| Stage::try_from(&raw))
        .transpose()?
        .unwrap_or_default();

    Ok(DotEnvyConfig {
        backend_server,
        database,
        hub_dev,
        stripe,
        trial,
        session,
        stage,
    })
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key).with_context(|| format!("{key} is missing"))
    }

    fn parsed<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.required(key)?
            .trim()
            .parse()
            .with_context(|| format!("{key} is invalid"))
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{key} is invalid")),
            None => Ok(default),
        }
    }
}
