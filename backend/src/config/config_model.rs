use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub hub_dev: HubDev,
    pub stripe: Stripe,
    pub trial: Trial,
    pub session: Session,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct HubDev {
    pub api_url: String,
    pub token: String,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Stripe {
    pub secret_key: String,
    pub webhook_secret: String,
    pub price_id: String,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Trial {
    pub days: i64,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub ttl_hours: i64,
}
