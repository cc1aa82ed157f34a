//! Server configuration
//!
//! Everything is read from environment variables first (a `.env` file is honoured by `main`). Command-line flags
//! (see [`crate::cli::CliArgs`]) only fill in values that the environment left unset.
//!
//! | Env var                    | Flag | Default                    |
//! |----------------------------|------|----------------------------|
//! | `RUN_ADDRESS`              | `-a` | `127.0.0.1:8080`           |
//! | `DATABASE_URI`             | `-d` | `sqlite://data/loyalty.db` |
//! | `ACCRUAL_SYSTEM_ADDRESS`   | `-r` | `http://127.0.0.1:8081`    |
//! | `LPG_POLL_INTERVAL_MS`     | `-i` | `1000`                     |
//! | `LPG_POLL_WORKERS`         | `-w` | `4`                        |
//! | `LPG_ACCRUAL_TIMEOUT_SECS` |      | `10`                       |
//! | `LPG_JWT_SECRET`           |      | random, per process        |
//! | `LPG_TOKEN_LIFETIME_HOURS` |      | `24`                       |
//! | `LPG_AUTO_MIGRATE`         |      | `true`                     |
use std::{env, fmt::Display, str::FromStr, time::Duration};

use accrual_client::{
    config::{DEFAULT_ACCRUAL_SYSTEM_ADDRESS, DEFAULT_REQUEST_TIMEOUT},
    AccrualConfig,
};
use log::*;
use loyalty_common::{helpers::parse_boolean_flag, Secret};
use loyalty_engine::{
    order_poller::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_WORKERS},
    PollerConfig,
};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::cli::CliArgs;

pub const DEFAULT_RUN_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URI: &str = "sqlite://data/loyalty.db";
pub const DEFAULT_TOKEN_LIFETIME: chrono::Duration = chrono::Duration::hours(24);
const RANDOM_SECRET_LENGTH: usize = 48;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// `host:port` to bind the HTTP server to.
    pub run_address: String,
    pub database_url: String,
    pub accrual: AccrualConfig,
    pub poller: PollerConfig,
    pub auth: AuthConfig,
    /// Apply pending database migrations on startup.
    pub auto_migrate: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            run_address: DEFAULT_RUN_ADDRESS.to_string(),
            database_url: DEFAULT_DATABASE_URI.to_string(),
            accrual: AccrualConfig::default(),
            poller: PollerConfig::default(),
            auth: AuthConfig::default(),
            auto_migrate: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env_and_args(args: &CliArgs) -> Self {
        Self::from_sources(|name| env::var(name).ok(), args)
    }

    /// Builds the configuration from a variable lookup and the command-line flags. A variable that `lookup` knows
    /// about always beats the corresponding flag.
    pub fn from_sources<F>(lookup: F, args: &CliArgs) -> Self
    where F: Fn(&str) -> Option<String> {
        let run_address = lookup("RUN_ADDRESS").or_else(|| args.run_address.clone()).unwrap_or_else(|| {
            info!("🪛️ RUN_ADDRESS is not set. Using the default, {DEFAULT_RUN_ADDRESS}.");
            DEFAULT_RUN_ADDRESS.to_string()
        });
        let database_url = lookup("DATABASE_URI").or_else(|| args.database_uri.clone()).unwrap_or_else(|| {
            warn!("🪛️ DATABASE_URI is not set. Using the default, {DEFAULT_DATABASE_URI}.");
            DEFAULT_DATABASE_URI.to_string()
        });
        let accrual_address =
            lookup("ACCRUAL_SYSTEM_ADDRESS").or_else(|| args.accrual_address.clone()).unwrap_or_else(|| {
                warn!("🪛️ ACCRUAL_SYSTEM_ADDRESS is not set. Using the default, {DEFAULT_ACCRUAL_SYSTEM_ADDRESS}.");
                DEFAULT_ACCRUAL_SYSTEM_ADDRESS.to_string()
            });
        let request_timeout = parse_var(&lookup, "LPG_ACCRUAL_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let accrual = AccrualConfig::new(&accrual_address).with_request_timeout(request_timeout);

        let poll_interval = parse_var(&lookup, "LPG_POLL_INTERVAL_MS")
            .or(args.poll_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let workers = parse_var(&lookup, "LPG_POLL_WORKERS").or(args.poll_workers).unwrap_or(DEFAULT_POLL_WORKERS);
        let poller = PollerConfig::new(poll_interval, workers);

        let auth = AuthConfig::from_sources(&lookup);
        let auto_migrate = parse_boolean_flag(lookup("LPG_AUTO_MIGRATE"), true);
        Self { run_address, database_url, accrual, poller, auth, auto_migrate }
    }
}

/// Reads and parses a variable. Unparseable values are logged and treated as unset.
fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(name).and_then(|s| {
        s.trim()
            .parse::<T>()
            .map_err(|e| warn!("🪛️ Invalid configuration value for {name} ({s}). {e}. Ignoring it."))
            .ok()
    })
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HMAC key used to sign and verify access tokens.
    pub jwt_secret: Secret<String>,
    /// How long an issued access token stays valid.
    pub token_lifetime: chrono::Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Every access \
             token will become invalid when the server restarts. Set LPG_JWT_SECRET in production. 🚨️🚨️🚨️"
        );
        let secret: String =
            thread_rng().sample_iter(&Alphanumeric).take(RANDOM_SECRET_LENGTH).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret), token_lifetime: DEFAULT_TOKEN_LIFETIME }
    }
}

impl AuthConfig {
    pub fn new(secret: &str, token_lifetime: chrono::Duration) -> Self {
        Self { jwt_secret: Secret::new(secret.to_string()), token_lifetime }
    }

    fn from_sources<F>(lookup: &F) -> Self
    where F: Fn(&str) -> Option<String> {
        let token_lifetime = parse_var::<_, i64>(lookup, "LPG_TOKEN_LIFETIME_HOURS")
            .filter(|h| {
                let ok = *h > 0;
                if !ok {
                    warn!("🪛️ LPG_TOKEN_LIFETIME_HOURS must be positive. Using the default.");
                }
                ok
            })
            .map(chrono::Duration::hours)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);
        match lookup("LPG_JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => Self::new(&secret, token_lifetime),
            None => Self { token_lifetime, ..Self::default() },
        }
    }
}
