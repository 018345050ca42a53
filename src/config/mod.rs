use chrono::NaiveTime;
use std::env;

const DEFAULT_KICKOFF: &str = "15:00";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. Without one the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,

    /// Bearer token guarding `/api/admin/*`. Unset disables the check (dev mode).
    pub admin_token: Option<String>,

    /// Kickoff time (UTC) for fixtures created without one.
    pub default_kickoff_time: NaiveTime,
    /// Fixtures scored concurrently during a bulk scoring run.
    pub scoring_concurrency: usize,

    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let kickoff_raw = env::var("DEFAULT_KICKOFF_TIME").unwrap_or_else(|_| DEFAULT_KICKOFF.into());
        let default_kickoff_time = parse_kickoff(&kickoff_raw)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            admin_token: env::var("ADMIN_TOKEN").ok().filter(|s| !s.is_empty()),

            default_kickoff_time,
            scoring_concurrency: env::var("SCORING_CONCURRENCY")
                .unwrap_or_else(|_| "4".into())
                .parse()
                .unwrap_or(4),

            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Settings for tests and local runs: in-memory store, no admin token.
    pub fn local() -> Self {
        Self {
            database_url: None,
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 5,
            admin_token: None,
            default_kickoff_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default(),
            scoring_concurrency: 4,
            log_json: false,
        }
    }
}

/// Accepts `HH:MM` or `HH:MM:SS`.
fn parse_kickoff(raw: &str) -> anyhow::Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| anyhow::anyhow!("DEFAULT_KICKOFF_TIME must be HH:MM, got '{raw}'"))
}
