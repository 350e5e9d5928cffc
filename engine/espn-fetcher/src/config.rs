use anyhow::{Context, Result};
use chrono::Datelike;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the ESPN fetcher and report writer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// ESPN league API configuration
    pub espn: EspnConfig,

    /// HTTP client configuration
    pub http: HttpConfig,

    /// Where report artifacts are written
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EspnConfig {
    /// Fantasy football API root
    pub base_url: String,

    /// League identifier
    pub league_id: String,

    /// Season year; the current year when unset
    pub season: Option<i32>,

    /// Week to report on; week 1 when unset
    pub week: Option<u32>,

    /// Private league cookie `espn_s2`
    pub espn_s2: Option<String>,

    /// Private league cookie `SWID`
    pub swid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `report.json` and `subject.txt`
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            espn: EspnConfig {
                base_url: "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl".to_string(),
                league_id: String::new(),
                season: None,
                week: None,
                espn_s2: None,
                swid: None,
            },
            http: HttpConfig {
                timeout_secs: 30,
                user_agent: format!("league-report/{}", env!("CARGO_PKG_VERSION")),
            },
            output: OutputConfig { dir: PathBuf::from("out") },
            logging: LoggingConfig { level: "info".to_string(), format: "compact".to_string() },
        }
    }
}

/// Variable names used by existing CI workflow secrets
const LEGACY_LEAGUE_ID: &str = "LEAGUE_ID";
const LEGACY_SEASON: &str = "SEASON";
const LEGACY_WEEK: &str = "WEEK";
const LEGACY_ESPN_S2: &str = "ESPN_S2";
const LEGACY_SWID: &str = "SWID";

impl FetcherConfig {
    /// Load configuration: defaults, then an optional TOML file, then `FFL_*` environment
    /// variables (e.g. `FFL_ESPN__LEAGUE_ID`), then the legacy workflow variables for
    /// anything still unset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Failed to encode defaults")?);

        if let Some(path) = path {
            tracing::debug!("Loading configuration from file: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix("FFL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.with_legacy_env(|key| std::env::var(key).ok())
    }

    /// Fill unset fields from legacy variable names, read through `lookup`.
    pub fn with_legacy_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read =
            |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if self.espn.league_id.trim().is_empty() {
            if let Some(league_id) = read(LEGACY_LEAGUE_ID) {
                self.espn.league_id = league_id;
            }
        }
        if self.espn.season.is_none() {
            if let Some(season) = read(LEGACY_SEASON) {
                self.espn.season =
                    Some(season.parse().with_context(|| format!("Invalid SEASON: {}", season))?);
            }
        }
        if self.espn.week.is_none() {
            if let Some(week) = read(LEGACY_WEEK) {
                self.espn.week =
                    Some(week.parse().with_context(|| format!("Invalid WEEK: {}", week))?);
            }
        }
        if self.espn.espn_s2.is_none() {
            self.espn.espn_s2 = read(LEGACY_ESPN_S2);
        }
        if self.espn.swid.is_none() {
            self.espn.swid = read(LEGACY_SWID);
        }
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.espn.league_id.trim().is_empty() {
            anyhow::bail!("League id is not configured (set FFL_ESPN__LEAGUE_ID or LEAGUE_ID)");
        }

        if self.espn.week == Some(0) {
            anyhow::bail!("Week numbers start at 1");
        }

        if self.http.timeout_secs == 0 {
            anyhow::bail!("HTTP timeout must be positive");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }
}

impl EspnConfig {
    pub fn resolved_season(&self) -> i32 {
        self.season.unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn resolved_week(&self) -> u32 {
        self.week.unwrap_or(1)
    }

    /// `Cookie` header value for private leagues, when both cookies are configured
    pub fn cookie_header(&self) -> Option<String> {
        match (&self.espn_s2, &self.swid) {
            (Some(espn_s2), Some(swid)) => Some(format!("espn_s2={}; SWID={}", espn_s2, swid)),
            _ => None,
        }
    }
}
