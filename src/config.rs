use crate::error::{Result, ScorecardError};
use crate::types::config::FileConfig;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "scorecard.toml";

/// Development-only fallbacks. `validate` rejects both in production.
pub const DEV_FALLBACK_PASSWORD: &str = "change-me";
pub const DEV_FALLBACK_SECRET_KEY: &str = "dev-secret-key";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

/// How the Session Gate fronts the pages: a full-page login form backed by
/// a session cookie, or HTTP Basic Auth checked on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    FullPage,
    BasicAuth,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub password: String,
    pub username: String,
    pub secret_key: String,
    pub env: AppEnv,
    pub session_ttl_secs: u64,
    pub gate_mode: GateMode,
}

/// Load configuration: optional `scorecard.toml` underlay, environment
/// variables on top. `config_path` overrides the default file location.
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE).to_path_buf());
    let file = read_file_if_exists(&path)?;
    load_with(file, &|name| std::env::var(name).ok())
}

pub(crate) fn load_with(
    file: Option<FileConfig>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
    let file = file.unwrap_or_default();
    let server = file.server.unwrap_or_default();
    let session = file.session.unwrap_or_default();
    let gate = file.gate.unwrap_or_default();

    let port = match env("PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| ScorecardError::ConfigParse(format!("invalid PORT: {raw}")))?,
        None => server.port.unwrap_or(DEFAULT_PORT),
    };

    let session_ttl_secs = match env("SESSION_TTL_SECS") {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            ScorecardError::ConfigParse(format!("invalid SESSION_TTL_SECS: {raw}"))
        })?,
        None => session.ttl_secs.unwrap_or(DEFAULT_SESSION_TTL_SECS),
    };

    let gate_mode = match env("GATE_MODE").or(gate.mode) {
        Some(raw) => parse_gate_mode(&raw)?,
        None => GateMode::FullPage,
    };

    let app_env = match env("APP_ENV") {
        Some(raw) => parse_app_env(&raw)?,
        None => AppEnv::Development,
    };

    Ok(AppConfig {
        port,
        password: env("SCORECARD_PASSWORD").unwrap_or_else(|| DEV_FALLBACK_PASSWORD.to_string()),
        username: env("SCORECARD_USERNAME")
            .or(gate.username)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        secret_key: env("SECRET_KEY").unwrap_or_else(|| DEV_FALLBACK_SECRET_KEY.to_string()),
        env: app_env,
        session_ttl_secs,
        gate_mode,
    })
}

/// Fail fast on an unusable gate secret. An empty password or signing key is
/// rejected everywhere; the development fallbacks are rejected in production.
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.password.is_empty() {
        return Err(ScorecardError::MisconfiguredSecret(
            "SCORECARD_PASSWORD is empty".to_string(),
        ));
    }
    if config.secret_key.is_empty() {
        return Err(ScorecardError::MisconfiguredSecret(
            "SECRET_KEY is empty".to_string(),
        ));
    }
    if config.env == AppEnv::Production {
        if config.password == DEV_FALLBACK_PASSWORD {
            return Err(ScorecardError::MisconfiguredSecret(
                "SCORECARD_PASSWORD must be set in production".to_string(),
            ));
        }
        if config.secret_key == DEV_FALLBACK_SECRET_KEY {
            return Err(ScorecardError::MisconfiguredSecret(
                "SECRET_KEY must be set in production".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_gate_mode(raw: &str) -> Result<GateMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "full-page" | "fullpage" => Ok(GateMode::FullPage),
        "basic-auth" | "basic" => Ok(GateMode::BasicAuth),
        other => Err(ScorecardError::ConfigParse(format!(
            "invalid GATE_MODE: {other}"
        ))),
    }
}

fn parse_app_env(raw: &str) -> Result<AppEnv> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(AppEnv::Development),
        "production" | "prod" => Ok(AppEnv::Production),
        other => Err(ScorecardError::ConfigParse(format!(
            "invalid APP_ENV: {other}"
        ))),
    }
}

fn read_file_if_exists(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let parsed: FileConfig = toml::from_str(&content)
        .map_err(|e| ScorecardError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    Ok(Some(parsed))
}
