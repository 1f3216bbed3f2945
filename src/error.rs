use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("unknown company: {0}")]
    UnknownCompany(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("misconfigured secret: {0}")]
    MisconfiguredSecret(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScorecardError>;
