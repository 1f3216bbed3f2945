use serde::Deserialize;

/// Optional `scorecard.toml` underlay. Every field is optional; environment
/// variables always win over file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub session: Option<SessionSection>,
    pub gate: Option<GateSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSection {
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateSection {
    pub mode: Option<String>,
    pub username: Option<String>,
}
