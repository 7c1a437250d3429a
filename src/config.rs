use serde::Deserialize;
use std::path::Path;

/// Used when `CONFIG_FILE` is unset. Built-in defaults apply if this file does not exist.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Upper bound for `server.max_connections`.
pub const MAX_CONNECTIONS_LIMIT: usize = 65_536;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub tls: TlsConfig,
    pub counters: CountersConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory static files are served from.
    pub document_root: String,
    /// Max open connections; further clients wait in the kernel accept backlog.
    pub max_connections: usize,
    pub handshake_timeout_secs: u64,
    /// Close a connection after this long with no bytes read or written, which also
    /// bounds the wait for a request on a fresh or kept-alive connection.
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            document_root: "www".into(),
            max_connections: 256,
            handshake_timeout_secs: 10,
            idle_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// PEM trust anchors; must be readable at startup.
    pub ca_file: String,
    /// Request and verify client certificates against `ca_file`.
    pub require_client_auth: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            ca_file: "ca.pem".into(),
            require_client_auth: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CountersConfig {
    pub proc_root: String,
    /// Mount point reported in the disk capacity line.
    pub disk_mount: String,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            proc_root: "/proc".into(),
            disk_mount: "/".into(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(Path::new(&path)),
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_path(Path::new(DEFAULT_CONFIG_FILE))
            }
            Err(_) => {
                tracing::debug!("{} not found, using built-in defaults", DEFAULT_CONFIG_FILE);
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.server.document_root.is_empty(),
            "server.document_root must be non-empty"
        );
        anyhow::ensure!(
            self.server.max_connections > 0,
            "server.max_connections must be > 0, got {}",
            self.server.max_connections
        );
        anyhow::ensure!(
            self.server.max_connections <= MAX_CONNECTIONS_LIMIT,
            "server.max_connections must be <= {}, got {}",
            MAX_CONNECTIONS_LIMIT,
            self.server.max_connections
        );
        anyhow::ensure!(
            self.server.handshake_timeout_secs > 0,
            "server.handshake_timeout_secs must be > 0, got {}",
            self.server.handshake_timeout_secs
        );
        anyhow::ensure!(
            self.server.idle_timeout_secs > 0,
            "server.idle_timeout_secs must be > 0, got {}",
            self.server.idle_timeout_secs
        );
        anyhow::ensure!(!self.tls.ca_file.is_empty(), "tls.ca_file must be non-empty");
        anyhow::ensure!(
            !self.counters.proc_root.is_empty(),
            "counters.proc_root must be non-empty"
        );
        anyhow::ensure!(
            !self.counters.disk_mount.is_empty(),
            "counters.disk_mount must be non-empty"
        );
        Ok(())
    }
}
