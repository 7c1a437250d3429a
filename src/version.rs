// Package identity, logged at startup and sent as the Server header

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `Server` header value on /stats responses.
pub const SERVER_NAME: &str = "SystemMonitorServer";
