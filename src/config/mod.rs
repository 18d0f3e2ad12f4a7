// Configuration module entry point
// Layers built-in defaults, an optional config file, and environment overrides

mod types;

pub use types::{Config, ListenConfig, LoggingConfig, PerformanceConfig, SiteConfig};

use std::net::SocketAddr;

impl Config {
    /// Load configuration from the default `config.toml` location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension),
    /// layered with `SERVER_*` environment variables and built-in defaults.
    ///
    /// `SERVER_SITE_ROOT` selects the directory assets are served from. When
    /// neither it nor a config file provides one, the process's current
    /// working directory is served.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER").separator("_"))
            .set_default("listen.host", "0.0.0.0")?
            .set_default("listen.port", 8080)?
            .set_default("site.root", ".")?
            .set_default("site.index", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.listen.host, self.listen.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.listen.port, 8080);
        assert_eq!(cfg.site.root, ".");
        assert_eq!(cfg.site.index, "index.html");
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.listen.workers.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.listen.host = "127.0.0.1".to_string();
        cfg.listen.port = 9000;
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }
}
