//! Node configuration with environment overrides.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration. Defaults match the development setup; each field
/// can be overridden through a `PROVCHAIN_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Directory uploaded artifacts are written to.
    pub upload_dir: PathBuf,
    /// Directory served under `/static` (also holds `index.html`).
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid default addr"),
            upload_dir: PathBuf::from("uploads"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Defaults plus `PROVCHAIN_ADDR` / `PROVCHAIN_UPLOAD_DIR` /
    /// `PROVCHAIN_STATIC_DIR` overrides. A malformed address is logged and
    /// ignored rather than taking the node down.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(addr) = env::var("PROVCHAIN_ADDR") {
            match addr.parse() {
                Ok(parsed) => cfg.bind_addr = parsed,
                Err(_) => tracing::warn!(%addr, "ignoring malformed PROVCHAIN_ADDR"),
            }
        }
        if let Ok(dir) = env::var("PROVCHAIN_UPLOAD_DIR") {
            cfg.upload_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("PROVCHAIN_STATIC_DIR") {
            cfg.static_dir = PathBuf::from(dir);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_development_setup() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.upload_dir, PathBuf::from("uploads"));
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
    }
}
