use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads `APP_DATA_DIR`, `HOST` and `PORT`; bad values fall back to the
    /// loopback defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("APP_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let host = match lookup("HOST") {
            Some(value) => value.parse::<IpAddr>().unwrap_or_else(|_| {
                warn!(%value, "ignoring invalid HOST");
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            }),
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_dir,
            addr: SocketAddr::new(host, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_bind_loopback() {
        let config = config(&[]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config(&[
            ("APP_DATA_DIR", "/var/lib/food"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/food"));
        assert_eq!(config.addr, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[("HOST", "localhost:1"), ("PORT", "eighty")]);
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
    }
}
