use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use dnswire::config::ResponseConfig;
use dotenvy::dotenv;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    pub response: ResponseConfig,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let defaults = ResponseConfig::default();
        Ok(Config {
            address: parse_var(&lookup, "DNS_ADDRESS", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_var(&lookup, "DNS_PORT", 2053)?,
            response: ResponseConfig {
                address: parse_var(&lookup, "DNS_ANSWER_ADDRESS", defaults.address)?,
                ttl: parse_var(&lookup, "DNS_ANSWER_TTL", defaults.ttl)?,
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:2053".parse().unwrap());
        assert_eq!(config.response, ResponseConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("DNS_ADDRESS", "0.0.0.0"),
            ("DNS_PORT", "5353"),
            ("DNS_ANSWER_ADDRESS", "10.1.2.3"),
            ("DNS_ANSWER_TTL", "3600"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "0.0.0.0:5353".parse().unwrap());
        assert_eq!(config.response.address, Ipv4Addr::new(10, 1, 2, 3));
        assert_eq!(config.response.ttl, 3600);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            from_map(&[("DNS_PORT", "70000")]).err(),
            Some(ConfigError::Invalid {
                name: "DNS_PORT",
                value: String::from("70000")
            })
        );
        assert!(from_map(&[("DNS_ANSWER_ADDRESS", "::1")]).is_err());
    }
}
