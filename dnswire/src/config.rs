use std::net::Ipv4Addr;

/// Answer policy handed to the handlers: every A/IN question is answered
/// with `address`, valid for `ttl` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseConfig {
    pub address: Ipv4Addr,
    pub ttl: u32,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        ResponseConfig {
            address: Ipv4Addr::new(8, 8, 8, 8),
            ttl: 60,
        }
    }
}
