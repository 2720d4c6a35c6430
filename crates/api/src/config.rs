//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use anyhow::Context;

const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Where order status changes are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifierKind {
    /// Debug log only.
    #[default]
    Noop,
    /// In-process broadcast channel, drained into the log.
    Broadcast,
    /// Outbound client that is not set up; every delivery fails and is counted.
    Unconfigured,
}

impl NotifierKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "noop" | "none" => Some(Self::Noop),
            "broadcast" => Some(Self::Broadcast),
            "unconfigured" | "external" => Some(Self::Unconfigured),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HS256 signing key for admin tokens.
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    /// Start with one demo product and one demo order.
    pub seed_demo_data: bool,
    pub notifier: NotifierKind,
}

impl ApiConfig {
    /// Config with empty stores, listening on the default address.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_demo_data: false,
            notifier: NotifierKind::Noop,
        }
    }

    /// Reads `JWT_SECRET`, `LAMPSHOP_BIND_ADDR`, `LAMPSHOP_SEED_DEMO` and
    /// `LAMPSHOP_NOTIFIER`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let bind_addr = lookup("LAMPSHOP_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LAMPSHOP_BIND_ADDR is not a socket address: {bind_addr:?}"))?;

        let seed_demo_data = match lookup("LAMPSHOP_SEED_DEMO") {
            None => true,
            Some(v) => parse_flag(&v)
                .with_context(|| format!("LAMPSHOP_SEED_DEMO must be true/false, got {v:?}"))?,
        };

        let notifier = match lookup("LAMPSHOP_NOTIFIER") {
            None => NotifierKind::default(),
            Some(v) => NotifierKind::parse(&v).with_context(|| {
                format!("LAMPSHOP_NOTIFIER must be noop/broadcast/unconfigured, got {v:?}")
            })?,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            seed_demo_data,
            notifier,
        })
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.seed_demo_data);
        assert_eq!(cfg.notifier, NotifierKind::Noop);
    }

    #[test]
    fn reads_overrides() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("LAMPSHOP_BIND_ADDR", "127.0.0.1:9000"),
            ("LAMPSHOP_SEED_DEMO", "off"),
            ("LAMPSHOP_NOTIFIER", "Broadcast"),
        ]))
        .unwrap();
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert!(!cfg.seed_demo_data);
        assert_eq!(cfg.notifier, NotifierKind::Broadcast);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(ApiConfig::from_lookup(lookup(&[("LAMPSHOP_BIND_ADDR", "nowhere")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("LAMPSHOP_SEED_DEMO", "maybe")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("LAMPSHOP_NOTIFIER", "smtp")])).is_err());
    }
}
