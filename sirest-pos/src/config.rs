//! Console configuration

use anyhow::{Context, bail};
use shared::models::Role;
use sirest_client::ClientConfig;
use std::path::PathBuf;

/// Default receipt and screen width in characters
pub const DEFAULT_RECEIPT_WIDTH: usize = 48;

/// Settings for the role console
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SIREST_EMAIL | (required) | Account to log in with |
/// | SIREST_PASSWORD | (required) | Its password |
/// | SIREST_ROLE_VIEW | account role | Show another role's screen (administrators only) |
/// | SIREST_SEED_DEMO | false | Call `/init-demo-data` before logging in |
/// | LOG_LEVEL | info | Level or filter directive |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (none) | Daily rolling log files; stderr when unset |
/// | RECEIPT_WIDTH | 48 | Characters per rendered line |
///
/// Backend settings come from [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct PosConfig {
    pub email: String,
    pub password: String,
    pub role_view: Option<Role>,
    pub seed_demo: bool,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
    pub receipt_width: usize,
    pub client: ClientConfig,
}

impl PosConfig {
    /// Load from environment variables (a `.env` file is read first if present)
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok(), ClientConfig::from_env())
    }

    /// Build from any key lookup
    pub fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
        client: ClientConfig,
    ) -> anyhow::Result<Self> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let Some(email) = get("SIREST_EMAIL") else {
            bail!("SIREST_EMAIL is not set");
        };
        let Some(password) = get("SIREST_PASSWORD") else {
            bail!("SIREST_PASSWORD is not set");
        };
        let role_view = get("SIREST_ROLE_VIEW")
            .map(|v| v.parse::<Role>())
            .transpose()
            .context("SIREST_ROLE_VIEW")?;
        let receipt_width = match get("RECEIPT_WIDTH") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("RECEIPT_WIDTH must be a number, got {v:?}"))?,
            None => DEFAULT_RECEIPT_WIDTH,
        };
        if !(24..=200).contains(&receipt_width) {
            bail!("RECEIPT_WIDTH must be between 24 and 200, got {receipt_width}");
        }

        Ok(Self {
            email,
            password,
            role_view,
            seed_demo: get("SIREST_SEED_DEMO").is_some_and(|v| flag(&v)),
            log_level: get("LOG_LEVEL"),
            log_json: get("LOG_JSON").is_some_and(|v| flag(&v)),
            log_dir: get("LOG_DIR").map(PathBuf::from),
            receipt_width,
            client,
        })
    }

    /// Screen to show for an account of `role`. Only administrators may
    /// look at another role's screen.
    pub fn view_for(&self, role: Role) -> Role {
        match self.role_view {
            Some(view) if role == Role::Admin => view,
            _ => role,
        }
    }
}

fn flag(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "si" | "sí")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<PosConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PosConfig::from_lookup(|k| env.get(k).cloned(), ClientConfig::default())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[("SIREST_EMAIL", "cajero@sirest.co"), ("SIREST_PASSWORD", "demo123")]).unwrap();
        assert_eq!(cfg.receipt_width, DEFAULT_RECEIPT_WIDTH);
        assert!(cfg.role_view.is_none());
        assert!(!cfg.seed_demo);
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn test_credentials_required() {
        assert!(load(&[("SIREST_PASSWORD", "demo123")]).is_err());
        assert!(load(&[("SIREST_EMAIL", "a@b.co"), ("SIREST_PASSWORD", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("SIREST_EMAIL", "admin@sirest.co"),
            ("SIREST_PASSWORD", "demo123"),
            ("SIREST_ROLE_VIEW", "cocinero"),
            ("SIREST_SEED_DEMO", "true"),
            ("RECEIPT_WIDTH", "32"),
            ("LOG_DIR", "/var/log/sirest"),
        ])
        .unwrap();
        assert_eq!(cfg.role_view, Some(Role::Cook));
        assert!(cfg.seed_demo);
        assert_eq!(cfg.receipt_width, 32);
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/var/log/sirest")));

        assert_eq!(cfg.view_for(Role::Admin), Role::Cook);
        assert_eq!(cfg.view_for(Role::Waiter), Role::Waiter);
    }

    #[test]
    fn test_invalid_values() {
        let base = [("SIREST_EMAIL", "a@b.co"), ("SIREST_PASSWORD", "demo123")];
        let mut bad_role = base.to_vec();
        bad_role.push(("SIREST_ROLE_VIEW", "chef"));
        assert!(load(&bad_role).is_err());

        let mut narrow = base.to_vec();
        narrow.push(("RECEIPT_WIDTH", "10"));
        assert!(load(&narrow).is_err());
    }
}
