//! Server configuration.
//!
//! Built from environment variables at startup, optionally overridden by
//! command-line flags, and injected into handlers through
//! [`AppState`](crate::AppState).

use std::path::PathBuf;

const APP_DIR: &str = "contacts";
const DATA_FILE: &str = "contacts.json";

/// Global configuration shared across all handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to listen on (default `3000`).
    pub listen_port: u16,
    /// JSON file mirroring the contact list; `None` keeps contacts in memory only.
    pub data_file: Option<PathBuf>,
    /// Populate an empty store with sample contacts.
    pub seed: bool,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable             | Default                               | Description                          |
    /// |----------------------|---------------------------------------|--------------------------------------|
    /// | `CONTACTS_PORT`      | `3000`                                | HTTP listen port                     |
    /// | `CONTACTS_DATA_FILE` | `<data dir>/contacts/contacts.json`   | JSON mirror; empty means memory only |
    /// | `CONTACTS_SEED`      | `true`                                | Seed sample contacts when empty      |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let listen_port: u16 = var("CONTACTS_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let data_file = match var("CONTACTS_DATA_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => default_data_file(),
        };

        let seed = var("CONTACTS_SEED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            listen_port,
            data_file,
            seed,
        }
    }

    /// Configuration for an unseeded, memory-only store.
    pub fn in_memory() -> Self {
        Self {
            listen_port: 0,
            data_file: None,
            seed: false,
        }
    }
}

/// `<data dir>/contacts/contacts.json`, when the platform has a data dir.
fn default_data_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(DATA_FILE))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.listen_port, 3000);
        assert!(cfg.seed);
        assert_eq!(cfg.data_file, default_data_file());
    }

    #[test]
    fn port_override_and_invalid_port() {
        assert_eq!(config(&[("CONTACTS_PORT", "8080")]).listen_port, 8080);
        assert_eq!(config(&[("CONTACTS_PORT", "http")]).listen_port, 3000);
    }

    #[test]
    fn empty_data_file_means_memory_only() {
        assert_eq!(config(&[("CONTACTS_DATA_FILE", "")]).data_file, None);
        assert_eq!(
            config(&[("CONTACTS_DATA_FILE", "/tmp/c.json")]).data_file,
            Some(PathBuf::from("/tmp/c.json"))
        );
    }

    #[test]
    fn seed_can_be_disabled() {
        assert!(!config(&[("CONTACTS_SEED", "false")]).seed);
        assert!(!config(&[("CONTACTS_SEED", "0")]).seed);
        assert!(config(&[("CONTACTS_SEED", "yes")]).seed);
    }
}
