//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolve the application root folder, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/memoire/config.toml first, then /etc/memoire/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("memoire").join("config.toml"));
        let system_config = PathBuf::from("/etc/memoire/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let config_path = dirs::config_dir()
        .map(|d| d.join("memoire").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("memoire"))
        .unwrap_or_else(|| PathBuf::from("./memoire_data"))
}

/// Ensure the root folder exists, creating it if necessary
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Database file path inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("memoire.db")
}

/// Site settings loaded from `<root>/site.toml`
///
/// Every field has a default so a missing or empty file yields a working
/// (if locked-down) deployment. Environment variables override file values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Tenant identifier carried on every media/comment record
    pub couple_id: String,
    /// Shared password for the session gate; empty rejects all logins
    pub password: String,
    /// One-time secret accepted as a `?secret=` query parameter
    pub secret_token: String,
    /// When set, the whole site (not just the dashboard) requires a session
    pub private_site: bool,
    /// Media CDN cloud name used for asset URL construction
    pub media_cloud_name: String,
    /// HTTP listen address
    pub bind_addr: String,
    /// HTTP listen port
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            couple_id: "default".to_string(),
            password: String::new(),
            secret_token: String::new(),
            private_site: false,
            media_cloud_name: String::new(),
            bind_addr: "0.0.0.0".to_string(),
            port: 5780,
        }
    }
}

impl SiteConfig {
    /// Load site settings from `<root>/site.toml`, then apply environment
    /// variable overrides. A missing file is not an error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("site.toml");
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?
        } else {
            tracing::info!("No site.toml at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MEMOIRE_COUPLE_ID") {
            if !v.is_empty() {
                self.couple_id = v;
            }
        }
        if let Ok(v) = std::env::var("MEMOIRE_PASSWORD") {
            self.password = v;
        }
        if let Ok(v) = std::env::var("MEMOIRE_SECRET_TOKEN") {
            self.secret_token = v;
        }
        if let Ok(v) = std::env::var("MEMOIRE_PRIVATE_SITE") {
            self.private_site = v == "true" || v == "1";
        }
        if let Ok(v) = std::env::var("MEMOIRE_CLOUD_NAME") {
            self.media_cloud_name = v;
        }
        if let Ok(v) = std::env::var("MEMOIRE_BIND_ADDR") {
            if !v.is_empty() {
                self.bind_addr = v;
            }
        }
        if let Ok(v) = std::env::var("MEMOIRE_PORT") {
            if let Ok(port) = v.parse() {
                self.port = port;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_overrides_every_field() {
        std::env::set_var("MEMOIRE_COUPLE_ID", "claire-et-julien");
        std::env::set_var("MEMOIRE_PASSWORD", "champagne");
        std::env::set_var("MEMOIRE_SECRET_TOKEN", "jardin");
        std::env::set_var("MEMOIRE_PRIVATE_SITE", "true");
        std::env::set_var("MEMOIRE_CLOUD_NAME", "demo");
        std::env::set_var("MEMOIRE_BIND_ADDR", "127.0.0.1");
        std::env::set_var("MEMOIRE_PORT", "9090");

        let mut config = SiteConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.couple_id, "claire-et-julien");
        assert_eq!(config.password, "champagne");
        assert_eq!(config.secret_token, "jardin");
        assert!(config.private_site);
        assert_eq!(config.media_cloud_name, "demo");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 9090);

        for var in [
            "MEMOIRE_COUPLE_ID",
            "MEMOIRE_PASSWORD",
            "MEMOIRE_SECRET_TOKEN",
            "MEMOIRE_PRIVATE_SITE",
            "MEMOIRE_CLOUD_NAME",
            "MEMOIRE_BIND_ADDR",
            "MEMOIRE_PORT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_empty_bind_addr_env_keeps_default() {
        std::env::set_var("MEMOIRE_BIND_ADDR", "");
        let mut config = SiteConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.bind_addr, "0.0.0.0");
        std::env::remove_var("MEMOIRE_BIND_ADDR");
    }

    #[test]
    fn test_site_config_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.couple_id, "default");
        assert_eq!(config.port, 5780);
        assert!(!config.private_site);
        assert!(config.password.is_empty());
    }

    #[test]
    fn test_site_config_from_toml() {
        let config: SiteConfig = toml::from_str(
            r#"
            couple_id = "claire-et-julien"
            password = "champagne"
            private_site = true
            media_cloud_name = "demo"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.couple_id, "claire-et-julien");
        assert_eq!(config.password, "champagne");
        assert!(config.private_site);
        assert_eq!(config.media_cloud_name, "demo");
        assert_eq!(config.port, 8080);
        // Unspecified fields fall back to defaults
        assert_eq!(config.bind_addr, "0.0.0.0");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SiteConfig = toml::from_str(r#"password = "x""#).unwrap();
        assert_eq!(config.couple_id, "default");
        assert_eq!(config.port, 5780);
    }

    #[test]
    fn test_root_folder_cli_wins() {
        let root = resolve_root_folder(Some("/tmp/memoire-test"), "MEMOIRE_TEST_UNSET_VAR");
        assert_eq!(root, PathBuf::from("/tmp/memoire-test"));
    }

    #[test]
    fn test_database_path() {
        let root = PathBuf::from("/data/memoire");
        assert_eq!(database_path(&root), PathBuf::from("/data/memoire/memoire.db"));
    }
}
