//! Route table configuration.
//!
//! Routes are loaded from a TOML file as an ordered `[[routes]]` array. The
//! order in the file is the evaluation order. Defaults are applied at load
//! time; the resolver consumes the table as-is.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_METHOD: &str = "POST";
const CATCH_ALL_SELECTOR: &str = "true";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A single routing rule. Immutable after load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteConfig {
    /// Human-friendly route name; defaults to the webhook URL.
    #[serde(default)]
    pub name: String,

    /// Selector expression evaluated against the event JSON as `event`;
    /// defaults to a catch-all.
    #[serde(default)]
    pub selector: String,

    /// Destination URL for the HTTP request.
    pub webhook_url: String,

    /// HTTP method to use (default: POST).
    #[serde(default)]
    pub method: String,

    /// Stop evaluating further routes once this one matches (default: false).
    #[serde(default)]
    pub stop_on_match: bool,

    /// Include the message body in the webhook payload (default: true).
    #[serde(default)]
    pub send_body: Option<bool>,

    /// Shared secret for HMAC request signing; no signing when absent.
    #[serde(default)]
    pub shared_secret: Option<String>,
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation failed: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from a TOML file and apply defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        config.apply_defaults();

        Ok(config)
    }

    /// Default configuration with an empty route table, used when no config
    /// file can be loaded.
    pub fn new_default() -> Self {
        let mut config = Config { routes: Vec::new() };
        config.apply_defaults();
        config
    }

    /// Populate missing per-route values with their defaults.
    pub fn apply_defaults(&mut self) {
        for route in &mut self.routes {
            if route.method.is_empty() {
                route.method = DEFAULT_METHOD.to_string();
            }
            if route.selector.is_empty() {
                route.selector = CATCH_ALL_SELECTOR.to_string();
            }
            if route.name.is_empty() {
                route.name = route.webhook_url.clone();
            }
            if route.send_body.is_none() {
                route.send_body = Some(true);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, route) in self.routes.iter().enumerate() {
            if route.webhook_url.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "route {} ('{}') has an empty webhook_url",
                    index, route.name,
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "as-webhook-{}-{}.toml",
            name,
            std::process::id(),
        ));
        fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn load_applies_defaults() {
        let path = write_temp_config(
            "load",
            r#"
[[routes]]
name = "test"
selector = "true"
webhook_url = "http://example.com/webhook"
method = "POST"

[[routes]]
webhook_url = "http://example.com/alert"
"#,
        );

        let config = Config::load(&path).expect("load config");
        fs::remove_file(&path).ok();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].name, "test");
        assert_eq!(config.routes[0].webhook_url, "http://example.com/webhook");
        assert_eq!(config.routes[0].method, "POST");

        // Second route relies entirely on defaults.
        assert_eq!(config.routes[1].name, "http://example.com/alert");
        assert_eq!(config.routes[1].selector, "true");
        assert_eq!(config.routes[1].method, "POST");
        assert_eq!(config.routes[1].send_body, Some(true));
        assert!(!config.routes[1].stop_on_match);
        assert_eq!(config.routes[1].shared_secret, None);
    }

    #[test]
    fn load_preserves_route_order() {
        let path = write_temp_config(
            "order",
            r#"
[[routes]]
name = "first"
webhook_url = "http://example.com/1"

[[routes]]
name = "second"
webhook_url = "http://example.com/2"

[[routes]]
name = "third"
webhook_url = "http://example.com/3"
"#,
        );

        let config = Config::load(&path).expect("load config");
        fs::remove_file(&path).ok();

        let names: Vec<_> = config.routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn load_reads_delivery_options() {
        let path = write_temp_config(
            "options",
            r#"
[[routes]]
name = "quiet"
selector = "event.type == 'm.room.message'"
webhook_url = "http://example.com/quiet"
method = "PUT"
stop_on_match = true
send_body = false
shared_secret = "s3cr3t"
"#,
        );

        let config = Config::load(&path).expect("load config");
        fs::remove_file(&path).ok();

        let route = &config.routes[0];
        assert_eq!(route.method, "PUT");
        assert!(route.stop_on_match);
        assert_eq!(route.send_body, Some(false));
        assert_eq!(route.shared_secret.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_rejects_empty_webhook_url() {
        let path = write_temp_config(
            "invalid",
            r#"
[[routes]]
name = "broken"
webhook_url = ""
"#,
        );

        let err = Config::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn new_default_has_no_routes() {
        let config = Config::new_default();
        assert!(config.routes.is_empty());
    }
}
