//! Loader for `postal.yaml` with environment overlays.
//!
//! Sources are merged in the order they are attached; `POSTAL__`-prefixed
//! environment variables are applied last and win over every file
//! (`POSTAL__ENGINE__WINDOW_SIZE=12`). String values may reference other
//! environment variables as `${VAR}`, expanded after merging. Every field has
//! a default, so an empty configuration is valid.
//!
//! ```yaml
//! engine:
//!   window_size: 10
//!   max_in_flight: null
//! tables:
//!   file: null            # built-in US tables when unset
//! http:
//!   timeout_secs: 15
//!   retries: 2
//!   user_agent: "postal/0.1"
//! logging:
//!   format: text          # or json
//!   directory: null
//!   filter: info
//!   stderr: false
//! ```
use config::{Config, ConfigError, Environment, File, FileFormat};
use postal_common::observability::LogFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "POSTAL";
const CONFIG_FILE_NAME: &str = "postal.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostalConfig {
    pub engine: EngineSection,
    pub tables: TablesSection,
    pub http: HttpSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Words per candidate window.
    pub window_size: usize,
    /// Cap on concurrently running matchers; unset means unbounded.
    pub max_in_flight: Option<usize>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            window_size: 10,
            max_in_flight: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TablesSection {
    /// YAML file with `states` and `street_suffixes` lists.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_secs: u64,
    pub retries: usize,
    pub user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            retries: 2,
            user_agent: concat!("postal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: LogFormat,
    pub directory: Option<PathBuf>,
    pub filter: String,
    pub stderr: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            directory: None,
            filter: "info".into(),
            stderr: false,
        }
    }
}

impl PostalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.window_size == 0 {
            return Err(ConfigError::Message(
                "engine.window_size must be at least 1".into(),
            ));
        }
        if self.engine.max_in_flight == Some(0) {
            return Err(ConfigError::Message(
                "engine.max_in_flight must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

fn expand_env_str(s: &mut String) {
    if !s.contains('$') {
        return;
    }
    let mut cur = std::mem::take(s);
    for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
        let expanded = match shellexpand::env(&cur) {
            Ok(cow) => cow.into_owned(),
            Err(_) => break,
        };
        if expanded == cur {
            break;
        }
        cur = expanded;
    }
    *s = cur;
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => expand_env_str(s),
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring.
pub struct PostalConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PostalConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PostalConfigLoader {
    /// Start empty; environment overrides are attached by [`Self::load`].
    ///
    /// ```
    /// use postal_config::PostalConfigLoader;
    ///
    /// let config = PostalConfigLoader::new().load().expect("defaults are valid");
    /// assert_eq!(config.engine.window_size, 10);
    /// assert!(config.tables.file.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a file that must exist; the format is inferred from its suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// `<config_dir>/postal/postal.yaml` then `./postal.yaml`, both optional.
    pub fn with_default_locations(self) -> Self {
        let user = dirs::config_dir().map(|dir| dir.join("postal").join(CONFIG_FILE_NAME));
        let loader = match user {
            Some(path) => self.with_optional_file(path),
            None => self,
        };
        loader.with_optional_file(CONFIG_FILE_NAME)
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use postal_config::PostalConfigLoader;
    ///
    /// let cfg = PostalConfigLoader::new()
    ///     .with_yaml_str("engine:\n  window_size: 12\n  max_in_flight: 4\n")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.engine.window_size, 12);
    /// assert_eq!(cfg.engine.max_in_flight, Some(4));
    /// assert_eq!(cfg.http.retries, 2);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Merge all sources, apply environment overrides, expand `${VAR}`
    /// placeholders and validate.
    pub fn load(self) -> Result<PostalConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: PostalConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}
