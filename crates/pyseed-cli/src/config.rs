//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the option structs built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PYSEED_<SECTION>__<KEY>`, e.g.
//!    `PYSEED_NETWORK__TIMEOUT_SECS=5`
//! 3. Config file: `--config FILE`, else `<config dir>/pyseed/config.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use pyseed_adapters::HttpSettings;
use pyseed_core::{
    application::{FetchPolicy, ScaffoldOptions},
    domain::SourceUrls,
};

const ENV_PREFIX: &str = "PYSEED";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    /// Where the ignore lists are downloaded from.
    pub sources: SourcesConfig,
    pub git: GitConfig,
    pub scaffold: ScaffoldConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Extra attempts for a failed fetch, transient failures only.
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            retries: 1,
            retry_backoff_ms: 500,
            user_agent: format!("pyseed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub dockerignore: String,
    pub gitignore: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let urls = SourceUrls::default();
        Self {
            dockerignore: urls.dockerignore,
            gitignore: urls.gitignore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Executable name or path, resolved on `PATH`.
    pub executable: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: "git".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Remove the project directory again when a run fails part-way.
    pub rollback_on_failure: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            rollback_on_failure: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// A file passed explicitly must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let config: Self = config::Config::builder()
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration value")?;

        config.validate()?;
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pyseed.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "pyseed", "pyseed")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".pyseed.toml"))
    }

    /// Reject values that would make every run fail in a confusing way.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.network.timeout_secs == 0 {
            bail!("network.timeout_secs must be greater than zero");
        }
        if self.network.connect_timeout_secs == 0 {
            bail!("network.connect_timeout_secs must be greater than zero");
        }
        for (key, url) in [
            ("sources.dockerignore", &self.sources.dockerignore),
            ("sources.gitignore", &self.sources.gitignore),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{key} must be an http(s) URL, got '{url}'");
            }
        }
        if self.git.executable.trim().is_empty() {
            bail!("git.executable must not be empty");
        }
        Ok(())
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.network.timeout_secs),
            connect_timeout: Duration::from_secs(self.network.connect_timeout_secs),
            user_agent: self.network.user_agent.clone(),
        }
    }

    /// Scaffold options for one run; `keep_partial` overrides the rollback
    /// setting.
    pub fn scaffold_options(&self, keep_partial: bool) -> ScaffoldOptions {
        ScaffoldOptions {
            sources: SourceUrls {
                dockerignore: self.sources.dockerignore.clone(),
                gitignore: self.sources.gitignore.clone(),
            },
            fetch_policy: FetchPolicy {
                retries: self.network.retries,
                backoff: Duration::from_millis(self.network.retry_backoff_ms),
            },
            rollback_on_failure: self.scaffold.rollback_on_failure && !keep_partial,
        }
    }
}
