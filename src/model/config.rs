use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".cyberark-ssh.yaml";
pub const DEFAULT_PORT: u16 = 22;

const SAMPLE_CONFIG: &str = include_str!("../../config/sample.yaml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    NoHome,
    #[error(
        "cannot read config {}: {}\nRun 'cyberark-ssh init' to create a sample config",
        .path.display(),
        .error
    )]
    Read { path: PathBuf, error: io::Error },
    #[error("cannot parse config {}: {}", .path.display(), .error)]
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },
    #[error("config: '{0}' is required")]
    MissingField(&'static str),
    #[error(
        "config already exists at {} — remove it first if you want to regenerate",
        .0.display()
    )]
    AlreadyExists(PathBuf),
    #[error("cannot write config {}: {}", .path.display(), .error)]
    Write { path: PathBuf, error: io::Error },
}

/// Per-server CyberArk connection details.
///
/// Empty strings mean "unset"; the config-level defaults fill them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub struct ServerEntry {
    pub vault: String,
    pub account: String,
    pub domain: String,
}

/// Accepted YAML shapes for a server: a bare vault name (any scalar), a
/// mapping with `vault`/`account`/`domain`, or null.
impl TryFrom<Value> for ServerEntry {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(fields) => {
                let field = |key: &str| match fields.get(key) {
                    Some(value) => scalar_text(value)
                        .ok_or_else(|| format!("server field '{key}' must be a scalar")),
                    None => Ok(String::new()),
                };
                Ok(Self {
                    vault: field("vault")?,
                    account: field("account")?,
                    domain: field("domain")?,
                })
            }
            other => scalar_text(&other)
                .map(|vault| Self {
                    vault,
                    ..Self::default()
                })
                .ok_or_else(|| "server entry must be a vault name or a mapping".to_string()),
        }
    }
}

/// Text of a scalar node; null reads as empty.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Contents of `~/.cyberark-ssh.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user: String,
    pub cyberark_host: String,
    pub port: Option<u16>,
    pub default_vault: String,
    pub default_account: String,
    pub default_domain: String,
    pub servers: BTreeMap<String, ServerEntry>,
    pub aliases: BTreeMap<String, String>,
    pub ssh_args: Vec<String>,
}

impl Config {
    /// `<home>/.cyberark-ssh.yaml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs_home().ok_or(ConfigError::NoHome)?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        let config = Self::from_yaml(&raw, path)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(raw).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.user.is_empty() {
            return Err(ConfigError::MissingField("user"));
        }
        if self.cyberark_host.is_empty() {
            return Err(ConfigError::MissingField("cyberark_host"));
        }
        Ok(())
    }

    /// Effective PSMP port; unset and `0` both mean the SSH default.
    pub fn port(&self) -> u16 {
        match self.port {
            Some(0) | None => DEFAULT_PORT,
            Some(port) => port,
        }
    }

    /// Port to pass explicitly on the command line, if it differs from 22.
    pub fn explicit_port(&self) -> Option<u16> {
        let port = self.port();
        (port != DEFAULT_PORT).then_some(port)
    }

    /// Write the annotated sample config. Never overwrites an existing file.
    pub fn write_sample(path: &Path) -> Result<(), ConfigError> {
        let mut file = match open_new_private(path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ConfigError::AlreadyExists(path.to_path_buf()));
            }
            Err(error) => {
                return Err(ConfigError::Write {
                    path: path.to_path_buf(),
                    error,
                });
            }
        };

        file.write_all(SAMPLE_CONFIG.as_bytes())
            .map_err(|error| ConfigError::Write {
                path: path.to_path_buf(),
                error,
            })?;

        tracing::info!("wrote sample config to {}", path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn open_new_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_new_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
