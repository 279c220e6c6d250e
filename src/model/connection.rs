use thiserror::Error;

use crate::model::config::{Config, ServerEntry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("server {0:?} not found in config and no default_vault set")]
    UnknownServer(String),
    #[error("no vault configured for server {0:?} and no default_vault set")]
    NoVault(String),
}

/// A server resolved against the config, ready to be turned into a PSMP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub server: String,
    pub entry: ServerEntry,
    /// The server has no entry of its own; everything came from the defaults.
    pub from_defaults: bool,
}

impl Target {
    pub fn connection_string(&self, config: &Config) -> String {
        connection_string(
            &config.user,
            &self.entry,
            &self.server,
            &config.cyberark_host,
        )
    }
}

impl Config {
    /// Expand a short alias to its hostname. Only one level is expanded.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// The configured entry for `server` with every empty field taken from the defaults.
    pub fn effective_entry(&self, server: &str) -> Result<(ServerEntry, bool), ResolveError> {
        let (mut entry, from_defaults) = match self.servers.get(server) {
            Some(entry) => (entry.clone(), false),
            None if self.default_vault.is_empty() => {
                return Err(ResolveError::UnknownServer(server.to_string()));
            }
            None => (ServerEntry::default(), true),
        };

        fill_empty(&mut entry.vault, &self.default_vault);
        fill_empty(&mut entry.account, &self.default_account);
        fill_empty(&mut entry.domain, &self.default_domain);

        if entry.vault.is_empty() {
            return Err(ResolveError::NoVault(server.to_string()));
        }

        Ok((entry, from_defaults))
    }

    /// Resolve a server name or alias into a [`Target`].
    pub fn target(&self, name: &str) -> Result<Target, ResolveError> {
        let server = self.resolve_alias(name);
        let (entry, from_defaults) = self.effective_entry(server)?;

        tracing::info!(
            server,
            vault = %entry.vault,
            account = %entry.account,
            from_defaults,
            "resolved target"
        );

        Ok(Target {
            server: server.to_string(),
            entry,
            from_defaults,
        })
    }
}

fn fill_empty(field: &mut String, default: &str) {
    if field.is_empty() {
        *field = default.to_string();
    }
}

/// Build the CyberArk PSMP connection string.
///
/// ```text
/// user@vault@target@psmp                 basic
/// user@account@target@psmp               with target account
/// user@account#domain@target@psmp        with domain
/// ```
///
/// A domain is only used together with an account.
pub fn connection_string(user: &str, entry: &ServerEntry, server: &str, host: &str) -> String {
    let middle = if entry.account.is_empty() {
        entry.vault.clone()
    } else if entry.domain.is_empty() {
        entry.account.clone()
    } else {
        format!("{}#{}", entry.account, entry.domain)
    };

    format!("{user}@{middle}@{server}@{host}")
}
