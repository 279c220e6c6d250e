use thiserror::Error;

use crate::model::config::Config;
use crate::model::connection::{ResolveError, Target};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(
        "scp requires source and destination\n\
         usage: cyberark-ssh scp <src> <dst>\n  \
         remote paths use :<server|alias>:<path> format\n  \
         example: cyberark-ssh scp file.txt :mgr1:/tmp/file.txt"
    )]
    MissingOperands,
    #[error("invalid remote path {0:?} — use :<server>:<path>")]
    InvalidRemotePath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Ssh,
    Scp,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Tool::Ssh => "ssh",
            Tool::Scp => "scp",
        }
    }

    /// Environment variable that overrides the binary used for this tool.
    pub fn override_var(self) -> &'static str {
        match self {
            Tool::Ssh => "CYBERARK_SSH_SSH",
            Tool::Scp => "CYBERARK_SSH_SCP",
        }
    }

    fn port_flag(self) -> &'static str {
        match self {
            Tool::Ssh => "-p",
            Tool::Scp => "-P",
        }
    }
}

/// A fully assembled ssh/scp command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<String>,
    /// Servers that were not in the config and fell back to defaults.
    pub defaulted: Vec<String>,
}

impl Invocation {
    fn new(tool: Tool, config: &Config) -> Self {
        let mut args = Vec::new();
        if let Some(port) = config.explicit_port() {
            args.push(tool.port_flag().to_string());
            args.push(port.to_string());
        }
        args.extend(config.ssh_args.iter().cloned());

        Self {
            tool,
            args,
            defaulted: Vec::new(),
        }
    }

    /// `ssh [-p port] <ssh_args> <extra> <connection string>`
    pub fn ssh(config: &Config, name: &str, extra: &[String]) -> Result<Self, InvocationError> {
        let target = config.target(name)?;

        let mut invocation = Self::new(Tool::Ssh, config);
        invocation.args.extend(extra.iter().cloned());
        invocation.args.push(target.connection_string(config));
        invocation.note_defaults(&target);

        Ok(invocation)
    }

    /// `scp [-P port] <ssh_args> <operands>`, with `:<server|alias>:<path>`
    /// operands rewritten to `<connection string>:<path>`.
    pub fn scp(config: &Config, operands: &[String]) -> Result<Self, InvocationError> {
        if operands.len() < 2 {
            return Err(InvocationError::MissingOperands);
        }

        let mut invocation = Self::new(Tool::Scp, config);
        for operand in operands {
            let Some(rest) = operand.strip_prefix(':') else {
                invocation.args.push(operand.clone());
                continue;
            };

            let (name, path) = rest
                .split_once(':')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| InvocationError::InvalidRemotePath(operand.clone()))?;

            let target = config.target(name)?;
            invocation
                .args
                .push(format!("{}:{path}", target.connection_string(config)));
            invocation.note_defaults(&target);
        }

        Ok(invocation)
    }

    fn note_defaults(&mut self, target: &Target) {
        if target.from_defaults && !self.defaulted.contains(&target.server) {
            self.defaulted.push(target.server.clone());
        }
    }

    /// Program name followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.tool.program())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
