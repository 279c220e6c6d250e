use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

const AFTER_HELP: &str = "\
Usage:
  cyberark-ssh <server|alias>               SSH to a server using its mapped vault
  cyberark-ssh <server|alias> [ssh args]    SSH with extra arguments forwarded to ssh
  cyberark-ssh scp <src> <dst>              SCP through CyberArk (use :<server>:path)

Connection string format:
  ssh user@vault@target@cyberark_host
  ssh user@account#domain@target@cyberark_host

Config file: ~/.cyberark-ssh.yaml";

#[derive(Parser, Debug)]
#[command(
    name = "cyberark-ssh",
    version,
    about = "CyberArk SSH wrapper — simplify SSH through CyberArk PSMP",
    after_help = AFTER_HELP,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CYBERARK_SSH_CONFIG",
        value_name = "PATH",
        help = "Config file to use instead of ~/.cyberark-ssh.yaml"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the SSH command that would be run
    Show {
        target: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        ssh_args: Vec<String>,
    },
    /// SCP through CyberArk (remote paths use :<server|alias>:<path>)
    Scp {
        #[arg(short = 'n', long, help = "Print the scp command without running it")]
        dry_run: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    /// List configured servers, aliases, and vaults
    #[command(visible_alias = "ls")]
    List,
    /// Write example config to ~/.cyberark-ssh.yaml
    Init,
    /// Print the post-install advisory if no config exists
    #[command(hide = true)]
    PostInstall,
    /// Verify a release archive against its pinned sha256
    #[command(hide = true)]
    VerifyArchive {
        archive: PathBuf,
        #[arg(long, value_name = "HEX")]
        sha256: String,
    },
    /// Render the Homebrew formula for a release
    #[command(hide = true)]
    #[command(group(ArgGroup::new("digest").required(true).args(["sha256", "archive"])))]
    Formula {
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,
        #[arg(long, value_name = "PATH", help = "Compute the sha256 from this archive")]
        archive: Option<PathBuf>,
        #[arg(long, value_name = "VERSION", default_value = env!("CARGO_PKG_VERSION"))]
        release: String,
        #[arg(long, help = "Source archive URL (defaults to the release tag)")]
        url: Option<String>,
    },
    /// SSH to <server|alias>, forwarding any further arguments to ssh
    #[command(external_subcommand)]
    Connect(Vec<String>),
}
