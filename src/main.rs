mod cli;
mod model;
mod packaging;
mod report;
mod session;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use model::config::Config;
use packaging::{checksum, formula, hint};
use session::Invocation;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();
    tracing::info!("cyberark-ssh {} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to a daily file in the data dir (never stdout). Logging is skipped
/// entirely if that directory is unusable.
fn init_logging() {
    let Some(log_dir) = directories::ProjectDirs::from("", "", "cyberark-ssh")
        .map(|d| d.data_dir().to_path_buf())
    else {
        return;
    };
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let Ok(file_appender) = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("cyberark-ssh")
        .filename_suffix("log")
        .build(&log_dir)
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("CYBERARK_SSH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("cyberark_ssh=info"));

    // Synchronous writer: exec() replaces the process without running destructors.
    let _ = tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = || -> Result<PathBuf> {
        match &cli.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    };

    match cli.command {
        Commands::Init => {
            let config_path = config_path()?;
            Config::write_sample(&config_path)?;
            println!(
                "wrote example config to {} — edit it with your servers and vaults",
                config_path.display()
            );
        }
        Commands::List => {
            let config_path = config_path()?;
            let config = Config::load(&config_path)?;
            print!("{}", report::render_listing(&config, &config_path));
        }
        Commands::Show { target, ssh_args } => {
            let config_path = config_path()?;
            let config = Config::load(&config_path)?;
            let invocation = Invocation::ssh(&config, &target, &ssh_args)?;
            announce(&invocation);
        }
        Commands::Scp { dry_run, operands } => {
            let config_path = config_path()?;
            let config = Config::load(&config_path)?;
            let invocation = Invocation::scp(&config, &operands)?;
            announce(&invocation);
            if !dry_run {
                return hand_off(&invocation);
            }
        }
        Commands::Connect(args) => {
            let (target, ssh_args) = args
                .split_first()
                .context("missing server name")?;
            let config_path = config_path()?;
            let config = Config::load(&config_path)?;
            let invocation = Invocation::ssh(&config, target, ssh_args)?;
            announce(&invocation);
            return hand_off(&invocation);
        }
        Commands::PostInstall => {
            let config_path = config_path()?;
            if let Some(message) = hint::install_hint(&config_path) {
                println!("==> {message}");
            }
        }
        Commands::VerifyArchive { archive, sha256 } => {
            let digest = checksum::verify(&archive, &sha256)?;
            println!("{digest}  {}", archive.display());
        }
        Commands::Formula {
            sha256,
            archive,
            release,
            url,
        } => {
            let digest = pinned_digest(sha256, archive.as_deref())?;
            let mut release = formula::Release::tagged_at(release, digest);
            if let Some(url) = url {
                release.url = url;
            }
            print!("{}", formula::render(&release));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn pinned_digest(sha256: Option<String>, archive: Option<&Path>) -> Result<String> {
    match (sha256, archive) {
        (Some(sha256), _) => Ok(checksum::parse_digest(&sha256)?),
        (None, Some(archive)) => Ok(checksum::sha256_file(archive)?),
        (None, None) => anyhow::bail!("either --sha256 or --archive is required"),
    }
}

/// Echo what is about to run, the same line `show` prints.
fn announce(invocation: &Invocation) {
    for server in &invocation.defaulted {
        eprintln!("note: server {server:?} not in config, using defaults");
    }
    eprintln!("→ {}", invocation.command_line());
}

fn hand_off(invocation: &Invocation) -> Result<ExitCode> {
    let code = session::exec_into(invocation)?;
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
