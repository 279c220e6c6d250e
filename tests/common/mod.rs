#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const FIXTURE_CONFIG: &str = r#"
user: alice
cyberark_host: psmp.example.com
ssh_args:
  - "-o"
  - "StrictHostKeyChecking=no"
aliases:
  mgr1: vsr-t-mgr1
servers:
  vsr-t-mgr1: kube_test
  app01:
    vault: prod
    account: root
    domain: corp.example.com
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    data_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let data_home = tmp.path().join("data");
        fs::create_dir_all(&home).expect("create isolated home");

        Self {
            _tmp: tmp,
            home,
            data_home,
        }
    }

    /// Env with `FIXTURE_CONFIG` already at `~/.cyberark-ssh.yaml`.
    pub fn with_config() -> Self {
        let env = Self::new();
        env.write_config(FIXTURE_CONFIG);
        env
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(".cyberark-ssh.yaml")
    }

    pub fn write_config(&self, raw: &str) {
        fs::write(self.config_path(), raw).expect("write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("cyberark-ssh");
        cmd.env("HOME", &self.home)
            .env("XDG_DATA_HOME", &self.data_home)
            .env_remove("CYBERARK_SSH_CONFIG")
            .env_remove("CYBERARK_SSH_SSH")
            .env_remove("CYBERARK_SSH_SCP")
            .env_remove("CYBERARK_SSH_LOG");
        cmd
    }
}
