mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

// Any well-formed digest; the formula does not check it against a file.
const DIGEST: &str = "c7ea8cc82edd8c0f9e9bd60a6c8ab5db4eba3a90a2dc6cd9e0bb1ae5dc6b40d2";

fn archive(env: &TestEnv) -> std::path::PathBuf {
    let path = env.home.join("v1.0.0.tar.gz");
    fs::write(&path, "release bytes\n").expect("write archive");
    path
}

#[test]
fn verify_archive_rejects_mismatch() {
    let env = TestEnv::new();
    let path = archive(&env);

    env.cmd()
        .arg("verify-archive")
        .arg(&path)
        .arg("--sha256")
        .arg("0".repeat(64))
        .assert()
        .failure()
        .stderr(contains("checksum mismatch"));
}

#[test]
fn verify_archive_rejects_malformed_digest() {
    let env = TestEnv::new();
    let path = archive(&env);

    env.cmd()
        .arg("verify-archive")
        .arg(&path)
        .args(["--sha256", "not-hex"])
        .assert()
        .failure()
        .stderr(contains("invalid sha256 digest"));
}

#[test]
fn formula_pins_the_archive_digest() {
    let env = TestEnv::new();
    let path = archive(&env);

    // The digest printed by verify-archive on success is what the formula pins.
    let output = env
        .cmd()
        .arg("formula")
        .arg("--archive")
        .arg(&path)
        .args(["--release", "2.0.0"])
        .assert()
        .success()
        .stdout(
            contains("class CyberarkSsh < Formula")
                .and(contains("version \"2.0.0\""))
                .and(contains("/archive/refs/tags/v2.0.0.tar.gz"))
                .and(contains("assert_match \"CyberArk SSH wrapper\"")),
        )
        .get_output()
        .stdout
        .clone();

    let formula = String::from_utf8(output).expect("utf8 formula");
    let pinned = formula
        .lines()
        .find_map(|line| line.trim().strip_prefix("sha256 \""))
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("sha256 line");

    env.cmd()
        .arg("verify-archive")
        .arg(&path)
        .args(["--sha256", pinned])
        .assert()
        .success()
        .stdout(contains(pinned));
}

#[test]
fn formula_accepts_explicit_url_and_digest() {
    TestEnv::new()
        .cmd()
        .args(["formula", "--sha256"])
        .arg(DIGEST.to_uppercase())
        .args(["--url", "https://mirror.example.com/cyberark-ssh.tar.gz"])
        .assert()
        .success()
        .stdout(
            contains(format!("sha256 \"{DIGEST}\""))
                .and(contains("url \"https://mirror.example.com/cyberark-ssh.tar.gz\"")),
        );
}
