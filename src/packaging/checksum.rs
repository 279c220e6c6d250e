use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("cannot read {}: {}", .path.display(), .error)]
    Read { path: PathBuf, error: io::Error },
    #[error("invalid sha256 digest {0:?}: expected 64 hex characters")]
    InvalidDigest(String),
    #[error("checksum mismatch for {}\n  expected: {expected}\n  actual:   {actual}", .path.display())]
    Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

/// Lowercase hex SHA-256 of a file, streamed from disk.
pub fn sha256_file(path: &Path) -> Result<String, ChecksumError> {
    let read_error = |error| ChecksumError::Read {
        path: path.to_path_buf(),
        error,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(read_error)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Check an archive against its pinned digest. Returns the actual digest on success.
pub fn verify(path: &Path, expected: &str) -> Result<String, ChecksumError> {
    let expected = parse_digest(expected)?;
    let actual = sha256_file(path)?;

    if actual != expected {
        tracing::warn!("checksum mismatch for {}", path.display());
        return Err(ChecksumError::Mismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    tracing::info!("checksum verified for {}", path.display());
    Ok(actual)
}

/// Trimmed, lowercased digest; must be exactly 32 bytes of hex.
pub fn parse_digest(raw: &str) -> Result<String, ChecksumError> {
    let digest = raw.trim().to_ascii_lowercase();
    match hex::decode(&digest) {
        Ok(bytes) if bytes.len() == 32 => Ok(digest),
        _ => Err(ChecksumError::InvalidDigest(raw.to_string())),
    }
}
