//! Release plumbing: archive checksums, the Homebrew formula, and the
//! post-install advisory.

pub mod checksum;
pub mod formula;
pub mod hint;
