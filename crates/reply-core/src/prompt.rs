//! Fingerprints for system prompts, so logs can tell prompt revisions apart.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
