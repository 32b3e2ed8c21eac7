//! Deployment request and domain-name validation.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::RequestError;

/// One DNS label: alphanumerics and inner hyphens, 1–63 characters.
/// Checked before the domain is interpolated into any target path.
pub static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

/// Maximum length of a full hostname.
const MAX_DOMAIN_LEN: usize = 253;

/// Validates and normalises a domain name.
///
/// Accepts DNS hostnames of at least two labels, optionally prefixed with a
/// `*.` wildcard. The result is lowercased with any trailing dot removed.
///
/// # Errors
///
/// Returns [`RequestError::EmptyDomain`] for an empty string and
/// [`RequestError::InvalidDomain`] for anything that is not hostname-shaped.
pub fn validate_domain(domain: &str) -> Result<String, RequestError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(RequestError::EmptyDomain);
    }
    let normalised = trimmed.strip_suffix('.').unwrap_or(trimmed).to_ascii_lowercase();
    let invalid = || RequestError::InvalidDomain(domain.to_string());

    if normalised.len() > MAX_DOMAIN_LEN {
        return Err(invalid());
    }
    let host = normalised.strip_prefix("*.").unwrap_or(&normalised);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }
    if labels.iter().all(|label| LABEL_RE.is_match(label)) {
        Ok(normalised)
    } else {
        Err(invalid())
    }
}

/// An issued certificate ready for deployment.
///
/// Constructed once per deployment and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    domain: String,
    cert_path: PathBuf,
    key_path: PathBuf,
    chain_path: PathBuf,
    fullchain_path: PathBuf,
}

impl DeploymentRequest {
    /// Build a request, validating the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if `domain` is not a valid hostname.
    pub fn new(
        domain: &str,
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
        chain_path: impl Into<PathBuf>,
        fullchain_path: impl Into<PathBuf>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            domain: validate_domain(domain)?,
            cert_path: cert_path.into(),
            key_path: key_path.into(),
            chain_path: chain_path.into(),
            fullchain_path: fullchain_path.into(),
        })
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }

    #[must_use]
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    #[must_use]
    pub fn chain_path(&self) -> &Path {
        &self.chain_path
    }

    #[must_use]
    pub fn fullchain_path(&self) -> &Path {
        &self.fullchain_path
    }
}
