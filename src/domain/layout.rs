//! Target layouts: where and in which shape certificate material is written.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::domain::error::ConfigError;

/// Placeholder replaced with the deployed domain in every file template.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

// ── Path templates ───────────────────────────────────────────────────────────

/// An output path: a base directory plus a file template containing the
/// `{domain}` placeholder. Only the template is ever substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTemplate {
    base_dir: PathBuf,
    file: String,
}

impl PathTemplate {
    /// Pair a validated file template with the base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `file_template` is not a relative, placeholder-bearing
    /// file name (see [`validate_file_template`]).
    pub fn new(
        field: &'static str,
        base_dir: &Path,
        file_template: &str,
    ) -> Result<Self, ConfigError> {
        validate_file_template(field, file_template)?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            file: file_template.to_string(),
        })
    }

    /// Substitute the domain into the file template and join it onto the
    /// base directory, which is used verbatim.
    #[must_use]
    pub fn render(&self, domain: &str) -> PathBuf {
        self.base_dir
            .join(self.file.replace(DOMAIN_PLACEHOLDER, domain))
    }

    /// The unrendered template joined onto the base directory.
    #[must_use]
    pub fn unrendered(&self) -> PathBuf {
        self.base_dir.join(&self.file)
    }
}

/// Validates a file template relative to the target base directory.
///
/// The template must mention `{domain}` so different domains never share an
/// output file, and must stay inside the base directory.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTemplate`] describing the first violation.
pub fn validate_file_template(field: &'static str, template: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidTemplate {
        field,
        template: template.to_string(),
        reason,
    };
    if template.trim().is_empty() {
        return Err(invalid("template is empty"));
    }
    if !template.contains(DOMAIN_PLACEHOLDER) {
        return Err(invalid("template must contain {domain}"));
    }
    if template.ends_with('/') {
        return Err(invalid("template must name a file"));
    }
    for component in Path::new(template).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("'..' is not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("template must be relative to base_dir"));
            }
        }
    }
    Ok(())
}

// ── Layouts ──────────────────────────────────────────────────────────────────

/// Which bytes go into a target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialPart {
    /// Full chain immediately followed by the private key.
    Combined,
    /// Full chain only.
    Certificate,
    /// Private key only.
    PrivateKey,
}

impl MaterialPart {
    /// Assemble the file content for this part.
    #[must_use]
    pub fn assemble(self, fullchain: &[u8], key: &[u8]) -> Vec<u8> {
        match self {
            Self::Combined => {
                let mut content = Vec::with_capacity(fullchain.len() + key.len());
                content.extend_from_slice(fullchain);
                content.extend_from_slice(key);
                content
            }
            Self::Certificate => fullchain.to_vec(),
            Self::PrivateKey => key.to_vec(),
        }
    }
}

/// A resolved output file for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub path: PathBuf,
    pub part: MaterialPart,
}

/// Where the proxy expects certificate material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TargetLayout {
    /// One PEM holding chain and key, as HAProxy's `crt` directive expects.
    CombinedPem { template: PathTemplate },
    /// Separate certificate and key files.
    SplitCertKey {
        cert_template: PathTemplate,
        key_template: PathTemplate,
    },
}

impl TargetLayout {
    /// Combined layout under `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid.
    pub fn combined(base_dir: &Path, template: &str) -> Result<Self, ConfigError> {
        Ok(Self::CombinedPem {
            template: PathTemplate::new("target.combined_template", base_dir, template)?,
        })
    }

    /// Split layout under `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either template is invalid or both name the same file.
    pub fn split(
        base_dir: &Path,
        cert_template: &str,
        key_template: &str,
    ) -> Result<Self, ConfigError> {
        let cert_template = PathTemplate::new("target.cert_template", base_dir, cert_template)?;
        let key_template = PathTemplate::new("target.key_template", base_dir, key_template)?;
        if cert_template == key_template {
            return Err(ConfigError::InvalidTemplate {
                field: "target.key_template",
                template: key_template.unrendered().display().to_string(),
                reason: "certificate and key must be different files",
            });
        }
        Ok(Self::SplitCertKey {
            cert_template,
            key_template,
        })
    }

    /// Resolve the output files for `domain`, in write order.
    #[must_use]
    pub fn files(&self, domain: &str) -> Vec<TargetFile> {
        match self {
            Self::CombinedPem { template } => vec![TargetFile {
                path: template.render(domain),
                part: MaterialPart::Combined,
            }],
            Self::SplitCertKey {
                cert_template,
                key_template,
            } => vec![
                TargetFile {
                    path: cert_template.render(domain),
                    part: MaterialPart::Certificate,
                },
                TargetFile {
                    path: key_template.render(domain),
                    part: MaterialPart::PrivateKey,
                },
            ],
        }
    }
}
