//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject blank host keys and empty directory paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Directories are not checked for existence; a missing directory is a
//!   per-request not-found, not a configuration error

use thiserror::Error;

use crate::config::schema::HostConfig;

/// A single semantic problem in a host mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("host key {0:?} is blank")]
    BlankHost(String),

    #[error("host {0:?} maps to an empty directory")]
    EmptyDirectory(String),
}

/// Check every mapping entry, collecting all violations.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (host, directory) in &config.hosts {
        if host.trim().is_empty() {
            errors.push(ValidationError::BlankHost(host.clone()));
        }
        if directory.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyDirectory(host.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_and_empty_configs_pass() {
        let config: HostConfig = [("a.com", "/siteA"), ("b.com", "relative/b")]
            .into_iter()
            .collect();
        assert!(validate_config(&config).is_ok());
        assert!(validate_config(&HostConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_violation() {
        let config: HostConfig = [(" ", "/srv"), ("a.com", "")].into_iter().collect();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::BlankHost(" ".into())));
        assert!(errors.contains(&ValidationError::EmptyDirectory("a.com".into())));
    }
}
