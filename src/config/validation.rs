//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and identifiers before anything binds or queries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShortenerConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ShortenerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_config(config: &ShortenerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.database.enabled && !is_identifier(&config.database.table) {
        errors.push(ValidationError::new(
            "database.table",
            format!("{:?} is not a valid table name", config.database.table),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    for (i, source) in config.sources.iter().enumerate() {
        if source.resolved_format().is_none() {
            errors.push(ValidationError::new(
                format!("sources[{i}].format"),
                format!(
                    "cannot infer format of {}; set format to \"yaml\" or \"json\"",
                    source.path.display()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// ASCII letters, digits and underscores, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SourceConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ShortenerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ShortenerConfig::default();
        config.listener.bind_address = "localhost".into();
        config.database.table = "urls; DROP TABLE urls".into();
        config.timeouts.request_secs = 0;
        config.sources.push(SourceConfig::new("routes.txt", None));

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "database.table",
                "timeouts.request_secs",
                "sources[0].format"
            ]
        );
    }

    #[test]
    fn test_table_name_ignored_when_disabled() {
        let mut config = ShortenerConfig::default();
        config.database.enabled = false;
        config.database.table = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("urls"));
        assert!(is_identifier("_short_links2"));
        assert!(!is_identifier("2urls"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("url\"s"));
    }
}
