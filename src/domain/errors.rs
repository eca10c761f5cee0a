// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Every failure that can happen while registering configuration is surfaced
//! once, from the registration call, as a [`ConfigError`]. Lookups never fail;
//! only the typed accessors on [`ConfigValue`](crate::domain::ConfigValue) do.

use std::num::{ParseFloatError, ParseIntError, TryFromIntError};
use std::path::PathBuf;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use configue::domain::errors::ConfigError;
///
/// let error = ConfigError::HookTarget {
///     layer: "evn".to_string(),
/// };
/// assert!(error.to_string().contains("evn"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The options handed to registration have the wrong shape: an unknown
    /// top-level key, a file descriptor without a file, or an unreadable document.
    #[error("Invalid configuration options: {message}")]
    OptionsShape {
        /// What was wrong with the options
        message: String,
    },

    /// A configuration file could not be loaded.
    #[error("Failed to load configuration file '{}': {message}", .path.display())]
    FileLoad {
        /// The file that failed
        path: PathBuf,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A post-load hook was declared for a layer that does not exist.
    #[error("Post-load hook targets unknown layer '{layer}' (expected argv, env, files or defaults)")]
    HookTarget {
        /// The layer name as given by the caller
        layer: String,
    },

    /// Failed to parse configuration content.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Creates an `OptionsShape` error from any message.
    pub fn options_shape(message: impl Into<String>) -> Self {
        ConfigError::OptionsShape {
            message: message.into(),
        }
    }

    /// Creates a `FileLoad` error for `path` without an underlying cause.
    pub fn file_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::FileLoad {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a TryFromIntError (value out of range).
    pub fn from_int_range_error(key: String, target_type: &str, err: TryFromIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: target_type.to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_options_shape_error() {
        let error = ConfigError::options_shape("unknown option 'this'");
        assert_eq!(
            error.to_string(),
            "Invalid configuration options: unknown option 'this'"
        );
    }

    #[test]
    fn test_file_load_error_names_path() {
        let error = ConfigError::file_load("/etc/app/config.json", "file not found");
        let message = error.to_string();
        assert!(message.contains("/etc/app/config.json"));
        assert!(message.contains("file not found"));
    }

    #[test]
    fn test_file_load_error_keeps_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = ConfigError::FileLoad {
            path: PathBuf::from("a.json"),
            message: "unreadable".to_string(),
            source: Some(Box::new(io_error)),
        };
        assert!(error.source().is_some());
    }

    #[test]
    fn test_hook_target_error() {
        let error = ConfigError::HookTarget {
            layer: "argz".to_string(),
        };
        assert!(error.to_string().contains("'argz'"));
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid JSON".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration: Invalid JSON"
        );
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_err = "not_a_number".parse::<i64>().unwrap_err();
        let error = ConfigError::from_parse_int_error("test.key".to_string(), parse_err);
        assert!(matches!(error, ConfigError::TypeConversionError { .. }));
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn test_from_int_range_error() {
        let range_err = u8::try_from(300_i64).unwrap_err();
        let error = ConfigError::from_int_range_error("port".to_string(), "u8", range_err);
        assert!(error.to_string().contains("u8"));
    }

    #[test]
    fn test_from_parse_float_error() {
        let parse_err = "not_a_float".parse::<f64>().unwrap_err();
        let error = ConfigError::from_parse_float_error("test.key".to_string(), parse_err);
        assert!(error.to_string().contains("float"));
    }

    #[test]
    fn test_from_parse_bool_error() {
        let parse_err = "not_a_bool".parse::<bool>().unwrap_err();
        let error = ConfigError::from_parse_bool_error("test.key".to_string(), parse_err);
        assert!(error.to_string().contains("boolean"));
    }
}
