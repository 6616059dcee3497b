//! Error types for sailcloth.
//!
//! The physics kernel itself never fails: numerical degeneracies are skipped
//! and anchor capacity overflow is a silent no-op. The errors here cover
//! invalid coordinates passed by a caller, invalid configuration, and loading
//! configuration files.

use std::fmt;

/// Errors raised by anchor management on a [`Cloth`](crate::Cloth).
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid coordinate does not name a particle of this cloth.
    AnchorOutOfBounds {
        i: usize,
        j: usize,
        width_count: usize,
        height_count: usize,
    },
    /// An anchor operation needs at least one registered anchor.
    NoAnchors,
    /// Anchor slot index is past the number of registered anchors.
    AnchorSlotOutOfRange { slot: usize, count: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::AnchorOutOfBounds {
                i,
                j,
                width_count,
                height_count,
            } => write!(
                f,
                "Anchor ({}, {}) is outside the {}x{} particle grid",
                i, j, width_count, height_count
            ),
            ClothError::NoAnchors => write!(f, "Cloth has no anchors. Use add_anchor() first."),
            ClothError::AnchorSlotOutOfRange { slot, count } => {
                write!(f, "Anchor slot {} out of range ({} anchors registered)", slot, count)
            }
        }
    }
}

impl std::error::Error for ClothError {}

/// Errors that can occur when validating or loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A parameter is outside its valid range.
    InvalidParameter { name: &'static str, reason: String },
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Configuration file is not valid JSON for the expected type.
    Json(serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { name, reason } => {
                write!(f, "Invalid `{}`: {}", name, reason)
            }
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::InvalidParameter { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur when building or driving a [`Session`](crate::session::Session).
#[derive(Debug)]
pub enum SessionError {
    /// Configuration was rejected.
    Config(ConfigError),
    /// Anchor setup or relocation failed.
    Cloth(ClothError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(e) => write!(f, "Configuration error: {}", e),
            SessionError::Cloth(e) => write!(f, "Cloth error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            SessionError::Cloth(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

impl From<ClothError> for SessionError {
    fn from(e: ClothError) -> Self {
        SessionError::Cloth(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_anchor_out_of_bounds_message() {
        let err = ClothError::AnchorOutOfBounds {
            i: 5,
            j: 1,
            width_count: 3,
            height_count: 3,
        };
        assert_eq!(err.to_string(), "Anchor (5, 1) is outside the 3x3 particle grid");
    }

    #[test]
    fn test_session_error_chains_source() {
        let err: SessionError = ClothError::NoAnchors.into();
        let source = err.source().expect("cloth error should be the source");
        assert_eq!(source.to_string(), ClothError::NoAnchors.to_string());
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.source().is_some());
    }
}
