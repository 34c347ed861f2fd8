use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of a bridge operation.
///
/// None of these are fatal to the host: each one is reported back into the
/// script environment through [`BridgeError::script_code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// A script-supplied argument bag had the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The script context is destroyed or not yet ready.
    #[error("script context unavailable")]
    ContextUnavailable,

    /// Script referenced a capability or member that is not registered.
    #[error("capability not found: {0}")]
    CapabilityNotFound(String),

    /// An external collaborator failed to carry out a request.
    #[error("host error: {0}")]
    Host(String),
}

impl BridgeError {
    /// Stable error code exposed to script as `error.code`.
    pub fn script_code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArgument(_) => "InvalidArgument",
            BridgeError::ContextUnavailable => "ContextUnavailable",
            BridgeError::CapabilityNotFound(_) => "CapabilityNotFound",
            BridgeError::Host(_) => "HostError",
        }
    }

    /// Shorthand for an `InvalidArgument` with a formatted message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(msg.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TetherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("bad namespace".into());
        assert_eq!(err.to_string(), "config validation error: bad namespace");
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::invalid("share requires a url or a message");
        assert_eq!(
            err.to_string(),
            "invalid argument: share requires a url or a message"
        );
        assert_eq!(
            BridgeError::ContextUnavailable.to_string(),
            "script context unavailable"
        );
        assert_eq!(
            BridgeError::CapabilityNotFound("camera".into()).to_string(),
            "capability not found: camera"
        );
    }

    #[test]
    fn bridge_error_script_codes() {
        assert_eq!(BridgeError::invalid("x").script_code(), "InvalidArgument");
        assert_eq!(
            BridgeError::ContextUnavailable.script_code(),
            "ContextUnavailable"
        );
        assert_eq!(
            BridgeError::CapabilityNotFound("x".into()).script_code(),
            "CapabilityNotFound"
        );
        assert_eq!(BridgeError::Host("x".into()).script_code(), "HostError");
    }

    #[test]
    fn tether_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: TetherError = config_err.into();
        assert!(matches!(err, TetherError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn tether_error_from_bridge() {
        let err: TetherError = BridgeError::ContextUnavailable.into();
        assert!(matches!(err, TetherError::Bridge(BridgeError::ContextUnavailable)));
    }

    #[test]
    fn tether_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TetherError = io_err.into();
        assert!(matches!(err, TetherError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn tether_error_other_variant() {
        let err = TetherError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
