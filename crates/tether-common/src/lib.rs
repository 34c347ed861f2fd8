pub mod errors;
pub mod id;

pub use errors::{BridgeError, ConfigError, TetherError};
pub use id::NodeId;

pub type Result<T> = std::result::Result<T, TetherError>;
