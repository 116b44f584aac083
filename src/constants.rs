//! Application-wide constants.

/// The display name of the application, also the config directory name.
pub const APP_NAME: &str = "Bubu";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "bubu";
