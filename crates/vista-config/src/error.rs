//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing the viewer config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

/// Errors raised while importing authored scene settings. All of them abort
/// viewer construction.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The document declares a schema version this build cannot migrate.
    #[error("unsupported experience settings version: {0}")]
    UnsupportedVersion(serde_json::Value),

    /// The document does not match the schema of its declared version.
    #[error("malformed experience settings: {0}")]
    Parse(#[source] serde_json::Error),

    /// Failed to read the settings file.
    #[error("failed to read experience settings: {0}")]
    Read(#[source] std::io::Error),

    /// The document has no camera to start from.
    #[error("experience settings declare no cameras")]
    MissingCamera,
}
