use vista_config::SettingsError;

/// Failures that abort viewer construction.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("invalid scene settings: {0}")]
    Settings(#[from] SettingsError),
}
