//! Error types for the mapwright plugin core.

/// Top-level error type for the plugin.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Release feed request error (transport failure or non-success status).
    #[error("release feed error: {0}")]
    Feed(String),

    /// Release descriptor parse error (malformed or missing JSON fields).
    #[error("release parse error: {0}")]
    Parse(String),

    /// Update application error (download, backup, artifact swap).
    #[error("update error: {0}")]
    Update(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Map schematic load/save error.
    #[error("schematic error: {0}")]
    Schematic(String),

    /// Host command interface error.
    #[error("host error: {0}")]
    Host(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PluginError>;
