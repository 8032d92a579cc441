//! Theme error types.

use thiserror::Error;

/// Result type for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

/// Errors that can occur while loading theme configuration and data assets.
///
/// Rendering and policy evaluation never fail; these errors only come from
/// reading files or parsing externally supplied data.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File contents could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A crawler signature was empty after normalization.
    #[error("Invalid crawler signature at index {index}: pattern must not be empty")]
    InvalidSignature { index: usize },

    /// A scope referenced a website or store that is not configured.
    #[error("Unknown scope: {0}")]
    UnknownScope(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ThemeError {
    fn from(e: serde_json::Error) -> Self {
        ThemeError::Serialization(e.to_string())
    }
}

/// Read a TOML or JSON file (chosen by extension) into `T`.
pub fn load_structured_file<T>(path: &std::path::Path) -> ThemeResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: display.clone(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content).map_err(|e| ThemeError::Parse {
            path: display,
            message: e.to_string(),
        })
    } else {
        toml::from_str(&content).map_err(|e| ThemeError::Parse {
            path: display,
            message: e.to_string(),
        })
    }
}
