use std::fmt;

/// Central error types for the Mars Photos app
#[derive(Debug)]
pub enum AppError {
    /// Configuration file could not be parsed
    Config(String),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Persistence store could not be set up
    Store(photo_session::StoreError),
    /// Photo source could not be set up
    Source(photo_session::SourceError),
    /// General error
    #[allow(dead_code)]
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Store(e) => write!(f, "Store error: {}", e),
            AppError::Source(e) => write!(f, "Photo source error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<photo_session::StoreError> for AppError {
    fn from(e: photo_session::StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<photo_session::SourceError> for AppError {
    fn from(e: photo_session::SourceError) -> Self {
        AppError::Source(e)
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(msg) => format!("The configuration file is invalid: {}", msg),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Store(_) => "The photo database could not be opened.".to_string(),
            AppError::Source(_) => "The photo service could not be set up.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_converts_to_config() {
        let err: AppError = toml::from_str::<toml::Table>("= broken").unwrap_err().into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.user_message().starts_with("The configuration file is invalid"));
    }
}
