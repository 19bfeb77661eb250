use crate::source::SourceError;
use crate::store::StoreError;
use std::fmt;

/// Failures of photo session operations
///
/// `Network` and `EmptySelection` are shown through `SessionState::Error`;
/// the others travel through the notice channel and leave the state alone.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Remote fetch or transport error
    Network(String),
    /// Fetch succeeded but returned no records
    EmptySelection,
    /// Filter or save attempted without a current photo
    MissingCurrentPhoto,
    /// Load requested but nothing is stored under the key
    NotFound(String),
    /// Store read or write failed
    Persistence(String),
    /// The session was closed before the operation finished
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Network(msg) => write!(f, "Network error: {}", msg),
            SessionError::EmptySelection => write!(f, "Photo source returned no photos"),
            SessionError::MissingCurrentPhoto => write!(f, "No current photo"),
            SessionError::NotFound(msg) => write!(f, "Not found: {}", msg),
            SessionError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            SessionError::Closed => write!(f, "Session closed"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SourceError> for SessionError {
    fn from(e: SourceError) -> Self {
        SessionError::Network(e.to_string())
    }
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        SessionError::Persistence(e.to_string())
    }
}

impl SessionError {
    /// User-friendly message for notices
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Network(_) => "Could not reach the photo service.".to_string(),
            SessionError::EmptySelection => "The photo service returned no photos.".to_string(),
            SessionError::MissingCurrentPhoto => "Current photo is empty. Roll first.".to_string(),
            SessionError::NotFound(msg) => format!("{} was not found.", msg),
            SessionError::Persistence(_) => "Saving or loading failed. Please try again.".to_string(),
            SessionError::Closed => "The screen was closed.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = SessionError::Persistence("Remote store error: permission denied".to_string());
        assert_eq!(err.user_message(), "Saving or loading failed. Please try again.");

        let err = SessionError::NotFound("Image a1".to_string());
        assert_eq!(err.user_message(), "Image a1 was not found.");
    }

    #[test]
    fn test_conversions() {
        let err: SessionError = SourceError::ServerError("502 Bad Gateway".to_string()).into();
        assert!(matches!(err, SessionError::Network(_)));

        let err: SessionError = StoreError::Other("locked".to_string()).into();
        assert_eq!(err, SessionError::Persistence("locked".to_string()));
    }
}
