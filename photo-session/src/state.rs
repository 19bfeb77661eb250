use crate::models::PhotoRecord;

/// Why the last fetch ended in the error state
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// Transport, status or decoding failure of the photo source
    Network(String),
    /// The source answered with an empty list
    EmptySelection,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Network(msg) => write!(f, "Network failure: {}", msg),
            FetchFailure::EmptySelection => write!(f, "No photos returned"),
        }
    }
}

/// What the primary UI surface renders
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Success { message: String, photo: PhotoRecord },
    Error(FetchFailure),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn photo(&self) -> Option<&PhotoRecord> {
        match self {
            SessionState::Success { photo, .. } => Some(photo),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SessionState::Success { message, .. } => Some(message),
            _ => None,
        }
    }
}
