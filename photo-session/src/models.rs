use crate::filter::{self, Filter};
use serde::{Deserialize, Serialize};

/// A photo as returned by a remote source and stored in the persistence store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoRecord {
    pub id: String,
    #[serde(rename = "imgSrc")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, rename = "pageUrl", skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl PhotoRecord {
    pub fn new(id: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            author: None,
            width: None,
            height: None,
            page_url: None,
        }
    }

    /// Rewrites `image_url` in place; repeated filters keep appending.
    pub fn apply_filter(&mut self, filter: Filter) {
        self.image_url = filter::append_filter(&self.image_url, filter);
    }
}

/// Per-session settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Human readable source name used in messages ("Mars", "Picsum")
    pub label: String,
    /// Store path prefix for saved photos
    pub namespace: String,
    /// Store path of the mirrored roll counter, `None` keeps it local
    pub roll_path: Option<String>,
    pub blur_radius: u8,
}

impl SessionConfig {
    pub fn new(label: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            namespace: namespace.into(),
            roll_path: None,
            blur_radius: filter::DEFAULT_BLUR_RADIUS,
        }
    }

    pub fn with_roll_path(mut self, path: impl Into<String>) -> Self {
        self.roll_path = Some(path.into());
        self
    }

    pub fn with_blur_radius(mut self, radius: u8) -> Self {
        self.blur_radius = filter::clamp_blur_radius(radius);
        self
    }

    pub fn mars() -> Self {
        Self::new("Mars", crate::paths::namespace("mars"))
    }

    pub fn picsum() -> Self {
        Self::new("Picsum", crate::paths::namespace("picsum")).with_roll_path(crate::paths::ROLLS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_shape() {
        let photo = PhotoRecord::new("a1", "http://x/a1");
        let value = serde_json::to_value(&photo).unwrap();
        assert_eq!(value, serde_json::json!({"id": "a1", "imgSrc": "http://x/a1"}));
    }

    #[test]
    fn test_descriptive_fields_survive_roundtrip() {
        let mut photo = PhotoRecord::new("7", "https://picsum.photos/id/7/4728/3168");
        photo.author = Some("Alejandro Escamilla".to_string());
        photo.width = Some(4728);
        photo.height = Some(3168);

        let json = serde_json::to_string(&photo).unwrap();
        let back: PhotoRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, photo);
    }

    #[test]
    fn test_apply_filter_chains() {
        let mut photo = PhotoRecord::new("a1", "http://x/a1");
        photo.apply_filter(Filter::Blur(10));
        photo.apply_filter(Filter::Grayscale);
        assert_eq!(photo.image_url, "http://x/a1?blur=10&grayscale");
        assert_eq!(photo.id, "a1");
    }

    #[test]
    fn test_session_config_presets() {
        let picsum = SessionConfig::picsum();
        assert_eq!(picsum.namespace, "images/picsum");
        assert_eq!(picsum.roll_path.as_deref(), Some("rolls"));

        let mars = SessionConfig::mars().with_blur_radius(40);
        assert_eq!(mars.namespace, "images/mars");
        assert_eq!(mars.roll_path, None);
        assert_eq!(mars.blur_radius, 10);
    }
}
