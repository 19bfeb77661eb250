use super::http::{build_client, get_json};
use super::{PhotoSource, SourceError};
use crate::models::PhotoRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const MARS_BASE_URL: &str = "https://android-kotlin-fun-mars-server.appspot.com";

/// Entry of the `/photos` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: String,
    pub img_src: String,
}

impl From<MarsPhoto> for PhotoRecord {
    fn from(photo: MarsPhoto) -> Self {
        PhotoRecord::new(photo.id, photo.img_src)
    }
}

/// Mars rover photos
pub struct MarsSource {
    base_url: String,
    client: reqwest::Client,
}

impl MarsSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout_secs)?,
        })
    }

    fn photos_url(&self) -> String {
        format!("{}/photos", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PhotoSource for MarsSource {
    async fn fetch_all(&self) -> Result<Vec<PhotoRecord>, SourceError> {
        let photos: Vec<MarsPhoto> = get_json(&self.client, &self.photos_url()).await?;
        log::debug!("Mars listing returned {} photos", photos.len());
        Ok(photos.into_iter().map(PhotoRecord::from).collect())
    }

    // The listing is the only endpoint, so look the id up in it.
    async fn fetch_by_id(&self, id: &str) -> Result<PhotoRecord, SourceError> {
        self.fetch_all()
            .await?
            .into_iter()
            .find(|photo| photo.id == id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_listing() {
        let body = r#"[
            {"id": "424905", "img_src": "https://mars.jpl.nasa.gov/msl-raw-images/msss/01000/mcam/1000MR0044631300503690E01_DXXX.jpg"},
            {"id": "424906", "img_src": "https://mars.jpl.nasa.gov/msl-raw-images/msss/01000/mcam/1000ML0044631300305227E03_DXXX.jpg"}
        ]"#;
        let photos: Vec<MarsPhoto> = serde_json::from_str(body).unwrap();
        let records: Vec<PhotoRecord> = photos.into_iter().map(PhotoRecord::from).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "424905");
        assert!(records[0].image_url.ends_with("E01_DXXX.jpg"));
        assert_eq!(records[0].author, None);
    }

    #[test]
    fn test_photos_url() {
        let source = MarsSource::new("https://mars.example.com/", 5).unwrap();
        assert_eq!(source.photos_url(), "https://mars.example.com/photos");
    }
}
