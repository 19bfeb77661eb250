use super::http::{build_client, get_json};
use super::{PhotoSource, SourceError};
use crate::models::PhotoRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const PICSUM_BASE_URL: &str = "https://picsum.photos";

/// Entry of `/v2/list` and body of `/id/{id}/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicsumPhoto {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub download_url: String,
}

impl From<PicsumPhoto> for PhotoRecord {
    fn from(photo: PicsumPhoto) -> Self {
        PhotoRecord {
            id: photo.id,
            image_url: photo.download_url,
            author: Some(photo.author),
            width: Some(photo.width),
            height: Some(photo.height),
            page_url: Some(photo.url),
        }
    }
}

/// Lorem Picsum placeholder photos
pub struct PicsumSource {
    base_url: String,
    client: reqwest::Client,
}

impl PicsumSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout_secs)?,
        })
    }

    fn list_url(&self) -> String {
        format!("{}/v2/list", self.base_url.trim_end_matches('/'))
    }

    fn info_url(&self, id: &str) -> String {
        format!("{}/id/{}/info", self.base_url.trim_end_matches('/'), id)
    }
}

#[async_trait]
impl PhotoSource for PicsumSource {
    async fn fetch_all(&self) -> Result<Vec<PhotoRecord>, SourceError> {
        let photos: Vec<PicsumPhoto> = get_json(&self.client, &self.list_url()).await?;
        log::debug!("Picsum listing returned {} photos", photos.len());
        Ok(photos.into_iter().map(PhotoRecord::from).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<PhotoRecord, SourceError> {
        let photo: PicsumPhoto = get_json(&self.client, &self.info_url(id)).await?;
        Ok(photo.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_listing() {
        let body = r#"[{
            "id": "0",
            "author": "Alejandro Escamilla",
            "width": 5000,
            "height": 3333,
            "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
            "download_url": "https://picsum.photos/id/0/5000/3333"
        }]"#;
        let photos: Vec<PicsumPhoto> = serde_json::from_str(body).unwrap();
        let record = PhotoRecord::from(photos[0].clone());

        assert_eq!(record.id, "0");
        assert_eq!(record.image_url, "https://picsum.photos/id/0/5000/3333");
        assert_eq!(record.author.as_deref(), Some("Alejandro Escamilla"));
        assert_eq!(record.width, Some(5000));
        assert_eq!(record.page_url.as_deref(), Some("https://unsplash.com/photos/yC-Yzbqy7PY"));
    }

    #[test]
    fn test_urls() {
        let source = PicsumSource::new(PICSUM_BASE_URL, 5).unwrap();
        assert_eq!(source.list_url(), "https://picsum.photos/v2/list");
        assert_eq!(source.info_url("237"), "https://picsum.photos/id/237/info");
    }
}
