//! Store path layout
//!
//! ```text
//! <database root>
//! ├── images/
//! │   ├── mars/<photo-id>      # saved Mars photo records
//! │   └── picsum/<photo-id>    # saved Picsum photo records
//! └── rolls                    # roll counter (integer)
//! ```

use crate::store::StoreError;

/// Base directory for saved photo records
pub const IMAGES_DIR: &str = "images";

/// Roll counter node
pub const ROLLS_PATH: &str = "rolls";

/// Build the namespace for a photo source
pub fn namespace(source: &str) -> String {
    format!("{}/{}", IMAGES_DIR, source)
}

/// Characters the realtime database refuses in keys
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '#', '$', '[', ']', '/'];

/// Build the path of a saved photo record
///
/// Ids must be a single non-empty key without `. # $ [ ] /`.
pub fn photo_path(namespace: &str, photo_id: &str) -> Result<String, StoreError> {
    if photo_id.is_empty() || photo_id.contains(FORBIDDEN_KEY_CHARS) {
        return Err(StoreError::Other(format!("Invalid photo id: {:?}", photo_id)));
    }
    Ok(normalize(&format!("{}/{}", namespace, photo_id)))
}

/// Trim surrounding slashes and drop empty segments
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
