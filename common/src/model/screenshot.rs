use serde::{Deserialize, Serialize};

/// An image attached to a section (or used as the machine image).
///
/// The image content is inlined as a base64 data URL; the whole picture
/// lives inside the document, there is no separate blob storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub id: String,
    /// Original filename, shown in listings and Markdown exports.
    pub name: String,
    /// `data:image/...;base64,` URL with the full image bytes.
    pub data_url: String,
}

impl Screenshot {
    pub fn new(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            data_url: data_url.into(),
        }
    }
}
