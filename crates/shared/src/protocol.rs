use serde::{Deserialize, Serialize};

/// Endpoint of the hosted captioning service.
pub const DEFAULT_UPLOAD_URL: &str = "https://rishbh.pythonanywhere.com/upload";

/// Name of the multipart part carrying the image bytes.
pub const IMAGE_FIELD_NAME: &str = "image";

/// Successful reply of the captioning service. Order of both lists is the
/// order the service returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub captions: Vec<String>,
    pub songs: Vec<String>,
}

/// Body the service sends alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

impl ServiceErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
