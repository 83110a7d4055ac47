use serde::{Deserialize, Serialize};

// one entry of the downloads listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    pub file: String,
    pub size: String,
    pub last_modified: String,
    pub owner: String,
}

// query string of the upload endpoint
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub socket_id: Option<String>,
}

// response for a fully successful upload
#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResult {
    pub result: String,
}

impl UploadResult {
    pub fn success() -> Self {
        Self {
            result: "Files uploaded with success!".to_string(),
        }
    }
}

// generic error response
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
