use serde::{Deserialize, Serialize};

// Request models
#[derive(Debug, Default, Deserialize)]
pub struct ReportQueryParams {
    pub channel_type: Option<String>, // "hero", "kol", "seller" or "all"
}

// Response models
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
