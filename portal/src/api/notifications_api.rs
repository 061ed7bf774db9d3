use api_types::{MessageResponse, Notification};

use super::{ApiClient, ApiError};

pub async fn list_notifications(api: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    api.get("/notifications/user").await
}

pub async fn mark_all_read(api: &ApiClient) -> Result<MessageResponse, ApiError> {
    api.put("/notifications/user/mark-read", &serde_json::json!({}))
        .await
}
