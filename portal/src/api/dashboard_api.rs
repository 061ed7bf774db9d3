use api_types::DashboardOverview;

use super::{ApiClient, ApiError};

pub async fn get_overview(api: &ApiClient) -> Result<DashboardOverview, ApiError> {
    api.get("/user-dashboard/overview").await
}
