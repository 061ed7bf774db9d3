use api_types::RentalResponse;

use super::{ApiClient, ApiError};

pub async fn get_rental(api: &ApiClient) -> Result<RentalResponse, ApiError> {
    api.get("/user-rentals").await
}
