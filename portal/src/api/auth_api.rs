use api_types::{
    ChangePasswordRequest, MessageResponse, ProfileResponse, SignInRequest, SignInResponse,
    UpdateProfileRequest, UserProfile,
};
use async_trait::async_trait;

use super::{ApiClient, ApiError};
use crate::session::auth::AuthApi;

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApiError> {
        log::info!("Doing login, email={}", request.email);
        self.post_public("/users/login", request).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let response: ProfileResponse = self.get("/users/profile").await?;
        Ok(response.user)
    }
}

pub async fn update_profile(
    api: &ApiClient,
    request: &UpdateProfileRequest,
) -> Result<UserProfile, ApiError> {
    let response: ProfileResponse = api.put("/users/profile", request).await?;
    log::info!("Api update profile, user_id={}", response.user.id);
    Ok(response.user)
}

pub async fn change_password(
    api: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<MessageResponse, ApiError> {
    api.put("/users/change-password", request).await
}
