use api_types::{
    AmcInquiryRequest, AmcPlan, AmcPlansResponse, AmcServiceRequest, AmcSubscription, AmcSummary,
    AmcSummaryResponse, MessageResponse, MyAmcsResponse, SubscriptionsResponse,
};

use super::{ApiClient, ApiError};

pub async fn list_plans(api: &ApiClient) -> Result<Vec<AmcPlan>, ApiError> {
    let response: AmcPlansResponse = api.get("/amc-plans").await?;
    Ok(response.plans)
}

pub async fn my_subscriptions(api: &ApiClient) -> Result<Vec<AmcSubscription>, ApiError> {
    let response: SubscriptionsResponse = api.get("/amc-user/my-subscriptions").await?;
    Ok(response.amc)
}

pub async fn send_inquiry(
    api: &ApiClient,
    request: &AmcInquiryRequest,
) -> Result<MessageResponse, ApiError> {
    log::info!("Api AMC inquiry, notes={}", request.notes);
    api.post("/amc-user/request-service", request).await
}

/// `status` is one of the filter labels the server understands:
/// `Active`, `Expired` or `all`.
pub async fn my_amcs(api: &ApiClient, status: &str) -> Result<Vec<AmcSubscription>, ApiError> {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("status", status)
        .finish();
    let response: MyAmcsResponse = api.get(&format!("/my-amcs?{query}")).await?;
    Ok(response.amcs)
}

pub async fn amc_summary(api: &ApiClient) -> Result<Option<AmcSummary>, ApiError> {
    let response: AmcSummaryResponse = api.get("/my-amcs/summary").await?;
    Ok(response.summary)
}

pub async fn request_service(
    api: &ApiClient,
    amc_id: &str,
    request: &AmcServiceRequest,
) -> Result<MessageResponse, ApiError> {
    log::info!("Api AMC service visit requested, amc_id={amc_id}");
    api.post(&format!("/my-amcs/{amc_id}/request-service"), request)
        .await
}
