use api_types::{MessageResponse, Order, OrderResponse, OrdersResponse, RefundRequest};

use super::{ApiClient, ApiError};

pub async fn list_orders(api: &ApiClient) -> Result<Vec<Order>, ApiError> {
    let response: OrdersResponse = api.get("/user-orders").await?;
    log::info!("Api list orders, count={}", response.orders.len());
    Ok(response.orders)
}

/// `Ok(None)` when the server does not know the order.
pub async fn get_order(api: &ApiClient, order_id: &str) -> Result<Option<Order>, ApiError> {
    match api.get::<OrderResponse>(&format!("/user-orders/{order_id}")).await {
        Ok(response) => Ok(response.order),
        Err(ApiError::NotFound) => {
            log::warn!("Api get order, not found, order_id={order_id}");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

pub async fn cancel_order(api: &ApiClient, order_id: &str) -> Result<Option<Order>, ApiError> {
    let response: OrderResponse = api
        .put(
            &format!("/user-orders/{order_id}/cancel"),
            &serde_json::json!({}),
        )
        .await?;
    log::info!("Api cancel order, order_id={order_id}");
    Ok(response.order)
}

pub async fn request_refund(
    api: &ApiClient,
    order_id: &str,
    request: &RefundRequest,
) -> Result<MessageResponse, ApiError> {
    let response = api
        .post(&format!("/user-orders/{order_id}/refund"), request)
        .await?;
    log::info!("Api refund requested, order_id={order_id}");
    Ok(response)
}
