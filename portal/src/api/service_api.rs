use api_types::{MessageResponse, NewServiceTicket, ServiceTicket, ServiceTicketsResponse};

use super::{ApiClient, ApiError};

pub async fn list_tickets(api: &ApiClient) -> Result<Vec<ServiceTicket>, ApiError> {
    let response: ServiceTicketsResponse = api.get("/service-requests").await?;
    Ok(response.requests)
}

pub async fn create_ticket(
    api: &ApiClient,
    ticket: &NewServiceTicket,
) -> Result<MessageResponse, ApiError> {
    let response = api.post("/service-requests", ticket).await?;
    log::info!("Api service request submitted, type={}", ticket.kind);
    Ok(response)
}
