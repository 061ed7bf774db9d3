use api_types::{unread_count, Notification};
use yew::prelude::*;

use crate::{
    api::{notifications_api, ApiClient, ApiError},
    display::short_date_or_na,
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
};

/// Loads the list and marks everything read once it has been seen. The list
/// keeps the unread flags it arrived with so new items stay highlighted.
async fn load_and_mark_read(api: ApiClient) -> Result<Vec<Notification>, ApiError> {
    let notifications = notifications_api::list_notifications(&api).await?;
    if unread_count(&notifications) > 0 {
        if let Err(error) = notifications_api::mark_all_read(&api).await {
            log::warn!("Fail to mark notifications read, error={error}");
        }
    }
    Ok(notifications)
}

fn render_notification(notification: &Notification) -> Html {
    let class = if notification.is_read {
        classes!("list-group-item")
    } else {
        classes!(
            "list-group-item",
            "list-group-item-primary",
            "border-start",
            "border-primary",
            "border-3"
        )
    };
    html! {
        <div {class} key={notification.id.clone()}>
            <div class="d-flex justify-content-between align-items-start gap-2">
                <h3 class="h6 mb-1">{&notification.title}</h3>
                <span class="small text-muted text-nowrap">{short_date_or_na(notification.created_at.as_ref())}</span>
            </div>
            <p class="small mb-0">{&notification.message}</p>
        </div>
    }
}

#[function_component(NotificationsPage)]
pub fn notifications_page() -> Html {
    let notifications = use_fetch((), |api, _| load_and_mark_read(api));

    let total = notifications
        .state()
        .data()
        .map(Vec::len)
        .unwrap_or_default();

    html! {
        <div class="container-fluid">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h1 class="h3 mb-0">{"Notifications"}</h1>
                <span class="badge text-bg-secondary">{format!("{total} Total")}</span>
            </div>
            {render_fetch(notifications.state(), "Failed to load notifications", |list| {
                if list.is_empty() {
                    html! { <p class="text-muted text-center py-5">{"No notifications yet"}</p> }
                } else {
                    html! {
                        <div class="list-group">
                            { for list.iter().map(render_notification) }
                        </div>
                    }
                }
            })}
        </div>
    }
}
