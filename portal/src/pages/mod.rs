pub mod amc_plans;
pub mod dashboard;
pub mod login;
pub mod my_amcs;
pub mod my_orders;
pub mod notifications;
pub mod order_details;
pub mod profile;
pub mod rented_ro;
pub mod service_support;

use yew::prelude::*;

use crate::{
    api::ApiError, components::atoms::spinner::Spinner, hooks::use_fetch::FetchState,
};

/// Spinner while loading, an error alert on failure, `render` otherwise.
pub(crate) fn render_fetch<T>(
    state: &FetchState<T>,
    failure: &str,
    render: impl FnOnce(&T) -> Html,
) -> Html {
    match state {
        FetchState::Loading => html! {
            <div class="text-center py-5"><Spinner /></div>
        },
        FetchState::Failed(error) => html! {
            <div class="alert alert-danger" role="alert">{error.user_message(failure)}</div>
        },
        FetchState::Ready(data) => render(data),
    }
}

/// Treats a failed secondary list as empty so the rest of the page renders.
pub(crate) fn or_empty<T>(
    what: &str,
    result: Result<Vec<T>, ApiError>,
) -> Result<Vec<T>, ApiError> {
    match result {
        Err(ApiError::Aborted) => Err(ApiError::Aborted),
        Err(error) => {
            log::warn!("Fail to load {what}, showing none. Error={error}");
            Ok(Vec::new())
        }
        ok => ok,
    }
}
