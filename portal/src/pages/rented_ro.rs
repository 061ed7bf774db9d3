use api_types::{AmcSubscription, Rental, RentalResponse};
use chrono::Utc;
use yew::prelude::*;

use crate::{
    api::rentals_api,
    components::atoms::status_badge::StatusBadge,
    display::{days_until, rupees_or_zero, short_date_or_na},
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
};

fn render_no_rental() -> Html {
    html! {
        <div class="text-center py-5 border rounded">
            <h2 class="h5">{"No active rental plan"}</h2>
            <p class="text-muted">
                {"Get an advanced RO purifier with zero initial cost and free lifetime maintenance. Plans start at just ₹399/mo."}
            </p>
            <button class="btn btn-primary" disabled={true}>{"Explore Rental Plans"}</button>
        </div>
    }
}

fn render_amc(amc: &AmcSubscription) -> Html {
    html! {
        <div class="card mt-3">
            <div class="card-body">
                <h3 class="h6 text-muted text-uppercase">{"AMC coverage"}</h3>
                <div class="row small">
                    <div class="col">
                        <div class="text-muted">{"Plan"}</div>
                        <div class="fw-bold">{amc.display_plan_name()}</div>
                    </div>
                    <div class="col">
                        <div class="text-muted">{"Expiry"}</div>
                        <div class="fw-bold">{short_date_or_na(amc.end_date.as_ref())}</div>
                    </div>
                    <div class="col">
                        <div class="text-muted">{"Services left"}</div>
                        <div class="fw-bold">{amc.services_remaining.max(0)}</div>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn render_rental(rental: &Rental, amc: Option<&AmcSubscription>) -> Html {
    let now = Utc::now();
    let due_in = rental
        .next_due_date
        .as_ref()
        .map(|due| days_until(due, &now));
    let status = rental.status.clone().unwrap_or_else(|| "Active".to_owned());
    html! {
        <>
            <div class="card">
                <div class="card-body">
                    <div class="d-flex gap-3 mb-3">
                        if let Some(image) = &rental.machine_image {
                            <img src={image.clone()} alt="RO machine" class="rounded" style="width: 6rem; height: 6rem; object-fit: cover;" />
                        }
                        <div class="flex-grow-1">
                            <h2 class="h5 mb-1">{rental.machine_model.clone().unwrap_or_else(|| "RO Purifier".to_owned())}</h2>
                            <div class="text-muted small">{rental.plan_name.clone().unwrap_or_default()}</div>
                        </div>
                        <div><StatusBadge {status} /></div>
                    </div>
                    <div class="row">
                        <div class="col-md-4 mb-2">
                            <div class="text-muted small">{"Monthly rent"}</div>
                            <div class="fw-bold">{rupees_or_zero(rental.amount)}</div>
                        </div>
                        <div class="col-md-4 mb-2">
                            <div class="text-muted small">{"Next payment"}</div>
                            <div class="fw-bold">{short_date_or_na(rental.next_due_date.as_ref())}</div>
                            if let Some(days) = due_in {
                                <div class="small text-warning">{format!("Due in {days} days")}</div>
                            }
                        </div>
                        <div class="col-md-4 mb-2">
                            <div class="text-muted small">{"Started on"}</div>
                            <div class="fw-bold">{short_date_or_na(rental.start_date.as_ref())}</div>
                        </div>
                    </div>
                    <button class="btn btn-primary mt-2" disabled={true} title="Online payments are not available yet">
                        {"Pay Rent Now"}
                    </button>
                </div>
            </div>
            if let Some(amc) = amc.filter(|amc| amc.is_active()) {
                {render_amc(amc)}
            }
        </>
    }
}

#[function_component(RentedRoPage)]
pub fn rented_ro_page() -> Html {
    let rental = use_fetch((), |api, _| async move { rentals_api::get_rental(&api).await });

    html! {
        <div class="container-fluid">
            <h1 class="h3">{"Rented Machines"}</h1>
            <p class="text-muted">{"Manage your active RO subscriptions"}</p>
            {render_fetch(rental.state(), "Failed to load rental details", |response: &RentalResponse| {
                match &response.rental {
                    Some(rental) => render_rental(rental, response.amc.as_ref()),
                    None => render_no_rental(),
                }
            })}
        </div>
    }
}
