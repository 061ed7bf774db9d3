use api_types::{ActivityItem, ActivityKind, CoverageCard, DashboardOverview};
use yew::{platform::spawn_local, prelude::*};
use yew_router::prelude::*;

use crate::{
    api::{dashboard_api, use_api},
    components::atoms::{spinner::Spinner, status_badge::StatusBadge},
    display::{rupees, short_date_or_na},
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
    router::Route,
    session::{auth, handoff, storage::BrowserStorage, use_session},
};

fn activity_target(item: &ActivityItem) -> Option<Route> {
    match (&item.kind, &item.ref_id) {
        (ActivityKind::Order, Some(order_id)) => Some(Route::OrderDetails {
            order_id: order_id.clone(),
        }),
        (ActivityKind::Service, _) => Some(Route::ServiceSupport),
        _ => None,
    }
}

fn render_activity(item: &ActivityItem) -> Html {
    let content = html! {
        <div class="d-flex justify-content-between align-items-center">
            <div>
                <div class="fw-bold">{&item.title}</div>
                <div class="small text-muted">{short_date_or_na(item.date.as_ref())}</div>
            </div>
            if let Some(status) = &item.status {
                <StatusBadge status={status.clone()} />
            }
        </div>
    };
    match activity_target(item) {
        Some(route) => html! {
            <Link<Route> to={route} classes={classes!("list-group-item", "list-group-item-action")}>
                {content}
            </Link<Route>>
        },
        None => html! { <div class="list-group-item">{content}</div> },
    }
}

fn render_coverage(
    title: &str,
    card: Option<&CoverageCard>,
    to: Route,
    inactive_status: &str,
    empty_plan: &str,
    expiry_prefix: &str,
) -> Html {
    let active = card.map(|card| card.active).unwrap_or(false);
    let status = card
        .and_then(|card| card.status.clone())
        .unwrap_or_else(|| inactive_status.to_owned());
    let plan = card
        .and_then(|card| card.plan_name.clone())
        .unwrap_or_else(|| empty_plan.to_owned());
    let expiry = card.and_then(|card| card.expiry.clone());
    html! {
        <Link<Route> {to} classes={classes!("card", "h-100", "text-decoration-none")}>
            <div class="card-body">
                <div class="d-flex justify-content-between mb-2">
                    <span class="text-muted small text-uppercase">{title}</span>
                    <span class={if active { "badge text-bg-success" } else { "badge text-bg-secondary" }}>{status}</span>
                </div>
                <h5 class="card-title text-truncate">{plan}</h5>
                if let Some(expiry) = expiry {
                    <p class="small text-muted mb-0">{format!("{expiry_prefix}{expiry}")}</p>
                }
            </div>
        </Link<Route>>
    }
}

fn render_overview(first_name: &str, overview: &DashboardOverview) -> Html {
    let stats = overview.stats.clone().unwrap_or_default();
    let activity = if overview.recent_activity.is_empty() {
        html! { <p class="text-muted">{"No recent activity"}</p> }
    } else {
        html! {
            <div class="list-group">
                { for overview.recent_activity.iter().map(render_activity) }
            </div>
        }
    };
    html! {
        <>
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h1 class="h3">{format!("Welcome back, {}", first_name.to_uppercase())}</h1>
                <Link<Route> to={Route::ServiceSupport} classes={classes!("btn", "btn-primary")}>
                    {"Request Service"}
                </Link<Route>>
            </div>
            <div class="row g-3 mb-4">
                <div class="col-md-6 col-xl-3">
                    {render_coverage("AMC Status", overview.amc.as_ref(), Route::MyAmcs, "Inactive", "No Active Plan", "")}
                </div>
                <div class="col-md-6 col-xl-3">
                    {render_coverage("RO Rental", overview.rental.as_ref(), Route::RentedRo, "No Rental", "All Good", "Due: ")}
                </div>
                <div class="col-md-6 col-xl-3">
                    <div class="card h-100">
                        <div class="card-body">
                            <span class="text-muted small text-uppercase">{"Active Shipments"}</span>
                            <h5 class="card-title">{format!("{} Orders", stats.active_orders)}</h5>
                            <Link<Route> to={Route::MyOrders} classes={classes!("small")}>{"Details"}</Link<Route>>
                        </div>
                    </div>
                </div>
                <div class="col-md-6 col-xl-3">
                    <div class="card h-100">
                        <div class="card-body">
                            <span class="text-muted small text-uppercase">{"Total Spent"}</span>
                            <h5 class="card-title">{rupees(stats.total_spent)}</h5>
                            <p class="small text-muted mb-0">{format!("Across {} orders", stats.total_orders)}</p>
                        </div>
                    </div>
                </div>
            </div>
            <div class="d-flex justify-content-between align-items-center mb-2">
                <h2 class="h5 mb-0">{"Recent Activity"}</h2>
                <Link<Route> to={Route::MyOrders} classes={classes!("small")}>{"View All"}</Link<Route>>
            </div>
            {activity}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Told when a stored website token has been tried, or there was none
    /// to try.
    #[prop_or_default]
    pub on_handoff_settled: Callback<()>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &Props) -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    // The website may leave a token in storage for a visitor who is not
    // signed in here yet.
    {
        let api = api.clone();
        let signed_in = session.is_authenticated();
        let on_handoff_settled = props.on_handoff_settled.clone();
        use_effect_with((), move |_| {
            let token = if signed_in {
                None
            } else {
                handoff::take_storage_token(&BrowserStorage)
            };
            let Some(token) = token else {
                on_handoff_settled.emit(());
                return;
            };
            spawn_local(async move {
                let session = api.session().clone();
                if let Err(error) = auth::login_with_token(&session, &api, token).await {
                    log::warn!("Stored website token rejected, error={error}");
                    if let Some(navigator) = &navigator {
                        navigator.replace(&Route::Login);
                    }
                }
                on_handoff_settled.emit(());
            });
        });
    }

    let overview = use_fetch(session.is_authenticated(), |api, signed_in| async move {
        if signed_in {
            dashboard_api::get_overview(&api).await
        } else {
            Ok(DashboardOverview::default())
        }
    });

    if !session.is_authenticated() {
        return html! {
            <div class="text-center py-5"><Spinner /></div>
        };
    }

    let first_name = session
        .user()
        .map(|user| user.first_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "User".to_owned());

    html! {
        <div class="container-fluid">
            {render_fetch(overview.state(), "Failed to load dashboard", |data| render_overview(&first_name, data))}
        </div>
    }
}
