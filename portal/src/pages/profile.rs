use api_types::{ChangePasswordRequest, Order, UpdateProfileRequest};
use futures::future::join;
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::{amc_api, auth_api, orders_api, use_api},
    components::{
        atoms::notice::{Notice, NoticeAlert},
        composite::{
            confirm_button::ConfirmButton, password_form::PasswordForm, profile_form::ProfileForm,
        },
    },
    display::rupees,
    hooks::use_fetch::use_fetch,
    pages::{or_empty, render_fetch},
    router::Route,
    session::use_session,
};

#[derive(Debug, Clone, PartialEq)]
struct ProfileStats {
    order_count: usize,
    total_spent: f64,
    active_plan: Option<String>,
}

fn total_spent(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|order| order.counts_towards_spending())
        .filter_map(|order| order.total)
        .sum()
}

fn render_stats(stats: &ProfileStats) -> Html {
    let tiles = [
        ("Orders", stats.order_count.to_string()),
        ("Total Spent", rupees(stats.total_spent)),
        (
            "Active Plan",
            stats
                .active_plan
                .clone()
                .unwrap_or_else(|| "No Active Plan".to_owned()),
        ),
    ];
    html! {
        <div class="row g-3 mb-4">
            { for tiles.into_iter().map(|(label, value)| html! {
                <div class="col-md-4">
                    <div class="card h-100">
                        <div class="card-body">
                            <div class="small text-muted text-uppercase">{label}</div>
                            <div class="fs-5 fw-bold text-truncate">{value}</div>
                        </div>
                    </div>
                </div>
            }) }
        </div>
    }
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let api = use_api();
    let session = use_session();
    let navigator = use_navigator();
    let busy = use_bool_toggle(false);
    let notice = use_state(|| None::<Notice>);
    // Bumped after a password change to remount the form empty.
    let password_form_key = use_state(|| 0_u32);

    let stats = use_fetch((), |api, _| async move {
        let (orders, subscriptions) =
            join(orders_api::list_orders(&api), amc_api::my_subscriptions(&api)).await;
        let orders = orders?;
        let subscriptions = or_empty("AMC subscriptions", subscriptions)?;
        Ok(ProfileStats {
            order_count: orders.len(),
            total_spent: total_spent(&orders),
            active_plan: subscriptions
                .first()
                .map(|subscription| subscription.display_plan_name().to_owned()),
        })
    });

    let on_update_profile = {
        let api = api.clone();
        let session = session.clone();
        let busy = busy.clone();
        let notice = notice.clone();
        Callback::from(move |request: UpdateProfileRequest| {
            let api = api.clone();
            let session = session.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            busy.set(true);
            spawn_local(async move {
                match auth_api::update_profile(&api, &request).await {
                    Ok(user) => {
                        session.update_user(user);
                        notice.set(Some(Notice::Success(
                            "Profile updated successfully".to_owned(),
                        )));
                    }
                    Err(error) => {
                        notice.set(Some(Notice::Error(error.user_message("Update failed"))))
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_change_password = {
        let busy = busy.clone();
        let notice = notice.clone();
        let password_form_key = password_form_key.clone();
        Callback::from(move |request: ChangePasswordRequest| {
            let api = api.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let password_form_key = password_form_key.clone();
            busy.set(true);
            spawn_local(async move {
                match auth_api::change_password(&api, &request).await {
                    Ok(_) => {
                        notice.set(Some(Notice::Success(
                            "Password changed successfully".to_owned(),
                        )));
                        password_form_key.set(password_form_key.wrapping_add(1));
                    }
                    Err(error) => {
                        notice.set(Some(Notice::Error(error.user_message("Change failed"))))
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            log::info!("User logged out");
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let on_close_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let Some(user) = session.user() else {
        return html! {};
    };

    html! {
        <div class="container-fluid">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <div>
                    <h1 class="h3 mb-0">{"My Profile"}</h1>
                    <span class="text-muted small">{&user.email}</span>
                </div>
                <ConfirmButton
                    label="Logout"
                    prompt="Are you sure you want to log out?"
                    confirm_label="Yes, Logout"
                    class={classes!("btn", "btn-outline-danger")}
                    on_confirm={on_logout} />
            </div>
            <NoticeAlert notice={(*notice).clone()} on_close={on_close_notice} />
            {render_fetch(stats.state(), "Failed to load account summary", render_stats)}
            <div class="row g-3">
                <div class="col-lg-7">
                    <div class="card">
                        <div class="card-header">{"Personal information"}</div>
                        <div class="card-body">
                            <ProfileForm key={user.id.clone()} user={user.clone()} busy={*busy} on_submit={on_update_profile} />
                        </div>
                    </div>
                </div>
                <div class="col-lg-5">
                    <div class="card">
                        <div class="card-header">{"Change password"}</div>
                        <div class="card-body">
                            <PasswordForm key={*password_form_key} busy={*busy} on_submit={on_change_password} />
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str, total: Option<f64>) -> Order {
        Order {
            status: Some(status.to_owned()),
            total,
            ..Default::default()
        }
    }

    #[test]
    fn spending_skips_orders_that_never_completed() {
        let orders = vec![
            order("Delivered", Some(1200.0)),
            order("Cancelled", Some(500.0)),
            order("Returned", Some(300.0)),
            order("Failed", Some(50.0)),
            order("Pending", Some(800.0)),
            order("Shipped", None),
        ];
        assert_eq!(total_spent(&orders), 2000.0);
        assert_eq!(total_spent(&[]), 0.0);
    }
}
