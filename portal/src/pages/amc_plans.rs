use api_types::{AmcPlan, AmcSubscription};
use chrono::Utc;
use futures::future::join;
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;

use crate::{
    api::{amc_api, use_api},
    components::{
        atoms::notice::{Notice, NoticeAlert},
        composite::plan_card::PlanCard,
    },
    display::short_date_or_na,
    forms,
    hooks::use_fetch::use_fetch,
    pages::{or_empty, render_fetch},
};

#[derive(Debug, Clone, PartialEq, Default)]
struct PlansData {
    active: Option<AmcSubscription>,
    plans: Vec<AmcPlan>,
}

#[function_component(AmcPlansPage)]
pub fn amc_plans_page() -> Html {
    let api = use_api();
    let busy = use_bool_toggle(false);
    let notice = use_state(|| None::<Notice>);

    let data = use_fetch((), |api, _| async move {
        let (subscriptions, plans) =
            join(amc_api::my_subscriptions(&api), amc_api::list_plans(&api)).await;
        let subscriptions = or_empty("AMC subscriptions", subscriptions)?;
        let plans = or_empty("AMC plans", plans)?;
        Ok(PlansData {
            active: subscriptions.into_iter().next(),
            plans,
        })
    });

    let on_choose = {
        let busy = busy.clone();
        let notice = notice.clone();
        Callback::from(move |plan: AmcPlan| {
            let api = api.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            busy.set(true);
            spawn_local(async move {
                let inquiry = forms::amc_inquiry(&plan, Utc::now());
                match amc_api::send_inquiry(&api, &inquiry).await {
                    Ok(_) => notice.set(Some(Notice::Success(
                        "Request received! Our team will contact you shortly.".to_owned(),
                    ))),
                    Err(error) => notice.set(Some(Notice::Error(
                        error.user_message("Failed to submit request. Please try again."),
                    ))),
                }
                busy.set(false);
            });
        })
    };

    let on_close_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let content = render_fetch(data.state(), "Failed to load AMC plans", |data| {
        let active = data.active.as_ref().map(|amc| {
            html! {
                <div class="alert alert-success d-flex justify-content-between align-items-center">
                    <div>
                        <div class="small text-uppercase">{"Your current plan"}</div>
                        <div class="fw-bold">{amc.display_plan_name()}</div>
                    </div>
                    <div class="small">{format!("Valid until {}", short_date_or_na(amc.end_date.as_ref()))}</div>
                </div>
            }
        });
        let plans = if data.plans.is_empty() {
            html! { <p class="text-muted">{"No plans are available right now"}</p> }
        } else {
            html! {
                <div class="row g-3">
                    { for data.plans.iter().map(|plan| html! {
                        <div class="col-md-6 col-xl-4" key={plan.id.clone()}>
                            <PlanCard plan={plan.clone()} busy={*busy} on_choose={on_choose.clone()} />
                        </div>
                    }) }
                </div>
            }
        };
        html! {
            <>
                {active}
                {plans}
            </>
        }
    });

    html! {
        <div class="container-fluid">
            <h1 class="h3">{"AMC Plans"}</h1>
            <p class="text-muted">{"Annual maintenance keeps your purifier running like new"}</p>
            <NoticeAlert notice={(*notice).clone()} on_close={on_close_notice} />
            {content}
        </div>
    }
}
