use api_types::{AmcSubscription, AmcSummary};
use futures::future::try_join;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;

use crate::{
    api::{amc_api, use_api},
    components::{
        atoms::notice::{Notice, NoticeAlert},
        composite::amc_card::{AmcCard, ServiceRequestEvent},
    },
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
};

/// Filter tabs; the string form is what the server expects in `?status=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumIter)]
enum AmcFilter {
    #[default]
    Active,
    Expired,
    #[strum(serialize = "all")]
    All,
}

impl AmcFilter {
    fn label(&self) -> &'static str {
        match self {
            AmcFilter::Active => "Active",
            AmcFilter::Expired => "Expired",
            AmcFilter::All => "All",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct MyAmcsData {
    amcs: Vec<AmcSubscription>,
    summary: Option<AmcSummary>,
}

fn render_summary(summary: &AmcSummary) -> Html {
    let tiles = [
        ("Active Plans", summary.active_amcs.to_string()),
        ("Services Used", summary.total_services_used.to_string()),
        ("Expired", summary.expired_amcs.to_string()),
        ("Expiring Soon", summary.upcoming_expiry.len().to_string()),
    ];
    html! {
        <div class="row g-3 mb-4">
            { for tiles.into_iter().map(|(label, value)| html! {
                <div class="col-6 col-lg-3">
                    <div class="card">
                        <div class="card-body">
                            <div class="fs-4 fw-bold">{value}</div>
                            <div class="small text-muted text-uppercase">{label}</div>
                        </div>
                    </div>
                </div>
            }) }
        </div>
    }
}

#[function_component(MyAmcsPage)]
pub fn my_amcs_page() -> Html {
    let api = use_api();
    let filter = use_state(AmcFilter::default);
    let busy = use_bool_toggle(false);
    let notice = use_state(|| None::<Notice>);

    let data = use_fetch(*filter, |api, filter| async move {
        let (amcs, summary) = try_join(
            amc_api::my_amcs(&api, filter.as_ref()),
            amc_api::amc_summary(&api),
        )
        .await?;
        Ok(MyAmcsData { amcs, summary })
    });

    let on_request = {
        let busy = busy.clone();
        let notice = notice.clone();
        let data = data.clone();
        Callback::from(move |event: ServiceRequestEvent| {
            let api = api.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let data = data.clone();
            busy.set(true);
            spawn_local(async move {
                match amc_api::request_service(&api, &event.amc_id, &event.request).await {
                    Ok(response) => {
                        notice.set(Some(Notice::Success(response.message.unwrap_or_else(
                            || "Service request submitted. Our technician will contact you soon."
                                .to_owned(),
                        ))));
                        data.reload();
                    }
                    Err(error) => notice.set(Some(Notice::Error(
                        error.user_message("Failed to request service"),
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

    let tabs = AmcFilter::iter().map(|tab| {
        let class = if tab == *filter {
            classes!("nav-link", "active")
        } else {
            classes!("nav-link")
        };
        let onclick = {
            let filter = filter.clone();
            Callback::from(move |_: MouseEvent| filter.set(tab))
        };
        html! {
            <li class="nav-item">
                <button type="button" {class} {onclick}>{tab.label()}</button>
            </li>
        }
    });

    let content = render_fetch(data.state(), "Failed to load AMC plans", |data| {
        let list = if data.amcs.is_empty() {
            html! { <p class="text-muted">{"No AMC plans found"}</p> }
        } else {
            html! {
                <div class="row">
                    { for data.amcs.iter().map(|amc| html! {
                        <div class="col-lg-6" key={amc.id.clone()}>
                            <AmcCard amc={amc.clone()} busy={*busy} on_request={on_request.clone()} />
                        </div>
                    }) }
                </div>
            }
        };
        html! {
            <>
                if let Some(summary) = &data.summary {
                    {render_summary(summary)}
                }
                {list}
            </>
        }
    });

    html! {
        <div class="container-fluid">
            <div class="d-flex flex-wrap justify-content-between align-items-end mb-4 gap-2">
                <div>
                    <h1 class="h3">{"My AMC Plans"}</h1>
                    <p class="text-muted mb-0">{"Manage your maintenance plans and service requests"}</p>
                </div>
                <ul class="nav nav-pills">
                    { for tabs }
                </ul>
            </div>
            <NoticeAlert notice={(*notice).clone()} on_close={on_close_notice} />
            {content}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_tabs_send_server_status_names() {
        let sent: Vec<String> = AmcFilter::iter()
            .map(|filter| filter.as_ref().to_owned())
            .collect();
        assert_eq!(sent, ["Active", "Expired", "all"]);
        assert_eq!(AmcFilter::All.label(), "All");
    }
}
