use api_types::{NewServiceTicket, ServiceTicket};
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;

use crate::{
    api::{service_api, use_api},
    components::{
        atoms::{
            notice::{Notice, NoticeAlert},
            status_badge::StatusBadge,
        },
        composite::service_request_form::ServiceRequestForm,
    },
    display::short_date_or_na,
    forms::ServiceRequestData,
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
    session::use_session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    NewRequest,
    History,
}

fn render_ticket(ticket: &ServiceTicket) -> Html {
    let reference = ticket.ticket_id.as_deref().unwrap_or(&ticket.id);
    html! {
        <div class="card mb-3" key={ticket.id.clone()}>
            <div class="card-body">
                <div class="d-flex justify-content-between align-items-start mb-2">
                    <div>
                        <h3 class="h6 mb-0">{&ticket.kind}</h3>
                        <span class="small text-muted">{format!("ID: #{reference}")}</span>
                    </div>
                    <StatusBadge status={ticket.status.clone().unwrap_or_else(|| "Pending".to_owned())} />
                </div>
                <p class="small mb-2" style="white-space: pre-wrap;">{&ticket.description}</p>
                if let Some(technician) = &ticket.assigned_technician {
                    <div class="small">{format!("Technician: {technician}")}</div>
                }
                if let Some(notes) = &ticket.resolution_notes {
                    <div class="small fst-italic">{format!("\"{notes}\"")}</div>
                }
                <div class="small text-muted mt-2">
                    {short_date_or_na(ticket.date.as_ref())}
                    if let Some(priority) = &ticket.priority {
                        {format!(" · {priority} Priority")}
                    }
                </div>
            </div>
        </div>
    }
}

#[function_component(ServiceSupportPage)]
pub fn service_support_page() -> Html {
    let api = use_api();
    let session = use_session();
    let tab = use_state(|| Tab::NewRequest);
    let busy = use_bool_toggle(false);
    let notice = use_state(|| None::<Notice>);
    let form = {
        let user = session.user();
        use_state(move || ServiceRequestData::for_user(user.as_ref()))
    };

    let history = use_fetch((), |api, _| async move { service_api::list_tickets(&api).await });

    let on_form_change = {
        let form = form.clone();
        Callback::from(move |data: ServiceRequestData| form.set(data))
    };

    let on_submit = {
        let busy = busy.clone();
        let notice = notice.clone();
        let form = form.clone();
        let tab = tab.clone();
        let history = history.clone();
        Callback::from(move |ticket: NewServiceTicket| {
            let api = api.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let form = form.clone();
            let tab = tab.clone();
            let history = history.clone();
            busy.set(true);
            spawn_local(async move {
                match service_api::create_ticket(&api, &ticket).await {
                    Ok(_) => {
                        notice.set(Some(Notice::Success(
                            "Request submitted. Our team has been notified.".to_owned(),
                        )));
                        let mut data = (*form).clone();
                        data.reset_message();
                        form.set(data);
                        history.reload();
                        tab.set(Tab::History);
                    }
                    Err(error) => notice.set(Some(Notice::Error(
                        error.user_message("Please try again later."),
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

    let tab_button = |target: Tab, label: String| {
        let class = if *tab == target {
            classes!("nav-link", "active")
        } else {
            classes!("nav-link")
        };
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_: MouseEvent| tab.set(target))
        };
        html! {
            <li class="nav-item">
                <button type="button" {class} {onclick}>{label}</button>
            </li>
        }
    };
    let history_count = history
        .state()
        .data()
        .map(|tickets| tickets.len())
        .unwrap_or_default();

    let first_name = session
        .user()
        .map(|user| user.first_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "User".to_owned());

    let content = match *tab {
        Tab::NewRequest => html! {
            <div class="card">
                <div class="card-body">
                    <ServiceRequestForm
                        data={(*form).clone()}
                        busy={*busy}
                        on_change={on_form_change}
                        on_submit={on_submit} />
                </div>
            </div>
        },
        Tab::History => render_fetch(history.state(), "Failed to load service history", |tickets| {
            if tickets.is_empty() {
                html! { <p class="text-muted">{"No service requests yet"}</p> }
            } else {
                html! { {for tickets.iter().map(render_ticket)} }
            }
        }),
    };

    html! {
        <div class="container-fluid">
            <div class="d-flex flex-wrap justify-content-between align-items-end mb-4 gap-2">
                <div>
                    <h1 class="h3">{"Service & Support"}</h1>
                    <p class="text-muted mb-0">{format!("Hello {first_name}, how can we help you today?")}</p>
                </div>
                <ul class="nav nav-pills">
                    {tab_button(Tab::NewRequest, "New Request".to_owned())}
                    {tab_button(Tab::History, format!("History ({history_count})"))}
                </ul>
            </div>
            <NoticeAlert notice={(*notice).clone()} on_close={on_close_notice} />
            {content}
        </div>
    }
}
