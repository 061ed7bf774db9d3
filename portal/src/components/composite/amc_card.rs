use api_types::{AmcServiceRequest, AmcSubscription, ServiceVisit};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::{
    components::atoms::text_area::TextArea,
    display::{short_date, short_date_or_na, AmcBadge},
    forms,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequestEvent {
    pub amc_id: String,
    pub request: AmcServiceRequest,
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub amc: AmcSubscription,
    #[prop_or_default]
    pub busy: bool,
    pub on_request: Callback<ServiceRequestEvent>,
}

fn render_visit(visit: &ServiceVisit) -> Html {
    html! {
        <li class="list-group-item">
            <div class="d-flex justify-content-between">
                <span class="fw-bold">{visit.kind.clone().unwrap_or_else(|| "Service".to_owned())}</span>
                <span class="text-muted small">{visit.date.as_ref().map(short_date).unwrap_or_default()}</span>
            </div>
            <p class="small fst-italic mb-1">
                {visit.notes.clone().unwrap_or_else(|| "No notes provided".to_owned())}
            </p>
            if let Some(technician) = &visit.technician_name {
                <span class="small text-muted">{format!("Technician: {technician}")}</span>
            }
        </li>
    }
}

#[function_component(AmcCard)]
pub fn amc_card(props: &Props) -> Html {
    let amc = &props.amc;
    let badge = AmcBadge::of(amc);
    let show_history = use_bool_toggle(false);
    let requesting = use_bool_toggle(false);
    let notes = use_state(String::default);
    let error_state = use_state(|| None::<String>);

    let on_toggle_history = {
        let show_history = show_history.clone();
        Callback::from(move |_: MouseEvent| show_history.toggle())
    };

    // Refusals are shown before the notes box ever opens.
    let on_start_request = {
        let amc = amc.clone();
        let requesting = requesting.clone();
        let error_state = error_state.clone();
        Callback::from(move |_: MouseEvent| match forms::amc_service_request(&amc, "") {
            Ok(_) => {
                error_state.set(None);
                requesting.set(true);
            }
            Err(error) => error_state.set(Some(error.to_string())),
        })
    };

    let on_change_notes = {
        let notes = notes.clone();
        Callback::from(move |value: String| notes.set(value))
    };

    let on_submit_request = {
        let amc = amc.clone();
        let notes = notes.clone();
        let requesting = requesting.clone();
        let error_state = error_state.clone();
        let on_request = props.on_request.clone();
        Callback::from(move |_: MouseEvent| match forms::amc_service_request(&amc, &notes) {
            Ok(request) => {
                requesting.set(false);
                notes.set(String::new());
                on_request.emit(ServiceRequestEvent {
                    amc_id: amc.id.clone(),
                    request,
                });
            }
            Err(error) => error_state.set(Some(error.to_string())),
        })
    };

    let on_cancel_request = {
        let requesting = requesting.clone();
        Callback::from(move |_: MouseEvent| requesting.set(false))
    };

    let progress = amc.progress_percent.clamp(0.0, 100.0);
    let parts = if amc.parts_included { "Included" } else { "Not included" };
    let history_label = if *show_history { "Hide history" } else { "Service history" };

    html! {
        <div class="card mb-3">
            <div class="card-body">
                <div class="d-flex justify-content-between align-items-start mb-2">
                    <div>
                        <h5 class="card-title mb-0">{amc.display_plan_name()}</h5>
                        <span class="text-muted small">{amc.product_name.clone().unwrap_or_default()}</span>
                    </div>
                    <span class={badge.class()}>{badge.label()}</span>
                </div>
                <div class="row small mb-2">
                    <div class="col">
                        <div class="text-muted">{"Expires"}</div>
                        <div class="fw-bold">{short_date_or_na(amc.end_date.as_ref())}</div>
                    </div>
                    <div class="col">
                        <div class="text-muted">{"Days left"}</div>
                        <div class="fw-bold">{format!("{} days", amc.days_remaining.unwrap_or_default().max(0))}</div>
                    </div>
                    <div class="col">
                        <div class="text-muted">{"Parts"}</div>
                        <div class="fw-bold">{parts}</div>
                    </div>
                </div>
                <div class="mb-1 small">
                    {format!("Services used {} of {}", amc.services_used, amc.services_total)}
                </div>
                <div class="progress mb-3" role="progressbar">
                    <div class="progress-bar" style={format!("width: {progress:.0}%")}></div>
                </div>
                if let Some(error) = &*error_state {
                    <div class="alert alert-warning py-2" role="alert">{error}</div>
                }
                if *requesting {
                    <div class="mb-2">
                        <TextArea
                            id={format!("service-notes-{}", amc.id)}
                            rows={2}
                            value={(*notes).clone()}
                            placeholder="Describe the issue (optional)"
                            on_change={on_change_notes} />
                    </div>
                    <button class="btn btn-sm btn-primary me-2" disabled={props.busy} onclick={on_submit_request}>
                        {"Submit request"}
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" onclick={on_cancel_request}>{"Cancel"}</button>
                } else {
                    <button class="btn btn-sm btn-primary me-2" disabled={props.busy} onclick={on_start_request}>
                        {"Request service"}
                    </button>
                    <button class="btn btn-sm btn-link" onclick={on_toggle_history}>
                        {history_label}
                    </button>
                }
                if *show_history {
                    if amc.service_history.is_empty() {
                        <p class="text-muted small mt-2 mb-0">{"No services yet"}</p>
                    } else {
                        <ul class="list-group list-group-flush mt-2">
                            { for amc.service_history.iter().map(render_visit) }
                        </ul>
                    }
                }
            </div>
        </div>
    }
}
