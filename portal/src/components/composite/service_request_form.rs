use api_types::NewServiceTicket;
use chrono::Utc;
use yew::prelude::*;

use crate::{
    components::atoms::{
        input_date::InputDate,
        input_text::{InputText, InputType},
        select::Select,
        text_area::TextArea,
    },
    forms::{ServiceRequestData, SERVICE_TYPES},
};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub data: ServiceRequestData,
    #[prop_or_default]
    pub busy: bool,
    pub on_change: Callback<ServiceRequestData>,
    pub on_submit: Callback<NewServiceTicket>,
}

/// Controlled form; the owning page keeps the data so it can clear the
/// message after a successful submission.
#[function_component(ServiceRequestForm)]
pub fn service_request_form(props: &Props) -> Html {
    let error_state = use_state(|| None::<String>);

    let edit = |apply: fn(&mut ServiceRequestData, String)| {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |value: String| {
            let mut data = data.clone();
            apply(&mut data, value);
            on_change.emit(data);
        })
    };
    let on_change_kind = edit(|data, value| data.kind = value);
    let on_change_issue = edit(|data, value| data.issue = value);
    let on_change_address = edit(|data, value| data.address = value);
    let on_change_phone = edit(|data, value| data.phone = value);
    let on_change_date = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |date| {
            let mut data = data.clone();
            data.preferred_date = date;
            on_change.emit(data);
        })
    };

    let on_form_submit = {
        let data = props.data.clone();
        let error_state = error_state.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match data.to_ticket(Utc::now()) {
                Ok(ticket) => {
                    error_state.set(None);
                    on_submit.emit(ticket);
                }
                Err(error) => error_state.set(Some(error.to_string())),
            }
        })
    };

    let today = Utc::now().date_naive();

    html! {
        <form onsubmit={on_form_submit}>
            if let Some(error) = &*error_state {
                <div class="alert alert-danger" role="alert">{error}</div>
            }
            <div class="mb-3">
                <label for="service-type" class="form-label">{"Request type"}</label>
                <Select
                    id="service-type"
                    options={SERVICE_TYPES.iter().map(|kind| AttrValue::from(*kind)).collect::<Vec<_>>()}
                    selected={AttrValue::from(props.data.kind.clone())}
                    on_change={on_change_kind} />
            </div>
            <div class="mb-3">
                <label for="service-issue" class="form-label">{"Describe the issue"}</label>
                <TextArea
                    id="service-issue"
                    value={props.data.issue.clone()}
                    placeholder="What is wrong with your purifier?"
                    on_change={on_change_issue} />
            </div>
            <div class="row">
                <div class="col-md-6 mb-3">
                    <label for="service-phone" class="form-label">{"Phone"}</label>
                    <InputText
                        id="service-phone"
                        input_type={InputType::Tel}
                        value={props.data.phone.clone()}
                        on_change={on_change_phone} />
                </div>
                <div class="col-md-6 mb-3">
                    <label for="service-date" class="form-label">{"Preferred date"}</label>
                    <InputDate
                        id="service-date"
                        value={props.data.preferred_date}
                        min={today}
                        on_change={on_change_date} />
                </div>
            </div>
            <div class="mb-3">
                <label for="service-address" class="form-label">{"Address"}</label>
                <InputText
                    id="service-address"
                    value={props.data.address.clone()}
                    on_change={on_change_address} />
            </div>
            <button type="submit" class="btn btn-primary" disabled={props.busy}>
                {"Submit request"}
            </button>
        </form>
    }
}
