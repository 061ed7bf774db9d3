use api_types::RefundRequest;
use yew::prelude::*;

use crate::{components::atoms::text_area::TextArea, forms};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub order_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<RefundRequest>,
    pub on_close: Callback<()>,
}

#[function_component(RefundModal)]
pub fn refund_modal(props: &Props) -> Html {
    let reason_state = use_state(String::default);
    let error_state = use_state(|| None::<String>);

    let on_change_reason = {
        let reason_state = reason_state.clone();
        Callback::from(move |input_text: String| {
            reason_state.set(input_text);
        })
    };

    let on_form_submit = {
        let reason_state = reason_state.clone();
        let error_state = error_state.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match forms::refund_request(&reason_state) {
                Ok(request) => {
                    error_state.set(None);
                    on_submit.emit(request);
                }
                Err(error) => error_state.set(Some(error.to_string())),
            }
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <>
            <div class="modal d-block" tabindex="-1" role="dialog">
                <div class="modal-dialog">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{format!("Request a refund for #{}", props.order_label)}</h5>
                            <button type="button" class="btn-close" aria-label="Close" onclick={on_close.clone()}></button>
                        </div>
                        <form onsubmit={on_form_submit}>
                            <div class="modal-body">
                                if let Some(error) = &*error_state {
                                    <div class="alert alert-danger" role="alert">{error}</div>
                                }
                                <label for="refund-reason" class="form-label">{"Reason"}</label>
                                <TextArea
                                    id="refund-reason"
                                    value={(*reason_state).clone()}
                                    placeholder="Tell us what went wrong"
                                    on_change={on_change_reason} />
                            </div>
                            <div class="modal-footer">
                                <button type="button" class="btn btn-outline-secondary" onclick={on_close}>{"Close"}</button>
                                <button type="submit" class="btn btn-primary" disabled={props.busy}>{"Submit request"}</button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop show"></div>
        </>
    }
}
