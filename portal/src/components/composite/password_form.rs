use api_types::ChangePasswordRequest;
use yew::prelude::*;

use crate::{
    components::atoms::input_text::{InputText, InputType},
    forms::PasswordChangeData,
};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<ChangePasswordRequest>,
}

#[function_component(PasswordForm)]
pub fn password_form(props: &Props) -> Html {
    let state = use_state(PasswordChangeData::default);
    let error_state = use_state(|| None::<String>);

    let edit = |apply: fn(&mut PasswordChangeData, String)| {
        let state = state.clone();
        Callback::from(move |value: String| {
            let mut data = (*state).clone();
            apply(&mut data, value);
            state.set(data);
        })
    };
    let on_change_current = edit(|data, value| data.current_password = value);
    let on_change_new = edit(|data, value| data.new_password = value);
    let on_change_confirm = edit(|data, value| data.confirm_password = value);

    let on_form_submit = {
        let state = state.clone();
        let error_state = error_state.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match state.to_request() {
                Ok(request) => {
                    error_state.set(None);
                    on_submit.emit(request);
                }
                Err(error) => error_state.set(Some(error.to_string())),
            }
        })
    };

    html! {
        <form onsubmit={on_form_submit}>
            if let Some(error) = &*error_state {
                <div class="alert alert-danger" role="alert">{error}</div>
            }
            <div class="mb-3">
                <label for="current-password" class="form-label">{"Current password"}</label>
                <InputText
                    id="current-password"
                    input_type={InputType::Password}
                    value={state.current_password.clone()}
                    on_change={on_change_current} />
            </div>
            <div class="mb-3">
                <label for="new-password" class="form-label">{"New password"}</label>
                <InputText
                    id="new-password"
                    input_type={InputType::Password}
                    value={state.new_password.clone()}
                    on_change={on_change_new} />
            </div>
            <div class="mb-3">
                <label for="confirm-password" class="form-label">{"Confirm new password"}</label>
                <InputText
                    id="confirm-password"
                    input_type={InputType::Password}
                    value={state.confirm_password.clone()}
                    on_change={on_change_confirm} />
            </div>
            <button type="submit" class="btn btn-outline-primary" disabled={props.busy}>
                {"Change password"}
            </button>
        </form>
    }
}
