use api_types::{UpdateProfileRequest, UserProfile};
use yew::prelude::*;

use crate::{
    components::atoms::input_text::{InputText, InputType},
    forms::ProfileData,
};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub user: UserProfile,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<UpdateProfileRequest>,
}

#[function_component(ProfileForm)]
pub fn profile_form(props: &Props) -> Html {
    let state = {
        let user = props.user.clone();
        use_state(move || ProfileData::from_user(&user))
    };

    let edit = |apply: fn(&mut ProfileData, String)| {
        let state = state.clone();
        Callback::from(move |value: String| {
            let mut data = (*state).clone();
            apply(&mut data, value);
            state.set(data);
        })
    };
    let on_change_first_name = edit(|data, value| data.first_name = value);
    let on_change_last_name = edit(|data, value| data.last_name = value);
    let on_change_phone = edit(|data, value| data.phone = value);

    let on_form_submit = {
        let state = state.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(state.to_request());
        })
    };

    html! {
        <form onsubmit={on_form_submit}>
            <div class="row">
                <div class="col-md-6 mb-3">
                    <label for="first-name" class="form-label">{"First name"}</label>
                    <InputText id="first-name" value={state.first_name.clone()} on_change={on_change_first_name} />
                </div>
                <div class="col-md-6 mb-3">
                    <label for="last-name" class="form-label">{"Last name"}</label>
                    <InputText id="last-name" value={state.last_name.clone()} on_change={on_change_last_name} />
                </div>
            </div>
            <div class="row">
                <div class="col-md-6 mb-3">
                    <label for="profile-email" class="form-label">{"Email"}</label>
                    <InputText
                        id="profile-email"
                        input_type={InputType::Email}
                        value={props.user.email.clone()}
                        disabled={true}
                        on_change={Callback::default()} />
                </div>
                <div class="col-md-6 mb-3">
                    <label for="profile-phone" class="form-label">{"Phone"}</label>
                    <InputText
                        id="profile-phone"
                        input_type={InputType::Tel}
                        value={state.phone.clone()}
                        on_change={on_change_phone} />
                </div>
            </div>
            <button type="submit" class="btn btn-primary" disabled={props.busy}>{"Save changes"}</button>
        </form>
    }
}
