use yew::prelude::*;

use crate::{
    components::atoms::{
        input_text::{InputText, InputType},
        spinner::Spinner,
    },
    forms::Credentials,
};

#[derive(PartialEq, Properties)]
pub struct Props {
    pub on_login: Callback<Credentials>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &Props) -> Html {
    let state = use_state(Credentials::default);
    let local_error = use_state(|| None::<String>);

    let on_change_email = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            data.email = input_text;
            state.set(data);
        })
    };

    let on_change_password = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            data.password = input_text;
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let local_error = local_error.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let data = (*state).clone();
            match data.validate() {
                Ok(()) => {
                    local_error.set(None);
                    on_login.emit(data);
                }
                Err(error) => local_error.set(Some(error.to_string())),
            }
        })
    };

    let error = (*local_error).clone().or_else(|| props.error.clone());

    html! {
        <div class="container mt-5">
            <div class="row justify-content-center">
                <div class="col-md-4">
                    <h2 class="text-center mb-1">{ "UNIXA" }</h2>
                    <p class="text-center text-muted mb-4">{ "Sign in to your account" }</p>
                    if let Some(error) = error {
                        <div class="alert alert-danger" role="alert">{error}</div>
                    }
                    <form onsubmit={on_submit}>
                        <div class="mb-3">
                            <label for="email" class="form-label">{ "Email" }</label>
                            <InputText
                                id="email"
                                name="email"
                                placeholder="Enter your email"
                                input_type={InputType::Email}
                                disabled={props.busy}
                                on_change={on_change_email} />
                        </div>
                        <div class="mb-3">
                            <label for="password" class="form-label">{ "Password" }</label>
                            <InputText
                                id="password"
                                name="password"
                                placeholder="Enter your password"
                                input_type={InputType::Password}
                                disabled={props.busy}
                                on_change={on_change_password} />
                        </div>
                        <div class="d-grid">
                            <button class="btn btn-primary" type="submit" disabled={props.busy}>
                                if props.busy {
                                    <Spinner small={true} />
                                } else {
                                    { "Login" }
                                }
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
