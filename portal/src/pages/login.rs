use yew::{platform::spawn_local, prelude::*};
use yew_router::prelude::*;

use crate::{
    api::use_api,
    components::composite::login_form::LoginForm,
    forms::Credentials,
    router::Route,
    session::{auth, handoff},
};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Told once a token from the query string has been tried.
    #[prop_or_default]
    pub on_handoff_settled: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &Props) -> Html {
    let api = use_api();
    let navigator = use_navigator();
    let location = use_location();
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    // A token handed over by the website signs in without credentials. The
    // query parameter is dropped from the address bar straight away.
    {
        let api = api.clone();
        let navigator = navigator.clone();
        let busy = busy.clone();
        let error = error.clone();
        let on_handoff_settled = props.on_handoff_settled.clone();
        let query = location
            .as_ref()
            .map(|location| location.query_str().to_owned())
            .unwrap_or_default();
        use_effect_with((), move |_| {
            if let Some(token) = handoff::token_from_query(&query) {
                if let Some(navigator) = &navigator {
                    navigator.replace(&Route::Login);
                }
                busy.set(true);
                spawn_local(async move {
                    let session = api.session().clone();
                    match auth::login_with_token(&session, &api, token).await {
                        Ok(_) => {
                            if let Some(navigator) = &navigator {
                                navigator.replace(&Route::Dashboard);
                            }
                        }
                        Err(auth_error) => error.set(Some(auth_error.to_string())),
                    }
                    busy.set(false);
                    on_handoff_settled.emit(());
                });
            }
        });
    }

    let on_login_event = {
        let api = api.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |credentials: Credentials| {
            let api = api.clone();
            let navigator = navigator.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            spawn_local(async move {
                let session = api.session().clone();
                match auth::login(&session, &api, &credentials.email, &credentials.password).await
                {
                    Ok(_) => {
                        error.set(None);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(auth_error) => error.set(Some(auth_error.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <main>
            <LoginForm on_login={on_login_event} busy={*busy} error={(*error).clone()} />
        </main>
    }
}
