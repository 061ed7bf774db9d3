use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    router::{switch, Route},
    session::SessionProvider,
};

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </SessionProvider>
    }
}
