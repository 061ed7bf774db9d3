use yew::prelude::*;

use crate::display::status_class;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub status: AttrValue,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &Props) -> Html {
    html! {
        <span class={status_class(&props.status)}>{props.status.as_str()}</span>
    }
}
