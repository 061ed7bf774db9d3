use yew::prelude::*;

#[derive(PartialEq, Properties, Default)]
pub struct Props {
    #[prop_or_default]
    pub small: bool,
}

#[function_component(Spinner)]
pub fn spinner(props: &Props) -> Html {
    let class = if props.small {
        classes!("spinner-border", "spinner-border-sm")
    } else {
        classes!("spinner-border", "text-primary")
    };
    html! {
        <div {class} role="status">
            <span class="visually-hidden">{"Loading..."}</span>
        </div>
    }
}
