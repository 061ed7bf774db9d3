use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(PartialEq, Properties, Debug)]
pub struct Props {
    pub id: AttrValue,
    #[prop_or_default]
    pub value: String,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(4)]
    pub rows: u32,
    pub on_change: Callback<String>,
}

#[function_component(TextArea)]
pub fn text_area(props: &Props) -> Html {
    let callback = props.on_change.clone();
    let on_input = Callback::from(move |event: InputEvent| {
        if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
            callback.emit(area.value());
        }
    });
    html! {
        <textarea
            id={props.id.clone()}
            class="form-control"
            rows={props.rows.to_string()}
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            oninput={on_input} />
    }
}
