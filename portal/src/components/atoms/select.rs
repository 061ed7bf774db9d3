use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SelectProps {
    #[prop_or_default]
    pub id: AttrValue,
    #[prop_or_default]
    pub name: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    pub options: Vec<AttrValue>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    #[prop_or_default]
    pub on_change: Callback<String>,
}

#[function_component(Select)]
pub fn select(props: &SelectProps) -> Html {
    let on_change = {
        let on_change_cb = props.on_change.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                on_change_cb.emit(select.value());
            }
        })
    };

    let options_html = props.options.iter().map(|option| {
        let is_selected = props.selected.as_ref() == Some(option);
        html! {
            <option value={option.clone()} selected={is_selected}>
                {option.as_str()}
            </option>
        }
    });

    html! {
        <select
            id={props.id.clone()}
            name={props.name.clone()}
            class={classes!("form-select", props.class.clone())}
            onchange={on_change}>
            { for options_html }
        </select>
    }
}
