use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(PartialEq, Default, Copy, Clone, Debug)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Tel,
}

impl InputType {
    fn as_type(&self) -> AttrValue {
        match self {
            Self::Text => "text".into(),
            Self::Password => "password".into(),
            Self::Email => "email".into(),
            Self::Tel => "tel".into(),
        }
    }
}

#[derive(PartialEq, Properties, Default, Debug)]
pub struct Props {
    pub id: AttrValue,
    #[prop_or_default]
    pub name: AttrValue,
    #[prop_or_default]
    pub value: Option<String>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub input_type: InputType,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<String>,
}

#[function_component(InputText)]
pub fn input_text(props: &Props) -> Html {
    let callback = props.on_change.clone();
    let on_change = Callback::from(move |event: Event| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            callback.emit(input.value());
        }
    });
    html! {
        <input
            id={props.id.clone()}
            name={props.name.clone()}
            value={props.value.clone()}
            type={props.input_type.as_type()}
            placeholder={props.placeholder.clone()}
            class={classes!("form-control", props.class.clone())}
            disabled={props.disabled}
            onchange={on_change} />
    }
}
