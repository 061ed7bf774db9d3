use yew::prelude::*;
use yew_hooks::prelude::*;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub label: AttrValue,
    pub prompt: AttrValue,
    #[prop_or(AttrValue::from("Yes"))]
    pub confirm_label: AttrValue,
    #[prop_or(classes!("btn", "btn-primary"))]
    pub class: Classes,
    #[prop_or_default]
    pub disabled: bool,
    pub on_confirm: Callback<()>,
}

/// A button that asks before acting: the first click shows the prompt with
/// confirm and cancel choices.
#[function_component(ConfirmButton)]
pub fn confirm_button(props: &Props) -> Html {
    let asking = use_bool_toggle(false);

    let on_ask = {
        let asking = asking.clone();
        Callback::from(move |_: MouseEvent| asking.set(true))
    };
    let on_cancel = {
        let asking = asking.clone();
        Callback::from(move |_: MouseEvent| asking.set(false))
    };
    let on_yes = {
        let asking = asking.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| {
            asking.set(false);
            on_confirm.emit(());
        })
    };

    if *asking {
        html! {
            <div class="border rounded p-2 bg-body-tertiary">
                <p class="small mb-2">{props.prompt.as_str()}</p>
                <button type="button" class="btn btn-sm btn-primary me-2" onclick={on_yes}>
                    {props.confirm_label.as_str()}
                </button>
                <button type="button" class="btn btn-sm btn-outline-secondary" onclick={on_cancel}>
                    {"Cancel"}
                </button>
            </div>
        }
    } else {
        html! {
            <button type="button" class={props.class.clone()} disabled={props.disabled} onclick={on_ask}>
                {props.label.as_str()}
            </button>
        }
    }
}
