use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
}

/// Inline Bootstrap alert for the outcome of a user action.
#[function_component(NoticeAlert)]
pub fn notice_alert(props: &Props) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let (class, text) = match notice {
        Notice::Success(text) => ("alert alert-success", text),
        Notice::Error(text) => ("alert alert-danger", text),
    };
    let close = props.on_close.clone().map(|on_close| {
        let onclick = Callback::from(move |_: MouseEvent| on_close.emit(()));
        html! { <button type="button" class="btn-close" aria-label="Close" {onclick}></button> }
    });
    html! {
        <div class={classes!(class, close.is_some().then_some("alert-dismissible"))} role="alert">
            {text}
            {close}
        </div>
    }
}
