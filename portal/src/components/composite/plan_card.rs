use api_types::AmcPlan;
use yew::prelude::*;

use crate::{components::composite::confirm_button::ConfirmButton, display::rupees};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub plan: AmcPlan,
    #[prop_or_default]
    pub busy: bool,
    pub on_choose: Callback<AmcPlan>,
}

#[function_component(PlanCard)]
pub fn plan_card(props: &Props) -> Html {
    let plan = &props.plan;
    let on_confirm = {
        let plan = plan.clone();
        let on_choose = props.on_choose.clone();
        Callback::from(move |_: ()| on_choose.emit(plan.clone()))
    };

    let mut features: Vec<String> = plan.features.clone();
    if features.is_empty() {
        if let Some(services) = plan.services_included {
            features.push(format!("{services} service visits"));
        }
        if plan.parts_included {
            features.push("Spare parts included".to_owned());
        }
    }

    let card_class = if plan.is_popular {
        classes!("card", "h-100", "border-primary")
    } else {
        classes!("card", "h-100")
    };

    html! {
        <div class={card_class}>
            <div class="card-body d-flex flex-column">
                if plan.is_popular {
                    <span class="badge text-bg-primary align-self-start mb-2">{"Most popular"}</span>
                }
                <h5 class="card-title">{&plan.name}</h5>
                <p class="fs-3 fw-bold mb-0">{rupees(plan.price)}</p>
                <p class="text-muted small">{format!("for {} months", plan.duration_months)}</p>
                <ul class="list-unstyled small flex-grow-1">
                    { for features.iter().map(|feature| html! { <li>{feature}</li> }) }
                </ul>
                <ConfirmButton
                    label="Choose plan"
                    prompt={format!(
                        "You are interested in the {} plan for {}. Our team will contact you shortly to complete the activation.",
                        plan.name,
                        rupees(plan.price)
                    )}
                    confirm_label="Submit interest"
                    disabled={props.busy}
                    on_confirm={on_confirm} />
            </div>
        </div>
    }
}
