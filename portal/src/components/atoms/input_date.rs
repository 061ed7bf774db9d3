use chrono::NaiveDate;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(PartialEq, Properties, Default, Debug)]
pub struct Props {
    pub id: AttrValue,
    pub value: Option<NaiveDate>,
    #[prop_or_default]
    pub min: Option<NaiveDate>,
    pub on_change: Callback<Option<NaiveDate>>,
}

/// Calendar date picker. An empty field reports `None`.
#[function_component(InputDate)]
pub fn input_date(props: &Props) -> Html {
    let callback = props.on_change.clone();
    let on_change = Callback::from(move |event: Event| {
        let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
            return;
        };
        let raw = input.value();
        match parse_date(&raw) {
            Ok(date) => callback.emit(date),
            Err(error) => {
                log::error!("Fail to parse date input, value={raw}, error={error}, doing nothing")
            }
        }
    });

    html! {
        <input
            id={props.id.clone()}
            type="date"
            class="form-control"
            value={props.value.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default()}
            min={props.min.map(|date| date.format(DATE_FORMAT).to_string())}
            onchange={on_change} />
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_date_values() {
        assert_eq!(parse_date(""), Ok(None));
        assert_eq!(
            parse_date("2025-06-03"),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 3))
        );
        assert!(parse_date("03/06/2025").is_err());
    }
}
