use yew::prelude::*;

use crate::components::{bind, notice_view, page_shell, Notice};
use crate::dates::{self, Age};
use crate::error::ValidationError;
use crate::pages::{INPUT_CLASS, PRIMARY_BUTTON};

pub fn age_from_input(birth: &str, today: chrono::NaiveDate) -> Result<Age, ValidationError> {
    if birth.trim().is_empty() {
        return Err(ValidationError::new("Please select your birth date!"));
    }
    let birth = dates::parse_input_date(birth).map_err(|e| ValidationError::new(e.to_string()))?;
    dates::age_between(birth, today).map_err(|e| ValidationError::new(e.to_string()))
}

#[function_component(AgeCalculatorPage)]
pub fn age_calculator_page() -> Html {
    let birth = use_state(String::new);
    let result = use_state(|| None::<Age>);
    let notice = use_state(|| None::<Notice>);

    let on_submit = {
        let birth = birth.clone();
        let result = result.clone();
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match age_from_input(&birth, dates::today()) {
                Ok(age) => {
                    result.set(Some(age));
                    notice.set(None);
                }
                Err(err) => {
                    result.set(None);
                    notice.set(Some(Notice::error(err.to_string())));
                }
            }
        })
    };

    let max = dates::to_input_value(dates::today());

    page_shell(
        "Find Age",
        html! {},
        html! {
            <div class="bg-card p-6 rounded-lg shadow-sm border border-border max-w-md space-y-4">
                <form class="space-y-4" onsubmit={on_submit}>
                    <label class="flex flex-col gap-1 text-sm font-medium text-foreground">
                        {"Birth Date"}
                        <input type="date" class={INPUT_CLASS} {max} value={(*birth).clone()} oninput={bind(&birth)} />
                    </label>
                    <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")}>{"Calculate Age"}</button>
                </form>
                <div class="text-center">
                    <p class="text-sm text-muted-foreground">{"Age:"}</p>
                    <p class="text-lg font-bold text-foreground">
                        { (*result).map(|age| age.to_string()).unwrap_or_else(|| "Select a birth date and click Calculate".to_string()) }
                    </p>
                </div>
                { notice_view(&notice) }
            </div>
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn age_is_rendered_with_units() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let age = age_from_input("1999-11-20", today).unwrap();
        assert_eq!(age.to_string(), "24 Years, 2 Months, 21 Days");
    }

    #[test]
    fn empty_and_future_births_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(
            age_from_input("", today).unwrap_err().to_string(),
            "Please select your birth date!"
        );
        assert_eq!(
            age_from_input("2024-02-11", today).unwrap_err().to_string(),
            "Birth date cannot be in the future"
        );
    }
}
