use yew::prelude::*;

use crate::components::{bind, notice_view, page_shell, Notice};
use crate::config::DEFAULT_DAY_OFFSET;
use crate::dates;
use crate::error::ValidationError;
use crate::pages::{INPUT_CLASS, PRIMARY_BUTTON};

/// Long-form date `days` after the `yyyy-mm-dd` date in `start`.
pub fn nth_day(start: &str, days: &str) -> Result<String, ValidationError> {
    if start.trim().is_empty() {
        return Err(ValidationError::new("Please select a date first!"));
    }
    let start = dates::parse_input_date(start).map_err(|e| ValidationError::new(e.to_string()))?;
    let days: i64 = days
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("Days must be a whole number"))?;
    dates::add_days(start, days)
        .map(dates::format_long)
        .map_err(|e| ValidationError::new(e.to_string()))
}

#[function_component(FindDayPage)]
pub fn find_day_page() -> Html {
    let days = use_state(|| DEFAULT_DAY_OFFSET.to_string());
    let start = use_state(|| dates::to_input_value(dates::today()));
    let result = use_state(|| None::<String>);
    let notice = use_state(|| None::<Notice>);

    let on_submit = {
        let days = days.clone();
        let start = start.clone();
        let result = result.clone();
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match nth_day(&start, &days) {
                Ok(date) => {
                    result.set(Some(date));
                    notice.set(None);
                }
                Err(err) => {
                    result.set(None);
                    notice.set(Some(Notice::error(err.to_string())));
                }
            }
        })
    };

    page_shell(
        "Find 100th Day",
        html! {},
        html! {
            <div class="bg-card p-6 rounded-lg shadow-sm border border-border max-w-md space-y-4">
                <form class="space-y-4" onsubmit={on_submit}>
                    <label class="flex flex-col gap-1 text-sm font-medium text-foreground">
                        {"Days"}
                        <input type="number" class={INPUT_CLASS} value={(*days).clone()} oninput={bind(&days)} />
                    </label>
                    <label class="flex flex-col gap-1 text-sm font-medium text-foreground">
                        {"Start Date"}
                        <input type="date" class={INPUT_CLASS} value={(*start).clone()} oninput={bind(&start)} />
                    </label>
                    <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")}>{"Calculate"}</button>
                </form>
                <div class="text-center">
                    <p class="text-sm text-muted-foreground">{"Date:"}</p>
                    <p class="text-lg font-bold text-foreground">
                        { (*result).clone().unwrap_or_else(|| "Select a date and click Calculate".to_string()) }
                    </p>
                </div>
                { notice_view(&notice) }
            </div>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_days_on() {
        assert_eq!(nth_day("2024-01-01", "100").unwrap(), "Wednesday, April 10, 2024");
        assert_eq!(nth_day("2024-03-01", " -1 ").unwrap(), "Thursday, February 29, 2024");
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(nth_day("", "100").unwrap_err().to_string(), "Please select a date first!");
        assert!(nth_day("2024-13-01", "100").is_err());
        assert!(nth_day("2024-01-01", "1.5").is_err());
        assert!(nth_day("2024-01-01", "999999999999").is_err());
    }
}
