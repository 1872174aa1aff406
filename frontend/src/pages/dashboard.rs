use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::AuthContext;
use crate::components::{notice_view, page_shell, Notice, StatCard};
use crate::models::{format_amount, DashboardTotals};
use crate::pages::failure;

/// Height of each bar as a whole percentage of the tallest one.
pub fn bar_heights(values: &[f64]) -> Vec<u32> {
    let max = values.iter().copied().filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|&v| {
            if max <= 0.0 || !v.is_finite() || v <= 0.0 {
                0
            } else {
                ((v / max) * 100.0).round() as u32
            }
        })
        .collect()
}

struct Bar {
    label: &'static str,
    value: f64,
    color: &'static str,
}

fn collection_chart(bars: &[Bar]) -> Html {
    let values: Vec<f64> = bars.iter().map(|bar| bar.value).collect();
    let heights = bar_heights(&values);

    html! {
        <div class="lg:col-span-2 bg-card shadow-lg p-4 rounded-lg flex flex-col h-[250px]">
            <p class="text-foreground font-semibold mb-2 text-center">{"Collection Status"}</p>
            <div class="flex-1 flex items-end justify-around gap-6 border-b border-border">
                { for bars.iter().zip(heights).map(|(bar, height)| html! {
                    <div class="flex flex-col items-center justify-end h-full w-16">
                        <span class="text-xs text-muted-foreground mb-1">{ format_amount(bar.value) }</span>
                        <div class={classes!("w-full", "rounded-t", bar.color)} style={format!("height: {}%", height)}></div>
                    </div>
                }) }
            </div>
            <div class="flex justify-around gap-6 mt-2 text-xs text-foreground">
                { for bars.iter().map(|bar| html! { <span class="w-24 text-center">{ bar.label }</span> }) }
            </div>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let auth = use_context::<AuthContext>();
    let totals = use_state(DashboardTotals::default);
    let completed = use_state(|| 0usize);
    let notice = use_state(|| None::<Notice>);

    {
        let auth = auth.clone();
        let totals = totals.clone();
        let completed = completed.clone();
        let notice = notice.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let Some(auth) = auth else { return };
                    match api::fetch_totals().await {
                        Ok(fetched) => totals.set(fetched),
                        Err(err) => {
                            notice.set(Some(failure(&auth, &err, "Failed to load totals")));
                            return;
                        }
                    }
                    if auth.is_admin() {
                        match api::fetch_customers().await {
                            Ok(list) => completed.set(list.iter().filter(|c| c.is_completed).count()),
                            Err(err) => notice.set(Some(failure(&auth, &err, "Failed to load customers"))),
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let is_admin = auth.as_ref().is_some_and(AuthContext::is_admin);
    let bars = [
        Bar {
            label: "Today Collection",
            value: totals.today_collection,
            color: "bg-green-500",
        },
        Bar {
            label: "Pending Till Today",
            value: totals.total_pending,
            color: "bg-red-500",
        },
    ];

    page_shell(
        "Dashboard",
        html! {},
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                    <StatCard title="Today Collection" value={format_amount(totals.today_collection)} tone="bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200" />
                    <StatCard title="Pending Till Today" value={format_amount(totals.total_pending)} tone="bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-200" />
                    if is_admin {
                        <>
                        <StatCard title="Total Balance" value={format_amount(totals.total_balance)} tone="bg-yellow-100 text-yellow-800 dark:bg-yellow-900 dark:text-yellow-200" />
                        <StatCard title="Completed Accounts" value={(*completed).to_string()} tone="bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-200" />
                        </>
                    }
                    { collection_chart(&bars) }
                </div>
                { notice_view(&notice) }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallest_bar_fills_the_chart() {
        assert_eq!(bar_heights(&[500.0, 250.0]), vec![100, 50]);
        assert_eq!(bar_heights(&[1.0, 3.0]), vec![33, 100]);
    }

    #[test]
    fn empty_or_zero_totals_draw_nothing() {
        assert_eq!(bar_heights(&[0.0, 0.0]), vec![0, 0]);
        assert!(bar_heights(&[]).is_empty());
        assert_eq!(bar_heights(&[-10.0, f64::NAN, 20.0]), vec![0, 0, 100]);
    }
}
