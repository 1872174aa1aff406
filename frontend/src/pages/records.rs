use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::{AuthContext, Role};
use crate::components::{bind, input_value, notice_view, page_shell, ConfirmModal, Notice, Pager};
use crate::config::RECORDS_PER_PAGE;
use crate::dates;
use crate::models::{
    apply_running_totals, can_add_record, can_delete_record, can_edit_record, format_amount,
    parse_amount, validate_new_record, Customer, CustomerRecord, RecordAmountUpdate,
};
use crate::pages::customers::AddCustomerForm;
use crate::pages::{clamp_page, failure, CELL, INPUT_CLASS, PRIMARY_BUTTON, TABLE_CLASS};
use crate::pagination::{page_bounds, serial_number, total_pages};
use crate::route::Page;

/// Label/value pairs for the account summary above the ledger.
pub fn customer_details(customer: &Customer) -> Vec<(&'static str, String)> {
    let amount = |value: Option<f64>| value.map(format_amount).unwrap_or_else(|| "—".to_string());
    let date = |value: &Option<String>| {
        value
            .as_deref()
            .map(dates::display_date)
            .unwrap_or_else(|| "—".to_string())
    };
    vec![
        ("Account No", customer.account_no.clone()),
        ("Name", customer.name.clone()),
        ("Mobile", customer.mobile.clone()),
        ("Total Amount Given", amount(customer.total_amount_given)),
        ("Daily Collection", amount(customer.daily_collection)),
        (
            "Total Days",
            customer
                .total_days
                .map(|days| days.to_string())
                .unwrap_or_else(|| "—".to_string()),
        ),
        ("Start Date", date(&customer.start_date)),
        ("End Date", date(&customer.end_date)),
    ]
}

#[derive(Properties, PartialEq)]
pub struct RecordsProps {
    pub customer_id: String,
    pub on_navigate: Callback<Page>,
}

/// Daily payment ledger of one customer.
#[function_component(CustomerRecordsPage)]
pub fn customer_records_page(props: &RecordsProps) -> Html {
    let auth = use_context::<AuthContext>();
    let customer = use_state(|| None::<Customer>);
    let records = use_state(Vec::<CustomerRecord>::new);
    let received = use_state(|| 0.0_f64);
    let loading = use_state(|| true);
    let page = use_state(|| 1u32);
    let editing = use_state(|| None::<String>);
    let edit_amount = use_state(String::new);
    let pending_delete = use_state(|| None::<CustomerRecord>);
    let add_date = use_state(String::new);
    let add_amount = use_state(String::new);
    let saving = use_state(|| false);
    let show_update = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    let reload = {
        let auth = auth.clone();
        let customer = customer.clone();
        let records = records.clone();
        let received = received.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        let customer_id = props.customer_id.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let customer = customer.clone();
            let records = records.clone();
            let received = received.clone();
            let loading = loading.clone();
            let notice = notice.clone();
            let customer_id = customer_id.clone();
            spawn_local(async move {
                match api::fetch_records(&customer_id).await {
                    Ok(mut body) => {
                        received.set(apply_running_totals(&mut body.records));
                        records.set(body.records);
                        customer.set(body.customer);
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to fetch records"))),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                || ()
            },
            props.customer_id.clone(),
        );
    }

    let role = auth.as_ref().and_then(AuthContext::role).unwrap_or_default();
    let completed = customer.as_ref().is_some_and(|c| c.is_completed);
    let latest_id = records.last().map(|r| r.id.clone());
    let pages = total_pages(records.len(), RECORDS_PER_PAGE);
    let current = clamp_page(*page, pages);
    let visible = &records[page_bounds(current, RECORDS_PER_PAGE, records.len())];

    let on_add = {
        let auth = auth.clone();
        let add_date = add_date.clone();
        let add_amount = add_amount.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        let customer_id = props.customer_id.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(auth) = auth.clone() else { return };
            let record = match validate_new_record(&add_date, &add_amount, dates::today()) {
                Ok(record) => record,
                Err(err) => {
                    notice.set(Some(Notice::error(err.to_string())));
                    return;
                }
            };
            saving.set(true);
            let add_date = add_date.clone();
            let add_amount = add_amount.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            let customer_id = customer_id.clone();
            spawn_local(async move {
                match api::add_record(&customer_id, &record).await {
                    Ok(()) => {
                        info!("record added for {customer_id}");
                        add_date.set(String::new());
                        add_amount.set(String::new());
                        notice.set(Some(Notice::success("Record added successfully")));
                        reload.emit(());
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to add record"))),
                }
                saving.set(false);
            });
        })
    };

    let on_save = {
        let auth = auth.clone();
        let editing = editing.clone();
        let edit_amount = edit_amount.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let Some(auth) = auth.clone() else { return };
            if edit_amount.trim().is_empty() {
                notice.set(Some(Notice::error("Please enter received amount")));
                return;
            }
            let update = match parse_amount(&edit_amount) {
                Ok(amount) => RecordAmountUpdate {
                    today_received_amount: amount,
                },
                Err(err) => {
                    notice.set(Some(Notice::error(err.to_string())));
                    return;
                }
            };
            let editing = editing.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::update_record(&id, &update).await {
                    Ok(()) => {
                        editing.set(None);
                        notice.set(Some(Notice::success("Record updated successfully")));
                        reload.emit(());
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to update record"))),
                }
            });
        })
    };

    let on_confirm_delete = {
        let auth = auth.clone();
        let pending_delete = pending_delete.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let Some(target) = (*pending_delete).clone() else { return };
            pending_delete.set(None);
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_record(&target.id).await {
                    Ok(()) => {
                        notice.set(Some(Notice::success("Record deleted successfully")));
                        reload.emit(());
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to delete record"))),
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let show_actions = matches!(role, Role::Admin | Role::Editor);

    let on_customer_saved = {
        let customer = customer.clone();
        let show_update = show_update.clone();
        let notice = notice.clone();
        Callback::from(move |saved: Customer| {
            customer.set(Some(saved));
            show_update.set(false);
            notice.set(Some(Notice::success("Customer updated successfully")));
        })
    };

    let toggle_update = {
        let show_update = show_update.clone();
        Callback::from(move |_: MouseEvent| show_update.set(!*show_update))
    };

    let rows = visible
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let is_editing = editing.as_deref() == Some(record.id.as_str());
            let is_latest = latest_id.as_deref() == Some(record.id.as_str());

            let amount_cell = if is_editing {
                html! {
                    <input type="number" class={INPUT_CLASS} value={(*edit_amount).clone()} oninput={bind(&edit_amount)} />
                }
            } else {
                html! { { format_amount(record.today_received_amount) } }
            };

            let actions = if !show_actions {
                html! {}
            } else if is_editing {
                let on_save = on_save.clone();
                let id = record.id.clone();
                let editing = editing.clone();
                html! {
                    <td class={CELL}>
                        <button class="bg-green-600 text-white px-3 py-1 rounded mr-2"
                            onclick={Callback::from(move |_: MouseEvent| on_save.emit(id.clone()))}>{"Save"}</button>
                        <button class="bg-gray-500 text-white px-3 py-1 rounded"
                            onclick={Callback::from(move |_: MouseEvent| editing.set(None))}>{"Cancel"}</button>
                    </td>
                }
            } else {
                let edit_button = if can_edit_record(role, is_latest, completed) {
                    let editing = editing.clone();
                    let edit_amount = edit_amount.clone();
                    let record = record.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        edit_amount.set(record.today_received_amount.to_string());
                        editing.set(Some(record.id.clone()));
                    });
                    html! { <button class="bg-yellow-500 text-white px-3 py-1 rounded mr-2" {onclick}>{"Edit"}</button> }
                } else {
                    html! {}
                };
                let delete_button = if can_delete_record(role, completed) {
                    let pending_delete = pending_delete.clone();
                    let record = record.clone();
                    let onclick = Callback::from(move |_: MouseEvent| pending_delete.set(Some(record.clone())));
                    html! { <button class="bg-red-600 text-white px-3 py-1 rounded" {onclick}>{"Delete"}</button> }
                } else {
                    html! {}
                };
                html! { <td class={CELL}>{ edit_button }{ delete_button }</td> }
            };

            html! {
                <tr key={record.id.clone()}>
                    <td class={CELL}>{ serial_number(current, RECORDS_PER_PAGE, row) }</td>
                    <td class={CELL}>{ dates::display_date(&record.today_date) }</td>
                    <td class={CELL}>{ amount_cell }</td>
                    <td class={CELL}>{ format_amount(record.total_received_amount.unwrap_or_default()) }</td>
                    <td class={CELL}>{ record.updated_by_label().to_string() }</td>
                    { actions }
                </tr>
            }
        })
        .collect::<Html>();

    let back = props.on_navigate.reform(|_: MouseEvent| Page::Customers);
    let back_button = html! {
        <button class="bg-gray-500 text-white px-4 py-2 rounded hover:bg-gray-600" onclick={back}>{"Back"}</button>
    };

    let Some(current_customer) = (*customer).clone() else {
        let message = if *loading { "Loading customer details..." } else { "Customer not found." };
        return page_shell(
            "Customer Records",
            back_button,
            html! {
                <>
                    <p class="text-center text-muted-foreground">{ message }</p>
                    { notice_view(&notice) }
                </>
            },
        );
    };

    let delete_message = pending_delete
        .as_ref()
        .map(|r| format!("Are you sure you want to delete the {} entry of {}?", format_amount(r.today_received_amount), dates::display_date(&r.today_date)))
        .unwrap_or_default();

    let today = dates::to_input_value(dates::today());
    let on_date = {
        let add_date = add_date.clone();
        let notice = notice.clone();
        let today = today.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            // ISO dates compare correctly as strings.
            if value > today {
                notice.set(Some(Notice::error("You cannot select a future date")));
                return;
            }
            add_date.set(value);
        })
    };

    page_shell(
        "Customer Records",
        back_button,
        html! {
            <>
                <ConfirmModal
                    open={pending_delete.is_some()}
                    message={delete_message}
                    on_cancel={on_cancel_delete}
                    on_confirm={on_confirm_delete}
                />
                <div class="bg-card p-4 rounded-lg shadow-sm border border-border grid grid-cols-2 md:grid-cols-4 gap-3 text-sm">
                    { for customer_details(&current_customer).into_iter().map(|(label, value)| html! {
                        <div>
                            <p class="text-muted-foreground text-xs font-semibold">{ label }</p>
                            <p class="font-medium text-foreground">{ value }</p>
                        </div>
                    }) }
                    <div>
                        <p class="text-muted-foreground text-xs font-semibold">{"Total Received"}</p>
                        <p class="font-medium text-green-600">{ format_amount(*received) }</p>
                    </div>
                    if role == Role::Admin {
                        <div class="flex items-center">
                            <button class="px-4 py-2 bg-green-600 hover:bg-green-700 text-white rounded-lg font-semibold" onclick={toggle_update}>
                                { if *show_update { "Close" } else { "Update Customer" } }
                            </button>
                        </div>
                    }
                </div>
                if *show_update && role == Role::Admin {
                    <div class="bg-card p-6 rounded-lg shadow-sm border border-border">
                        <AddCustomerForm
                            key={current_customer.id.clone()}
                            existing={Some(current_customer.clone())}
                            on_saved={on_customer_saved}
                        />
                    </div>
                }

                if can_add_record(role, completed) {
                    <div class="flex flex-col sm:flex-row gap-3 items-stretch">
                        <input type="date" class={INPUT_CLASS} max={today.clone()} value={(*add_date).clone()} oninput={on_date} />
                        <input type="number" class={INPUT_CLASS} placeholder="Amount" value={(*add_amount).clone()} oninput={bind(&add_amount)} />
                        <button class={PRIMARY_BUTTON} disabled={*saving} onclick={on_add}>
                            { if *saving { "Saving..." } else { "Save" } }
                        </button>
                    </div>
                }
                if completed {
                    <p class="text-green-600 font-semibold text-center">
                        {"This account is fully paid and completed. No further entries allowed."}
                    </p>
                }
                { notice_view(&notice) }

                <div class="relative overflow-x-auto">
                    <table class={TABLE_CLASS}>
                        <thead>
                            <tr class="bg-muted font-bold">
                                <th class={CELL}>{"S.No"}</th>
                                <th class={CELL}>{"Date"}</th>
                                <th class={CELL}>{"Received"}</th>
                                <th class={CELL}>{"Total Received"}</th>
                                <th class={CELL}>{"Updated By"}</th>
                                if show_actions {
                                    <th class={CELL}>{"Actions"}</th>
                                }
                            </tr>
                        </thead>
                        <tbody>{ rows }</tbody>
                    </table>
                    if completed {
                        <div class="absolute inset-0 flex items-center justify-center pointer-events-none">
                            <span class="text-4xl font-black text-red-500/40 -rotate-12 border-4 border-red-500/40 px-6 py-2 rounded">
                                {"ACCOUNT CLOSED"}
                            </span>
                        </div>
                    }
                </div>
                <Pager current_page={current} total_pages={pages} on_change={on_page} />
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_fill_gaps_with_dash() {
        let customer: Customer = serde_json::from_str(
            r#"{"_id":"c1","accountNo":"12/24","name":"Meena","mobile":"98400",
                "dailyCollection":150,"startDate":"2024-01-05T00:00:00.000Z"}"#,
        )
        .unwrap();
        let details = customer_details(&customer);
        let lookup = |label: &str| {
            details
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(lookup("Daily Collection"), "₹150");
        assert_eq!(lookup("Total Amount Given"), "—");
        assert_eq!(lookup("Total Days"), "—");
        assert_eq!(lookup("Start Date"), "05/01/2024");
        assert_eq!(lookup("End Date"), "—");
        assert_eq!(details.len(), 8);
    }
}
