use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::AuthContext;
use crate::components::{input_value, notice_view, page_shell, ConfirmModal, Notice, Pager};
use crate::config::CUSTOMERS_PER_PAGE;
use crate::models::{
    filter_by_name, format_amount, insert_sorted, is_valid_account_no, sort_by_account, Customer,
    CustomerForm, CustomerUpdate, DashboardTotals,
};
use crate::pages::{clamp_page, failure, NavProps, CELL, INPUT_CLASS, PRIMARY_BUTTON, TABLE_CLASS};
use crate::pagination::{page_bounds, serial_number, total_pages, PaginationController};
use crate::route::Page;

fn form_field(
    form: &UseStateHandle<CustomerForm>,
    apply: fn(&mut CustomerForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let mut next = (*form).clone();
        apply(&mut next, input_value(&e));
        form.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct CustomerFormProps {
    /// Set when updating; the form starts from its values.
    #[prop_or_default]
    pub existing: Option<Customer>,
    pub on_saved: Callback<Customer>,
}

/// Account form. Posts the raw field values for a new customer or puts them
/// over `existing`, then hands the saved customer to the parent.
#[function_component(AddCustomerForm)]
pub fn add_customer_form(props: &CustomerFormProps) -> Html {
    let auth = use_context::<AuthContext>();
    let initial = props
        .existing
        .as_ref()
        .map(CustomerForm::from_customer)
        .unwrap_or_default();
    let form = use_state(move || initial);
    let notice = use_state(|| None::<Notice>);
    let saving = use_state(|| false);

    let on_submit = {
        let form = form.clone();
        let notice = notice.clone();
        let saving = saving.clone();
        let existing = props.existing.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(auth) = auth.clone() else { return };
            if let Err(err) = form.validate() {
                notice.set(Some(Notice::error(err.to_string())));
                return;
            }

            saving.set(true);
            notice.set(None);
            let form = form.clone();
            let notice = notice.clone();
            let saving = saving.clone();
            let existing = existing.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = match &existing {
                    Some(current) => api::update_customer(&current.id, &form)
                        .await
                        .map(|echoed| echoed.unwrap_or_else(|| form.apply_to(current))),
                    None => api::create_customer(&form).await,
                };
                match result {
                    Ok(saved) if existing.is_some() => {
                        info!("customer {} updated", saved.account_no);
                        notice.set(Some(Notice::success("Customer updated successfully!")));
                        on_saved.emit(saved);
                    }
                    Ok(saved) => {
                        info!("customer {} added", saved.account_no);
                        form.set(CustomerForm::default());
                        notice.set(Some(Notice::success("Customer added successfully!")));
                        on_saved.emit(saved);
                    }
                    Err(err) => {
                        let shown = failure(&auth, &err, "Failed to save customer");
                        notice.set(Some(match (err.is_duplicate_key(), existing.is_some()) {
                            (true, true) => Notice::error("Customer with same account number cannot be updated"),
                            (true, false) => Notice::error("Customer with same account number cannot be added"),
                            (false, _) => shown,
                        }));
                    }
                }
                saving.set(false);
            });
        })
    };

    let labelled = |label: &'static str, input: Html| {
        html! {
            <label class="flex flex-col gap-1 text-sm font-medium text-foreground">
                { label }
                { input }
            </label>
        }
    };

    html! {
        <form class="grid grid-cols-1 sm:grid-cols-2 gap-4" onsubmit={on_submit}>
            { labelled("Account No", html! {
                <input class={INPUT_CLASS} placeholder="100/25" value={form.account_no.clone()}
                    oninput={form_field(&form, |f, v| f.account_no = v)} />
            }) }
            { labelled("Name", html! {
                <input class={INPUT_CLASS} value={form.name.clone()}
                    oninput={form_field(&form, |f, v| f.name = v)} />
            }) }
            { labelled("Total Amount Given", html! {
                <input type="number" class={INPUT_CLASS} value={form.total_amount_given.clone()}
                    oninput={form_field(&form, |f, v| f.total_amount_given = v)} />
            }) }
            { labelled("Daily Collection", html! {
                <input type="number" class={INPUT_CLASS} value={form.daily_collection.clone()}
                    oninput={form_field(&form, |f, v| f.daily_collection = v)} />
            }) }
            { labelled("Total Days", html! {
                <input type="number" class={INPUT_CLASS} value={form.total_days.clone()}
                    oninput={form_field(&form, |f, v| f.total_days = v)} />
            }) }
            { labelled("Mobile", html! {
                <input type="tel" class={INPUT_CLASS} value={form.mobile.clone()}
                    oninput={form_field(&form, |f, v| f.mobile = v)} />
            }) }
            { labelled("Start Date", html! {
                <input type="date" class={INPUT_CLASS} value={form.start_date.clone()}
                    oninput={form_field(&form, |f, v| f.start_date = v)} />
            }) }
            { labelled("End Date", html! {
                <input type="date" class={INPUT_CLASS} value={form.end_date.clone()}
                    oninput={form_field(&form, |f, v| f.end_date = v)} />
            }) }
            <div class="sm:col-span-2">
                <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")} disabled={*saving}>
                    { match (*saving, props.existing.is_some()) {
                        (true, _) => "Saving...",
                        (false, true) => "Update Customer",
                        (false, false) => "Add Customer",
                    } }
                </button>
                { notice_view(&notice) }
            </div>
        </form>
    }
}

#[function_component(AddCustomerPage)]
pub fn add_customer_page(props: &NavProps) -> Html {
    let on_saved = props.on_navigate.reform(|_: Customer| Page::Customers);
    page_shell(
        "Add Customer",
        html! {},
        html! {
            <div class="bg-card p-6 rounded-lg shadow-sm border border-border">
                <AddCustomerForm {on_saved} />
            </div>
        },
    )
}

#[function_component(CustomersPage)]
pub fn customers_page(props: &NavProps) -> Html {
    let auth = use_context::<AuthContext>();
    let customers = use_state(Vec::<Customer>::new);
    let totals = use_state(DashboardTotals::default);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let page = use_state(|| 1u32);
    let editing = use_state(|| None::<String>);
    let edit = use_state(CustomerUpdate::default);
    let pending_delete = use_state(|| None::<Customer>);
    let show_add = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    {
        let auth = auth.clone();
        let customers = customers.clone();
        let totals = totals.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let Some(auth) = auth else { return };
                    match api::fetch_customers().await {
                        Ok(list) => {
                            let mut open: Vec<Customer> =
                                list.into_iter().filter(|c| !c.is_completed).collect();
                            sort_by_account(&mut open);
                            customers.set(open);
                        }
                        Err(err) => notice.set(Some(failure(&auth, &err, "Failed to fetch customers"))),
                    }
                    loading.set(false);
                    match api::fetch_totals().await {
                        Ok(fetched) => totals.set(fetched),
                        Err(err) => notice.set(Some(failure(&auth, &err, "Failed to fetch pending amounts"))),
                    }
                });
                || ()
            },
            (),
        );
    }

    let is_admin = auth.as_ref().is_some_and(AuthContext::is_admin);
    let filtered = filter_by_name(&customers, &search);
    let pages = total_pages(filtered.len(), CUSTOMERS_PER_PAGE);
    let current = clamp_page(*page, pages);
    let visible = &filtered[page_bounds(current, CUSTOMERS_PER_PAGE, filtered.len())];

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            search.set(input_value(&e));
            page.set(1);
        })
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let on_created = {
        let customers = customers.clone();
        let page = page.clone();
        let show_add = show_add.clone();
        let notice = notice.clone();
        Callback::from(move |created: Customer| {
            let mut next = (*customers).clone();
            insert_sorted(&mut next, created);
            customers.set(next);
            page.set(1);
            show_add.set(false);
            notice.set(Some(Notice::success("Customer added successfully")));
        })
    };

    let on_save = {
        let auth = auth.clone();
        let customers = customers.clone();
        let editing = editing.clone();
        let edit = edit.clone();
        let notice = notice.clone();
        Callback::from(move |id: String| {
            let Some(auth) = auth.clone() else { return };
            let update = edit.trimmed();
            if !is_valid_account_no(&update.account_no) {
                notice.set(Some(Notice::error("Account number must be in format e.g., 100/25")));
                return;
            }
            if update.name.is_empty() {
                notice.set(Some(Notice::error("Name is required")));
                return;
            }
            let customers = customers.clone();
            let editing = editing.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::rename_customer(&id, &update).await {
                    Ok(()) => {
                        let mut next = (*customers).clone();
                        if let Some(customer) = next.iter_mut().find(|c| c.id == id) {
                            customer.account_no = update.account_no.clone();
                            customer.name = update.name.clone();
                        }
                        sort_by_account(&mut next);
                        customers.set(next);
                        editing.set(None);
                        notice.set(Some(Notice::success("Customer updated successfully")));
                    }
                    Err(err) => {
                        let shown = failure(&auth, &err, "Failed to update customer");
                        notice.set(Some(if err.is_duplicate_key() {
                            Notice::error("Customer with same account number cannot be updated")
                        } else {
                            shown
                        }));
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let auth = auth.clone();
        let customers = customers.clone();
        let pending_delete = pending_delete.clone();
        let page = page.clone();
        let search = search.clone();
        let notice = notice.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let Some(target) = (*pending_delete).clone() else { return };
            pending_delete.set(None);
            let customers = customers.clone();
            let page = page.clone();
            let search = search.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::delete_customer(&target.id).await {
                    Ok(()) => {
                        let next: Vec<Customer> =
                            customers.iter().filter(|c| c.id != target.id).cloned().collect();
                        let before = total_pages(filter_by_name(&customers, &search).len(), CUSTOMERS_PER_PAGE);
                        let mut pager = PaginationController::with_state(*page, before);
                        pager.set_total_pages(total_pages(filter_by_name(&next, &search).len(), CUSTOMERS_PER_PAGE));
                        page.set(pager.current_page());
                        customers.set(next);
                        info!("customer {} deleted", target.account_no);
                        notice.set(Some(Notice::success("Customer deleted successfully")));
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to delete customer"))),
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let toggle_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: MouseEvent| show_add.set(!*show_add))
    };

    let rows = visible
        .iter()
        .enumerate()
        .map(|(row, &customer)| {
            let is_editing = editing.as_deref() == Some(customer.id.as_str());
            let pending = totals.pending_for(&customer.id);

            let open_records = {
                let on_navigate = props.on_navigate.clone();
                let id = customer.id.clone();
                Callback::from(move |_: MouseEvent| on_navigate.emit(Page::CustomerRecords(id.clone())))
            };
            let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

            let account_cell = if is_editing {
                let edit = edit.clone();
                html! {
                    <input class={INPUT_CLASS} value={edit.account_no.clone()} onclick={stop.clone()}
                        oninput={Callback::from(move |e: InputEvent| {
                            edit.set(CustomerUpdate { account_no: input_value(&e), ..(*edit).clone() });
                        })} />
                }
            } else {
                html! { { customer.account_no.clone() } }
            };

            let name_cell = if is_editing {
                let edit = edit.clone();
                html! {
                    <input class={INPUT_CLASS} value={edit.name.clone()} onclick={stop.clone()}
                        oninput={Callback::from(move |e: InputEvent| {
                            edit.set(CustomerUpdate { name: input_value(&e), ..(*edit).clone() });
                        })} />
                }
            } else {
                html! { { customer.name.clone() } }
            };

            let actions = if !is_admin {
                html! {}
            } else if is_editing {
                let on_save = on_save.clone();
                let id = customer.id.clone();
                let editing = editing.clone();
                html! {
                    <td class={CELL} onclick={stop}>
                        <button class="bg-green-600 text-white px-3 py-1 rounded mr-2"
                            onclick={Callback::from(move |_: MouseEvent| on_save.emit(id.clone()))}>{"Save"}</button>
                        <button class="bg-gray-500 text-white px-3 py-1 rounded"
                            onclick={Callback::from(move |_: MouseEvent| editing.set(None))}>{"Cancel"}</button>
                    </td>
                }
            } else {
                let start_edit = {
                    let editing = editing.clone();
                    let edit = edit.clone();
                    let customer = customer.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.set(CustomerUpdate::from_customer(&customer));
                        editing.set(Some(customer.id.clone()));
                    })
                };
                let ask_delete = {
                    let pending_delete = pending_delete.clone();
                    let customer = customer.clone();
                    Callback::from(move |_: MouseEvent| pending_delete.set(Some(customer.clone())))
                };
                html! {
                    <td class={CELL} onclick={stop}>
                        <button class="bg-yellow-500 text-white px-3 py-1 rounded mr-2" onclick={start_edit}>{"Edit"}</button>
                        <button class="bg-red-600 text-white px-3 py-1 rounded" onclick={ask_delete}>{"Delete"}</button>
                    </td>
                }
            };

            let pending_class = if pending > 0.0 { "text-red-600 font-semibold" } else { "font-semibold" };

            html! {
                <tr key={customer.id.clone()} class="hover:bg-muted cursor-pointer" onclick={open_records}>
                    <td class={CELL}>{ serial_number(current, CUSTOMERS_PER_PAGE, row) }</td>
                    <td class={CELL}>{ account_cell }</td>
                    <td class={CELL}>{ name_cell }</td>
                    <td class={classes!(CELL, "text-green-600")}>
                        <a href={format!("tel:{}", customer.mobile)}>{ customer.mobile.clone() }</a>
                    </td>
                    <td class={CELL}>{ customer.created_by_label().to_string() }</td>
                    <td class={classes!(CELL, pending_class)}>{ format_amount(pending) }</td>
                    { actions }
                </tr>
            }
        })
        .collect::<Html>();

    let delete_message = pending_delete
        .as_ref()
        .map(|c| format!("Are you sure you want to delete {}? All of {}'s records will also be deleted.", c.name, c.name))
        .unwrap_or_default();

    page_shell(
        "Customers",
        html! {
            <button class={PRIMARY_BUTTON} onclick={toggle_add}>
                { if *show_add { "Close" } else { "Add Customer" } }
            </button>
        },
        html! {
            <>
                <ConfirmModal
                    open={pending_delete.is_some()}
                    message={delete_message}
                    on_cancel={on_cancel_delete}
                    on_confirm={on_confirm_delete}
                />
                if *show_add {
                    <div class="bg-card p-6 rounded-lg shadow-sm border border-border">
                        <AddCustomerForm on_saved={on_created} />
                    </div>
                }
                <div class="flex justify-center">
                    <input class={classes!(INPUT_CLASS, "max-w-sm")} placeholder="Search by name"
                        value={(*search).clone()} oninput={on_search} />
                </div>
                { notice_view(&notice) }
                if *loading {
                    <p class="text-center text-muted-foreground">{"Loading..."}</p>
                } else if visible.is_empty() {
                    <p class="text-center text-muted-foreground">{"No customers found."}</p>
                } else {
                    <>
                    <div class="overflow-x-auto">
                        <table class={TABLE_CLASS}>
                            <thead>
                                <tr class="bg-muted font-bold">
                                    <th class={CELL}>{"S.No"}</th>
                                    <th class={CELL}>{"A/C No"}</th>
                                    <th class={CELL}>{"Name"}</th>
                                    <th class={CELL}>{"Mobile"}</th>
                                    <th class={CELL}>{"Created By"}</th>
                                    <th class={CELL}>{"Pending"}</th>
                                    if is_admin {
                                        <th class={CELL}>{"Actions"}</th>
                                    }
                                </tr>
                            </thead>
                            <tbody>{ rows }</tbody>
                        </table>
                    </div>
                    <Pager current_page={current} total_pages={pages} on_change={on_page} />
                    </>
                }
            </>
        },
    )
}
