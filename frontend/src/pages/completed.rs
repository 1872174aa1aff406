use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::AuthContext;
use crate::components::{notice_view, page_shell, ConfirmModal, Notice, Pager};
use crate::config::COMPLETED_PER_PAGE;
use crate::models::{sort_by_account, Customer};
use crate::pages::{clamp_page, failure, NavProps, CELL, TABLE_CLASS};
use crate::pagination::{page_bounds, serial_number, total_pages, PaginationController};
use crate::route::Page;

#[function_component(CompletedAccountsPage)]
pub fn completed_accounts_page(props: &NavProps) -> Html {
    let auth = use_context::<AuthContext>();
    let customers = use_state(Vec::<Customer>::new);
    let loading = use_state(|| true);
    let page = use_state(|| 1u32);
    let pending_delete = use_state(|| None::<Customer>);
    let notice = use_state(|| None::<Notice>);

    {
        let auth = auth.clone();
        let customers = customers.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let Some(auth) = auth else { return };
                    match api::fetch_customers().await {
                        Ok(list) => {
                            let mut done: Vec<Customer> =
                                list.into_iter().filter(|c| c.is_completed).collect();
                            sort_by_account(&mut done);
                            customers.set(done);
                        }
                        Err(err) => notice.set(Some(failure(
                            &auth,
                            &err,
                            "Failed to load completed accounts",
                        ))),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let pages = total_pages(customers.len(), COMPLETED_PER_PAGE);
    let current = clamp_page(*page, pages);
    let visible = &customers[page_bounds(current, COMPLETED_PER_PAGE, customers.len())];

    let on_confirm_delete = {
        let customers = customers.clone();
        let pending_delete = pending_delete.clone();
        let page = page.clone();
        let notice = notice.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let Some(target) = (*pending_delete).clone() else { return };
            pending_delete.set(None);
            let customers = customers.clone();
            let page = page.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::delete_customer(&target.id).await {
                    Ok(()) => {
                        let next: Vec<Customer> =
                            customers.iter().filter(|c| c.id != target.id).cloned().collect();
                        let mut pager = PaginationController::with_state(
                            *page,
                            total_pages(customers.len(), COMPLETED_PER_PAGE),
                        );
                        pager.set_total_pages(total_pages(next.len(), COMPLETED_PER_PAGE));
                        page.set(pager.current_page());
                        customers.set(next);
                        info!("completed account {} deleted", target.account_no);
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

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let rows = visible
        .iter()
        .enumerate()
        .map(|(row, customer)| {
            let open_records = {
                let on_navigate = props.on_navigate.clone();
                let id = customer.id.clone();
                Callback::from(move |_: MouseEvent| on_navigate.emit(Page::CustomerRecords(id.clone())))
            };
            let ask_delete = {
                let pending_delete = pending_delete.clone();
                let customer = customer.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    pending_delete.set(Some(customer.clone()));
                })
            };
            html! {
                <tr key={customer.id.clone()} class="hover:bg-muted cursor-pointer" onclick={open_records}>
                    <td class={CELL}>{ serial_number(current, COMPLETED_PER_PAGE, row) }</td>
                    <td class={CELL}>{ customer.account_no.clone() }</td>
                    <td class={CELL}>{ customer.name.clone() }</td>
                    <td class={CELL}>{ customer.mobile.clone() }</td>
                    <td class={CELL}>{ customer.created_by_label().to_string() }</td>
                    <td class={CELL}>
                        <button class="bg-red-600 text-white px-3 py-1 rounded" onclick={ask_delete}>{"Delete"}</button>
                    </td>
                </tr>
            }
        })
        .collect::<Html>();

    let delete_message = pending_delete
        .as_ref()
        .map(|c| format!("Are you sure you want to delete {}? All of {}'s records will also be deleted.", c.name, c.name))
        .unwrap_or_default();

    page_shell(
        "Completed Accounts",
        html! {},
        html! {
            <>
                <ConfirmModal
                    open={pending_delete.is_some()}
                    message={delete_message}
                    on_cancel={on_cancel_delete}
                    on_confirm={on_confirm_delete}
                />
                { notice_view(&notice) }
                if *loading {
                    <p class="text-center text-muted-foreground">{"Loading..."}</p>
                } else if visible.is_empty() {
                    <p class="text-center text-muted-foreground">{"No completed accounts found."}</p>
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
                                    <th class={CELL}>{"Actions"}</th>
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
