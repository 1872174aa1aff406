use yew::prelude::*;

use crate::config::PAGE_WINDOW;
use crate::pagination::{Boundary, DisplayToken, PaginationController};

/// Outcome line shown under a form or table.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }
}

pub fn notice_view(notice: &Option<Notice>) -> Html {
    match notice {
        Some(Notice::Success(msg)) => html! { <p class="text-sm text-green-600 mt-3">{ msg.clone() }</p> },
        Some(Notice::Error(msg)) => html! { <p class="text-sm text-red-500 mt-3">{ msg.clone() }</p> },
        None => html! {},
    }
}

pub fn page_shell(title: &str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-4 sm:p-6 max-w-6xl mx-auto w-full">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-xl sm:text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

/// Value of the `<input>` that fired `e`.
pub fn input_value(e: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}

/// Binds an `<input>` to a string state handle.
pub fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| state.set(input_value(&e)))
}

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    pub current_page: u32,
    pub total_pages: u32,
    pub on_change: Callback<u32>,
}

fn nav_callback<E: 'static>(
    controller: PaginationController,
    on_change: Callback<u32>,
    step: impl Fn(&mut PaginationController) -> bool + 'static,
) -> Callback<E> {
    Callback::from(move |_: E| {
        let mut pager = controller;
        if step(&mut pager) {
            on_change.emit(pager.current_page());
        }
    })
}

/// Page buttons with previous/next arrows. Renders nothing for a single page.
/// On touch screens a horizontal swipe over the bar turns the page.
#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let swipe = use_mut_ref(|| None::<f64>);
    let controller = PaginationController::with_state(props.current_page, props.total_pages);
    let tokens = controller.tokens(PAGE_WINDOW);

    if tokens.is_empty() {
        return html! {};
    }

    let on_touch_start = {
        let swipe = swipe.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                *swipe.borrow_mut() = Some(f64::from(touch.client_x()));
            }
        })
    };

    let on_touch_end = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(start_x) = swipe.borrow_mut().take() else {
                return;
            };
            if let Some(touch) = e.changed_touches().get(0) {
                let mut pager = controller;
                if pager.interpret_swipe(start_x, f64::from(touch.client_x())) {
                    on_change.emit(pager.current_page());
                }
            }
        })
    };

    let arrow_class = |enabled: bool| {
        if enabled {
            "px-3 py-1 text-sm rounded bg-gray-200 hover:bg-gray-300 cursor-pointer"
        } else {
            "px-3 py-1 text-sm rounded bg-gray-200 opacity-50 cursor-not-allowed"
        }
    };

    let buttons = tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| match *token {
            DisplayToken::Ellipsis => html! {
                <span key={format!("gap-{idx}")} class="text-gray-500 select-none text-sm">{"..."}</span>
            },
            DisplayToken::Page(page) => {
                let class = if page == controller.current_page() {
                    "px-3 py-1 text-sm rounded bg-blue-600 text-white"
                } else {
                    "px-3 py-1 text-sm rounded bg-gray-200 hover:bg-gray-300"
                };
                let onclick = nav_callback::<MouseEvent>(controller, props.on_change.clone(), move |pager| {
                    pager.go_to(i64::from(page))
                });
                html! { <button key={format!("page-{page}")} {class} {onclick}>{ page }</button> }
            }
        })
        .collect::<Html>();

    let boundary = controller.boundary();
    let prev_enabled = boundary != Boundary::AtFirstPage;
    let next_enabled = boundary != Boundary::AtLastPage;

    let on_prev = nav_callback::<MouseEvent>(controller, props.on_change.clone(), PaginationController::prev);
    let on_next = nav_callback::<MouseEvent>(controller, props.on_change.clone(), PaginationController::next);

    html! {
        <div class="mt-4 w-full flex flex-col items-center gap-1 select-none" ontouchstart={on_touch_start} ontouchend={on_touch_end}>
            <span class="md:hidden text-xs font-medium">
                { format!("Page {} / {}", controller.current_page(), controller.total_pages()) }
            </span>
            <div class="flex justify-center items-center gap-2 overflow-x-auto">
                <button class={arrow_class(prev_enabled)} disabled={!prev_enabled} onclick={on_prev}>{"‹"}</button>
                <div class="flex gap-1">{ buttons }</div>
                <button class={arrow_class(next_enabled)} disabled={!next_enabled} onclick={on_next}>{"›"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub open: bool,
    pub message: String,
    pub on_cancel: Callback<()>,
    pub on_confirm: Callback<()>,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4">
            <div class="bg-white rounded-xl shadow-lg w-full max-w-sm p-6 space-y-4">
                <p class="text-sm text-foreground">{ props.message.clone() }</p>
                <div class="flex justify-end gap-3">
                    <button onclick={on_cancel} class="bg-gray-500 text-white px-4 py-2 rounded hover:bg-gray-600">{"Cancel"}</button>
                    <button onclick={on_confirm} class="bg-red-600 text-white px-4 py-2 rounded hover:bg-red-700">{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PasswordInputProps {
    pub value: String,
    pub oninput: Callback<InputEvent>,
    #[prop_or("Password")]
    pub placeholder: &'static str,
    #[prop_or_default]
    pub disabled: bool,
}

/// Password field with a show/hide toggle.
#[function_component(PasswordInput)]
pub fn password_input(props: &PasswordInputProps) -> Html {
    let visible = use_state(|| false);
    let toggle = {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| visible.set(!*visible))
    };

    html! {
        <div class="relative">
            <input
                type={if *visible { "text" } else { "password" }}
                class="w-full px-4 py-2 pr-10 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary disabled:opacity-50"
                placeholder={props.placeholder}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
                disabled={props.disabled}
            />
            <button
                type="button"
                tabindex="-1"
                class="absolute inset-y-0 right-0 px-3 flex items-center"
                aria-label={if *visible { "Hide password" } else { "Show password" }}
                onclick={toggle}
            >
                { if *visible { icon_eye_off() } else { icon_eye() } }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub value: String,
    pub tone: &'static str,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class={classes!("p-4", "rounded-lg", "flex", "flex-col", "justify-center", "items-center", "h-[100px]", "lg:h-[200px]", "text-lg", "xl:text-2xl", props.tone)}>
            <h3>{ props.title }</h3>
            <p class="font-bold">{ props.value.clone() }</p>
        </div>
    }
}

pub fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_home() -> Html {
    icon_base("M3 11l9-8 9 8M5 10v10h14V10")
}
pub fn icon_user_plus() -> Html {
    icon_base("M16 21v-2a4 4 0 00-4-4H6a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8zM19 8v6M22 11h-6")
}
pub fn icon_users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8zM23 21v-2a4 4 0 00-3-3.87M16 3.13a4 4 0 010 7.75")
}
pub fn icon_user_edit() -> Html {
    icon_base("M11 4H4v16h16v-7M18.5 2.5a2.1 2.1 0 013 3L12 15l-4 1 1-4z")
}
pub fn icon_check_circle() -> Html {
    icon_base("M22 11.08V12a10 10 0 11-5.93-9.14M22 4L12 14.01l-3-3")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 10h18")
}
pub fn icon_user() -> Html {
    icon_base("M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2M12 11a4 4 0 100-8 4 4 0 000 8z")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_moon() -> Html {
    icon_base("M21 12.79A9 9 0 1111.21 3a7 7 0 109.79 9.79z")
}
pub fn icon_sun() -> Html {
    icon_base("M12 17a5 5 0 100-10 5 5 0 000 10zM12 1v2M12 21v2M4.2 4.2l1.4 1.4M18.4 18.4l1.4 1.4M1 12h2M21 12h2M4.2 19.8l1.4-1.4M18.4 5.6l1.4-1.4")
}
pub fn icon_eye() -> Html {
    icon_base("M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8zM12 15a3 3 0 100-6 3 3 0 000 6z")
}
pub fn icon_eye_off() -> Html {
    icon_base("M17.94 17.94A10.07 10.07 0 0112 20c-7 0-11-8-11-8a18.45 18.45 0 015.06-5.94M9.9 4.24A9.12 9.12 0 0112 4c7 0 11 8 11 8a18.5 18.5 0 01-2.16 3.19M1 1l22 22")
}
