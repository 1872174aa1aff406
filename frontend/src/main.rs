mod api;
mod auth;
mod components;
mod config;
mod dates;
mod error;
mod models;
mod pages;
mod pagination;
mod route;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::auth::{AuthContext, AuthProvider, Role};
use crate::components::{
    icon_calendar, icon_check_circle, icon_home, icon_log_out, icon_moon, icon_sun, icon_user,
    icon_user_edit, icon_user_plus, icon_users,
};
use crate::config::SETTINGS_STORAGE_KEY;
use crate::pages::{
    AddCustomerPage, AddEditorPage, AgeCalculatorPage, CompletedAccountsPage, CustomerRecordsPage,
    CustomersPage, DashboardPage, EditorsPage, FindDayPage, ForgotPasswordPage, LoginPage,
    ResetPasswordPage,
};
use crate::route::{public_page_from_path, Page, PublicPage};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct AppSettings {
    #[serde(default)]
    dark_mode: bool,
}

fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_STORAGE_KEY) {
                match serde_json::from_str::<AppSettings>(&raw) {
                    Ok(settings) => return settings,
                    Err(err) => warn!("ignoring stored settings: {err}"),
                }
            }
        }
    }
    AppSettings::default()
}

fn save_settings(settings: &AppSettings) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(settings) {
                let _ = storage.set_item(SETTINGS_STORAGE_KEY, &raw);
            }
        }
    }
}

/// Toggles the `dark` class on `<html>`.
fn apply_theme(settings: &AppSettings) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    if let Some(root) = root {
        root.set_class_name(if settings.dark_mode { "dark" } else { "" });
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

fn nav_icon(page: &Page) -> Html {
    match page {
        Page::Dashboard => icon_home(),
        Page::AddEditor => icon_user_plus(),
        Page::AddCustomer => icon_user_plus(),
        Page::Editors => icon_user_edit(),
        Page::Customers | Page::CustomerRecords(_) => icon_users(),
        Page::CompletedAccounts => icon_check_circle(),
        Page::FindDay => icon_calendar(),
        Page::AgeCalculator => icon_user(),
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    role: Role,
    user_name: String,
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let menu_open = use_state(|| false);

    let on_select = {
        let menu_open = menu_open.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |page: Page| {
            menu_open.set(false);
            on_select.emit(page);
        })
    };
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let sidebar = html! {
        <Sidebar
            role={props.role}
            active_page={props.active_page.clone()}
            on_select={on_select}
            on_logout={props.on_logout.clone()}
        />
    };

    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">{ sidebar.clone() }</div>
            if *menu_open {
                <div class="fixed inset-0 z-40 flex md:hidden bg-black/40">{ sidebar }</div>
            }

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header user_name={props.user_name.clone()} role={props.role} on_menu={toggle_menu} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    user_name: String,
    role: Role,
    on_menu: Callback<MouseEvent>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let dark_mode = settings.as_ref().is_some_and(|s| s.dark_mode);

    let toggle_theme = Callback::from(move |_: MouseEvent| {
        if let Some(settings) = &settings {
            let next = AppSettings {
                dark_mode: !settings.dark_mode,
            };
            save_settings(&next);
            apply_theme(&next);
            settings.set(next);
        }
    });

    html! {
        <header class="bg-card border-b border-border h-16 flex items-center justify-between px-4 sm:px-6">
            <button class="md:hidden p-2 rounded hover:bg-muted" aria-label="Menu" onclick={props.on_menu.clone()}>{"☰"}</button>
            <div class="flex-1"></div>
            <div class="flex items-center gap-4">
                <span class="text-sm text-foreground">
                    { format!("Welcome, {}", props.user_name) }
                    <span class="ml-2 text-xs px-2 py-0.5 rounded-full bg-muted text-muted-foreground">{ props.role.label() }</span>
                </span>
                <button class="p-2 hover:bg-muted rounded-full transition-colors" aria-label="Toggle theme" onclick={toggle_theme}>
                    { if dark_mode { icon_sun() } else { icon_moon() } }
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    role: Role,
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] dark:bg-slate-900 p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <span class="text-[#173E63] dark:text-white text-2xl font-black tracking-tight">{"SmartFunds"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for Page::menu(props.role).into_iter().map(|page| {
                        let is_active = match (&page, &props.active_page) {
                            (Page::Customers, Page::CustomerRecords(_)) => true,
                            (item, active) => item == active,
                        };
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let icon = nav_icon(&page);
                        let label = page.title();
                        let onclick = props.on_select.reform(move |_: MouseEvent| page.clone());

                        html! {
                            <button type="button" class={class_name} {onclick}>
                                <span class="shrink-0">{ icon }</span>
                                <span class="truncate whitespace-nowrap text-left">{ label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Login, forgot-password and reset screens for signed-out visitors.
#[function_component(PublicScreens)]
fn public_screens() -> Html {
    let screen = use_state(|| public_page_from_path(&current_path()));
    let on_switch = {
        let screen = screen.clone();
        Callback::from(move |next: PublicPage| screen.set(next))
    };

    match &*screen {
        PublicPage::Login => html! { <LoginPage {on_switch} /> },
        PublicPage::ForgotPassword => html! { <ForgotPasswordPage {on_switch} /> },
        PublicPage::ResetPassword(mode) => html! { <ResetPasswordPage mode={mode.clone()} {on_switch} /> },
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let auth = use_context::<AuthContext>();
    let active_page = use_state(|| Page::Dashboard);

    let Some((auth, user)) = auth.and_then(|auth| {
        let user = auth.current_user().cloned()?;
        Some((auth, user))
    }) else {
        return html! { <PublicScreens /> };
    };

    let role = user.role;
    let page = (*active_page).clone().resolve(role);

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |next: Page| active_page.set(next.resolve(role)))
    };

    let on_logout = {
        let active_page = active_page.clone();
        Callback::from(move |_: ()| {
            active_page.set(Page::Dashboard);
            auth.logout();
        })
    };

    let content = match &page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Customers => html! { <CustomersPage on_navigate={on_select.clone()} /> },
        Page::AddCustomer => html! { <AddCustomerPage on_navigate={on_select.clone()} /> },
        Page::CustomerRecords(id) => html! {
            <CustomerRecordsPage key={id.clone()} customer_id={id.clone()} on_navigate={on_select.clone()} />
        },
        Page::Editors => html! { <EditorsPage /> },
        Page::AddEditor => html! { <AddEditorPage on_navigate={on_select.clone()} /> },
        Page::CompletedAccounts => html! { <CompletedAccountsPage on_navigate={on_select.clone()} /> },
        Page::FindDay => html! { <FindDayPage /> },
        Page::AgeCalculator => html! { <AgeCalculatorPage /> },
    };

    html! {
        <Layout role={role} user_name={user.name.clone()} active_page={page} {on_select} {on_logout}>
            { content }
        </Layout>
    }
}

#[function_component(App)]
fn app() -> Html {
    let settings = use_state(load_settings);

    {
        let settings = settings.clone();
        use_effect_with_deps(
            move |settings| {
                apply_theme(settings);
                || ()
            },
            (*settings).clone(),
        );
    }

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <AuthProvider>
                <Shell />
            </AuthProvider>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));
    info!("api at {}", config::API_BASE_URL);
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_light_theme() {
        let parsed: AppSettings = serde_json::from_str("{}").unwrap();
        assert!(!parsed.dark_mode);
        let parsed: AppSettings = serde_json::from_str(r#"{"dark_mode":true}"#).unwrap();
        assert!(parsed.dark_mode);
    }
}
