use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::AuthContext;
use crate::components::{bind, notice_view, Notice, PasswordInput};
use crate::models::{validate_login, Credentials, RecoveryMethod};
use crate::pages::{INPUT_CLASS, PRIMARY_BUTTON};
use crate::route::{PublicPage, ResetMode};

#[derive(Properties, PartialEq)]
pub struct PublicProps {
    pub on_switch: Callback<PublicPage>,
}

pub(crate) fn auth_card(title: &str, body: Html) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background p-4">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <h1 class="text-2xl font-bold text-foreground text-center mb-6">{ title.to_string() }</h1>
                { body }
            </div>
        </div>
    }
}

pub(crate) fn link_button(label: &'static str, on_switch: &Callback<PublicPage>, target: PublicPage) -> Html {
    let onclick = on_switch.reform(move |_: MouseEvent| target.clone());
    html! {
        <button type="button" class="text-primary font-semibold hover:underline" {onclick}>{ label }</button>
    }
}

#[function_component(LoginPage)]
pub fn login_page(props: &PublicProps) -> Html {
    let auth = use_context::<AuthContext>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let notice = use_state(|| None::<Notice>);
    let loading = use_state(|| false);
    let Some(auth) = auth else {
        return html! {};
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(err) = validate_login(&email, &password) {
                notice.set(Some(Notice::error(err.to_string())));
                return;
            }

            let credentials = Credentials {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            loading.set(true);
            notice.set(None);

            let auth = auth.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            spawn_local(async move {
                let outcome = match api::login(&credentials).await {
                    Ok(response) => auth
                        .login(response.token)
                        .map(|claims| info!("welcome {}", claims.name))
                        .map_err(|err| err.to_string()),
                    Err(err) => Err(err.user_message("Login failed")),
                };
                if let Err(message) = outcome {
                    notice.set(Some(Notice::Error(message)));
                }
                loading.set(false);
            });
        })
    };

    auth_card(
        "Login",
        html! {
            <>
                <form class="space-y-4" onsubmit={on_submit}>
                    <input
                        type="email"
                        class={INPUT_CLASS}
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={bind(&email)}
                    />
                    <PasswordInput value={(*password).clone()} oninput={bind(&password)} />
                    <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")} disabled={*loading}>
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>
                { notice_view(&notice) }
                <div class="mt-6 text-center text-sm">
                    { link_button("Forgot Password?", &props.on_switch, PublicPage::ForgotPassword) }
                </div>
            </>
        },
    )
}

#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page(props: &PublicProps) -> Html {
    let email = use_state(String::new);
    let notice = use_state(|| None::<Notice>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let on_switch = props.on_switch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let address = email.trim().to_string();
            if address.is_empty() {
                notice.set(Some(Notice::error("Email is required")));
                return;
            }
            loading.set(true);
            notice.set(None);

            let email = email.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let on_switch = on_switch.clone();
            spawn_local(async move {
                match api::forgot_password(&address).await {
                    Ok(response) => match response.method() {
                        RecoveryMethod::Link => {
                            notice.set(Some(Notice::success("Check your email for a reset link.")));
                            email.set(String::new());
                        }
                        RecoveryMethod::Otp => {
                            info!("otp issued, switching to otp reset");
                            on_switch.emit(PublicPage::ResetPassword(ResetMode::Otp));
                        }
                        RecoveryMethod::Unsupported(message) => {
                            notice.set(Some(Notice::Error(message)));
                        }
                    },
                    Err(err) => notice.set(Some(Notice::Error(err.user_message("Failed")))),
                }
                loading.set(false);
            });
        })
    };

    auth_card(
        "Forgot Password",
        html! {
            <>
                <form class="space-y-4" onsubmit={on_submit}>
                    <input
                        type="email"
                        class={INPUT_CLASS}
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={bind(&email)}
                    />
                    <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")} disabled={*loading}>
                        { if *loading { "Sending..." } else { "Send OTP / Reset Link" } }
                    </button>
                </form>
                { notice_view(&notice) }
                <div class="mt-6 flex justify-between text-sm">
                    { link_button("Back to Login", &props.on_switch, PublicPage::Login) }
                    { link_button("I have an OTP", &props.on_switch, PublicPage::ResetPassword(ResetMode::Otp)) }
                </div>
            </>
        },
    )
}
