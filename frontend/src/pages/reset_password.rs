use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::{bind, notice_view, Notice, PasswordInput};
use crate::models::validate_new_password;
use crate::pages::login::{auth_card, link_button};
use crate::pages::{INPUT_CLASS, PRIMARY_BUTTON};
use crate::route::{PublicPage, ResetMode};

#[derive(Properties, PartialEq)]
pub struct ResetPasswordProps {
    pub mode: ResetMode,
    pub on_switch: Callback<PublicPage>,
}

/// New password entry. Link resets carry their token; OTP resets ask for the
/// email and code and must verify them before the password field unlocks.
#[function_component(ResetPasswordPage)]
pub fn reset_password_page(props: &ResetPasswordProps) -> Html {
    let email = use_state(String::new);
    let otp = use_state(String::new);
    let otp_verified = use_state(|| false);
    let password = use_state(String::new);
    let notice = use_state(|| None::<Notice>);
    let loading = use_state(|| false);

    let is_otp = props.mode == ResetMode::Otp;

    let on_verify = {
        let email = email.clone();
        let otp = otp.clone();
        let otp_verified = otp_verified.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let address = email.trim().to_string();
            let code = otp.trim().to_string();
            if address.is_empty() || code.is_empty() {
                notice.set(Some(Notice::error("Email and OTP required")));
                return;
            }
            let otp_verified = otp_verified.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::verify_otp(&address, &code).await {
                    Ok(response) if response.success => {
                        otp_verified.set(true);
                        notice.set(Some(Notice::success(
                            "OTP verified! You can now set a new password.",
                        )));
                    }
                    Ok(response) => notice.set(Some(Notice::Error(
                        response.message.unwrap_or_else(|| "Invalid OTP".to_string()),
                    ))),
                    Err(err) => notice.set(Some(Notice::Error(
                        err.user_message("Failed to verify OTP"),
                    ))),
                }
            });
        })
    };

    let on_submit = {
        let email = email.clone();
        let otp = otp.clone();
        let otp_verified = otp_verified.clone();
        let password = password.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let mode = props.mode.clone();
        let on_switch = props.on_switch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(err) = validate_new_password(&password) {
                notice.set(Some(Notice::error(err.to_string())));
                return;
            }
            if mode == ResetMode::Otp && !*otp_verified {
                notice.set(Some(Notice::error("Please verify OTP first")));
                return;
            }

            loading.set(true);
            let mode = mode.clone();
            let address = email.trim().to_string();
            let code = otp.trim().to_string();
            let new_password = (*password).clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let on_switch = on_switch.clone();
            spawn_local(async move {
                let result = match &mode {
                    ResetMode::Otp => api::reset_password_with_otp(&address, &code, &new_password).await,
                    ResetMode::Link(token) => api::reset_password_with_link(token, &new_password).await,
                };
                loading.set(false);
                match result {
                    Ok(()) => {
                        info!("password reset, back to login");
                        on_switch.emit(PublicPage::Login);
                    }
                    Err(err) => notice.set(Some(Notice::Error(err.user_message("Failed")))),
                }
            });
        })
    };

    let locked = is_otp && !*otp_verified;

    auth_card(
        "Reset Password",
        html! {
            <>
                <form class="space-y-4" onsubmit={on_submit}>
                    if is_otp {
                        <>
                        <input
                            type="email"
                            class={INPUT_CLASS}
                            placeholder="Email"
                            value={(*email).clone()}
                            oninput={bind(&email)}
                            disabled={*otp_verified}
                        />
                        <input
                            class={INPUT_CLASS}
                            placeholder="OTP"
                            value={(*otp).clone()}
                            oninput={bind(&otp)}
                            disabled={*otp_verified}
                        />
                        <button
                            type="button"
                            class="w-full bg-green-600 text-white py-2 rounded-lg hover:bg-green-700 disabled:bg-gray-400 disabled:cursor-not-allowed"
                            onclick={on_verify}
                            disabled={*otp_verified}
                        >
                            { if *otp_verified { "Verified" } else { "Verify OTP" } }
                        </button>
                        </>
                    }
                    <PasswordInput
                        value={(*password).clone()}
                        oninput={bind(&password)}
                        placeholder="New Password"
                        disabled={locked}
                    />
                    <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")} disabled={*loading || locked}>
                        { if *loading { "Saving..." } else { "Reset Password" } }
                    </button>
                </form>
                { notice_view(&notice) }
                <div class="mt-6 flex justify-between text-sm">
                    { link_button("Back to Login", &props.on_switch, PublicPage::Login) }
                    { link_button("Forgot Password?", &props.on_switch, PublicPage::ForgotPassword) }
                </div>
            </>
        },
    )
}
