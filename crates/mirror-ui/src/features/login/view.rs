use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::{AppStore, update_store};
use crate::features::login::actions::submit_login;
use crate::features::login::state::LoginForm;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_selector;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let form = use_selector(|store: &AppStore| store.login.clone());

    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="error-text">{"Missing API context."}</p>
            </div>
        };
    };

    let on_username = field_setter(|form, value| form.username = value);
    let on_password = field_setter(|form, value| form.password = value);
    let on_submit = {
        let client = api_ctx.client;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(Some(form)) = update_store(|store| {
                if store.login.submitting {
                    return None;
                }
                store.login.submitting = true;
                Some(store.login.clone())
            }) else {
                return;
            };
            let client = client.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let result = submit_login(&client, &form).await;
                let signed_in = update_store(|store| {
                    store.login.submitting = false;
                    match result {
                        Ok(token) => {
                            store.session.sign_in(&token);
                            store.login = LoginForm::default();
                            store.success("Logged in");
                            true
                        }
                        Err(err) => {
                            store.error(format!("Login failed: {err}"));
                            false
                        }
                    }
                });
                if signed_in == Some(true) {
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::Admin);
                    }
                }
            });
        })
    };

    html! {
        <section class="login">
            <form class="panel login-card" onsubmit={on_submit}>
                <h2>{"Admin login"}</h2>
                <label class="field">
                    <span>{"Username"}</span>
                    <input
                        autocomplete="username"
                        value={form.username.clone()}
                        oninput={on_username}
                        required=true
                    />
                </label>
                <label class="field">
                    <span>{"Password"}</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={form.password.clone()}
                        oninput={on_password}
                        required=true
                    />
                </label>
                <button type="submit" class="solid" disabled={form.submitting}>
                    {if form.submitting { "Signing in…" } else { "Log in" }}
                </button>
            </form>
        </section>
    }
}

fn field_setter(apply: fn(&mut LoginForm, String)) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            update_store(|store| apply(&mut store.login, input.value()));
        }
    })
}
