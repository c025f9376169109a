use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::{use_navigate, use_query_map, A};
use wasm_bindgen_futures::spawn_local;

use crate::auth::use_auth;
use crate::flash::use_flash;

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let navigate = use_navigate();
    let query = use_query_map();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (busy, set_busy) = create_signal(false);

    let destination = move || {
        query.with_untracked(|q| {
            q.get("from")
                .cloned()
                .filter(|from| from.starts_with('/'))
                .unwrap_or_else(|| "/".to_string())
        })
    };

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked().trim().to_string();
        let secret = password.get_untracked();
        if address.is_empty() || secret.is_empty() {
            flash.error("Email and password are required.");
            return;
        }
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.sign_in(&address, &secret).await {
                Ok(_) => {
                    flash.success("Signed in.");
                    navigate(&destination(), Default::default());
                }
                Err(err) => flash.error(err.to_string()),
            }
            set_busy.set(false);
        });
    };

    view! {
        <main class="auth-page">
            <h1>{ "Sign In" }</h1>
            <form on:submit=submit>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |e| set_email.set(event_target_value(&e))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |e| set_password.set(event_target_value(&e))
                />
                <button type="submit" prop:disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <button class="federated" on:click=move |_| auth.begin_federated_sign_in()>
                { "Continue with Google" }
            </button>
            <p>
                { "No account yet? " }
                <A href="/auth/sign-up">{ "Sign up" }</A>
            </p>
        </main>
    }
}
