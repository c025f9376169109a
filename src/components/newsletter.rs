use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;

#[component]
pub fn Newsletter() -> impl IntoView {
    let auth = use_auth();
    let (email, set_email) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(false);

    // Prefill with the signed-in address the first time the field is used.
    let on_focus = move |_| {
        if email.get_untracked().is_empty() {
            if let Some(user) = auth.user.get_untracked() {
                set_email.set(user.email);
            }
        }
    };

    let subscribe = move |_| {
        let address = email.get_untracked().trim().to_string();
        if address.is_empty() {
            set_message.set(Some("Please enter a valid email.".into()));
            return;
        }
        set_busy.set(true);
        set_message.set(None);
        spawn_local(async move {
            match api::subscribe_newsletter(&address).await {
                Ok(response) => {
                    let text = if response.message.is_empty() {
                        "Subscribed!".to_string()
                    } else {
                        response.message
                    };
                    set_message.set(Some(text));
                    set_email.set(String::new());
                }
                Err(_) => {
                    set_message.set(Some("Failed to subscribe. Please try again later.".into()))
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="newsletter">
            <h2>{ "Stay in the loop" }</h2>
            <p>{ "Get new boycott queries and top alternatives in your inbox." }</p>
            <div class="newsletter-form">
                <input
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:focus=on_focus
                    on:input=move |e| set_email.set(event_target_value(&e))
                />
                <button prop:disabled=move || busy.get() on:click=subscribe>
                    {move || if busy.get() { "Subscribing..." } else { "Subscribe" }}
                </button>
            </div>
            {move || message.get().map(|text| view! { <p class="newsletter-message">{ text }</p> })}
        </section>
    }
}
