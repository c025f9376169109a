use leptos::*;
use leptos_router::A;

use crate::auth::use_auth;
use crate::flash::use_flash;
use crate::theme::{self, Theme};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let theme_signal = expect_context::<RwSignal<Theme>>();

    let sign_out = move |_| {
        auth.sign_out();
        flash.info("Signed out.");
    };

    view! {
        <nav class="navbar">
            <A href="/" class="brand">{ "ProRec" }</A>
            <div class="nav-links">
                <A href="/queries">{ "Queries" }</A>
                {move || auth.user.get().map(|_| view! {
                    <A href="/my-queries">{ "My Queries" }</A>
                    <A href="/reco-for-me">{ "Recommendations For Me" }</A>
                    <A href="/my-recommendations">{ "My Recommendations" }</A>
                })}
            </div>
            <div class="nav-actions">
                <button
                    class="theme-toggle"
                    aria-pressed=move || (theme_signal.get() == Theme::Dark).to_string()
                    on:click=move |_| theme::toggle(theme_signal)
                >
                    {move || match theme_signal.get() {
                        Theme::Light => "Dark mode",
                        Theme::Dark => "Light mode",
                    }}
                </button>
                {move || match auth.user.get() {
                    Some(user) => view! {
                        <div class="nav-user">
                            <A href="/profile">
                                {if user.display_name.is_empty() {
                                    user.email.clone()
                                } else {
                                    user.display_name.clone()
                                }}
                            </A>
                            <button on:click=sign_out>{ "Sign Out" }</button>
                        </div>
                    }.into_view(),
                    None => view! {
                        <A href="/auth/sign-in" class="btn">{ "Sign In" }</A>
                    }.into_view(),
                }}
            </div>
        </nav>
    }
}
