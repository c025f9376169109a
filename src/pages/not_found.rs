use leptos::*;
use leptos_router::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found">
            <h1>{ "404" }</h1>
            <p>{ "This page does not exist." }</p>
            <A href="/" class="btn">{ "Back to home" }</A>
        </main>
    }
}
