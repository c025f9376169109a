use leptos::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading-indicator" role="status">
            <span class="spinner"></span>
            <p>{ "Loading..." }</p>
        </div>
    }
}
