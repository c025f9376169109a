use leptos::*;
use leptos_router::{use_location, Redirect};

use crate::auth::use_auth;
use crate::components::loading::Loading;

/// Gate for signed-in-only routes. While the stored session is still
/// being verified we show a spinner instead of bouncing the user to
/// the sign-in page; once verification finishes, unauthenticated
/// visitors are redirected with the original path preserved.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    view! {
        {move || {
            if auth.loading.get() {
                return view! { <Loading/> }.into_view();
            }
            if auth.user.get().is_some() {
                return children().into_view();
            }
            let from = urlencoding::encode(&location.pathname.get()).into_owned();
            view! { <Redirect path=format!("/auth/sign-in?from={from}")/> }.into_view()
        }}
    }
}
