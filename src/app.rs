use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use crate::auth::AuthContext;
use crate::components::navbar::Navbar;
use crate::flash::{provide_flash, FlashOutlet};
use crate::pages::add_query::AddQueryPage;
use crate::pages::all_queries::AllQueriesPage;
use crate::pages::home::HomePage;
use crate::pages::my_queries::MyQueriesPage;
use crate::pages::my_recommendations::MyRecommendationsPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::profile::ProfilePage;
use crate::pages::query_details::QueryDetailsPage;
use crate::pages::reco_for_me::RecoForMePage;
use crate::pages::sign_in::SignInPage;
use crate::pages::sign_up::SignUpPage;
use crate::pages::update_query::UpdateQueryPage;
use crate::routes::RequireAuth;
use crate::sync::{FetchCache, InFlight};
use crate::theme;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new();
    provide_context(auth);
    provide_context(FetchCache::new());
    provide_context(InFlight::new());
    provide_flash();
    theme::init();

    spawn_local(async move { auth.restore().await });

    view! {
        <Title text="ProRec"/>
        <Router>
            <Navbar/>
            <FlashOutlet/>
            <Routes>
                <Route path="/" view=HomePage/>
                <Route path="/queries" view=AllQueriesPage/>
                <Route path="/queries/:id" view=|| view! {
                    <RequireAuth>
                        <QueryDetailsPage/>
                    </RequireAuth>
                }/>
                <Route path="/add-query" view=|| view! {
                    <RequireAuth>
                        <AddQueryPage/>
                    </RequireAuth>
                }/>
                <Route path="/my-queries" view=|| view! {
                    <RequireAuth>
                        <MyQueriesPage/>
                    </RequireAuth>
                }/>
                <Route path="/update-query/:id" view=|| view! {
                    <RequireAuth>
                        <UpdateQueryPage/>
                    </RequireAuth>
                }/>
                <Route path="/reco-for-me" view=|| view! {
                    <RequireAuth>
                        <RecoForMePage/>
                    </RequireAuth>
                }/>
                <Route path="/my-recommendations" view=|| view! {
                    <RequireAuth>
                        <MyRecommendationsPage/>
                    </RequireAuth>
                }/>
                <Route path="/profile" view=|| view! {
                    <RequireAuth>
                        <ProfilePage/>
                    </RequireAuth>
                }/>
                <Route path="/auth/sign-in" view=SignInPage/>
                <Route path="/auth/sign-up" view=SignUpPage/>
                <Route path="/*any" view=NotFoundPage/>
            </Routes>
        </Router>
    }
}
