use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::browser;
use crate::components::loading::Loading;
use crate::flash::use_flash;
use crate::models::query::{sort_newest_first, Query};
use crate::sync::{optimistic, CancelGuard, FetchCache, InFlight};

#[component]
pub fn MyQueriesPage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let inflight = expect_context::<InFlight>();

    let queries = create_rw_signal(Vec::<Query>::new());
    let (loading, set_loading) = create_signal(true);
    let guard = CancelGuard::for_current_owner();

    {
        let cache = cache.clone();
        spawn_local(async move {
            let Some(user) = auth.user.get_untracked() else {
                set_loading.set(false);
                return;
            };
            let key = format!("/queries?email={}", user.email);
            let result = cache
                .get_or_fetch(&key, || api::fetch_queries(Some(&user.email)))
                .await;
            if guard.is_cancelled() {
                return;
            }
            match result {
                Ok(mut list) => {
                    sort_newest_first(&mut list);
                    queries.set(list);
                }
                Err(err) => flash.error(format!("Could not load your queries: {err}")),
            }
            set_loading.set(false);
        });
    }

    let delete_query = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |query: Query| {
            if !browser::confirm("Delete this query and all its recommendations?") {
                return;
            }
            let Some(guard) = inflight.begin(&format!("query-del:{}", query.id)) else {
                return;
            };
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let id = query.id.clone();
                let result = optimistic(
                    queries,
                    {
                        let id = id.clone();
                        move |list: &mut Vec<Query>| list.retain(|q| q.id != id)
                    },
                    api::delete_query(&id),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(()) => {
                        cache.invalidate_prefix("/queries");
                        flash.success("Query deleted.");
                    }
                    Err(err) => flash.error(format!("Could not delete query: {err}")),
                }
            });
        }
    };

    view! {
        <main class="my-queries">
            <h1>{ "My Queries" }</h1>
            {move || {
                if loading.get() {
                    return view! { <Loading/> }.into_view();
                }
                let list = queries.get();
                if list.is_empty() {
                    return view! {
                        <p class="empty">
                            { "You have not posted any queries yet. " }
                            <A href="/add-query">{ "Ask about a product" }</A>
                        </p>
                    }
                    .into_view();
                }
                let delete_query = delete_query.clone();
                view! {
                    <div class="query-grid">
                        {list.into_iter().map(|query| {
                            let delete_query = delete_query.clone();
                            let target = query.clone();
                            view! {
                                <div class="query-card">
                                    {(!query.product_image.is_empty()).then(|| view! {
                                        <img src=query.product_image.clone() alt=query.product_name.clone()/>
                                    })}
                                    <h3>{ query.product_name.clone() }</h3>
                                    <p>{ query.query_title.clone() }</p>
                                    <p class="count">
                                        { format!("{} recommendations", query.recommendation_count) }
                                    </p>
                                    <div class="card-actions">
                                        <A href=format!("/queries/{}", query.id) class="btn">{ "View" }</A>
                                        <A href=format!("/update-query/{}", query.id) class="btn">{ "Edit" }</A>
                                        <button class="danger" on:click=move |_| delete_query(target.clone())>
                                            { "Delete" }
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_view()
            }}
        </main>
    }
}
