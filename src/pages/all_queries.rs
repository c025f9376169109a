use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::loading::Loading;
use crate::models::query::{sort_newest_first, Query};
use crate::sync::{CancelGuard, FetchCache};

#[component]
pub fn AllQueriesPage() -> impl IntoView {
    let cache = expect_context::<FetchCache>();
    let (queries, set_queries) = create_signal(Vec::<Query>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let (search, set_search) = create_signal(String::new());
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let result = cache
            .get_or_fetch("/queries", || api::fetch_queries(None))
            .await;
        if guard.is_cancelled() {
            return;
        }
        match result {
            Ok(mut list) => {
                sort_newest_first(&mut list);
                set_queries.set(list);
            }
            Err(err) => set_error.set(Some(format!("Could not load queries: {err}"))),
        }
        set_loading.set(false);
    });

    let visible = create_memo(move |_| {
        let needle = search.get();
        queries.with(|list| {
            list.iter()
                .filter(|q| q.matches_product(&needle))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <main class="all-queries">
            <h1>{ "All Queries" }</h1>
            <input
                class="search"
                type="search"
                placeholder="Search by product name"
                prop:value=move || search.get()
                on:input=move |e| set_search.set(event_target_value(&e))
            />
            {move || error.get().map(|message| view! { <p class="error">{ message }</p> })}
            {move || {
                if loading.get() {
                    return view! { <Loading/> }.into_view();
                }
                let list = visible.get();
                if list.is_empty() {
                    return view! { <p class="empty">{ "No queries match." }</p> }.into_view();
                }
                view! {
                    <div class="query-grid">
                        {list.into_iter().map(|query| view! {
                            <div class="query-card">
                                {(!query.product_image.is_empty()).then(|| view! {
                                    <img src=query.product_image.clone() alt=query.product_name.clone()/>
                                })}
                                <h3>{ query.product_name.clone() }</h3>
                                <p class="brand">{ query.product_brand.clone() }</p>
                                <p>{ query.query_title.clone() }</p>
                                <p class="count">
                                    { format!("{} recommendations", query.recommendation_count) }
                                </p>
                                <A href=format!("/queries/{}", query.id) class="btn">
                                    { "View & Recommend" }
                                </A>
                            </div>
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_view()
            }}
        </main>
    }
}
