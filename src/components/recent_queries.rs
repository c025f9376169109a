use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::query::Query;
use crate::sync::{CancelGuard, FetchCache};

const RECENT_LIMIT: usize = 8;

#[component]
pub fn RecentQueries() -> impl IntoView {
    let cache = expect_context::<FetchCache>();
    let (queries, set_queries) = create_signal(Vec::<Query>::new());
    let (error, set_error) = create_signal(None::<String>);
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let key = format!("/queries/recents?limit={RECENT_LIMIT}");
        let result = cache
            .get_or_fetch(&key, || api::fetch_recent_queries(RECENT_LIMIT))
            .await;
        if guard.is_cancelled() {
            return;
        }
        match result {
            Ok(list) => set_queries.set(list),
            Err(err) => set_error.set(Some(err.to_string())),
        }
    });

    view! {
        <section class="recent-queries">
            <h2>{ "Recent Queries" }</h2>
            {move || error.get().map(|message| view! { <p class="error">{ message }</p> })}
            <div class="query-grid">
                {move || queries.get().into_iter().map(|query| view! {
                    <div class="query-card">
                        {(!query.product_image.is_empty()).then(|| view! {
                            <img src=query.product_image.clone() alt=query.product_name.clone()/>
                        })}
                        <h3>{ query.product_name.clone() }</h3>
                        <p>{ query.query_title.clone() }</p>
                        <p class="count">{ format!("{} recommendations", query.recommendation_count) }</p>
                        <A href=format!("/queries/{}", query.id) class="btn">{ "Recommend" }</A>
                    </div>
                }).collect::<Vec<_>>()}
            </div>
        </section>
    }
}
