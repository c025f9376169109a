use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::recommendation::Recommendation;
use crate::sync::{CancelGuard, FetchCache};

const TOP_LIMIT: usize = 6;

/// Most-liked recommendations across the whole site.
#[component]
pub fn TopRated() -> impl IntoView {
    let cache = expect_context::<FetchCache>();
    let (top, set_top) = create_signal(Vec::<Recommendation>::new());
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let result = cache
            .get_or_fetch("/recommendations", api::fetch_all_recommendations)
            .await;
        if guard.is_cancelled() {
            return;
        }
        if let Ok(mut list) = result {
            list.sort_by(|a, b| b.like_count().cmp(&a.like_count()));
            list.truncate(TOP_LIMIT);
            set_top.set(list);
        }
    });

    view! {
        <section class="top-rated">
            <h2>{ "Top Rated Alternatives" }</h2>
            {move || {
                let list = top.get();
                if list.is_empty() {
                    view! { <p class="empty">{ "No recommendations yet." }</p> }.into_view()
                } else {
                    view! {
                        <div class="top-grid">
                            {list.into_iter().map(|rec| view! {
                                <div class="top-card">
                                    {(!rec.product_image.is_empty()).then(|| view! {
                                        <img src=rec.product_image.clone() alt=rec.product_name.clone()/>
                                    })}
                                    <h3>{ rec.product_name.clone() }</h3>
                                    <p class="top-title">{ rec.recommendation_title.clone() }</p>
                                    <p class="likes">{ format!("♥ {}", rec.like_count()) }</p>
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}
