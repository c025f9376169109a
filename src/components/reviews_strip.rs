use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::review::Review;
use crate::sync::{CancelGuard, FetchCache};

const STRIP_LIMIT: usize = 6;

/// Latest reviews from across the site, shown on the home page.
#[component]
pub fn ReviewsStrip() -> impl IntoView {
    let cache = expect_context::<FetchCache>();
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let result = cache.get_or_fetch("/reviews", api::fetch_all_reviews).await;
        if guard.is_cancelled() {
            return;
        }
        if let Ok(mut list) = result {
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list.truncate(STRIP_LIMIT);
            set_reviews.set(list);
        }
    });

    view! {
        <section class="reviews-strip">
            <h2>{ "What people are saying" }</h2>
            {move || {
                let list = reviews.get();
                if list.is_empty() {
                    view! { <p class="empty">{ "No reviews yet." }</p> }.into_view()
                } else {
                    view! {
                        <div class="reviews-row">
                            {list.into_iter().map(|review| view! {
                                <div class="review-card">
                                    <p class="review-stars">
                                        {(1..=5).map(|star| {
                                            let filled = star <= review.rating;
                                            view! { <span class:filled=filled>{ "★" }</span> }
                                        }).collect::<Vec<_>>()}
                                    </p>
                                    <p class="review-text">{ review.review_text.clone() }</p>
                                    <p class="review-author">{ review.reviewer_name.clone() }</p>
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}
