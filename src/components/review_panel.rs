use chrono::Utc;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::flash::use_flash;
use crate::models::review::{has_reviewed, Review, ReviewDraft};
use crate::sync::CancelGuard;

/// Reviews for one recommendation: the list plus a one-per-user form.
/// Used inside the preview modals.
#[component]
pub fn ReviewPanel(rec_id: String) -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();

    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (submitting, set_submitting) = create_signal(false);
    let draft = create_rw_signal(ReviewDraft::default());
    let guard = CancelGuard::for_current_owner();

    let load = {
        let rec_id = rec_id.clone();
        let guard = guard.clone();
        move || {
            let rec_id = rec_id.clone();
            let guard = guard.clone();
            spawn_local(async move {
                let result = api::fetch_reviews_for_recommendation(&rec_id).await;
                if guard.is_cancelled() {
                    return;
                }
                match result {
                    Ok(list) => set_reviews.set(list),
                    Err(_) => set_reviews.set(Vec::new()),
                }
            });
        }
    };
    load();

    let already_reviewed = move || {
        auth.user
            .get()
            .map(|u| has_reviewed(&reviews.get(), &u.email))
            .unwrap_or(false)
    };

    let submit_review = {
        let rec_id = rec_id.clone();
        let load = load.clone();
        move |_| {
            let Some(user) = auth.user.get_untracked() else {
                return;
            };
            let current = draft.get_untracked();
            let problems = current.validate();
            if let Some(first) = problems.first() {
                flash.error(*first);
                return;
            }
            set_submitting.set(true);

            let review = Review {
                id: String::new(),
                recommendation_id: rec_id.clone(),
                rating: current.rating.unwrap_or(0),
                review_text: current.text.trim().to_string(),
                reviewer_name: if user.display_name.is_empty() {
                    user.email.clone()
                } else {
                    user.display_name.clone()
                },
                reviewer_email: user.email.clone(),
                reviewer_photo: user.photo_url.clone(),
                created_at: Utc::now(),
            };
            let load = load.clone();
            spawn_local(async move {
                match api::create_review(&review).await {
                    Ok(_) => {
                        flash.success("Review added.");
                        draft.set(ReviewDraft::default());
                        load();
                    }
                    Err(err) => flash.error(format!("Could not submit review: {err}")),
                }
                set_submitting.set(false);
            });
        }
    };

    view! {
        <div class="review-panel">
            <h4>{ "Reviews" }</h4>
            {move || {
                let list = reviews.get();
                if list.is_empty() {
                    view! { <p class="empty">{ "No reviews yet." }</p> }.into_view()
                } else {
                    view! {
                        <ul class="reviews">
                            {list.into_iter().map(|review| view! {
                                <li class="review">
                                    <p class="review-author">{ review.reviewer_name.clone() }</p>
                                    <p class="review-stars">
                                        {(1..=5).map(|star| {
                                            let filled = star <= review.rating;
                                            view! { <span class:filled=filled>{ "★" }</span> }
                                        }).collect::<Vec<_>>()}
                                    </p>
                                    <p class="review-text">{ review.review_text.clone() }</p>
                                    <p class="review-date">
                                        { review.created_at.format("%b %e, %Y").to_string() }
                                    </p>
                                </li>
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_view()
                }
            }}

            {move || {
                if auth.user.get().is_none() {
                    return None;
                }
                if already_reviewed() {
                    return Some(view! {
                        <p class="reviewed-note">{ "You have already reviewed this recommendation." }</p>
                    }.into_view());
                }
                Some(view! {
                    <div class="review-form">
                        <div class="rating-picker">
                            {(1..=5u8).map(|value| view! {
                                <label>
                                    <input
                                        type="radio"
                                        name="rating"
                                        prop:checked=move || draft.with(|d| d.rating == Some(value))
                                        on:change=move |_| draft.update(|d| d.rating = Some(value))
                                    />
                                    { format!("{value}") }
                                </label>
                            }).collect::<Vec<_>>()}
                        </div>
                        <textarea
                            placeholder="Write your review"
                            prop:value=move || draft.with(|d| d.text.clone())
                            on:input=move |e| draft.update(|d| d.text = event_target_value(&e))
                        />
                        <button
                            prop:disabled=move || submitting.get()
                            on:click=submit_review.clone()
                        >
                            {move || if submitting.get() { "Submitting..." } else { "Submit Review" }}
                        </button>
                    </div>
                }.into_view())
            }}
        </div>
    }
}
