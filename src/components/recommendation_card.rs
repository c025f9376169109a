use leptos::*;

use crate::models::recommendation::Recommendation;

/// One recommendation in a list. Like and delete handlers are optional:
/// without a like handler the count is shown as plain text, without a
/// delete handler the button is absent.
#[component]
pub fn RecommendationCard(
    rec: Recommendation,
    viewer_email: Option<String>,
    #[prop(optional)] on_like: Option<Box<dyn Fn(String)>>,
    on_view: Box<dyn Fn(Recommendation)>,
    #[prop(optional)] on_delete: Option<Box<dyn Fn(Recommendation)>>,
) -> impl IntoView {
    let liked = viewer_email
        .as_deref()
        .map(|email| rec.is_liked_by(email))
        .unwrap_or(false);
    let like_count = rec.like_count();
    let like_id = rec.id.clone();
    let view_rec = rec.clone();
    let delete_rec = rec.clone();

    view! {
        <div class="recommendation-card">
            <div class="rec-header">
                {(!rec.recommender_photo.is_empty()).then(|| view! {
                    <img src=rec.recommender_photo.clone() alt=rec.recommender_name.clone()/>
                })}
                <div>
                    <h3>{ rec.recommendation_title.clone() }</h3>
                    <p class="byline">
                        { format!("By {} on {}", rec.recommender_name, rec.timestamp.format("%b %e, %Y")) }
                    </p>
                </div>
            </div>
            <p><strong>{ "Product: " }</strong>{ rec.product_name.clone() }</p>
            <p><strong>{ "Query: " }</strong>{ rec.query_title.clone() }</p>
            <div class="rec-actions">
                <button on:click=move |_| on_view(view_rec.clone())>{ "View" }</button>
                {match on_like {
                    Some(handler) => view! {
                        <button
                            class="like"
                            class:liked=liked
                            on:click=move |_| handler(like_id.clone())
                        >
                            { format!("♥ {like_count}") }
                        </button>
                    }.into_view(),
                    None => view! {
                        <span class="like" class:liked=liked>
                            { format!("♥ {like_count}") }
                        </span>
                    }.into_view(),
                }}
                {on_delete.map(|handler| view! {
                    <button class="danger" on:click=move |_| handler(delete_rec.clone())>
                        { "Delete" }
                    </button>
                })}
            </div>
        </div>
    }
}
