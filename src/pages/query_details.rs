use chrono::Utc;
use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::use_params_map;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::comment_thread::CommentThread;
use crate::components::loading::Loading;
use crate::components::recommendation_card::RecommendationCard;
use crate::components::review_panel::ReviewPanel;
use crate::flash::use_flash;
use crate::models::query::Query;
use crate::models::recommendation::{Recommendation, RecommendationDraft};
use crate::sync::{optimistic, CancelGuard, FetchCache, InFlight};
use crate::upload;

#[component]
pub fn QueryDetailsPage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let inflight = expect_context::<InFlight>();

    let params = use_params_map();
    let query_id =
        create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let (query, set_query) = create_signal(None::<Query>);
    let recs = create_rw_signal(Vec::<Recommendation>::new());
    let (loading, set_loading) = create_signal(true);
    let (failed, set_failed) = create_signal(false);
    // id of the recommendation opened in the detail panel
    let expanded = create_rw_signal(None::<String>);
    let guard = CancelGuard::for_current_owner();

    // Refetches whenever the route id changes; the router reuses this
    // component for same-pattern navigations, so a remount is not
    // guaranteed. A response belonging to an id the route has left
    // behind is dropped.
    {
        let cache = cache.clone();
        let guard = guard.clone();
        create_effect(move |_| {
            let id = query_id.get();
            set_loading.set(true);
            set_failed.set(false);
            expanded.set(None);

            let cache = cache.clone();
            let guard = guard.clone();
            spawn_local(async move {
                let fetched_query = api::fetch_query(&id).await;
                let key = format!("/recommendations?queryId={id}");
                let fetched_recs = cache
                    .get_or_fetch(&key, || api::fetch_recommendations_for_query(&id))
                    .await;
                if guard.is_cancelled() || query_id.get_untracked() != id {
                    return;
                }
                match fetched_query {
                    Ok(found) => set_query.set(Some(found)),
                    Err(_) => set_failed.set(true),
                }
                if let Ok(list) = fetched_recs {
                    recs.set(list);
                }
                set_loading.set(false);
            });
        });
    }

    let toggle_like = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |rec_id: String| {
            let Some(user) = auth.user.get_untracked() else {
                flash.info("Sign in to like recommendations.");
                return;
            };
            let Some(guard) = inflight.begin(&format!("like:{rec_id}")) else {
                return;
            };
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let email = user.email.clone();
                let result = optimistic(
                    recs,
                    {
                        let rec_id = rec_id.clone();
                        let email = email.clone();
                        move |list: &mut Vec<Recommendation>| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                r.toggle_like(&email);
                            }
                        }
                    },
                    api::toggle_like(&rec_id, &email),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(()) => cache.invalidate_prefix("/recommendations"),
                    Err(err) => flash.error(format!("Could not update like: {err}")),
                }
            });
        }
    };

    // recommendation form state
    let draft = create_rw_signal(RecommendationDraft::default());
    let image_file = create_rw_signal(None::<web_sys::File>);
    let (problems, set_problems) = create_signal(Vec::<&'static str>::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_file_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let file = input.files().and_then(|list| list.get(0));
        if file.is_some() {
            draft.update(|d| {
                d.product_image.clear();
                d.has_image_file = true;
            });
        }
        image_file.set(file);
    };

    let submit_recommendation = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let query_id = query_id.get_untracked();
            let Some(user) = auth.user.get_untracked() else {
                flash.info("Sign in to recommend an alternative.");
                return;
            };
            let Some(owner) = query.get_untracked() else {
                return;
            };
            let current = draft.get_untracked();
            let found = current.validate();
            if !found.is_empty() {
                set_problems.set(found);
                return;
            }
            set_problems.set(Vec::new());
            let Some(guard) = inflight.begin(&format!("rec-add:{query_id}")) else {
                return;
            };
            set_submitting.set(true);

            let query_id = query_id.clone();
            let cache = cache.clone();
            let file = image_file.get_untracked();
            spawn_local(async move {
                let _guard = guard;
                let image_url = match file {
                    Some(file) => match upload::upload_image(&file).await {
                        Ok(url) => url,
                        Err(err) => {
                            flash.error(format!("Image upload failed: {err}"));
                            set_submitting.set(false);
                            return;
                        }
                    },
                    None => current.product_image.clone(),
                };

                let rec = Recommendation {
                    id: String::new(),
                    query_id: query_id.clone(),
                    query_title: owner.query_title.clone(),
                    product_name: current.product_name.trim().to_string(),
                    product_image: image_url,
                    recommendation_title: current.title.trim().to_string(),
                    recommendation_reason: current.reason.trim().to_string(),
                    user_email: owner.user_email.clone(),
                    user_name: owner.user_name.clone(),
                    recommender_email: user.email.clone(),
                    recommender_name: if user.display_name.is_empty() {
                        user.email.clone()
                    } else {
                        user.display_name.clone()
                    },
                    recommender_photo: user.photo_url.clone(),
                    timestamp: Utc::now(),
                    likes: Vec::new(),
                    comments: Vec::new(),
                };

                let local = rec.clone();
                let result = optimistic(
                    recs,
                    move |list: &mut Vec<Recommendation>| list.insert(0, local),
                    api::create_recommendation(&rec),
                    |list: &mut Vec<Recommendation>, inserted: &api::InsertedId| {
                        if let Some(pending) = list.iter_mut().find(|r| r.id.is_empty()) {
                            pending.id = inserted.inserted_id.clone();
                        }
                    },
                )
                .await;
                match result {
                    Ok(_) => {
                        draft.set(RecommendationDraft::default());
                        image_file.set(None);
                        set_query.update(|q| {
                            if let Some(q) = q {
                                q.recommendation_count += 1;
                            }
                        });
                        cache.invalidate_prefix("/recommendations");
                        cache.invalidate_prefix("/queries");
                        flash.success("Recommendation added.");
                        if let Err(err) = api::adjust_recommendation_count(&query_id, 1).await {
                            flash.error(format!("Could not update the query counter: {err}"));
                        }
                    }
                    Err(err) => flash.error(format!("Could not add recommendation: {err}")),
                }
                set_submitting.set(false);
            });
        }
    };

    view! {
        <main class="query-details">
            {move || {
                if failed.get() {
                    return view! { <p class="error">{ "Query not found." }</p> }.into_view();
                }
                match query.get() {
                    None => view! { <Loading/> }.into_view(),
                    Some(found) => view! {
                        <section class="query-summary">
                            {(!found.product_image.is_empty()).then(|| view! {
                                <img src=found.product_image.clone() alt=found.product_name.clone()/>
                            })}
                            <h1>{ found.query_title.clone() }</h1>
                            <p><strong>{ "Product: " }</strong>{ found.product_name.clone() }</p>
                            <p><strong>{ "Brand: " }</strong>{ found.product_brand.clone() }</p>
                            <p class="reason">{ found.boycott_reason.clone() }</p>
                            <p class="byline">
                                { format!("Asked by {} on {}", found.user_name, found.timestamp.format("%b %e, %Y")) }
                            </p>
                        </section>
                    }.into_view(),
                }
            }}

            <section class="recommendations">
                <h2>{move || format!("Recommendations ({})", recs.with(|l| l.len()))}</h2>
                {move || {
                    if loading.get() {
                        return view! { <Loading/> }.into_view();
                    }
                    let list = recs.get();
                    if list.is_empty() {
                        return view! {
                            <p class="empty">{ "No recommendations yet. Be the first!" }</p>
                        }
                        .into_view();
                    }
                    let viewer = auth.user.get().map(|u| u.email);
                    let toggle_like = toggle_like.clone();
                    list.into_iter()
                        .map(|rec| {
                            let toggle_like = toggle_like.clone();
                            let rec_id = rec.id.clone();
                            let open = expanded.get().as_deref() == Some(rec_id.as_str());
                            view! {
                                <div class="rec-entry">
                                    <RecommendationCard
                                        rec=rec
                                        viewer_email=viewer.clone()
                                        on_like=Box::new(move |id| toggle_like(id))
                                        on_view=Box::new(move |r: Recommendation| {
                                            expanded.update(|e| {
                                                if e.as_deref() == Some(r.id.as_str()) {
                                                    *e = None;
                                                } else {
                                                    *e = Some(r.id);
                                                }
                                            });
                                        })
                                    />
                                    {open.then(|| view! {
                                        <div class="rec-detail">
                                            <CommentThread recs=recs rec_id=rec_id.clone()/>
                                            <ReviewPanel rec_id=rec_id.clone()/>
                                        </div>
                                    })}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_view()
                }}
            </section>

            {move || auth.user.get().map(|_| view! {
                <section class="recommend-form">
                    <h2>{ "Recommend an Alternative" }</h2>
                    <form on:submit=submit_recommendation.clone()>
                        <input
                            type="text"
                            placeholder="Recommendation title"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |e| draft.update(|d| d.title = event_target_value(&e))
                        />
                        <input
                            type="text"
                            placeholder="Alternative product name"
                            prop:value=move || draft.with(|d| d.product_name.clone())
                            on:input=move |e| draft.update(|d| d.product_name = event_target_value(&e))
                        />
                        <textarea
                            placeholder="Why is it a good alternative?"
                            prop:value=move || draft.with(|d| d.reason.clone())
                            on:input=move |e| draft.update(|d| d.reason = event_target_value(&e))
                        />
                        <input
                            type="url"
                            placeholder="Image URL (optional)"
                            prop:value=move || draft.with(|d| d.product_image.clone())
                            prop:disabled=move || image_file.with(|f| f.is_some())
                            on:input=move |e| draft.update(|d| d.product_image = event_target_value(&e))
                        />
                        <input type="file" accept="image/*" on:change=on_file_change/>
                        {move || {
                            let list = problems.get();
                            (!list.is_empty()).then(|| view! {
                                <ul class="form-errors">
                                    {list.into_iter().map(|p| view! { <li>{ p }</li> }).collect::<Vec<_>>()}
                                </ul>
                            })
                        }}
                        <button type="submit" prop:disabled=move || submitting.get()>
                            {move || if submitting.get() { "Submitting..." } else { "Submit Recommendation" }}
                        </button>
                    </form>
                </section>
            })}
        </main>
    }
}
