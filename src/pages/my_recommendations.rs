use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::browser;
use crate::components::comment_thread::CommentThread;
use crate::components::loading::Loading;
use crate::components::recommendation_card::RecommendationCard;
use crate::components::review_panel::ReviewPanel;
use crate::flash::use_flash;
use crate::models::recommendation::Recommendation;
use crate::sync::{optimistic, CancelGuard, FetchCache, InFlight};

#[derive(Clone, Copy, PartialEq)]
enum DetailTab {
    Reviews,
    Comments,
}

/// Recommendations the signed-in user has made on other people's queries.
#[component]
pub fn MyRecommendationsPage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let inflight = expect_context::<InFlight>();

    let recs = create_rw_signal(Vec::<Recommendation>::new());
    let (loading, set_loading) = create_signal(true);
    let selected = create_rw_signal(None::<String>);
    let tab = create_rw_signal(DetailTab::Reviews);
    let guard = CancelGuard::for_current_owner();

    {
        let cache = cache.clone();
        spawn_local(async move {
            let Some(user) = auth.user.get_untracked() else {
                set_loading.set(false);
                return;
            };
            let key = format!("/recommendations?recommenderEmail={}", user.email);
            let result = cache
                .get_or_fetch(&key, || api::fetch_my_recommendations(&user.email))
                .await;
            if guard.is_cancelled() {
                return;
            }
            match result {
                Ok(list) => recs.set(list),
                Err(err) => flash.error(format!("Could not load your recommendations: {err}")),
            }
            set_loading.set(false);
        });
    }

    let delete_rec = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |rec: Recommendation| {
            if !browser::confirm("Delete this recommendation?") {
                return;
            }
            let Some(guard) = inflight.begin(&format!("rec-del:{}", rec.id)) else {
                return;
            };
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let id = rec.id.clone();
                let result = optimistic(
                    recs,
                    {
                        let id = id.clone();
                        move |list: &mut Vec<Recommendation>| list.retain(|r| r.id != id)
                    },
                    api::delete_recommendation(&id),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(()) => {
                        cache.invalidate_prefix("/recommendations");
                        cache.invalidate_prefix("/queries");
                        flash.success("Recommendation deleted.");
                        if let Err(err) = api::adjust_recommendation_count(&rec.query_id, -1).await {
                            flash.error(format!("Could not update the query counter: {err}"));
                        }
                    }
                    Err(err) => flash.error(format!("Could not delete recommendation: {err}")),
                }
            });
        }
    };

    view! {
        <main class="my-recommendations">
            <h1>{ "My Recommendations" }</h1>
            {move || {
                if loading.get() {
                    return view! { <Loading/> }.into_view();
                }
                let list = recs.get();
                if list.is_empty() {
                    return view! {
                        <p class="empty">{ "You have not recommended anything yet." }</p>
                    }
                    .into_view();
                }
                let viewer = auth.user.get().map(|u| u.email);
                let delete_rec = delete_rec.clone();
                list.into_iter()
                    .map(|rec| {
                        let delete_rec = delete_rec.clone();
                        view! {
                            <RecommendationCard
                                rec=rec
                                viewer_email=viewer.clone()
                                on_view=Box::new(move |r: Recommendation| {
                                    tab.set(DetailTab::Reviews);
                                    selected.set(Some(r.id));
                                })
                                on_delete=Box::new(move |r| delete_rec(r))
                            />
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_view()
            }}

            {move || selected.get().map(|rec_id| view! {
                <div class="modal-backdrop" on:click=move |_| selected.set(None)>
                    <div class="modal" on:click=move |ev| ev.stop_propagation()>
                        <button class="close" on:click=move |_| selected.set(None)>{ "×" }</button>
                        <div class="tabs">
                            <button
                                class:active=move || tab.get() == DetailTab::Reviews
                                on:click=move |_| tab.set(DetailTab::Reviews)
                            >{ "Reviews" }</button>
                            <button
                                class:active=move || tab.get() == DetailTab::Comments
                                on:click=move |_| tab.set(DetailTab::Comments)
                            >{ "Comments" }</button>
                        </div>
                        {
                            let rec_id = rec_id.clone();
                            move || match tab.get() {
                                DetailTab::Reviews => view! { <ReviewPanel rec_id=rec_id.clone()/> }.into_view(),
                                DetailTab::Comments => view! { <CommentThread recs=recs rec_id=rec_id.clone()/> }.into_view(),
                            }
                        }
                    </div>
                </div>
            })}
        </main>
    }
}
